//! Command-line definition and option handling
//!
//! Builds the clap command and turns its matches into an
//! `ExtractionConfig`: the optional TOML file is read first, then any flag
//! given on the command line overrides the matching setting.

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use log::info;

use crate::config::ExtractionConfig;
use crate::errors::{SpriteError, SpriteResult};
use crate::extractor::{SampleArea, StrategyKind};
use crate::raster::Rgb;

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "sprites";

/// Build the clap command for the `spritekit` binary
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("SpriteKit")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Extract individual sprites from a sprite sheet")
        .arg(
            Arg::new("input")
                .help("Input sprite sheet (PNG, GIF, ...)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory for sprites and CSS")
                .value_name("DIR")
                .default_value(DEFAULT_OUTPUT_DIR),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("tolerance")
                .short('t')
                .long("tolerance")
                .help("Maximum per-channel difference still treated as background")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("background")
                .long("background")
                .help("Background color as #RRGGBB (detected when omitted)")
                .value_name("COLOR")
                .required(false),
        )
        .arg(
            Arg::new("min-size")
                .long("min-size")
                .help("Smallest accepted sprite width and height")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("max-size")
                .long("max-size")
                .help("Largest accepted sprite width and height")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("min-fill")
                .long("min-fill")
                .help("Smallest accepted share of sprite pixels in the bounding box (0-1)")
                .value_name("RATIO")
                .required(false),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .help("Detection strategy (flood, rows, manual)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("corners")
                .long("corners")
                .help("Detect the background from NxN corner patches only")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("detect")
                .long("detect")
                .help("Only report the background and sprite regions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .help("Also write an HTML preview page")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}

fn parse_number<T: std::str::FromStr>(args: &ArgMatches, name: &str) -> SpriteResult<Option<T>> {
    match args.get_one::<String>(name) {
        None => Ok(None),
        Some(text) => text
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| SpriteError::ConfigError(format!("Invalid value for --{}: {}", name, text))),
    }
}

/// Build the run configuration from the config file and flags
pub fn build_config(args: &ArgMatches) -> SpriteResult<ExtractionConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => {
            info!("Reading configuration from {}", path);
            ExtractionConfig::from_file(path)?
        }
        None => ExtractionConfig::default(),
    };

    if let Some(tolerance) = parse_number::<u8>(args, "tolerance")? {
        config.tolerance = tolerance;
    }
    if let Some(hex) = args.get_one::<String>("background") {
        let color = Rgb::from_hex(hex).map_err(|e| SpriteError::ConfigError(e.to_string()))?;
        config.background = Some(color);
    }
    if let Some(min) = parse_number::<u32>(args, "min-size")? {
        config.filter.min_size = min;
    }
    if let Some(max) = parse_number::<u32>(args, "max-size")? {
        config.filter.max_size = Some(max);
    }
    if let Some(ratio) = parse_number::<f64>(args, "min-fill")? {
        config.filter.min_fill_ratio = Some(ratio);
    }
    if let Some(name) = args.get_one::<String>("strategy") {
        config.strategy = name.parse::<StrategyKind>()?;
    }
    if let Some(size) = parse_number::<u32>(args, "corners")? {
        config.sample = SampleArea::Corners { size };
    }
    if args.get_flag("preview") {
        config.preview = true;
    }

    config.validate()?;
    info!(
        "Configuration: strategy={}, tolerance={}, background={}",
        config.strategy,
        config.tolerance,
        config.background.map_or_else(|| "auto".to_string(), |c| c.to_hex())
    );
    Ok(config)
}
