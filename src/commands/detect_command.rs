//! Sprite detection report command
//!
//! Prints the background color and the detected sprite regions of a sheet
//! without writing any files. Useful for tuning tolerance and size limits
//! before a real extraction.

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::cli_config::build_config;
use crate::commands::command_traits::Command;
use crate::config::ExtractionConfig;
use crate::errors::{SpriteError, SpriteResult};
use crate::extractor::{group_into_rows, LabelledRegion, SpriteExtractor};
use crate::utils::logger::Logger;

/// Command for reporting detected sprites
pub struct DetectCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Run configuration
    config: ExtractionConfig,
    /// Whether to print the per-row breakdown
    verbose: bool,
    /// Logger for the run summary
    logger: &'a Logger,
}

impl<'a> DetectCommand<'a> {
    /// Create a new detect command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for the run summary
    ///
    /// # Returns
    /// A new DetectCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SpriteResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| SpriteError::InvalidInput("Missing input file".to_string()))?
            .clone();

        Ok(DetectCommand {
            input_file,
            config: build_config(args)?,
            verbose: args.get_flag("verbose"),
            logger,
        })
    }

    fn print_regions(&self, regions: &[LabelledRegion]) {
        println!("Regions: {}", regions.len());
        println!("  {:<12} {:>6} {:>6} {:>6} {:>6} {:>8} {:>6}", "label", "x", "y", "width", "height", "pixels", "fill");
        for item in regions {
            let region = &item.region;
            println!(
                "  {:<12} {:>6} {:>6} {:>6} {:>6} {:>8} {:>6.2}",
                item.label,
                region.bounds.min_x,
                region.bounds.min_y,
                region.width(),
                region.height(),
                region.pixel_count,
                region.fill_ratio()
            );
        }
    }

    fn print_rows(&self, regions: &[LabelledRegion]) {
        let row_height = self.config.selection.map_or(100, |s| s.row_height);
        let plain: Vec<_> = regions.iter().map(|l| l.region).collect();

        println!("Rows (height {}):", row_height);
        for (row, members) in group_into_rows(&plain, row_height) {
            let xs: Vec<String> = members.iter().map(|r| r.bounds.min_x.to_string()).collect();
            println!("  row {:<3} y~{:<5} {} sprite(s) at x = {}", row, row * row_height, members.len(), xs.join(", "));
        }
    }
}

impl<'a> Command for DetectCommand<'a> {
    fn execute(&self) -> SpriteResult<()> {
        info!("Detecting sprites in {}", self.input_file);

        let extractor = SpriteExtractor::new(self.config.clone());
        let image = extractor.load(&self.input_file)?;
        let classifier = extractor.classifier_for(&image)?;
        let regions = extractor.detect(&image, &classifier)?;

        println!("Sheet: {} ({}x{})", self.input_file, image.width(), image.height());
        println!("Background: {} ({})", classifier.background(), classifier.background().to_hex());
        println!("Tolerance: {}", classifier.tolerance());
        self.print_regions(&regions);
        if self.verbose && !regions.is_empty() {
            self.print_rows(&regions);
        }

        if regions.is_empty() {
            warn!("No sprite regions found in {}", self.input_file);
        }

        self.logger.log(&format!(
            "Detect {}: background {}, {} region(s)",
            self.input_file,
            classifier.background().to_hex(),
            regions.len()
        ))?;
        let plain: Vec<_> = regions.into_iter().map(|l| l.region).collect();
        self.logger.log_regions(&plain)?;

        Ok(())
    }
}
