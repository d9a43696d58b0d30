//! Sprite extraction command
//!
//! This module implements the command that cuts every sprite out of a
//! sheet and writes the PNG files, the stylesheet and optionally a preview
//! page into the output directory.

use std::path::PathBuf;

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::cli_config::{build_config, DEFAULT_OUTPUT_DIR};
use crate::commands::command_traits::Command;
use crate::config::ExtractionConfig;
use crate::errors::{SpriteError, SpriteResult, Stage};
use crate::extractor::SpriteExtractor;
use crate::output::{PreviewOptions, SpriteWriter};
use crate::utils::logger::Logger;

/// Command for extracting sprites from a sheet
pub struct ExtractCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Directory receiving sprites, CSS and preview
    output_dir: PathBuf,
    /// Run configuration
    config: ExtractionConfig,
    /// Logger for the run summary
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for the run summary
    ///
    /// # Returns
    /// A new ExtractCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SpriteResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| SpriteError::InvalidInput("Missing input file".to_string()))?
            .clone();
        info!("Input file: {}", input_file);

        let output_dir = PathBuf::from(
            args.get_one::<String>("output")
                .map(String::as_str)
                .unwrap_or(DEFAULT_OUTPUT_DIR),
        );
        info!("Output directory: {}", output_dir.display());

        Ok(ExtractCommand {
            input_file,
            output_dir,
            config: build_config(args)?,
            logger,
        })
    }

    fn writer(&self) -> SpriteWriter {
        let writer = SpriteWriter::new(&self.output_dir, self.config.css.clone()).with_progress(true);
        if self.config.preview {
            writer.with_preview(PreviewOptions::default())
        } else {
            writer
        }
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> SpriteResult<()> {
        let extractor = SpriteExtractor::new(self.config.clone());
        let result = extractor.extract_file(&self.input_file)?;

        if result.is_empty() {
            warn!("No sprite regions found in {}; writing an empty stylesheet", self.input_file);
        }

        let writer = self.writer();
        let written = writer
            .write_all(&result.sprites, result.background)
            .map_err(|e| e.in_stage(Stage::Write))?;

        println!(
            "Extracted {} sprite(s) from {} (background {})",
            written.len(),
            self.input_file,
            result.background.to_hex()
        );
        for info in &written {
            println!(
                "  {:<16} {}x{} at ({}, {})",
                info.filename, info.width, info.height, info.original_x, info.original_y
            );
        }
        println!("CSS: {}", writer.css_path().display());
        if self.config.preview {
            println!("Preview: {}", writer.preview_path().display());
        }

        self.logger.log(&format!(
            "Extract {} -> {}: background {}, {} sprite(s)",
            self.input_file,
            self.output_dir.display(),
            result.background.to_hex(),
            written.len()
        ))?;
        self.logger.log_regions(&result.regions)?;

        Ok(())
    }
}
