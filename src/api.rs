use std::path::Path;
use log::info;
use crate::config::ExtractionConfig;
use crate::errors::{SpriteResult, Stage};
use crate::extractor::{ExtractionResult, LabelledRegion, SpriteExtractor};
use crate::output::{PreviewOptions, SpriteInfo, SpriteWriter};
use crate::raster::Rgb;
use crate::utils::logger::Logger;

/// Main interface to the SpriteKit library
pub struct SpriteKit {
    logger: Logger,
    config: ExtractionConfig,
}

impl SpriteKit {
    /// Create a new SpriteKit instance with the default configuration
    ///
    /// # Arguments
    /// * `log_file` - Optional path to a log file for run summaries; nothing
    ///   is written when `None`
    ///
    /// # Returns
    /// A SpriteKit instance or an error if the log file cannot be created
    pub fn new(log_file: Option<&str>) -> SpriteResult<Self> {
        let logger = match log_file {
            Some(path) => Logger::new(path)?,
            None => Logger::disabled(),
        };
        Ok(SpriteKit {
            logger,
            config: ExtractionConfig::default(),
        })
    }

    /// Use a different extraction configuration
    pub fn with_config(mut self, config: ExtractionConfig) -> SpriteResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    fn extractor(&self) -> SpriteExtractor {
        SpriteExtractor::new(self.config.clone())
    }

    /// Determine the background color of a sprite sheet
    ///
    /// # Arguments
    /// * `input_path` - Path to the sprite sheet
    ///
    /// # Returns
    /// The configured background, or the detected one
    pub fn detect_background<P: AsRef<Path>>(&self, input_path: P) -> SpriteResult<Rgb> {
        let extractor = self.extractor();
        let image = extractor.load(input_path)?;
        Ok(extractor.classifier_for(&image)?.background())
    }

    /// Locate sprites without cutting them out
    ///
    /// # Arguments
    /// * `input_path` - Path to the sprite sheet
    ///
    /// # Returns
    /// Labelled regions in output order
    pub fn detect_regions<P: AsRef<Path>>(&self, input_path: P) -> SpriteResult<Vec<LabelledRegion>> {
        let extractor = self.extractor();
        let image = extractor.load(&input_path)?;
        let classifier = extractor.classifier_for(&image)?;
        let regions = extractor.detect(&image, &classifier)?;

        self.logger.log(&format!(
            "Detected {} region(s) in {}",
            regions.len(),
            input_path.as_ref().display()
        ))?;
        Ok(regions)
    }

    /// Extract sprites into memory
    ///
    /// # Arguments
    /// * `input_path` - Path to the sprite sheet
    ///
    /// # Returns
    /// Background, regions and cut-out sprites
    pub fn extract_sprites<P: AsRef<Path>>(&self, input_path: P) -> SpriteResult<ExtractionResult> {
        self.extractor().extract_file(input_path)
    }

    /// Extract sprites and write them, with the stylesheet, to a directory
    ///
    /// # Arguments
    /// * `input_path` - Path to the sprite sheet
    /// * `output_dir` - Directory for PNG files, `sprites.css` and the
    ///   optional preview page
    ///
    /// # Returns
    /// Description of every written sprite
    pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_path: P, output_dir: Q) -> SpriteResult<Vec<SpriteInfo>> {
        let input = input_path.as_ref();
        info!("Extracting sprites from {} to {}", input.display(), output_dir.as_ref().display());

        let result = self.extract_sprites(input)?;

        let mut writer = SpriteWriter::new(&output_dir, self.config.css.clone());
        if self.config.preview {
            writer = writer.with_preview(PreviewOptions::default());
        }
        let written = writer
            .write_all(&result.sprites, result.background)
            .map_err(|e| e.in_stage(Stage::Write))?;

        self.logger.log(&format!(
            "Extracted {} sprite(s) from {}",
            written.len(),
            input.display()
        ))?;
        self.logger.log_regions(&result.regions)?;

        Ok(written)
    }
}
