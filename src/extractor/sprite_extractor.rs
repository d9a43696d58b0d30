//! Sprite extraction facade
//!
//! Runs the whole pipeline for one sheet: load, determine the background,
//! detect regions with the configured strategy, then cut every region out
//! with its background made transparent. Errors are tagged with the stage
//! that produced them.

use std::path::Path;

use image::RgbaImage;
use log::{info, warn};

use crate::config::ExtractionConfig;
use crate::coordinate::BoundingBox;
use crate::errors::{SpriteError, SpriteResult, Stage};
use crate::raster::{load_raster, Rgb};

use super::background::detect_background;
use super::classifier::PixelClassifier;
use super::detection_strategy::DetectionStrategyFactory;
use super::region::SpriteRegion;
use super::selection::select_indices;
use super::transparency::cut_sprite;

/// A sprite cut out of the sheet
#[derive(Debug, Clone)]
pub struct ExtractedSprite {
    /// 1-based position in the output
    pub index: usize,
    /// File stem / CSS label
    pub label: String,
    /// Where the sprite sat on the sheet
    pub bounds: BoundingBox,
    /// Sprite pixels with a transparent background, owned
    pub image: RgbaImage,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Background color used for the run
    pub background: Rgb,
    /// Regions in output order
    pub regions: Vec<SpriteRegion>,
    /// Cut-out sprites, parallel to `regions`
    pub sprites: Vec<ExtractedSprite>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

/// Region with the label it will be written under
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledRegion {
    pub region: SpriteRegion,
    pub label: String,
}

/// Main extractor, driven by an `ExtractionConfig`
pub struct SpriteExtractor {
    config: ExtractionConfig,
}

impl SpriteExtractor {
    /// Create a new extractor
    pub fn new(config: ExtractionConfig) -> Self {
        SpriteExtractor { config }
    }

    /// Load a sprite sheet
    pub fn load<P: AsRef<Path>>(&self, path: P) -> SpriteResult<RgbaImage> {
        load_raster(path).map_err(|e| e.in_stage(Stage::Load))
    }

    /// Build the classifier for a sheet
    ///
    /// Uses the configured background color or detects one from the
    /// configured sample.
    pub fn classifier_for(&self, image: &RgbaImage) -> SpriteResult<PixelClassifier> {
        let background = match self.config.background {
            Some(color) => {
                info!("Using configured background color: {}", color);
                color
            }
            None => detect_background(image, &self.config.sample)
                .map_err(|e| e.in_stage(Stage::DetectBackground))?,
        };
        Ok(PixelClassifier::new(background, self.config.tolerance))
    }

    /// Locate and label sprites
    pub fn detect(&self, image: &RgbaImage, classifier: &PixelClassifier) -> SpriteResult<Vec<LabelledRegion>> {
        let strategy = DetectionStrategyFactory::create(&self.config);
        let mut detected = strategy
            .detect(image, classifier)
            .map_err(|e| e.in_stage(Stage::Segment))?;
        info!("Strategy '{}' found {} sprite(s)", strategy.name(), detected.len());

        if let Some(selection) = &self.config.selection {
            let regions: Vec<SpriteRegion> = detected.iter().map(|(r, _)| *r).collect();
            let mut slots: Vec<Option<(SpriteRegion, Option<String>)>> = detected.into_iter().map(Some).collect();
            detected = select_indices(&regions, selection)
                .into_iter()
                .filter_map(|i| slots[i].take())
                .collect();
            info!("Selected {} sprite(s)", detected.len());
        }

        Ok(detected
            .into_iter()
            .enumerate()
            .map(|(i, (region, label))| LabelledRegion {
                region,
                label: label.unwrap_or_else(|| format!("{}_{}", self.config.prefix, i + 1)),
            })
            .collect())
    }

    /// Run detection and cut out every sprite
    ///
    /// An empty result is not an error here; see
    /// [`extract_nonempty`](Self::extract_nonempty).
    pub fn extract(&self, image: &RgbaImage) -> SpriteResult<ExtractionResult> {
        let classifier = self.classifier_for(image)?;
        let labelled = self.detect(image, &classifier)?;

        let mut sprites = Vec::with_capacity(labelled.len());
        for (i, item) in labelled.iter().enumerate() {
            let bounds = item.region.bounds;
            let image = cut_sprite(image, bounds.to_region(), &classifier)
                .map_err(|e| e.in_stage(Stage::Crop))?;
            info!("Extracted {} ({}x{}) at ({}, {})", item.label, image.width(), image.height(), bounds.min_x, bounds.min_y);
            sprites.push(ExtractedSprite {
                index: i + 1,
                label: item.label.clone(),
                bounds,
                image,
            });
        }

        if sprites.is_empty() {
            warn!("No sprite regions found");
        }

        Ok(ExtractionResult {
            background: classifier.background(),
            regions: labelled.into_iter().map(|l| l.region).collect(),
            sprites,
        })
    }

    /// Like [`extract`](Self::extract) but fails with `NoRegionsFound` when
    /// nothing was detected
    pub fn extract_nonempty(&self, image: &RgbaImage) -> SpriteResult<ExtractionResult> {
        let result = self.extract(image)?;
        if result.is_empty() {
            return Err(SpriteError::NoRegionsFound.in_stage(Stage::Segment));
        }
        Ok(result)
    }

    /// Load a sheet from disk and extract its sprites
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> SpriteResult<ExtractionResult> {
        let image = self.load(path)?;
        self.extract(&image)
    }
}
