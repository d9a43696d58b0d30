//! Sprite detection strategy definitions
//!
//! This module defines the strategy pattern for the different ways of
//! locating sprites on a sheet, so the extractor does not care whether
//! regions come from full segmentation, a row scan or a hand-written table.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use log::{debug, info};

use crate::config::ExtractionConfig;
use crate::errors::{SpriteError, SpriteResult};

use super::classifier::PixelClassifier;
use super::filter::RegionFilter;
use super::manual::SpritePick;
use super::region::SpriteRegion;
use super::row_scan::{scan_row_band, RowBand};
use super::segmenter::segment;

/// Available detection strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Connected-component segmentation of the whole sheet
    FloodFill,
    /// Column grouping inside configured row bands
    RowScan,
    /// Hand-picked sprites
    Manual,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::FloodFill => "flood",
            StrategyKind::RowScan => "rows",
            StrategyKind::Manual => "manual",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for StrategyKind {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flood" | "flood-fill" | "segment" => Ok(StrategyKind::FloodFill),
            "rows" | "row-scan" => Ok(StrategyKind::RowScan),
            "manual" => Ok(StrategyKind::Manual),
            other => Err(SpriteError::ConfigError(format!(
                "Unknown strategy '{}'. Expected flood, rows or manual",
                other
            ))),
        }
    }
}

/// Strategy for locating sprites on a sheet
///
/// Implementations return regions in the order their sprites should be
/// numbered.
pub trait DetectionStrategy {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Locate sprites
    ///
    /// # Arguments
    /// * `image` - The sprite sheet
    /// * `classifier` - Background predicate for this run
    ///
    /// # Returns
    /// The detected regions, with labels for strategies that name their
    /// sprites (`None` means "number it")
    fn detect(&self, image: &RgbaImage, classifier: &PixelClassifier)
        -> SpriteResult<Vec<(SpriteRegion, Option<String>)>>;
}

/// Full connected-component segmentation followed by filtering
pub struct FloodFillStrategy {
    filter: RegionFilter,
}

impl FloodFillStrategy {
    pub fn new(filter: RegionFilter) -> Self {
        FloodFillStrategy { filter }
    }
}

impl DetectionStrategy for FloodFillStrategy {
    fn name(&self) -> &str {
        "flood"
    }

    fn detect(&self, image: &RgbaImage, classifier: &PixelClassifier)
        -> SpriteResult<Vec<(SpriteRegion, Option<String>)>> {
        let regions = self.filter.apply(segment(image, classifier)?);
        Ok(regions.into_iter().map(|r| (r, None)).collect())
    }
}

/// Row-band column grouping followed by filtering
pub struct RowScanStrategy {
    bands: Vec<RowBand>,
    gap_threshold: u32,
    filter: RegionFilter,
}

impl RowScanStrategy {
    pub fn new(bands: Vec<RowBand>, gap_threshold: u32, filter: RegionFilter) -> Self {
        RowScanStrategy { bands, gap_threshold, filter }
    }
}

impl DetectionStrategy for RowScanStrategy {
    fn name(&self) -> &str {
        "rows"
    }

    fn detect(&self, image: &RgbaImage, classifier: &PixelClassifier)
        -> SpriteResult<Vec<(SpriteRegion, Option<String>)>> {
        let mut regions = Vec::new();
        for band in &self.bands {
            regions.extend(scan_row_band(image, classifier, *band, self.gap_threshold));
        }

        // overlapping bands can report the same sprite twice
        regions.sort_by_key(|r| (r.bounds.min_y, r.bounds.min_x, r.bounds.max_y, r.bounds.max_x));
        regions.dedup_by_key(|r| r.bounds);

        let regions = self.filter.apply(regions);
        Ok(regions.into_iter().map(|r| (r, None)).collect())
    }
}

/// Hand-picked sprites, in table order
pub struct ManualStrategy {
    picks: Vec<SpritePick>,
}

impl ManualStrategy {
    pub fn new(picks: Vec<SpritePick>) -> Self {
        ManualStrategy { picks }
    }
}

impl DetectionStrategy for ManualStrategy {
    fn name(&self) -> &str {
        "manual"
    }

    fn detect(&self, image: &RgbaImage, classifier: &PixelClassifier)
        -> SpriteResult<Vec<(SpriteRegion, Option<String>)>> {
        self.picks
            .iter()
            .map(|pick| {
                let region = pick.resolve(image, classifier)?;
                debug!(
                    "Pick {}: x={}, y={}, {}x{}",
                    pick.label().unwrap_or("(unlabelled)"),
                    region.bounds.min_x,
                    region.bounds.min_y,
                    region.width(),
                    region.height()
                );
                Ok((region, pick.label().map(str::to_string)))
            })
            .collect()
    }
}

/// Factory for creating the configured detection strategy
pub struct DetectionStrategyFactory;

impl DetectionStrategyFactory {
    /// Create the strategy selected by a configuration
    pub fn create(config: &ExtractionConfig) -> Box<dyn DetectionStrategy> {
        info!("Using {} detection strategy", config.strategy);
        match config.strategy {
            StrategyKind::FloodFill => Box::new(FloodFillStrategy::new(config.filter)),
            StrategyKind::RowScan => Box::new(RowScanStrategy::new(
                config.rows.clone(),
                config.gap_threshold,
                config.filter,
            )),
            StrategyKind::Manual => Box::new(ManualStrategy::new(config.picks.clone())),
        }
    }
}
