//! Post-segmentation region filtering
//!
//! Rejects specks of noise, blobs made of several touching sprites, and
//! sparse shapes that are unlikely to be a single sprite.

use log::debug;

use super::region::SpriteRegion;

/// Size band and fill requirements for accepted regions
///
/// Width and height must both lie in `min_size..=max_size`. When
/// `min_fill_ratio` is set, `pixel_count / bbox area` must be at least that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionFilter {
    /// Smallest accepted width and height
    pub min_size: u32,
    /// Largest accepted width and height (unbounded if `None`)
    pub max_size: Option<u32>,
    /// Smallest accepted fill ratio (unchecked if `None`)
    pub min_fill_ratio: Option<f64>,
}

impl Default for RegionFilter {
    fn default() -> Self {
        RegionFilter {
            min_size: 11,
            max_size: None,
            min_fill_ratio: None,
        }
    }
}

impl RegionFilter {
    fn size_ok(&self, size: u32) -> bool {
        size >= self.min_size && self.max_size.map_or(true, |max| size <= max)
    }

    /// Check a single region
    pub fn accepts(&self, region: &SpriteRegion) -> bool {
        if !self.size_ok(region.width()) || !self.size_ok(region.height()) {
            return false;
        }
        match self.min_fill_ratio {
            Some(min) => region.fill_ratio() >= min,
            None => true,
        }
    }

    /// Keep the accepted regions, preserving their order
    pub fn apply(&self, regions: Vec<SpriteRegion>) -> Vec<SpriteRegion> {
        let before = regions.len();
        let kept: Vec<SpriteRegion> = regions.into_iter().filter(|r| self.accepts(r)).collect();
        debug!(
            "Region filter (size {}..={:?}, fill >= {:?}) kept {} of {}",
            self.min_size,
            self.max_size,
            self.min_fill_ratio,
            kept.len(),
            before
        );
        kept
    }
}
