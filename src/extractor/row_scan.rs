//! Row-band sprite detection
//!
//! A cheaper alternative to full segmentation for sheets laid out in regular
//! horizontal rows. Within a band of rows, columns containing any sprite pixel
//! are grouped into runs; each run is then tightened vertically to the rows
//! that actually contain sprite pixels. Sprites closer together than the gap
//! threshold get merged, and one sprite with a wide internal gap gets split.

use image::RgbaImage;
use log::debug;

use crate::coordinate::{BoundingBox, Point};

use super::classifier::PixelClassifier;
use super::region::SpriteRegion;

/// Default column gap that separates two sprites
pub const DEFAULT_GAP_THRESHOLD: u32 = 5;

/// Horizontal band of rows to scan (`y_end` exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    pub y_start: u32,
    pub y_end: u32,
}

impl RowBand {
    pub fn new(y_start: u32, y_end: u32) -> Self {
        RowBand { y_start, y_end }
    }

    /// Band covering a sheet row plus `margin` rows above and below
    pub fn around(row_y: u32, row_height: u32, margin: u32) -> Self {
        RowBand::new(
            row_y.saturating_sub(margin),
            row_y.saturating_add(row_height).saturating_add(margin),
        )
    }

    /// The band restricted to an image of the given height
    pub fn clip(&self, height: u32) -> Option<RowBand> {
        let y_end = self.y_end.min(height);
        if self.y_start >= y_end {
            None
        } else {
            Some(RowBand::new(self.y_start, y_end))
        }
    }
}

/// Find sprites inside one row band
///
/// # Arguments
/// * `image` - The sprite sheet
/// * `classifier` - Background predicate for this run
/// * `band` - Rows to scan, clipped to the image
/// * `gap_threshold` - A jump of more than this many columns between
///   occupied columns starts a new sprite
///
/// # Returns
/// Regions in left-to-right order. Pixel counts only include pixels inside
/// the band.
pub fn scan_row_band(
    image: &RgbaImage,
    classifier: &PixelClassifier,
    band: RowBand,
    gap_threshold: u32,
) -> Vec<SpriteRegion> {
    let Some(band) = band.clip(image.height()) else {
        debug!("Row band {:?} lies outside the image", band);
        return Vec::new();
    };

    let occupied: Vec<u32> = (0..image.width())
        .filter(|&x| (band.y_start..band.y_end).any(|y| classifier.is_sprite(image.get_pixel(x, y))))
        .collect();

    let mut regions = Vec::new();
    for (start_x, end_x) in group_columns(&occupied, gap_threshold) {
        if let Some(region) = tighten(image, classifier, start_x, end_x, band) {
            regions.push(region);
        }
    }

    debug!(
        "Row band {}..{}: {} occupied column(s), {} sprite(s)",
        band.y_start,
        band.y_end,
        occupied.len(),
        regions.len()
    );
    regions
}

/// Group sorted column indices into inclusive `(first, last)` runs
fn group_columns(columns: &[u32], gap_threshold: u32) -> Vec<(u32, u32)> {
    let mut groups = Vec::new();
    let Some((&first, rest)) = columns.split_first() else {
        return groups;
    };

    let mut start = first;
    let mut prev = first;
    for &x in rest {
        if x - prev > gap_threshold {
            groups.push((start, prev));
            start = x;
        }
        prev = x;
    }
    groups.push((start, prev));
    groups
}

/// Tightest box around the sprite pixels of a column run within the band
fn tighten(
    image: &RgbaImage,
    classifier: &PixelClassifier,
    start_x: u32,
    end_x: u32,
    band: RowBand,
) -> Option<SpriteRegion> {
    let mut bounds: Option<BoundingBox> = None;
    let mut pixel_count = 0u64;

    for y in band.y_start..band.y_end {
        for x in start_x..=end_x {
            if classifier.is_sprite(image.get_pixel(x, y)) {
                let point = Point::new(x, y);
                match bounds.as_mut() {
                    Some(b) => b.include(point),
                    None => bounds = Some(BoundingBox::from_point(point)),
                }
                pixel_count += 1;
            }
        }
    }

    bounds.map(|b| SpriteRegion::new(b, pixel_count))
}
