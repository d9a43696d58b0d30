//! Background color detection
//!
//! The background of a sprite sheet is taken to be its most frequent color.
//! Counting every pixel of a large sheet is wasteful, so callers may limit the
//! sample to the corners or to a list of patches known to be empty.

use std::collections::HashMap;

use image::RgbaImage;
use log::{debug, info};

use crate::errors::{SpriteError, SpriteResult};
use crate::raster::Rgb;

use super::region::Region;

/// Default edge length of the corner patches
pub const DEFAULT_CORNER_SIZE: u32 = 10;

/// Which pixels to sample when detecting the background
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SampleArea {
    /// Every pixel of the image
    #[default]
    WholeImage,
    /// The four `size` x `size` corner patches
    Corners { size: u32 },
    /// Explicit patches, in the order given
    Patches(Vec<Region>),
}

impl SampleArea {
    /// Resolve the sample into concrete patches clipped to the image
    ///
    /// Patches that fall completely outside the image are dropped. For
    /// `Corners`, overlapping corners on small images are only counted once.
    pub fn patches(&self, width: u32, height: u32) -> Vec<Region> {
        match self {
            SampleArea::WholeImage => Region::new(0, 0, width, height)
                .clip_to(width, height)
                .into_iter()
                .collect(),
            SampleArea::Corners { size } => {
                let w = (*size).min(width);
                let h = (*size).min(height);
                let right = width - w;
                let bottom = height - h;

                let mut corners: Vec<Region> = Vec::with_capacity(4);
                for candidate in [
                    Region::new(0, 0, w, h),
                    Region::new(right, 0, w, h),
                    Region::new(0, bottom, w, h),
                    Region::new(right, bottom, w, h),
                ] {
                    if w > 0 && h > 0 && !corners.contains(&candidate) {
                        corners.push(candidate);
                    }
                }
                corners
            }
            SampleArea::Patches(list) => list
                .iter()
                .filter_map(|patch| patch.clip_to(width, height))
                .collect(),
        }
    }
}

/// Find the most frequent color among the sampled pixels
///
/// Colors are compared exactly, alpha ignored. On a tie the color seen
/// first in scan order wins (patch order, then top-to-bottom and
/// left-to-right within each patch).
///
/// # Arguments
/// * `image` - The sprite sheet
/// * `sample` - Which pixels to consider
///
/// # Returns
/// The dominant color, or `InvalidInput` when the sample is empty
pub fn detect_background(image: &RgbaImage, sample: &SampleArea) -> SpriteResult<Rgb> {
    let patches = sample.patches(image.width(), image.height());
    debug!("Sampling background from {} patch(es)", patches.len());

    // color -> (count, order of first appearance)
    let mut tally: HashMap<Rgb, (u64, usize)> = HashMap::new();
    let mut seen = 0usize;

    for patch in &patches {
        for y in patch.y..patch.end_y() {
            for x in patch.x..patch.end_x() {
                let color = Rgb::from_pixel(image.get_pixel(x, y));
                let entry = tally.entry(color).or_insert_with(|| {
                    seen += 1;
                    (0, seen)
                });
                entry.0 += 1;
            }
        }
    }

    let (color, (count, _)) = tally
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .ok_or_else(|| SpriteError::InvalidInput("Background sample contains no pixels".to_string()))?;

    info!("Detected background color: {} ({}), {} matching pixels", color, color.to_hex(), count);
    Ok(color)
}
