//! Manually picked sprites
//!
//! Some sheets are easier to handle with a short table of hand-picked
//! positions than with automatic detection. A pick is either an exact
//! rectangle or an approximate sprite center; for the latter the sprite is
//! isolated by searching a window around the center for sprite pixels.

use image::RgbaImage;
use log::debug;

use crate::coordinate::{BoundingBox, Point};
use crate::errors::{SpriteError, SpriteResult};

use super::classifier::PixelClassifier;
use super::region::{Region, SpriteRegion};

/// Search window around a center pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    /// Columns searched on each side of the center
    pub half_width: u32,
    /// Rows searched above the row position
    pub above: u32,
    /// Rows searched below the row position
    pub below: u32,
    /// Pixels added around the found sprite, kept inside the window
    pub padding: u32,
}

impl Default for SearchWindow {
    fn default() -> Self {
        SearchWindow {
            half_width: 60,
            above: 20,
            below: 90,
            padding: 2,
        }
    }
}

/// One manually picked sprite
///
/// Unlabelled picks are named like detected sprites, `{prefix}_{n}`.
#[derive(Debug, Clone, PartialEq)]
pub enum SpritePick {
    /// Use exactly this rectangle
    Rect { label: Option<String>, region: Region },
    /// Isolate the sprite found around an approximate center
    Center {
        label: Option<String>,
        center_x: u32,
        row_y: u32,
        window: SearchWindow,
    },
}

impl SpritePick {
    pub fn label(&self) -> Option<&str> {
        match self {
            SpritePick::Rect { label, .. } | SpritePick::Center { label, .. } => label.as_deref(),
        }
    }

    fn describe(&self) -> &str {
        self.label().unwrap_or("(unlabelled)")
    }

    /// Resolve the pick to a region on the sheet
    ///
    /// # Returns
    /// The picked region, or `InvalidInput` if the pick lies outside the image
    /// or (for center picks) no sprite pixel was found in the window
    pub fn resolve(&self, image: &RgbaImage, classifier: &PixelClassifier) -> SpriteResult<SpriteRegion> {
        match self {
            SpritePick::Rect { region, .. } => resolve_rect(image, classifier, self.describe(), *region),
            SpritePick::Center { center_x, row_y, window, .. } => {
                isolate_sprite(image, classifier, *center_x, *row_y, window).ok_or_else(|| {
                    SpriteError::InvalidInput(format!(
                        "No sprite found for pick '{}' around ({}, {})",
                        self.describe(), center_x, row_y
                    ))
                })
            }
        }
    }
}

fn resolve_rect(
    image: &RgbaImage,
    classifier: &PixelClassifier,
    label: &str,
    region: Region,
) -> SpriteResult<SpriteRegion> {
    let clipped = region.clip_to(image.width(), image.height()).ok_or_else(|| {
        SpriteError::InvalidInput(format!(
            "Pick '{}' at {:?} lies outside the {}x{} image",
            label,
            region,
            image.width(),
            image.height()
        ))
    })?;
    if clipped != region {
        debug!("Pick '{}' clipped from {:?} to {:?}", label, region, clipped);
    }

    let bounds = clipped.to_bbox().ok_or_else(|| {
        SpriteError::InvalidInput(format!("Pick '{}' has zero size", label))
    })?;

    let pixel_count = (clipped.y..clipped.end_y())
        .flat_map(|y| (clipped.x..clipped.end_x()).map(move |x| (x, y)))
        .filter(|&(x, y)| classifier.is_sprite(image.get_pixel(x, y)))
        .count() as u64;

    Ok(SpriteRegion::new(bounds, pixel_count))
}

/// Find the sprite around an approximate center
///
/// Searches `center_x ± half_width` and `row_y - above .. row_y + below`
/// (clipped to the image) for sprite pixels, takes their bounding box and
/// pads it without leaving the search window.
///
/// # Returns
/// The isolated region, or `None` if the window holds no sprite pixel
pub fn isolate_sprite(
    image: &RgbaImage,
    classifier: &PixelClassifier,
    center_x: u32,
    row_y: u32,
    window: &SearchWindow,
) -> Option<SpriteRegion> {
    let (width, height) = image.dimensions();
    let x_start = center_x.saturating_sub(window.half_width);
    let x_end = center_x.saturating_add(window.half_width).min(width);
    let y_start = row_y.saturating_sub(window.above);
    let y_end = row_y.saturating_add(window.below).min(height);
    if x_start >= x_end || y_start >= y_end {
        return None;
    }

    let limits = BoundingBox::new(x_start, y_start, x_end - 1, y_end - 1);
    let mut found: Option<BoundingBox> = None;
    for y in y_start..y_end {
        for x in x_start..x_end {
            if classifier.is_sprite(image.get_pixel(x, y)) {
                let point = Point::new(x, y);
                match found.as_mut() {
                    Some(b) => b.include(point),
                    None => found = Some(BoundingBox::from_point(point)),
                }
            }
        }
    }

    let bounds = found?.padded_within(window.padding, &limits);
    let pixel_count = (bounds.min_y..=bounds.max_y)
        .flat_map(|y| (bounds.min_x..=bounds.max_x).map(move |x| (x, y)))
        .filter(|&(x, y)| classifier.is_sprite(image.get_pixel(x, y)))
        .count() as u64;

    debug!(
        "Isolated sprite around ({}, {}): ({}, {}) {}x{}",
        center_x,
        row_y,
        bounds.min_x,
        bounds.min_y,
        bounds.width(),
        bounds.height()
    );
    Some(SpriteRegion::new(bounds, pixel_count))
}
