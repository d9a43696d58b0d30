//! Background-to-transparency rewrite
//!
//! This module turns the background around a cropped sprite into fully
//! transparent pixels. It always works on a copy so that the sheet and any
//! other sprite cut from it stay untouched.

use image::{Rgba, RgbaImage};

use crate::errors::SpriteResult;
use crate::raster::crop;

use super::classifier::PixelClassifier;
use super::region::Region;

/// Value written for background pixels
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Make the background of an image transparent
///
/// Background pixels become `[0, 0, 0, 0]`. Every other pixel keeps its
/// RGB channels and its alpha.
///
/// # Arguments
/// * `image` - The (usually cropped) sprite
/// * `classifier` - Background predicate for this run
///
/// # Returns
/// A new image with the same dimensions
pub fn make_transparent(image: &RgbaImage, classifier: &PixelClassifier) -> RgbaImage {
    let mut output = image.clone();
    clear_background(&mut output, classifier);
    output
}

fn clear_background(image: &mut RgbaImage, classifier: &PixelClassifier) {
    for pixel in image.pixels_mut() {
        if classifier.is_background(pixel) {
            *pixel = TRANSPARENT;
        }
    }
}

/// Crop a region out of the sheet and make its background transparent
///
/// # Arguments
/// * `sheet` - The sprite sheet
/// * `region` - Rectangle to cut out
/// * `classifier` - Background predicate for this run
///
/// # Returns
/// The extracted sprite, or `InvalidInput` for a zero-sized region
pub fn cut_sprite(sheet: &RgbaImage, region: Region, classifier: &PixelClassifier) -> SpriteResult<RgbaImage> {
    let mut sprite = crop(sheet, region)?;
    clear_background(&mut sprite, classifier);
    Ok(sprite)
}
