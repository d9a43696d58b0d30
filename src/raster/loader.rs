//! Sprite sheet loading and cropping

use std::path::Path;

use image::{imageops, RgbaImage};
use log::{debug, info};

use crate::errors::{SpriteError, SpriteResult};
use crate::extractor::Region;

/// Load a sprite sheet and normalise it to 8-bit RGBA
///
/// GIF, PNG and any other format the `image` crate decodes are accepted.
/// Palette and RGB sources receive full opacity.
///
/// # Arguments
/// * `path` - Path to the sprite sheet
///
/// # Returns
/// The decoded image, or `InvalidInput` if the file is missing, unreadable
/// or has zero area
pub fn load_raster<P: AsRef<Path>>(path: P) -> SpriteResult<RgbaImage> {
    let path = path.as_ref();
    info!("Loading sprite sheet: {}", path.display());

    if !path.is_file() {
        return Err(SpriteError::InvalidInput(format!(
            "Sprite sheet not found: {}",
            path.display()
        )));
    }

    let decoded = image::open(path).map_err(|e| {
        SpriteError::InvalidInput(format!("Cannot decode {}: {}", path.display(), e))
    })?;
    debug!("Decoded {} as {:?}", path.display(), decoded.color());

    let rgba = decoded.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(SpriteError::InvalidInput(format!(
            "Sprite sheet {} has zero area",
            path.display()
        )));
    }

    info!("Loaded {}x{} sprite sheet", rgba.width(), rgba.height());
    Ok(rgba)
}

/// Copy a rectangle out of an image
///
/// The result owns its pixels; later changes to it never reach the source.
///
/// # Arguments
/// * `image` - Source image
/// * `region` - Rectangle to copy
///
/// # Returns
/// The copied pixels, or `InvalidInput` for a zero-sized rectangle
///
/// # Panics
/// If the rectangle extends past the image bounds
pub fn crop(image: &RgbaImage, region: Region) -> SpriteResult<RgbaImage> {
    if region.width == 0 || region.height == 0 {
        return Err(SpriteError::InvalidInput(format!(
            "Cannot crop a {}x{} region",
            region.width, region.height
        )));
    }

    assert!(
        region.end_x() <= image.width() && region.end_y() <= image.height(),
        "crop region {:?} exceeds {}x{} image",
        region,
        image.width(),
        image.height()
    );

    Ok(imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image())
}
