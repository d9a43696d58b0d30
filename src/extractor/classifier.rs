//! Background pixel classification
//!
//! Every stage that needs to tell sprite pixels from background pixels goes
//! through the same `PixelClassifier`, so a run only ever has one notion of
//! "background".

use image::Rgba;

use crate::raster::Rgb;

/// Decides whether a pixel belongs to the sheet background
///
/// A pixel is background when each of its R, G and B channels is within
/// `tolerance` of the background color. Alpha is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelClassifier {
    background: Rgb,
    tolerance: u8,
}

impl PixelClassifier {
    /// Create a classifier for the given background and tolerance
    pub fn new(background: Rgb, tolerance: u8) -> Self {
        PixelClassifier { background, tolerance }
    }

    /// Background color this classifier matches against
    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Maximum per-channel difference still treated as background
    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    /// Check whether an RGB color matches the background
    pub fn is_background_rgb(&self, color: Rgb) -> bool {
        color.max_channel_distance(&self.background) <= self.tolerance
    }

    /// Check whether a pixel matches the background
    pub fn is_background(&self, pixel: &Rgba<u8>) -> bool {
        self.is_background_rgb(Rgb::from_pixel(pixel))
    }

    /// Inverse of [`is_background`](Self::is_background)
    pub fn is_sprite(&self, pixel: &Rgba<u8>) -> bool {
        !self.is_background(pixel)
    }
}
