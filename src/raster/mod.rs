//! Raster handling for sprite sheets
//!
//! This module provides the color type used for background matching
//! and the helpers that load sprite sheets and copy rectangles out of them.
//! Every sheet is normalised to 8-bit RGBA on load.

mod color;
mod loader;

pub use color::Rgb;
pub use loader::{crop, load_raster};
