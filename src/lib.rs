pub mod errors;
pub mod config;
pub mod raster;
pub mod coordinate;
pub mod extractor;
pub mod output;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::SpriteKit;

pub use config::ExtractionConfig;
pub use errors::{SpriteError, SpriteResult, Stage};
pub use extractor::{PixelClassifier, Region, SpriteExtractor, SpriteRegion};
pub use coordinate::{BoundingBox, Point};
pub use raster::Rgb;
