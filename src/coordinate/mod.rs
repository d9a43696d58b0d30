//! Pixel coordinate handling
//!
//! This module provides the point and bounding box structures used to
//! describe sprite positions on a sheet.

mod bbox;
mod point;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::point::Point;
