//! Bounding box structure for sprite extents

use super::point::Point;
use crate::extractor::Region;

/// An axis-aligned pixel bounding box
///
/// Both corners are inclusive: a single pixel at (3,4) has
/// `min_x == max_x == 3` and `min_y == max_y == 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Leftmost column
    pub min_x: u32,
    /// Topmost row
    pub min_y: u32,
    /// Rightmost column
    pub max_x: u32,
    /// Bottommost row
    pub max_y: u32,
}

impl BoundingBox {
    /// Create a new bounding box
    ///
    /// # Panics
    /// If a minimum coordinate exceeds its maximum
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        assert!(
            min_x <= max_x && min_y <= max_y,
            "inverted bounding box ({}, {}, {}, {})",
            min_x, min_y, max_x, max_y
        );
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    /// Bounding box covering a single pixel
    pub fn from_point(point: Point) -> Self {
        BoundingBox::new(point.x, point.y, point.x, point.y)
    }

    /// Parse a bounding box from a string (format: "minx,miny,maxx,maxy")
    pub fn from_string(bbox_str: &str) -> Result<Self, String> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err("Bounding box must have 4 comma-separated values".to_string());
        }

        let min_x = parts[0].trim().parse::<u32>()
            .map_err(|_| "Invalid min_x value".to_string())?;
        let min_y = parts[1].trim().parse::<u32>()
            .map_err(|_| "Invalid min_y value".to_string())?;
        let max_x = parts[2].trim().parse::<u32>()
            .map_err(|_| "Invalid max_x value".to_string())?;
        let max_y = parts[3].trim().parse::<u32>()
            .map_err(|_| "Invalid max_y value".to_string())?;

        if min_x > max_x || min_y > max_y {
            return Err(format!("Inverted bounding box: {}", bbox_str));
        }

        Ok(BoundingBox::new(min_x, min_y, max_x, max_y))
    }

    /// Grow the box so it contains the given pixel
    pub fn include(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Number of pixels covered
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x &&
            point.y >= self.min_y && point.y <= self.max_y
    }

    /// Grow the box by `padding` pixels on every side, clamped to `limits`
    pub fn padded_within(&self, padding: u32, limits: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.saturating_sub(padding).max(limits.min_x),
            self.min_y.saturating_sub(padding).max(limits.min_y),
            self.max_x.saturating_add(padding).min(limits.max_x),
            self.max_y.saturating_add(padding).min(limits.max_y),
        )
    }

    /// Convert to a cropping rectangle (exclusive end)
    pub fn to_region(&self) -> Region {
        Region::new(self.min_x, self.min_y, self.width(), self.height())
    }
}
