//! Region structures for sprite detection and cropping
//!
//! `Region` is a plain pixel rectangle (top-left corner plus size) used for
//! cropping and for sampling patches. `SpriteRegion` is what detection
//! produces: the inclusive bounding box of a sprite together with how many
//! of its pixels are actually sprite pixels.

use crate::coordinate::BoundingBox;

/// Rectangle in pixel coordinates
///
/// (0,0) is the top-left corner of the image. `end_x`/`end_y` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Parse a region from a string (format: "x,y,width,height")
    pub fn from_string(region_str: &str) -> Result<Self, String> {
        let values: Vec<u32> = region_str
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| format!("Invalid region '{}'. Expected 'x,y,width,height'", region_str))?;

        match values.as_slice() {
            [x, y, width, height] => Ok(Region::new(*x, *y, *width, *height)),
            _ => Err(format!("Invalid region '{}'. Expected 4 comma-separated values", region_str)),
        }
    }

    /// X-coordinate immediately right of the region
    pub fn end_x(&self) -> u32 {
        self.x + self.width
    }

    /// Y-coordinate immediately below the region
    pub fn end_y(&self) -> u32 {
        self.y + self.height
    }

    /// Number of pixels in the region
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Intersection with a `width` x `height` image
    ///
    /// Returns `None` when nothing of the region lies inside the image.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Region> {
        let end_x = self.x.saturating_add(self.width).min(width);
        let end_y = self.y.saturating_add(self.height).min(height);
        if self.x >= end_x || self.y >= end_y {
            return None;
        }
        Some(Region::new(self.x, self.y, end_x - self.x, end_y - self.y))
    }

    /// Inclusive bounding box of a non-empty region
    pub fn to_bbox(&self) -> Option<BoundingBox> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(BoundingBox::new(self.x, self.y, self.end_x() - 1, self.end_y() - 1))
    }
}

/// A detected sprite: a maximal group of connected non-background pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRegion {
    /// Inclusive bounding box
    pub bounds: BoundingBox,
    /// Number of sprite pixels inside the bounds
    pub pixel_count: u64,
}

impl SpriteRegion {
    pub fn new(bounds: BoundingBox, pixel_count: u64) -> Self {
        SpriteRegion { bounds, pixel_count }
    }

    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Pixels in the bounding box
    pub fn area(&self) -> u64 {
        self.bounds.area()
    }

    /// Share of the bounding box covered by sprite pixels, in `0.0..=1.0`
    pub fn fill_ratio(&self) -> f64 {
        self.pixel_count as f64 / self.area() as f64
    }

    /// Key used for top-to-bottom, left-to-right ordering
    pub fn sort_key(&self) -> (u32, u32) {
        (self.bounds.min_y, self.bounds.min_x)
    }
}
