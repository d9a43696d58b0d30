//! Connected-component segmentation of sprite sheets
//!
//! Sprites are maximal 8-connected groups of non-background pixels. The
//! labelling uses an explicit stack and a visited bitmap, so memory use is
//! bounded by the image size whatever the sprite shapes are.

use image::RgbaImage;
use log::{debug, info};

use crate::coordinate::{BoundingBox, Point};
use crate::errors::{SpriteError, SpriteResult};

use super::classifier::PixelClassifier;
use super::region::SpriteRegion;

/// Visited marker sized to an image
struct VisitedMap {
    width: u32,
    cells: Vec<bool>,
}

impl VisitedMap {
    fn new(width: u32, height: u32) -> Self {
        VisitedMap {
            width,
            cells: vec![false; width as usize * height as usize],
        }
    }

    fn index(&self, point: Point) -> usize {
        point.y as usize * self.width as usize + point.x as usize
    }

    /// Mark a point, returning `false` if it was already marked
    fn mark(&mut self, point: Point) -> bool {
        let idx = self.index(point);
        if self.cells[idx] {
            false
        } else {
            self.cells[idx] = true;
            true
        }
    }
}

/// Find every sprite region in an image
///
/// Regions come back sorted by `(min_y, min_x)` so indices are stable
/// between runs.
///
/// # Arguments
/// * `image` - The sprite sheet
/// * `classifier` - Background predicate for this run
///
/// # Returns
/// All regions, unfiltered, or `InvalidInput` for a zero-area image
pub fn segment(image: &RgbaImage, classifier: &PixelClassifier) -> SpriteResult<Vec<SpriteRegion>> {
    let mut regions = scan_components(image, classifier, |_, _| {})?;
    regions.sort_by_key(SpriteRegion::sort_key);

    info!("Found {} region(s)", regions.len());
    Ok(regions)
}

/// Label every pixel with the index of its region
///
/// Background pixels get `None`. Indices refer to the order returned by
/// [`segment`].
pub fn label_map(image: &RgbaImage, classifier: &PixelClassifier) -> SpriteResult<Vec<Option<usize>>> {
    let width = image.width() as usize;
    let mut labels: Vec<Option<usize>> = vec![None; width * image.height() as usize];

    let regions = scan_components(image, classifier, |component, point| {
        labels[point.y as usize * width + point.x as usize] = Some(component);
    })?;

    // scan order -> (min_y, min_x) order
    let mut order: Vec<usize> = (0..regions.len()).collect();
    order.sort_by_key(|&i| regions[i].sort_key());
    let mut rank = vec![0usize; regions.len()];
    for (sorted, &original) in order.iter().enumerate() {
        rank[original] = sorted;
    }

    for label in labels.iter_mut().flatten() {
        *label = rank[*label];
    }

    Ok(labels)
}

/// Walk all components in scan order
///
/// `on_pixel` is called with the component's scan-order index for every
/// sprite pixel.
fn scan_components<F>(
    image: &RgbaImage,
    classifier: &PixelClassifier,
    mut on_pixel: F,
) -> SpriteResult<Vec<SpriteRegion>>
where
    F: FnMut(usize, Point),
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(SpriteError::InvalidInput(format!(
            "Cannot segment a {}x{} image",
            width, height
        )));
    }

    info!("Segmenting {}x{} image", width, height);

    let mut visited = VisitedMap::new(width, height);
    let mut stack: Vec<Point> = Vec::new();
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let seed = Point::new(x, y);
            if classifier.is_background(image.get_pixel(x, y)) || !visited.mark(seed) {
                continue;
            }

            let component = regions.len();
            let region = flood_fill(image, classifier, seed, &mut visited, &mut stack, |p| {
                on_pixel(component, p)
            });
            debug!(
                "Region at ({}, {}) size {}x{} with {} pixels",
                region.bounds.min_x,
                region.bounds.min_y,
                region.width(),
                region.height(),
                region.pixel_count
            );
            regions.push(region);
        }
    }

    Ok(regions)
}

/// Collect the component containing `seed`, which must already be marked
fn flood_fill<F>(
    image: &RgbaImage,
    classifier: &PixelClassifier,
    seed: Point,
    visited: &mut VisitedMap,
    stack: &mut Vec<Point>,
    mut on_pixel: F,
) -> SpriteRegion
where
    F: FnMut(Point),
{
    let (width, height) = image.dimensions();
    let mut bounds = BoundingBox::from_point(seed);
    let mut pixel_count = 0u64;

    stack.clear();
    stack.push(seed);

    while let Some(point) = stack.pop() {
        bounds.include(point);
        pixel_count += 1;
        on_pixel(point);

        for neighbor in point.neighbors(width, height) {
            if classifier.is_sprite(image.get_pixel(neighbor.x, neighbor.y)) && visited.mark(neighbor) {
                stack.push(neighbor);
            }
        }
    }

    SpriteRegion::new(bounds, pixel_count)
}
