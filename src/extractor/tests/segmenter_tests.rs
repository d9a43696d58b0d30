//! Tests for connected-component segmentation and region filtering

extern crate std;

use image::{Rgba, RgbaImage};

use crate::coordinate::{BoundingBox, Point};
use crate::errors::SpriteError;
use crate::extractor::{label_map, segment, PixelClassifier, RegionFilter, SpriteRegion};
use super::test_utils::{blank_sheet, fill_block, sheet_with_blocks, DARK, RED, SKY};

fn sky_classifier() -> PixelClassifier {
    PixelClassifier::new(SKY, 10)
}

#[test]
fn test_single_block_scenario() {
    let sheet = sheet_with_blocks(20, 20, &[(10, 10, 5, 5)]);

    let regions = segment(&sheet, &sky_classifier()).unwrap();
    std::assert_eq!(regions.len(), 1);
    std::assert_eq!(regions[0].bounds, BoundingBox::new(10, 10, 14, 14));
    std::assert_eq!(regions[0].pixel_count, 25);
    std::assert_eq!(regions[0].fill_ratio(), 1.0);
}

#[test]
fn test_all_background_has_no_regions() {
    let sheet = blank_sheet(32, 16, SKY);
    std::assert!(segment(&sheet, &sky_classifier()).unwrap().is_empty());
}

#[test]
fn test_near_background_noise_is_background() {
    let mut sheet = blank_sheet(10, 10, SKY);
    sheet.put_pixel(4, 4, Rgba([176, 205, 238, 255]));
    std::assert!(segment(&sheet, &sky_classifier()).unwrap().is_empty());
}

#[test]
fn test_separated_blocks_are_distinct_regions() {
    // 4x4 blocks at x=2 and x=12: columns 6..=11 are a 6 pixel gap
    let sheet = sheet_with_blocks(20, 10, &[(2, 3, 4, 4), (12, 3, 4, 4)]);

    let regions = segment(&sheet, &sky_classifier()).unwrap();
    std::assert_eq!(regions.len(), 2);
    std::assert_eq!(regions[0].bounds, BoundingBox::new(2, 3, 5, 6));
    std::assert_eq!(regions[1].bounds, BoundingBox::new(12, 3, 15, 6));
}

#[test]
fn test_diagonal_pixels_are_connected() {
    let mut sheet = blank_sheet(10, 10, SKY);
    sheet.put_pixel(2, 2, DARK);
    sheet.put_pixel(3, 3, DARK);
    sheet.put_pixel(4, 2, DARK);

    let regions = segment(&sheet, &sky_classifier()).unwrap();
    std::assert_eq!(regions.len(), 1);
    std::assert_eq!(regions[0].bounds, BoundingBox::new(2, 2, 4, 3));
    std::assert_eq!(regions[0].pixel_count, 3);
}

#[test]
fn test_hollow_shape_counts_only_outline() {
    let mut sheet = blank_sheet(12, 12, SKY);
    fill_block(&mut sheet, 1, 1, 10, 10, RED);
    fill_block(&mut sheet, 2, 2, 8, 8, Rgba([171, 212, 230, 255]));

    let regions = segment(&sheet, &sky_classifier()).unwrap();
    std::assert_eq!(regions.len(), 1);
    std::assert_eq!(regions[0].pixel_count, 36);
    std::assert!((regions[0].fill_ratio() - 0.36).abs() < 1e-9);
}

#[test]
fn test_regions_sorted_top_to_bottom_then_left_to_right() {
    let sheet = sheet_with_blocks(30, 30, &[(20, 2, 3, 3), (2, 20, 3, 3), (2, 2, 3, 3), (10, 20, 3, 3)]);

    let regions = segment(&sheet, &sky_classifier()).unwrap();
    let origins: Vec<(u32, u32)> = regions.iter().map(|r| (r.bounds.min_x, r.bounds.min_y)).collect();
    std::assert_eq!(origins, vec![(2, 2), (20, 2), (2, 20), (10, 20)]);
}

#[test]
fn test_segmentation_is_deterministic() {
    let sheet = sheet_with_blocks(40, 40, &[(1, 1, 5, 9), (10, 3, 7, 2), (30, 30, 9, 9), (20, 12, 1, 1)]);

    let first = segment(&sheet, &sky_classifier()).unwrap();
    let second = segment(&sheet, &sky_classifier()).unwrap();
    std::assert_eq!(first, second);
}

#[test]
fn test_every_sprite_pixel_belongs_to_exactly_one_region() {
    let mut sheet = sheet_with_blocks(40, 30, &[(1, 1, 6, 6), (10, 1, 3, 12), (20, 20, 10, 5)]);
    // an L shape touching nothing else
    fill_block(&mut sheet, 32, 2, 2, 10, DARK);
    fill_block(&mut sheet, 32, 10, 6, 2, DARK);
    // a sprite touching the image border
    fill_block(&mut sheet, 0, 25, 4, 5, DARK);

    let classifier = sky_classifier();
    let regions = segment(&sheet, &classifier).unwrap();
    let labels = label_map(&sheet, &classifier).unwrap();
    let (width, height) = sheet.dimensions();

    let mut counts = vec![0u64; regions.len()];
    for y in 0..height {
        for x in 0..width {
            let label = labels[(y * width + x) as usize];
            let sprite = classifier.is_sprite(sheet.get_pixel(x, y));
            std::assert_eq!(label.is_some(), sprite, "pixel ({}, {})", x, y);

            if let Some(label) = label {
                counts[label] += 1;
                std::assert!(regions[label].bounds.contains(&Point::new(x, y)));

                // neighbours that are sprite pixels share the label
                for n in Point::new(x, y).neighbors(width, height) {
                    if let Some(other) = labels[(n.y * width + n.x) as usize] {
                        std::assert_eq!(other, label, "adjacent pixels in different regions");
                    }
                }
            }
        }
    }

    let expected: Vec<u64> = regions.iter().map(|r| r.pixel_count).collect();
    std::assert_eq!(counts, expected);
    std::assert_eq!(regions.len(), 5);
}

#[test]
fn test_large_region_does_not_recurse() {
    let sheet = RgbaImage::from_pixel(512, 512, RED);

    let regions = segment(&sheet, &sky_classifier()).unwrap();
    std::assert_eq!(regions.len(), 1);
    std::assert_eq!(regions[0].pixel_count, 512 * 512);
}

#[test]
fn test_zero_area_image_is_invalid_input() {
    let sheet = RgbaImage::new(0, 5);
    std::assert!(std::matches!(segment(&sheet, &sky_classifier()), Err(SpriteError::InvalidInput(_))));
}

#[test]
fn test_size_band_is_inclusive() {
    let filter = RegionFilter {
        min_size: 31,
        max_size: Some(119),
        min_fill_ratio: None,
    };
    let region = |w: u32, h: u32| SpriteRegion::new(BoundingBox::new(0, 0, w - 1, h - 1), (w * h) as u64);

    std::assert!(filter.accepts(&region(31, 31)));
    std::assert!(filter.accepts(&region(119, 60)));
    std::assert!(!filter.accepts(&region(30, 60)));
    std::assert!(!filter.accepts(&region(60, 120)));
}

#[test]
fn test_fill_ratio_filter() {
    let filter = RegionFilter {
        min_size: 1,
        max_size: None,
        min_fill_ratio: Some(0.2),
    };
    let bounds = BoundingBox::new(0, 0, 9, 9);

    std::assert!(filter.accepts(&SpriteRegion::new(bounds, 20)));
    std::assert!(!filter.accepts(&SpriteRegion::new(bounds, 19)));
}

#[test]
fn test_default_filter_drops_noise_and_keeps_order() {
    let sheet = sheet_with_blocks(60, 60, &[(40, 2, 12, 12), (30, 30, 2, 2), (2, 40, 11, 15), (2, 2, 10, 20)]);

    let regions = RegionFilter::default().apply(segment(&sheet, &sky_classifier()).unwrap());
    let origins: Vec<(u32, u32)> = regions.iter().map(|r| (r.bounds.min_x, r.bounds.min_y)).collect();
    // the 2x2 speck and the 10px-wide block are too small
    std::assert_eq!(origins, vec![(40, 2), (2, 40)]);
}
