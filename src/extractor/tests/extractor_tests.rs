//! Tests for the extraction pipeline facade

extern crate std;

use crate::config::ExtractionConfig;
use crate::coordinate::BoundingBox;
use crate::errors::{SpriteError, Stage};
use crate::extractor::{
    group_into_rows, select_diverse, select_indices, Region, RowBand, SampleArea, SearchWindow, Selection, SpriteExtractor,
    SpritePick, SpriteRegion, StrategyKind, TRANSPARENT,
};
use crate::raster::Rgb;
use super::test_utils::{blank_sheet, fill_block, sheet_with_blocks, DARK, RED, SKY};

#[test]
fn test_default_run_labels_sprites_in_reading_order() {
    // three sprites plus two specks of noise
    let sheet = sheet_with_blocks(
        120,
        80,
        &[(70, 5, 20, 15), (5, 10, 12, 12), (30, 50, 25, 20), (100, 70, 2, 2), (50, 2, 3, 1)],
    );

    let result = SpriteExtractor::new(ExtractionConfig::default()).extract(&sheet).unwrap();
    std::assert_eq!(result.background, SKY);

    let labels: Vec<&str> = result.sprites.iter().map(|s| s.label.as_str()).collect();
    std::assert_eq!(labels, vec!["plane_1", "plane_2", "plane_3"]);
    std::assert_eq!(result.sprites[0].bounds, BoundingBox::new(70, 5, 89, 19));
    std::assert_eq!(result.sprites[1].bounds, BoundingBox::new(5, 10, 16, 21));
    std::assert_eq!(result.sprites[2].bounds, BoundingBox::new(30, 50, 54, 69));

    for (i, sprite) in result.sprites.iter().enumerate() {
        std::assert_eq!(sprite.index, i + 1);
        std::assert_eq!(sprite.image.dimensions(), (sprite.bounds.width(), sprite.bounds.height()));
        std::assert!(sprite.image.pixels().all(|p| *p == RED));
    }
    std::assert_eq!(result.regions.len(), result.sprites.len());
}

#[test]
fn test_cut_sprites_have_transparent_background() {
    let mut sheet = blank_sheet(40, 40, SKY);
    // a plus sign: the corners of its box are background
    fill_block(&mut sheet, 10, 5, 4, 14, DARK);
    fill_block(&mut sheet, 5, 10, 14, 4, DARK);

    let result = SpriteExtractor::new(ExtractionConfig::default()).extract(&sheet).unwrap();
    std::assert_eq!(result.sprites.len(), 1);

    let sprite = &result.sprites[0].image;
    std::assert_eq!(sprite.dimensions(), (14, 14));
    std::assert_eq!(*sprite.get_pixel(0, 0), TRANSPARENT);
    std::assert_eq!(*sprite.get_pixel(13, 13), TRANSPARENT);
    std::assert_eq!(*sprite.get_pixel(7, 7), DARK);
    std::assert_eq!(sprite.pixels().filter(|p| **p == DARK).count() as u64, result.regions[0].pixel_count);
}

#[test]
fn test_configured_background_skips_detection() {
    // the sprite covers most of the sheet, so detection would pick red
    let sheet = sheet_with_blocks(30, 30, &[(1, 1, 28, 28)]);
    let config = ExtractionConfig::new().with_background(SKY);

    let result = SpriteExtractor::new(config).extract(&sheet).unwrap();
    std::assert_eq!(result.background, SKY);
    std::assert_eq!(result.sprites.len(), 1);
    std::assert_eq!(result.sprites[0].bounds, BoundingBox::new(1, 1, 28, 28));
}

#[test]
fn test_custom_prefix() {
    let sheet = sheet_with_blocks(40, 40, &[(2, 2, 12, 12), (20, 20, 12, 12)]);
    let config = ExtractionConfig::new().with_prefix("jet");

    let result = SpriteExtractor::new(config).extract(&sheet).unwrap();
    let labels: Vec<&str> = result.sprites.iter().map(|s| s.label.as_str()).collect();
    std::assert_eq!(labels, vec!["jet_1", "jet_2"]);
}

#[test]
fn test_manual_picks_keep_their_labels() {
    let sheet = sheet_with_blocks(200, 200, &[(80, 50, 20, 30), (10, 150, 6, 6)]);
    let config = ExtractionConfig::new().with_strategy(StrategyKind::Manual).with_picks(vec![
        SpritePick::Center {
            label: Some("su33_1".to_string()),
            center_x: 90,
            row_y: 40,
            window: SearchWindow::default(),
        },
        SpritePick::Rect {
            label: Some("tiny".to_string()),
            region: Region::new(10, 150, 6, 6),
        },
    ]);

    let result = SpriteExtractor::new(config).extract(&sheet).unwrap();
    let labels: Vec<&str> = result.sprites.iter().map(|s| s.label.as_str()).collect();
    // picks are not subject to the size filter
    std::assert_eq!(labels, vec!["su33_1", "tiny"]);
    std::assert_eq!(result.sprites[0].bounds, BoundingBox::new(78, 48, 101, 81));
    std::assert_eq!(*result.sprites[0].image.get_pixel(0, 0), TRANSPARENT);
}

#[test]
fn test_failed_pick_reports_segment_stage() {
    let sheet = blank_sheet(50, 50, SKY);
    let config = ExtractionConfig::new().with_strategy(StrategyKind::Manual).with_picks(vec![SpritePick::Rect {
        label: Some("off".to_string()),
        region: Region::new(60, 60, 4, 4),
    }]);

    let err = SpriteExtractor::new(config).extract(&sheet).unwrap_err();
    std::assert_eq!(err.stage(), Some(Stage::Segment));
    std::assert!(std::matches!(err.root(), SpriteError::InvalidInput(_)));
}

#[test]
fn test_row_strategy() {
    let sheet = sheet_with_blocks(100, 100, &[(5, 10, 15, 15), (40, 12, 15, 12), (5, 70, 15, 15)]);
    let config = ExtractionConfig::new()
        .with_strategy(StrategyKind::RowScan)
        .with_rows(vec![RowBand::new(0, 40), RowBand::new(5, 35)]);

    let result = SpriteExtractor::new(config).extract(&sheet).unwrap();
    // the second band repeats the first one's sprites; the lower row is not scanned
    std::assert_eq!(result.sprites.len(), 2);
    std::assert_eq!(result.sprites[0].bounds, BoundingBox::new(5, 10, 19, 24));
    std::assert_eq!(result.sprites[1].bounds, BoundingBox::new(40, 12, 54, 23));
}

#[test]
fn test_empty_sheet() {
    let sheet = blank_sheet(30, 30, SKY);
    let extractor = SpriteExtractor::new(ExtractionConfig::default());

    let result = extractor.extract(&sheet).unwrap();
    std::assert!(result.is_empty());

    let err = extractor.extract_nonempty(&sheet).unwrap_err();
    std::assert_eq!(err.stage(), Some(Stage::Segment));
    std::assert!(std::matches!(err.root(), SpriteError::NoRegionsFound));
}

#[test]
fn test_missing_file_reports_load_stage() {
    let extractor = SpriteExtractor::new(ExtractionConfig::default());
    let err = extractor.extract_file("definitely/not/here.png").unwrap_err();
    std::assert_eq!(err.stage(), Some(Stage::Load));
}

#[test]
fn test_selection_takes_one_sprite_per_row_first() {
    let sheet = sheet_with_blocks(
        200,
        300,
        &[(10, 10, 20, 20), (60, 10, 20, 20), (110, 10, 20, 20), (10, 120, 20, 20), (60, 220, 20, 20)],
    );
    let config = ExtractionConfig::new().with_selection(Selection { count: 4, ..Selection::default() });

    let result = SpriteExtractor::new(config).extract(&sheet).unwrap();
    let origins: Vec<(u32, u32)> = result.sprites.iter().map(|s| (s.bounds.min_x, s.bounds.min_y)).collect();
    std::assert_eq!(origins, vec![(10, 10), (10, 120), (60, 220), (60, 10)]);

    let labels: Vec<&str> = result.sprites.iter().map(|s| s.label.as_str()).collect();
    std::assert_eq!(labels, vec!["plane_1", "plane_2", "plane_3", "plane_4"]);
}

#[test]
fn test_group_into_rows() {
    let region = |x: u32, y: u32| SpriteRegion::new(BoundingBox::new(x, y, x + 9, y + 9), 100);
    let regions = vec![region(50, 110), region(10, 5), region(5, 150), region(30, 20)];

    let rows = group_into_rows(&regions, 100);
    std::assert_eq!(rows.len(), 2);
    std::assert_eq!(rows[0].0, 0);
    std::assert_eq!(rows[0].1, vec![region(10, 5), region(30, 20)]);
    std::assert_eq!(rows[1].0, 1);
    std::assert_eq!(rows[1].1, vec![region(5, 150), region(50, 110)]);
}

#[test]
fn test_select_diverse_never_exceeds_count() {
    let region = |x: u32, y: u32| SpriteRegion::new(BoundingBox::new(x, y, x + 9, y + 9), 100);
    let regions = vec![region(0, 0), region(20, 0), region(0, 100)];

    std::assert_eq!(select_diverse(&regions, &Selection { count: 1, ..Selection::default() }), vec![region(0, 0)]);
    std::assert_eq!(select_diverse(&regions, &Selection { count: 10, ..Selection::default() }).len(), 3);
    std::assert!(select_diverse(&[], &Selection::default()).is_empty());
}

#[test]
fn test_colored_background_detected_from_corners() {
    let background = Rgb::new(20, 20, 20);
    let mut sheet = blank_sheet(40, 40, background);
    fill_block(&mut sheet, 3, 3, 34, 34, RED);
    fill_block(&mut sheet, 15, 15, 10, 10, DARK);
    let config = ExtractionConfig::new().with_sample(SampleArea::Corners { size: 3 });

    let result = SpriteExtractor::new(config).extract(&sheet).unwrap();
    std::assert_eq!(result.background, background);
    // DARK (40,40,60) is outside tolerance of the background
    std::assert_eq!(result.sprites.len(), 1);
    std::assert_eq!(result.sprites[0].bounds, BoundingBox::new(3, 3, 36, 36));
}

#[test]
fn test_unlabelled_picks_use_the_prefix() {
    let sheet = sheet_with_blocks(100, 100, &[(10, 10, 12, 12), (60, 60, 12, 12)]);
    let config = ExtractionConfig::new().with_prefix("jet").with_strategy(StrategyKind::Manual).with_picks(vec![
        SpritePick::Rect { label: None, region: Region::new(58, 58, 16, 16) },
        SpritePick::Rect { label: Some("lead".to_string()), region: Region::new(8, 8, 16, 16) },
        SpritePick::Center {
            label: None,
            center_x: 16,
            row_y: 12,
            window: SearchWindow { half_width: 10, above: 5, below: 15, padding: 0 },
        },
    ]);

    let result = SpriteExtractor::new(config).extract(&sheet).unwrap();
    let labels: Vec<&str> = result.sprites.iter().map(|s| s.label.as_str()).collect();
    std::assert_eq!(labels, vec!["jet_1", "lead", "jet_3"]);
}

#[test]
fn test_selection_keeps_labels_of_identical_picks() {
    let sheet = sheet_with_blocks(100, 100, &[(10, 10, 12, 12)]);
    let config = ExtractionConfig::new()
        .with_strategy(StrategyKind::Manual)
        .with_picks(vec![
            SpritePick::Rect { label: Some("left".to_string()), region: Region::new(8, 8, 16, 16) },
            SpritePick::Rect { label: Some("right".to_string()), region: Region::new(8, 8, 16, 16) },
        ])
        .with_selection(Selection { count: 2, ..Selection::default() });

    let result = SpriteExtractor::new(config).extract(&sheet).unwrap();
    let labels: Vec<&str> = result.sprites.iter().map(|s| s.label.as_str()).collect();
    std::assert_eq!(labels, vec!["left", "right"]);
}

#[test]
fn test_select_indices_point_into_input() {
    let region = |x: u32, y: u32| SpriteRegion::new(BoundingBox::new(x, y, x + 9, y + 9), 100);
    let regions = vec![region(0, 150), region(30, 0), region(0, 0), region(30, 0)];

    let picked = select_indices(&regions, &Selection { count: 4, ..Selection::default() });
    std::assert_eq!(picked, vec![2, 0, 1, 3]);
}

#[test]
fn test_selection_narrowing_by_column_and_row_limit() {
    // width, height and fill vary per sprite; two rows
    let sprite = |x: u32, y: u32, size: u32, pixels: u64| {
        SpriteRegion::new(BoundingBox::new(x, y, x + size - 1, y + size - 1), pixels)
    };
    let regions = vec![
        sprite(100, 10, 60, 3600), // outside the column band
        sprite(320, 10, 60, 3600),
        sprite(480, 12, 60, 3600),
        sprite(560, 10, 60, 3600),
        sprite(700, 10, 60, 3600),
        sprite(520, 14, 40, 1600), // too small
        sprite(500, 110, 60, 500), // too sparse
        sprite(650, 110, 60, 3000),
    ];
    let selection = Selection {
        count: 10,
        x_range: Some((301, 799)),
        min_size: Some(51),
        min_fill_ratio: Some(0.3),
        per_row: Some(3),
        prefer_x: Some(500),
        ..Selection::default()
    };

    let origins: Vec<(u32, u32)> = select_diverse(&regions, &selection)
        .iter()
        .map(|r| (r.bounds.min_x, r.bounds.min_y))
        .collect();
    std::assert_eq!(origins, vec![(480, 12), (560, 10), (320, 10), (650, 110)]);

    let capped = select_diverse(&regions, &Selection { count: 2, ..selection });
    std::assert_eq!(capped.len(), 2);

    // without a row limit the preferred column decides each row's first pick
    let diverse = Selection { per_row: None, count: 2, ..selection };
    let firsts: Vec<u32> = select_diverse(&regions, &diverse).iter().map(|r| r.bounds.min_x).collect();
    std::assert_eq!(firsts, vec![480, 650]);
}
