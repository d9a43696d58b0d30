//! Sprite detection and extraction
//!
//! This module finds sprites on a sheet and cuts them out. Detection is
//! pluggable through a strategy pattern; every strategy shares the same
//! background classifier, so a run has a single notion of "background".

mod region;
mod classifier;
mod background;
mod segmenter;
mod filter;
mod transparency;
mod row_scan;
mod manual;
mod selection;
mod detection_strategy;
mod sprite_extractor;
#[cfg(test)]
mod tests;

// Public exports
pub use region::{Region, SpriteRegion};
pub use classifier::PixelClassifier;
pub use background::{detect_background, SampleArea, DEFAULT_CORNER_SIZE};
pub use segmenter::{label_map, segment};
pub use filter::RegionFilter;
pub use transparency::{cut_sprite, make_transparent, TRANSPARENT};
pub use row_scan::{scan_row_band, RowBand, DEFAULT_GAP_THRESHOLD};
pub use manual::{isolate_sprite, SearchWindow, SpritePick};
pub use selection::{group_into_rows, select_diverse, select_indices, Selection};
pub use detection_strategy::{
    DetectionStrategy, DetectionStrategyFactory, FloodFillStrategy, ManualStrategy, RowScanStrategy,
    StrategyKind,
};

// Simple facade that runs the whole pipeline
pub use sprite_extractor::{ExtractedSprite, ExtractionResult, LabelledRegion, SpriteExtractor};
