//! Extraction configuration
//!
//! All tunable behaviour of a run lives in `ExtractionConfig`. Defaults
//! match a plain "find every sprite larger than 10px" extraction; a TOML
//! file and command-line flags can override any of it.
//!
//! ```toml
//! tolerance = 10
//! background = "#ABD4E6"
//! strategy = "flood"          # flood | rows | manual
//! prefix = "plane"
//!
//! [sample]
//! corners = 10                # or: corners = true, patches = ["5,5,10,10", ...]
//!
//! [filter]
//! min_size = 31
//! max_size = 119
//! min_fill_ratio = 0.2
//!
//! [rows]
//! gap_threshold = 5
//! bands = [[678, 828]]
//!
//! [[pick]]
//! label = "su33_1"
//! center_x = 308
//! row_y = 728
//!
//! [[pick]]
//! label = "f15"
//! region = "500,560,90,70"   # x,y,width,height; or bbox = "minx,miny,maxx,maxy"
//!
//! [selection]
//! row_height = 100
//! count = 5
//! x_range = [301, 799]       # optional narrowing, see `Selection`
//! per_row = 3
//! prefer_x = 500
//!
//! [css]
//! class_name = "plane"
//! url_prefix = "sprites/"
//! include_position = true
//! first_child = 2
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use toml::Value;

use crate::coordinate::BoundingBox;
use crate::errors::{SpriteError, SpriteResult};
use crate::extractor::{
    Region, RegionFilter, RowBand, SampleArea, SearchWindow, Selection, SpritePick, StrategyKind,
    DEFAULT_CORNER_SIZE, DEFAULT_GAP_THRESHOLD,
};
use crate::output::{check_labels, CssOptions};
use crate::raster::Rgb;

/// Default tolerance for background matching
pub const DEFAULT_TOLERANCE: u8 = 10;
/// Default prefix for generated sprite labels
pub const DEFAULT_PREFIX: &str = "plane";

/// Configuration of one extraction run
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Maximum per-channel difference still treated as background
    pub tolerance: u8,
    /// Fixed background color; detected from `sample` when `None`
    pub background: Option<Rgb>,
    /// Pixels sampled for background detection
    pub sample: SampleArea,
    /// Size band and fill requirements for detected regions
    pub filter: RegionFilter,
    /// How sprites are located
    pub strategy: StrategyKind,
    /// Row bands scanned by the row strategy
    pub rows: Vec<RowBand>,
    /// Column gap that separates sprites in the row strategy
    pub gap_threshold: u32,
    /// Sprites used by the manual strategy
    pub picks: Vec<SpritePick>,
    /// Optional diverse subset selection
    pub selection: Option<Selection>,
    /// Label prefix for detected sprites (`{prefix}_{n}`)
    pub prefix: String,
    /// Stylesheet options
    pub css: CssOptions,
    /// Whether to write an HTML preview
    pub preview: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            tolerance: DEFAULT_TOLERANCE,
            background: None,
            sample: SampleArea::WholeImage,
            filter: RegionFilter::default(),
            strategy: StrategyKind::FloodFill,
            rows: Vec::new(),
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            picks: Vec::new(),
            selection: None,
            prefix: DEFAULT_PREFIX.to_string(),
            css: CssOptions::default(),
            preview: false,
        }
    }
}

impl ExtractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_sample(mut self, sample: SampleArea) -> Self {
        self.sample = sample;
        self
    }

    pub fn with_filter(mut self, filter: RegionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_rows(mut self, rows: Vec<RowBand>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_picks(mut self, picks: Vec<SpritePick>) -> Self {
        self.picks = picks;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_css(mut self, css: CssOptions) -> Self {
        self.css = css;
        self
    }

    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SpriteResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SpriteError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from TOML text
    ///
    /// Missing keys keep their defaults and unknown keys are ignored.
    pub fn from_toml_str(content: &str) -> SpriteResult<Self> {
        let root: Value = content
            .parse()
            .map_err(|e| SpriteError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let mut config = ExtractionConfig::default();

        if let Some(v) = get_u64(&root, "tolerance")? {
            config.tolerance = u8::try_from(v)
                .map_err(|_| SpriteError::ConfigError(format!("tolerance {} exceeds 255", v)))?;
        }
        if let Some(hex) = get_str(&root, "background")? {
            config.background = Some(parse_color(hex)?);
        }
        if let Some(name) = get_str(&root, "strategy")? {
            config.strategy = name.parse()?;
        }
        if let Some(prefix) = get_str(&root, "prefix")? {
            config.prefix = prefix.to_string();
        }
        if let Some(preview) = get_bool(&root, "preview")? {
            config.preview = preview;
        }

        if let Some(sample) = root.get("sample") {
            config.sample = parse_sample(sample)?;
        }
        if let Some(filter) = root.get("filter") {
            parse_filter(filter, &mut config.filter)?;
        }
        if let Some(rows) = root.get("rows") {
            if let Some(gap) = get_u32(rows, "gap_threshold")? {
                config.gap_threshold = gap;
            }
            config.rows = parse_bands(rows)?;
        }
        if let Some(picks) = root.get("pick") {
            config.picks = parse_picks(picks)?;
            config.check_pick_labels()?;
        }
        if let Some(selection) = root.get("selection") {
            config.selection = Some(parse_selection(selection)?);
        }
        if let Some(css) = root.get("css") {
            parse_css(css, &mut config.css)?;
        }

        Ok(config)
    }

    /// Explicit pick labels become file names, so they must be usable ones
    fn check_pick_labels(&self) -> SpriteResult<()> {
        check_labels(self.picks.iter().filter_map(SpritePick::label)).map_err(SpriteError::ConfigError)
    }

    /// Check that the configuration can drive a run
    pub fn validate(&self) -> SpriteResult<()> {
        if self.prefix.contains('/') || self.prefix.contains('\\') {
            return Err(SpriteError::ConfigError(format!(
                "prefix '{}' contains a path separator",
                self.prefix
            )));
        }
        self.check_pick_labels()?;
        if let Some(max) = self.filter.max_size {
            if max < self.filter.min_size {
                return Err(SpriteError::ConfigError(format!(
                    "filter.max_size ({}) is smaller than filter.min_size ({})",
                    max, self.filter.min_size
                )));
            }
        }
        if let Some(ratio) = self.filter.min_fill_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(SpriteError::ConfigError(format!(
                    "filter.min_fill_ratio must be within 0..1, got {}",
                    ratio
                )));
            }
        }
        if let Some(selection) = &self.selection {
            if selection.row_height == 0 {
                return Err(SpriteError::ConfigError("selection.row_height must be positive".to_string()));
            }
            if let Some((start, end)) = selection.x_range {
                if start > end {
                    return Err(SpriteError::ConfigError(format!(
                        "selection.x_range [{}, {}] is inverted",
                        start, end
                    )));
                }
            }
            if selection.per_row == Some(0) {
                return Err(SpriteError::ConfigError("selection.per_row must be at least 1".to_string()));
            }
            if let Some(ratio) = selection.min_fill_ratio {
                if !(0.0..=1.0).contains(&ratio) {
                    return Err(SpriteError::ConfigError(format!(
                        "selection.min_fill_ratio must be within 0..1, got {}",
                        ratio
                    )));
                }
            }
        }
        match self.strategy {
            StrategyKind::RowScan if self.rows.is_empty() => Err(SpriteError::ConfigError(
                "The rows strategy needs at least one band in [rows].bands".to_string(),
            )),
            StrategyKind::Manual if self.picks.is_empty() => Err(SpriteError::ConfigError(
                "The manual strategy needs at least one [[pick]]".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

fn type_error(key: &str, expected: &str) -> SpriteError {
    SpriteError::ConfigError(format!("'{}' must be {}", key, expected))
}

fn get_str<'a>(table: &'a Value, key: &str) -> SpriteResult<Option<&'a str>> {
    match table.get(key) {
        None => Ok(None),
        Some(v) => v.as_str().map(Some).ok_or_else(|| type_error(key, "a string")),
    }
}

fn get_bool(table: &Value, key: &str) -> SpriteResult<Option<bool>> {
    match table.get(key) {
        None => Ok(None),
        Some(v) => v.as_bool().map(Some).ok_or_else(|| type_error(key, "a boolean")),
    }
}

fn get_u64(table: &Value, key: &str) -> SpriteResult<Option<u64>> {
    match table.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_integer()
            .and_then(|i| u64::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| type_error(key, "a non-negative integer")),
    }
}

fn get_u32(table: &Value, key: &str) -> SpriteResult<Option<u32>> {
    match get_u64(table, key)? {
        None => Ok(None),
        Some(v) => u32::try_from(v).map(Some).map_err(|_| type_error(key, "a 32-bit integer")),
    }
}

fn get_f64(table: &Value, key: &str) -> SpriteResult<Option<f64>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Float(f)) => Ok(Some(*f)),
        Some(Value::Integer(i)) => Ok(Some(*i as f64)),
        Some(_) => Err(type_error(key, "a number")),
    }
}

fn parse_color(hex: &str) -> SpriteResult<Rgb> {
    Rgb::from_hex(hex).map_err(|e| SpriteError::ConfigError(e.to_string()))
}

fn parse_region(text: &str) -> SpriteResult<Region> {
    Region::from_string(text).map_err(SpriteError::ConfigError)
}

fn parse_sample(sample: &Value) -> SpriteResult<SampleArea> {
    match sample.get("corners") {
        Some(Value::Boolean(true)) => return Ok(SampleArea::Corners { size: DEFAULT_CORNER_SIZE }),
        Some(Value::Boolean(false)) | None => {}
        Some(_) => {
            let size = get_u32(sample, "corners")?.unwrap_or(DEFAULT_CORNER_SIZE);
            return Ok(SampleArea::Corners { size });
        }
    }
    if let Some(patches) = sample.get("patches") {
        let list = patches.as_array().ok_or_else(|| type_error("patches", "an array"))?;
        let regions = list
            .iter()
            .map(|p| p.as_str().ok_or_else(|| type_error("patches", "an array of strings")))
            .map(|p| p.and_then(parse_region))
            .collect::<SpriteResult<Vec<Region>>>()?;
        return Ok(SampleArea::Patches(regions));
    }
    Ok(SampleArea::WholeImage)
}

fn parse_filter(filter: &Value, target: &mut RegionFilter) -> SpriteResult<()> {
    if let Some(min) = get_u32(filter, "min_size")? {
        target.min_size = min;
    }
    if let Some(max) = get_u32(filter, "max_size")? {
        target.max_size = Some(max);
    }
    if let Some(ratio) = get_f64(filter, "min_fill_ratio")? {
        target.min_fill_ratio = Some(ratio);
    }
    Ok(())
}

fn parse_bands(rows: &Value) -> SpriteResult<Vec<RowBand>> {
    let Some(bands) = rows.get("bands") else {
        return Ok(Vec::new());
    };
    let list = bands.as_array().ok_or_else(|| type_error("bands", "an array"))?;

    list.iter()
        .map(|band| {
            let pair = band
                .as_array()
                .filter(|p| p.len() == 2)
                .ok_or_else(|| type_error("bands", "a list of [y_start, y_end] pairs"))?;
            let bound = |v: &Value| {
                v.as_integer()
                    .and_then(|i| u32::try_from(i).ok())
                    .ok_or_else(|| type_error("bands", "non-negative integers"))
            };
            let (start, end) = (bound(&pair[0])?, bound(&pair[1])?);
            if start >= end {
                return Err(SpriteError::ConfigError(format!("Empty row band [{}, {}]", start, end)));
            }
            Ok(RowBand::new(start, end))
        })
        .collect()
}

fn parse_picks(picks: &Value) -> SpriteResult<Vec<SpritePick>> {
    let list = picks.as_array().ok_or_else(|| type_error("pick", "an array of tables"))?;

    list.iter()
        .enumerate()
        .map(|(i, pick)| {
            let label = get_str(pick, "label")?.map(str::to_string);

            if let Some(region) = get_str(pick, "region")? {
                return Ok(SpritePick::Rect { label, region: parse_region(region)? });
            }
            if let Some(bbox) = get_str(pick, "bbox")? {
                let bbox = BoundingBox::from_string(bbox).map_err(SpriteError::ConfigError)?;
                return Ok(SpritePick::Rect { label, region: bbox.to_region() });
            }

            let center_x = get_u32(pick, "center_x")?;
            let row_y = get_u32(pick, "row_y")?;
            match (center_x, row_y) {
                (Some(center_x), Some(row_y)) => {
                    let defaults = SearchWindow::default();
                    let window = SearchWindow {
                        half_width: get_u32(pick, "half_width")?.unwrap_or(defaults.half_width),
                        above: get_u32(pick, "above")?.unwrap_or(defaults.above),
                        below: get_u32(pick, "below")?.unwrap_or(defaults.below),
                        padding: get_u32(pick, "padding")?.unwrap_or(defaults.padding),
                    };
                    Ok(SpritePick::Center { label, center_x, row_y, window })
                }
                _ => Err(SpriteError::ConfigError(format!(
                    "Pick #{} needs 'region', 'bbox' or both 'center_x' and 'row_y'",
                    i + 1
                ))),
            }
        })
        .collect()
}

fn parse_selection(selection: &Value) -> SpriteResult<Selection> {
    let defaults = Selection::default();
    let x_range = match selection.get("x_range") {
        None => None,
        Some(v) => {
            let pair = v
                .as_array()
                .filter(|p| p.len() == 2)
                .and_then(|p| {
                    let start = p[0].as_integer().and_then(|i| u32::try_from(i).ok())?;
                    let end = p[1].as_integer().and_then(|i| u32::try_from(i).ok())?;
                    Some((start, end))
                })
                .ok_or_else(|| type_error("x_range", "a [start, end] pair of non-negative integers"))?;
            Some(pair)
        }
    };

    Ok(Selection {
        row_height: get_u32(selection, "row_height")?.unwrap_or(defaults.row_height),
        count: get_u64(selection, "count")?.map_or(defaults.count, |c| c as usize),
        x_range,
        min_size: get_u32(selection, "min_size")?,
        min_fill_ratio: get_f64(selection, "min_fill_ratio")?,
        per_row: get_u64(selection, "per_row")?.map(|n| n as usize),
        prefer_x: get_u32(selection, "prefer_x")?,
    })
}

fn parse_css(css: &Value, target: &mut CssOptions) -> SpriteResult<()> {
    if let Some(class_name) = get_str(css, "class_name")? {
        target.class_name = class_name.to_string();
    }
    if let Some(prefix) = get_str(css, "url_prefix")? {
        target.url_prefix = prefix.to_string();
    }
    if let Some(include) = get_bool(css, "include_position")? {
        target.include_position = include;
    }
    if let Some(first) = get_u64(css, "first_child")? {
        target.first_child = first as usize;
    }
    if let Some(declarations) = css.get("base") {
        let list = declarations.as_array().ok_or_else(|| type_error("base", "an array"))?;
        target.base_declarations = list
            .iter()
            .map(|d| d.as_str().map(str::to_string).ok_or_else(|| type_error("base", "an array of strings")))
            .collect::<SpriteResult<Vec<String>>>()?;
    }
    Ok(())
}
