//! Picking a diverse subset of detected sprites
//!
//! Animation sheets hold many frames of the same sprite per row. When only
//! a handful of sprites are wanted, taking one per sheet row gives variety.
//! Candidates can be narrowed first: a column band, a stricter size and
//! fill floor, and a preferred column that decides which frames of a row
//! are taken.

use std::collections::BTreeMap;

use log::debug;

use super::region::SpriteRegion;

/// How to pick a subset of sprites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Height of a sheet row; regions are bucketed by `min_y / row_height`
    pub row_height: u32,
    /// Number of sprites to keep
    pub count: usize,
    /// Only regions whose `min_x` lies within `[start, end]`
    pub x_range: Option<(u32, u32)>,
    /// Minimum width and height of a candidate
    pub min_size: Option<u32>,
    /// Minimum fill ratio of a candidate
    pub min_fill_ratio: Option<f64>,
    /// Take up to this many regions per row, row after row
    pub per_row: Option<usize>,
    /// Within a row, prefer regions whose `min_x` is closest to this column
    pub prefer_x: Option<u32>,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            row_height: 100,
            count: 5,
            x_range: None,
            min_size: None,
            min_fill_ratio: None,
            per_row: None,
            prefer_x: None,
        }
    }
}

impl Selection {
    /// Whether a region may be selected at all
    pub fn admits(&self, region: &SpriteRegion) -> bool {
        if let Some((start, end)) = self.x_range {
            if region.bounds.min_x < start || region.bounds.min_x > end {
                return false;
            }
        }
        if let Some(min) = self.min_size {
            if region.width() < min || region.height() < min {
                return false;
            }
        }
        match self.min_fill_ratio {
            Some(ratio) => region.fill_ratio() >= ratio,
            None => true,
        }
    }

    fn row_of(&self, region: &SpriteRegion) -> u32 {
        region.bounds.min_y / self.row_height.max(1)
    }

    /// Order of preference inside one row
    fn preference(&self, region: &SpriteRegion) -> (u32, u32, u32) {
        let b = region.bounds;
        match self.prefer_x {
            Some(x) => (b.min_x.abs_diff(x), b.min_x, b.min_y),
            None => (0, b.min_y, b.min_x),
        }
    }
}

/// Bucket regions into sheet rows
///
/// # Returns
/// `(row index, regions)` pairs in row order, each row sorted by `min_x`
pub fn group_into_rows(regions: &[SpriteRegion], row_height: u32) -> Vec<(u32, Vec<SpriteRegion>)> {
    let row_height = row_height.max(1);
    let mut rows: BTreeMap<u32, Vec<SpriteRegion>> = BTreeMap::new();
    for region in regions {
        rows.entry(region.bounds.min_y / row_height).or_default().push(*region);
    }

    rows.into_iter()
        .map(|(row, mut members)| {
            members.sort_by_key(|r| r.bounds.min_x);
            (row, members)
        })
        .collect()
}

/// Choose up to `count` regions and return their positions in `regions`
///
/// Without `per_row`, the preferred admitted region of each row is taken
/// first, rows top to bottom; if that is not enough, the remaining
/// admitted regions fill up the selection in `(min_y, min_x)` order.
/// With `per_row`, rows are taken one after another, each contributing
/// its preferred regions up to the limit.
pub fn select_indices(regions: &[SpriteRegion], selection: &Selection) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..regions.len()).filter(|&i| selection.admits(&regions[i])).collect();
    candidates.sort_by_key(|&i| regions[i].sort_key());

    let mut rows: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for &i in &candidates {
        rows.entry(selection.row_of(&regions[i])).or_default().push(i);
    }
    for members in rows.values_mut() {
        members.sort_by_key(|&i| selection.preference(&regions[i]));
    }

    let mut picked: Vec<usize> = Vec::new();
    match selection.per_row {
        Some(limit) => {
            for members in rows.values() {
                let room = selection.count.saturating_sub(picked.len());
                picked.extend(members.iter().take(limit.min(room)));
            }
        }
        None => {
            for members in rows.values() {
                if picked.len() >= selection.count {
                    break;
                }
                picked.push(members[0]);
            }
            for &i in &candidates {
                if picked.len() >= selection.count {
                    break;
                }
                if !picked.contains(&i) {
                    picked.push(i);
                }
            }
        }
    }

    debug!(
        "Selected {} of {} region(s) ({} admitted) from {} row(s)",
        picked.len(),
        regions.len(),
        candidates.len(),
        rows.len()
    );
    picked
}

/// Choose up to `count` regions, see [`select_indices`]
pub fn select_diverse(regions: &[SpriteRegion], selection: &Selection) -> Vec<SpriteRegion> {
    select_indices(regions, selection).into_iter().map(|i| regions[i]).collect()
}
