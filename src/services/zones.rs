//! Template zone generation.
//!
//! Real geometry belongs to the editor's layout engine; the settings model
//! only needs a way to (re)generate a template's zones after its zone count
//! changed. [`ZoneEngine`] is that seam and [`UniformZoneEngine`] is the
//! engine used when nothing else is plugged in.

use crate::constants::GRID_MULTIPLIER;
use crate::models::{LayoutModel, LayoutType, Zone};

/// Generates zones for template layouts.
pub trait ZoneEngine {
    /// Replaces `layout.zones` according to its type and `zone_count`.
    ///
    /// Custom layouts must be left unchanged.
    fn init_template_zones(&self, layout: &mut LayoutModel);
}

/// Splits the work area evenly according to the template type.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformZoneEngine;

impl ZoneEngine for UniformZoneEngine {
    fn init_template_zones(&self, layout: &mut LayoutModel) {
        let count = layout.zone_count;
        layout.zones = match layout.layout_type {
            LayoutType::Custom => return,
            _ if count == 0 => Vec::new(),
            LayoutType::Blank => Vec::new(),
            LayoutType::Focus => focus_zones(count),
            LayoutType::Columns => split(GRID_MULTIPLIER, count)
                .map(|(x, width)| Zone::new(x, 0, width, GRID_MULTIPLIER))
                .collect(),
            LayoutType::Rows => split(GRID_MULTIPLIER, count)
                .map(|(y, height)| Zone::new(0, y, GRID_MULTIPLIER, height))
                .collect(),
            LayoutType::Grid => grid_zones(count),
            LayoutType::PriorityGrid => priority_grid_zones(count),
        };
    }
}

/// Splits `total` into `parts` contiguous spans; the last span absorbs the
/// remainder. Yields `(start, length)`.
fn split(total: u32, parts: u32) -> impl Iterator<Item = (u32, u32)> {
    let step = total / parts.max(1);
    (0..parts).map(move |i| {
        let start = i * step;
        let len = if i + 1 == parts { total - start } else { step };
        (start, len)
    })
}

fn focus_zones(count: u32) -> Vec<Zone> {
    // Half-size zones cascading from the top-left corner to the bottom-right.
    let size = GRID_MULTIPLIER / 2;
    let step = if count > 1 { size / (count - 1) } else { 0 };
    (0..count)
        .map(|i| Zone::new(i * step, i * step, size, size))
        .collect()
}

/// Integer square root of `count`, at least 1.
fn grid_rows(count: u32) -> u32 {
    (1..=count)
        .take_while(|r| r.checked_mul(*r).is_some_and(|square| square <= count))
        .last()
        .unwrap_or(1)
}

fn grid_zones(count: u32) -> Vec<Zone> {
    let rows = grid_rows(count);
    let base = count / rows;
    let extra = count % rows;

    split(GRID_MULTIPLIER, rows)
        .enumerate()
        .flat_map(|(row, (y, height))| {
            // Later rows take the extra zones so the top row stays widest.
            let row = row as u32;
            let columns = base + u32::from(row >= rows - extra);
            split(GRID_MULTIPLIER, columns).map(move |(x, width)| Zone::new(x, y, width, height))
        })
        .collect()
}

fn priority_grid_zones(count: u32) -> Vec<Zone> {
    if count <= 2 {
        return split(GRID_MULTIPLIER, count)
            .map(|(x, width)| Zone::new(x, 0, width, GRID_MULTIPLIER))
            .collect();
    }

    let side = GRID_MULTIPLIER / 4;
    let centre = GRID_MULTIPLIER - 2 * side;
    let remaining = count - 1;
    let left = remaining.div_ceil(2);
    let right = remaining - left;

    let mut zones: Vec<Zone> = split(GRID_MULTIPLIER, left)
        .map(|(y, height)| Zone::new(0, y, side, height))
        .collect();
    zones.push(Zone::new(side, 0, centre, GRID_MULTIPLIER));
    zones.extend(
        split(GRID_MULTIPLIER, right).map(|(y, height)| Zone::new(side + centre, y, side, height)),
    );
    zones
}
