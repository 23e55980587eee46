//! View projection: derives the filtered list and the pie-chart series
//! from the current snapshot and a search term.
//!
//! Fully derived and stateless; safe to recompute on every snapshot or
//! search-term change.

use serde::Serialize;

use crate::models::InventoryItem;

/// Hue advances 45 degrees per slice at fixed saturation/lightness, so up
/// to 8 slices get visually distinct, reproducible colors before hues
/// repeat.
const HUE_STEP_DEGREES: usize = 45;
const SATURATION_PERCENT: u8 = 70;
const LIGHTNESS_PERCENT: u8 = 50;

/// Data series for the proportion chart: one label/value/color triple per
/// filtered item, in snapshot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewProjection {
    pub filtered: Vec<InventoryItem>,
    pub chart: ChartSeries,
}

/// Projects a snapshot through a search term.
///
/// An item is kept when the lowercased term is a substring of its
/// lowercased name or description; the empty term keeps everything, so
/// projecting with `""` is the identity on the snapshot.
pub fn project_view(snapshot: &[InventoryItem], search_term: &str) -> ViewProjection {
    let term = search_term.to_lowercase();
    let filtered: Vec<InventoryItem> = snapshot
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&term)
                || item.description.to_lowercase().contains(&term)
        })
        .cloned()
        .collect();

    let chart = ChartSeries {
        labels: filtered.iter().map(|item| item.name.clone()).collect(),
        values: filtered.iter().map(|item| item.quantity).collect(),
        colors: (0..filtered.len()).map(slice_color).collect(),
    };

    ViewProjection { filtered, chart }
}

/// Deterministic color for the slice at `index`.
pub fn slice_color(index: usize) -> String {
    format!(
        "hsl({}, {}%, {}%)",
        (index * HUE_STEP_DEGREES) % 360,
        SATURATION_PERCENT,
        LIGHTNESS_PERCENT
    )
}
