//! Timeline renderer: flame model to concrete rectangle descriptors.
//!
//! Produces everything a paint surface needs and nothing it doesn't:
//! percentage-based horizontal geometry, pixel-based depth bands, hue,
//! label text (already suppression-filtered), tooltip text, header and
//! axis strings, and the placeholder flag for the empty state.

use crate::flame::layout::{label_visible, FlameModel};
use crate::utils::config::{BLOCK_HEIGHT_PX, PLACEHOLDER_TEXT, ROW_HEIGHT_PX};
use crate::utils::format::format_duration;
use serde::{Deserialize, Serialize};

/// One paintable rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlameRect {
    /// Left edge as a percentage of timeline width
    pub left_pct: f64,

    /// Width as a percentage of timeline width
    pub width_pct: f64,

    /// Offset of the bottom edge from the baseline, in pixels
    pub bottom_px: u32,

    /// Fixed block height, in pixels
    pub height_px: u32,

    /// Hue for `hsla(hue, 70%, 50%, 0.6)` fills
    pub hue: u16,

    /// Label text; empty when the block is too narrow to carry it
    pub label: String,

    /// Hover tooltip: name, exact duration, share of total
    pub tooltip: String,
}

/// A complete, paint-ready view of one trace snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineView {
    /// Rectangles in original event order
    pub rects: Vec<FlameRect>,

    /// Formatted total time for the header, e.g. `1.5µs`
    pub total_label: String,

    /// Left edge of the time axis (always the zero mark)
    pub axis_start: String,

    /// Right edge of the time axis (the formatted total)
    pub axis_end: String,

    /// True when there is no profile to show; paint `placeholder_text`
    /// instead of rectangles
    pub placeholder: bool,

    /// Neutral message for the empty state
    pub placeholder_text: String,
}

/// Render the flame model into a timeline view
///
/// **Public** - third stage of the pipeline
///
/// Pure function of the model: safe to memoize alongside it.
pub fn render(model: &FlameModel) -> TimelineView {
    if model.is_empty() {
        return TimelineView {
            rects: Vec::new(),
            total_label: format_duration(0),
            axis_start: "0s".to_string(),
            axis_end: format_duration(0),
            placeholder: true,
            placeholder_text: PLACEHOLDER_TEXT.to_string(),
        };
    }

    let total = model.total_time;
    let rects = model
        .blocks
        .iter()
        .map(|block| {
            let share = block.width_fraction(total) * 100.0;
            let label = if label_visible(block.duration, total) {
                block.display_name()
            } else {
                String::new()
            };

            FlameRect {
                left_pct: block.left_fraction(total) * 100.0,
                width_pct: share,
                bottom_px: (block.depth - 1) * ROW_HEIGHT_PX,
                height_px: BLOCK_HEIGHT_PX,
                hue: block.color_hue,
                label,
                tooltip: format!(
                    "{}\nDuration: {}\n{:.1}% of total",
                    block.display_name(),
                    format_duration(block.duration),
                    share
                ),
            }
        })
        .collect();

    TimelineView {
        rects,
        total_label: format_duration(total),
        axis_start: "0s".to_string(),
        axis_end: format_duration(total),
        placeholder: false,
        placeholder_text: String::new(),
    }
}
