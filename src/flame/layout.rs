//! Flame layout: positioned blocks from the normalized sequence.
//!
//! Horizontal position is a running cumulative sum of included durations in
//! array order, not wall-clock timestamps. Recursive and concurrent calls
//! therefore flatten into sequential spans; this is the documented
//! semantics, not an approximation to be corrected.

use crate::trace::normalize::{LineTimings, NormalizedTrace};
use log::debug;

/// A rectangle representing one included event's share of total time
#[derive(Debug, Clone, PartialEq)]
pub struct FlameBlock {
    /// Function label; hue hashing and block text both key off this
    pub label: String,

    /// Source line, carried through for tooltips and annotations
    pub line: Option<u32>,

    /// Offset from the start of the timeline, in nanoseconds
    pub start: u64,

    /// Duration in nanoseconds
    pub duration: u64,

    /// 1-based row for vertical placement
    pub depth: u32,

    /// Deterministic hue in [0, 360)
    pub color_hue: u16,
}

impl FlameBlock {
    /// Fraction of total time covered by this block, in [0, 1]
    pub fn width_fraction(&self, total_time: u64) -> f64 {
        self.duration as f64 / total_time as f64
    }

    /// Left offset as a fraction of total time, in [0, 1]
    pub fn left_fraction(&self, total_time: u64) -> f64 {
        self.start as f64 / total_time as f64
    }

    /// Display name shown in labels and tooltips, e.g. `fib:12`
    pub fn display_name(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.label, line),
            None => self.label.clone(),
        }
    }
}

/// The fully derived flame model for one trace snapshot
///
/// Recomputed from scratch whenever the snapshot changes; never mutated
/// incrementally, so stale partial state cannot accumulate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlameModel {
    /// Positioned blocks, one per included event, in original order
    pub blocks: Vec<FlameBlock>,

    /// Sum of included durations; zero means placeholder state
    pub total_time: u64,

    /// Per-line cumulative cost, for the source overlay
    pub line_times: LineTimings,
}

impl FlameModel {
    /// True when there is nothing to lay out and the renderer should show
    /// the awaiting-profile placeholder
    pub fn is_empty(&self) -> bool {
        self.total_time == 0
    }

    /// Highest occupied row; zero when empty
    pub fn max_depth(&self) -> u32 {
        self.blocks.iter().map(|b| b.depth).max().unwrap_or(0)
    }
}

/// Lay out the normalized sequence into positioned blocks
///
/// **Public** - second stage of the pipeline
///
/// Single linear pass: each block starts where the running sum of prior
/// included durations ends. Identical input always produces identical
/// output, which is what lets callers memoize the result safely.
///
/// When `total_time` is zero (empty or all-malformed input) no blocks are
/// emitted and no division is attempted.
pub fn layout(trace: NormalizedTrace) -> FlameModel {
    if trace.total_time == 0 {
        debug!("Layout skipped: total time is zero");
        return FlameModel {
            blocks: Vec::new(),
            total_time: 0,
            line_times: trace.line_times,
        };
    }

    let mut blocks = Vec::with_capacity(trace.events.len());
    let mut cursor: u64 = 0;

    for event in trace.events {
        let color_hue = label_hue(&event.label);
        blocks.push(FlameBlock {
            start: cursor,
            duration: event.duration,
            depth: event.depth,
            color_hue,
            line: event.line,
            label: event.label,
        });
        cursor += event.duration;
    }

    debug!("Laid out {} blocks over {}ns", blocks.len(), cursor);

    FlameModel {
        blocks,
        total_time: trace.total_time,
        line_times: trace.line_times,
    }
}

/// Deterministic label-to-hue mapping
///
/// Sum of character codes mod 360, so the same function label receives the
/// same hue across independent renders and sessions without any shared
/// lookup table.
pub fn label_hue(label: &str) -> u16 {
    let sum: u64 = label.chars().map(|c| c as u64).sum();
    (sum % 360) as u16
}

/// Whether a block is wide enough to carry its label text
///
/// Narrow blocks render without text to avoid visual overflow; they remain
/// fully interactive regardless.
pub fn label_visible(duration: u64, total_time: u64) -> bool {
    duration as f64 >= crate::utils::config::MIN_LABEL_FRACTION * total_time as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::normalize::normalize;
    use crate::trace::schema::TraceEvent;

    fn model_of(events: &[TraceEvent]) -> FlameModel {
        layout(normalize(events))
    }

    #[test]
    fn test_worked_example() {
        // root 1000ns at depth 1, child 500ns at depth 2
        let model = model_of(&[
            TraceEvent::trace("root", 1000).with_depth(1),
            TraceEvent::trace("child", 500).with_depth(2),
        ]);

        assert_eq!(model.total_time, 1500);
        assert_eq!(model.blocks.len(), 2);

        let root = &model.blocks[0];
        let child = &model.blocks[1];
        assert_eq!(root.start, 0);
        assert!((root.width_fraction(1500) - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(child.start, 1000);
        assert!((child.left_fraction(1500) - 2.0 / 3.0).abs() < 1e-9);
        assert!((child.width_fraction(1500) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_blocks_are_contiguous() {
        let events: Vec<TraceEvent> = (0..50)
            .map(|i| TraceEvent::trace(format!("fn{}", i), (i as u64 + 1) * 7))
            .collect();

        let model = model_of(&events);
        for pair in model.blocks.windows(2) {
            assert_eq!(pair[1].start, pair[0].start + pair[0].duration);
        }
        let last = model.blocks.last().unwrap();
        assert_eq!(last.start + last.duration, model.total_time);
    }

    #[test]
    fn test_width_fractions_sum_to_one() {
        let events: Vec<TraceEvent> = (0..20)
            .map(|i| TraceEvent::trace(format!("fn{}", i), 13 * (i as u64 % 5 + 1)))
            .collect();

        let model = model_of(&events);
        let sum: f64 = model
            .blocks
            .iter()
            .map(|b| b.width_fraction(model.total_time))
            .sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_hue_is_stable_across_traces() {
        let a = model_of(&[
            TraceEvent::trace("compute", 10),
            TraceEvent::trace("other", 90),
        ]);
        let b = model_of(&[TraceEvent::trace("compute", 12345)]);

        assert_eq!(a.blocks[0].color_hue, b.blocks[0].color_hue);
        assert!(a.blocks[0].color_hue < 360);
    }

    #[test]
    fn test_hue_matches_char_code_sum() {
        // 'a' = 97, 'b' = 98 -> 195
        assert_eq!(label_hue("ab"), 195);
        assert_eq!(label_hue(""), 0);
    }

    #[test]
    fn test_zero_total_emits_no_blocks() {
        let model = model_of(&[TraceEvent::trace("noop", 0)]);
        assert!(model.is_empty());
        assert!(model.blocks.is_empty());

        let model = model_of(&[]);
        assert!(model.is_empty());
    }

    #[test]
    fn test_label_visibility_threshold() {
        // Suppressed strictly below 5% of total
        assert!(!label_visible(49, 1000));
        assert!(label_visible(50, 1000));
        assert!(label_visible(51, 1000));
    }

    #[test]
    fn test_display_name_includes_line() {
        let model = model_of(&[TraceEvent::trace("fib", 10).with_line(12)]);
        assert_eq!(model.blocks[0].display_name(), "fib:12");

        let model = model_of(&[TraceEvent::trace("fib", 10)]);
        assert_eq!(model.blocks[0].display_name(), "fib");
    }
}
