//! Trace normalization: raw events to an included-only sequence.
//!
//! The normalizer walks the raw array once, in order, and keeps exactly the
//! records that can participate in flame layout. Everything downstream
//! (layout, timeline, overlay annotations) is derived from this sequence
//! and the total-time scalar computed alongside it.

use crate::trace::schema::{EventKind, TraceEvent};
use log::debug;
use std::collections::HashMap;

/// One event admitted into the flame layout
#[derive(Debug, Clone, PartialEq)]
pub struct IncludedEvent {
    /// Function label, used for block text and hue hashing
    pub label: String,

    /// Source line the event refers to, if any
    pub line: Option<u32>,

    /// Duration in nanoseconds
    pub duration: u64,

    /// 1-based stack depth; defaults to 1 when absent or zero
    pub depth: u32,
}

/// Cumulative nanoseconds per source line over the included sequence
pub type LineTimings = HashMap<u32, u64>;

/// Output of normalization: the included sequence plus derived scalars
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTrace {
    /// Included events, in original array order
    pub events: Vec<IncludedEvent>,

    /// Sum of included durations; zero means "nothing to lay out"
    pub total_time: u64,

    /// Per-line cumulative cost over the included events
    pub line_times: LineTimings,
}

/// Normalize a raw event array
///
/// **Public** - first stage of the pipeline
///
/// An event is included iff it is a `Trace` record carrying both a
/// `duration` and a `function`. Malformed records (missing either field)
/// are excluded silently; this never fails. Zero-duration records are kept:
/// they contribute nothing to the geometry but preserve the one-block-per-
/// event correspondence.
pub fn normalize(events: &[TraceEvent]) -> NormalizedTrace {
    let mut included = Vec::new();
    let mut total_time: u64 = 0;
    let mut line_times = LineTimings::new();

    for event in events {
        if event.kind != EventKind::Trace {
            continue;
        }
        let (Some(duration), Some(function)) = (event.duration, event.function.as_ref()) else {
            continue;
        };

        // stack_depth is 1-based; absent or zero both fall back to the baseline row
        let depth = match event.stack_depth {
            Some(d) if d >= 1 => d,
            _ => 1,
        };

        if let Some(line) = event.line {
            *line_times.entry(line).or_insert(0) += duration;
        }

        included.push(IncludedEvent {
            label: function.clone(),
            line: event.line,
            duration,
            depth,
        });
        total_time += duration;
    }

    debug!(
        "Normalized {} of {} events, total {}ns",
        included.len(),
        events.len(),
        total_time
    );

    NormalizedTrace {
        events: included,
        total_time,
        line_times,
    }
}
