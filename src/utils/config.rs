//! Configuration and constants shared across the pipeline.

/// Current export schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Timeline geometry. Depth bands are fixed-height rows measured from the
// baseline: depth 1 sits at the bottom, depth k at (k-1) * ROW_HEIGHT_PX.
pub const ROW_HEIGHT_PX: u32 = 24;
pub const BLOCK_HEIGHT_PX: u32 = 22;

/// Blocks narrower than this fraction of total time render without a label.
/// The block itself stays interactive; only the text is suppressed.
pub const MIN_LABEL_FRACTION: f64 = 0.05;

/// Placeholder shown while no profile data is available
pub const PLACEHOLDER_TEXT: &str = "Running code... Waiting for CPU profile.";

// Marker classes for decorations owned by the overlay synchronizer.
// Other subsystems sharing the buffer must not reuse these.
pub const ACTIVE_LINE_CLASS: &str = "tracelens-active-line";
pub const ACTIVE_LINE_GUTTER_CLASS: &str = "tracelens-active-gutter";
pub const LINE_COST_CLASS: &str = "tracelens-line-cost";

// Field names under which engines wrap the event array
// (bare arrays are also accepted)
pub const EVENT_FIELD_NAMES: &[&str] = &["trace_data", "events", "history", "trace"];
