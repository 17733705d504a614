//! Human-readable duration formatting.
//!
//! One formatter is used everywhere a duration reaches the user: block
//! tooltips, the total-time header, per-line overlay annotations, and the
//! CLI tables. Fixed unit thresholds keep the rendering monotonic across
//! the whole domain.

/// Format a nanosecond duration as a compact human string
///
/// **Public** - used by the timeline renderer, the overlay synchronizer,
/// and the CLI.
///
/// Thresholds:
/// - below 1µs: whole nanoseconds, e.g. `999ns`
/// - below 1ms: microseconds with one decimal, e.g. `1.5µs`
/// - below 1s: milliseconds with one decimal, e.g. `2.5ms`
/// - otherwise: seconds with two decimals, e.g. `3.20s`
pub fn format_duration(ns: u64) -> String {
    if ns < 1_000 {
        format!("{}ns", ns)
    } else if ns < 1_000_000 {
        format!("{:.1}µs", ns as f64 / 1_000.0)
    } else if ns < 1_000_000_000 {
        format!("{:.1}ms", ns as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", ns as f64 / 1_000_000_000.0)
    }
}
