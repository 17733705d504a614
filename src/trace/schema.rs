//! Wire schema for execution trace events.
//!
//! Events arrive as a flat JSON array from the external execution engine.
//! Array order is the authoritative chronology; nothing in this crate
//! re-sorts by timestamp.

use serde::{Deserialize, Serialize};

/// Kind discriminator carried in the `type` field of each event
///
/// Only `Trace` records participate in flame layout. The engine also emits
/// control and output records during a run; unrecognized kinds deserialize
/// as `Unknown` rather than failing the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Trace,
    Call,
    Return,
    Error,
    Stdout,
    #[serde(other)]
    Unknown,
}

/// One timed record emitted by the execution engine
///
/// All payload fields are optional on the wire: a live, partially-failed
/// run may produce records missing any of them. Consumers decide per field
/// whether a record qualifies; deserialization itself never rejects a
/// record for missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Record kind
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// Source line the record refers to (1-based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Function the record was emitted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// 1-based call-stack nesting level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_depth: Option<u32>,

    /// Duration in nanoseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    /// Engine timestamp; carried for completeness, unused by layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl TraceEvent {
    /// Create a bare `Trace` record with a function and duration
    ///
    /// **Public** - convenience constructor, mostly for tests and demos
    pub fn trace(function: impl Into<String>, duration: u64) -> Self {
        Self {
            kind: EventKind::Trace,
            line: None,
            function: Some(function.into()),
            stack_depth: None,
            duration: Some(duration),
            timestamp: None,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.stack_depth = Some(depth);
        self
    }
}
