//! Lenient parsing of trace payloads.
//!
//! Engines deliver the event array either bare or wrapped in an envelope
//! object. Individual malformed elements are skipped, not fatal: trace data
//! comes from a live run and a few broken records must never lose the rest
//! of the batch.

use crate::trace::schema::TraceEvent;
use crate::utils::config::EVENT_FIELD_NAMES;
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::path::Path;

/// Parse a trace payload into an ordered event sequence
///
/// **Public** - main entry point for parsing
///
/// Accepts either a bare JSON array of events or an object wrapping the
/// array under one of the known field names (`trace_data`, `events`, ...).
///
/// # Errors
/// * `ParseError::InvalidFormat` - payload is neither an array nor a known
///   envelope, or every element of a non-empty array failed to parse
pub fn parse_events(raw: &serde_json::Value) -> Result<Vec<TraceEvent>, ParseError> {
    let array = extract_event_array(raw)?;
    parse_event_array(array)
}

/// Read and parse a trace JSON file
///
/// **Public** - CLI entry point
pub fn read_trace_file(path: impl AsRef<Path>) -> Result<Vec<TraceEvent>, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace from: {}", path.display());

    let file = std::fs::File::open(path)?;
    let raw: serde_json::Value = serde_json::from_reader(std::io::BufReader::new(file))?;

    parse_events(&raw)
}

/// Locate the event array inside the payload
///
/// **Private** - internal helper for parse_events
fn extract_event_array(raw: &serde_json::Value) -> Result<&Vec<serde_json::Value>, ParseError> {
    match raw {
        serde_json::Value::Array(array) => Ok(array),

        serde_json::Value::Object(obj) => {
            for field in EVENT_FIELD_NAMES {
                if let Some(serde_json::Value::Array(array)) = obj.get(*field) {
                    debug!("Found event array under field '{}'", field);
                    return Ok(array);
                }
            }
            Err(ParseError::InvalidFormat(
                "object payload has no event array field".to_string(),
            ))
        }

        _ => Err(ParseError::InvalidFormat(
            "trace payload must be a JSON array or object".to_string(),
        )),
    }
}

/// Parse the elements of an event array, recovering from bad elements
///
/// **Private** - internal parsing logic
fn parse_event_array(array: &[serde_json::Value]) -> Result<Vec<TraceEvent>, ParseError> {
    let mut events = Vec::with_capacity(array.len());

    for (index, value) in array.iter().enumerate() {
        match serde_json::from_value::<TraceEvent>(value.clone()) {
            Ok(event) => events.push(event),
            Err(e) => {
                // Log but don't fail - some records may be malformed
                warn!("Failed to parse event {}: {}", index, e);
            }
        }
    }

    if events.is_empty() && !array.is_empty() {
        return Err(ParseError::InvalidFormat(
            "all trace events failed to parse".to_string(),
        ));
    }

    debug!("Parsed {} of {} trace events", events.len(), array.len());
    Ok(events)
}
