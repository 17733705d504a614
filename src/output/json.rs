//! Versioned JSON export of the rendered timeline.
//!
//! The export carries the paint-ready view plus the raw scalars it was
//! derived from, so downstream tooling can re-render or diff without
//! re-running the pipeline. Schema is versioned to allow future evolution.

use crate::flame::layout::FlameModel;
use crate::flame::timeline::{FlameRect, TimelineView};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level timeline export written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineExport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Sum of included durations in nanoseconds
    pub total_time_ns: u64,

    /// Formatted total, as shown in the header
    pub total_label: String,

    /// True when the trace produced nothing to lay out
    pub placeholder: bool,

    /// Paint-ready rectangles
    pub rects: Vec<FlameRect>,

    /// Cumulative nanoseconds per source line (sorted by line)
    pub line_times: BTreeMap<u32, u64>,

    /// Timestamp when the export was generated
    pub generated_at: String,
}

/// Assemble an export from the model and its rendered view
///
/// **Public** - used by the CLI render command
pub fn to_export(model: &FlameModel, view: &TimelineView) -> TimelineExport {
    TimelineExport {
        version: SCHEMA_VERSION.to_string(),
        total_time_ns: model.total_time,
        total_label: view.total_label.clone(),
        placeholder: view.placeholder,
        rects: view.rects.clone(),
        line_times: model.line_times.iter().map(|(&l, &ns)| (l, ns)).collect(),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Write an export to a JSON file
///
/// **Public** - pretty-printed for human inspection
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - path is empty or a directory
pub fn write_export(
    export: &TimelineExport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing timeline export to: {}", output_path.display());
    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("cannot create directory: {}", e))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, export).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Read an export back from a JSON file
///
/// **Public** - used by the CLI validate command and tests
pub fn read_export(input_path: impl AsRef<Path>) -> Result<TimelineExport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading timeline export from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let export: TimelineExport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Export loaded: version {}, {} rects",
        export.version,
        export.rects.len()
    );

    Ok(export)
}

/// Validate that the output path can receive a file
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
