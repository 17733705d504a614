//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs.
//!
//! Note that the visualization pipeline itself has no fatal error class:
//! bad telemetry degrades to "render nothing" or "skip this update".
//! The types here cover the outer file/JSON surface only.

use thiserror::Error;

/// Errors that can occur while reading trace files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("failed to read trace file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("invalid trace format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("invalid output path: {0}")]
    InvalidPath(String),
}
