//! Source-code overlay: decorations on an external text buffer.
//!
//! This module handles:
//! - The narrow capability trait a host editor widget must provide
//! - The decoration model (active line, per-line cost annotations)
//! - Differential application keyed on previously applied ids

pub mod buffer;
pub mod sync;

// Re-export main types
pub use buffer::{BufferModel, Decoration, DecorationId, DecorationOptions, TextBuffer};
pub use sync::OverlaySync;
