//! Output writers for rendered timelines.
//!
//! This module handles writing data to disk:
//! - SVG flame timelines with hover tooltips
//! - Versioned JSON exports of the render model

pub mod json;
pub mod svg;

// Re-export main functions
pub use json::{read_export, to_export, write_export, TimelineExport};
pub use svg::{render_svg, write_svg, SvgConfig};
