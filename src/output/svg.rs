//! SVG rendering of the flame timeline.
//!
//! Hand-rolled SVG assembly rather than a flamegraph library: the timeline
//! is one block per event in chronological order, which stack-aggregating
//! generators cannot express. Hover tooltips ride on `<title>` elements.

use crate::flame::timeline::TimelineView;
use crate::utils::config::{BLOCK_HEIGHT_PX, ROW_HEIGHT_PX};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER_HEIGHT: u32 = 30;
const AXIS_HEIGHT: u32 = 20;

/// SVG document configuration
#[derive(Debug, Clone)]
pub struct SvgConfig {
    pub title: String,
    pub width: u32,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            title: "Execution Timeline".to_string(),
            width: 1200,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
}

/// Render a timeline view into an SVG document
///
/// **Public** - main entry point for SVG generation
///
/// Depth 1 sits on the baseline with deeper rows stacked above it. An
/// empty view renders the placeholder message instead of rectangles;
/// this is never an error.
pub fn render_svg(view: &TimelineView, config: &SvgConfig) -> String {
    let width = config.width;

    let max_bottom = view.rects.iter().map(|r| r.bottom_px).max().unwrap_or(0);
    let graph_height = (max_bottom + ROW_HEIGHT_PX).max(3 * ROW_HEIGHT_PX);
    let total_height = HEADER_HEIGHT + graph_height + AXIS_HEIGHT;
    let baseline = HEADER_HEIGHT + graph_height;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, total_height, width, total_height
    ));

    svg.push_str(
        r#"<style>.block { font: 10px monospace; } .block:hover { stroke: black; stroke-width: 1; cursor: pointer; opacity: 0.9; }</style>"#,
    );

    // Header: title left, total time right
    svg.push_str(&format!(
        r#"<text x="8" y="20" font-size="14" font-weight="bold">{}</text>"#,
        escape_xml(&config.title)
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="20" font-size="12" text-anchor="end">{} Total Time</text>"#,
        width - 8,
        escape_xml(&view.total_label)
    ));

    if view.placeholder {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="12" text-anchor="middle" fill="gray">{}</text>"#,
            width / 2,
            HEADER_HEIGHT + graph_height / 2,
            escape_xml(&view.placeholder_text)
        ));
        svg.push_str("</svg>");
        return svg;
    }

    for rect in &view.rects {
        let x = rect.left_pct / 100.0 * width as f64;
        let w = rect.width_pct / 100.0 * width as f64;
        let y = baseline - rect.bottom_px - BLOCK_HEIGHT_PX;

        svg.push_str(&format!(
            r#"<rect x="{:.2}" y="{}" width="{:.2}" height="{}" fill="hsla({}, 70%, 50%, 0.6)" class="block"><title>{}</title></rect>"#,
            x,
            y,
            w,
            rect.height_px,
            rect.hue,
            escape_xml(&rect.tooltip)
        ));

        if !rect.label.is_empty() {
            svg.push_str(&format!(
                r#"<text x="{:.2}" y="{}" dx="3" dy="14" class="block" fill="white" pointer-events="none">{}</text>"#,
                x,
                y,
                escape_xml(&rect.label)
            ));
        }
    }

    // Time axis under the baseline
    let axis_y = baseline + 14;
    svg.push_str(&format!(
        r#"<text x="8" y="{}" font-size="10" fill="gray">{}</text>"#,
        axis_y,
        escape_xml(&view.axis_start)
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" font-size="10" fill="gray" text-anchor="end">{}</text>"#,
        width - 8,
        axis_y,
        escape_xml(&view.axis_end)
    ));

    svg.push_str("</svg>");

    debug!("Timeline SVG generated ({} bytes)", svg.len());
    svg
}

/// Write SVG content to a file
///
/// **Public** - creates parent directories as needed
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - path is empty or a directory
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing SVG to: {}", output_path.display());
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
    let mut writer = BufWriter::new(file);
    writer
        .write_all(svg_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("SVG written successfully ({} bytes)", svg_content.len());
    Ok(())
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

/// Minimal XML escaping for text content
///
/// **Private** - labels and tooltips carry user function names
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
