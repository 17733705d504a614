//! Narrow capability surface for the external text-buffer widget.
//!
//! The overlay logic depends only on this trait, never on a concrete
//! widget. Hosts implement it as a thin adapter over whatever editor
//! component they embed.

use crate::utils::config::{ACTIVE_LINE_CLASS, ACTIVE_LINE_GUTTER_CLASS, LINE_COST_CLASS};

/// Opaque identifier of an applied decoration, minted by the buffer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecorationId(pub String);

/// Handle to the buffer's document model
///
/// Present only once the widget is mounted; the synchronizer treats an
/// absent model as "skip this update".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferModel {
    /// Number of lines the document currently holds
    pub line_count: u32,
}

/// A visual annotation on one line of the buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    /// 1-based target line
    pub line: u32,
    pub options: DecorationOptions,
}

/// Rendering options for a decoration, mirroring common editor widgets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecorationOptions {
    /// Emphasize the entire line rather than a character range
    pub is_whole_line: bool,

    /// Style class for the line body
    pub class_name: Option<String>,

    /// Style class for the gutter marker
    pub glyph_margin_class_name: Option<String>,

    /// Trailing text appended after the line content
    pub after_content: Option<String>,

    /// Style class for the trailing text
    pub after_content_class_name: Option<String>,
}

impl Decoration {
    /// Whole-line emphasis plus gutter marker for the playback cursor
    pub fn active_line(line: u32) -> Self {
        Self {
            line,
            options: DecorationOptions {
                is_whole_line: true,
                class_name: Some(ACTIVE_LINE_CLASS.to_string()),
                glyph_margin_class_name: Some(ACTIVE_LINE_GUTTER_CLASS.to_string()),
                ..DecorationOptions::default()
            },
        }
    }

    /// Trailing cost annotation, e.g. `1.5µs` after the line content
    pub fn line_cost(line: u32, formatted: String) -> Self {
        Self {
            line,
            options: DecorationOptions {
                after_content: Some(formatted),
                after_content_class_name: Some(LINE_COST_CLASS.to_string()),
                ..DecorationOptions::default()
            },
        }
    }
}

/// Capability surface the synchronizer requires from a text buffer
///
/// Matches the shape of editor widget APIs: `delta_decorations` atomically
/// replaces one decoration set with another and returns the new ids, so
/// there is never a frame with both old and new decorations visible.
pub trait TextBuffer {
    /// The document model, or `None` while the widget is not yet mounted
    fn model(&self) -> Option<BufferModel>;

    /// Atomically remove `old_ids` and apply `new`, returning the ids of
    /// the decorations just applied
    fn delta_decorations(&mut self, old_ids: &[DecorationId], new: &[Decoration])
        -> Vec<DecorationId>;

    /// Scroll vertically so `line` is centered; horizontal scroll untouched
    fn reveal_line_in_center(&mut self, line: u32);
}
