//! Flame timeline construction.
//!
//! This module converts the normalized event sequence into:
//! - Positioned, colored flame blocks (layout)
//! - Paint-ready rectangle descriptors with tooltips (timeline)

pub mod layout;
pub mod timeline;

// Re-export main types
pub use layout::{label_hue, layout, FlameBlock, FlameModel};
pub use timeline::{render, FlameRect, TimelineView};
