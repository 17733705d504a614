//! Source overlay synchronizer.
//!
//! Keeps the text buffer's decorations in step with the playback cursor
//! and the per-line cost map. The synchronizer remembers the ids of the
//! decorations it applied last time and swaps exactly those out on each
//! update, so decorations owned by other subsystems sharing the buffer are
//! never touched.

use crate::overlay::buffer::{Decoration, DecorationId, TextBuffer};
use crate::trace::normalize::LineTimings;
use crate::utils::format::format_duration;
use log::debug;

/// Differential decoration applier
///
/// One instance per buffer. The only state retained across updates is the
/// list of previously applied decoration ids, used for differential
/// removal; everything else is recomputed per call, so repeated updates
/// with the same inputs are idempotent.
#[derive(Debug, Default)]
pub struct OverlaySync {
    applied: Vec<DecorationId>,
}

impl OverlaySync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute and apply the decoration set for the given cursor and
    /// line costs
    ///
    /// **Public** - called on every cursor or timing change
    ///
    /// At most one active-line decoration (at the cursor), one cost
    /// annotation per line with nonzero cumulative time. The swap is a
    /// single `delta_decorations` call; afterwards the cursor line is
    /// scrolled into the vertical center. If the buffer is not yet mounted
    /// this is a silent no-op and previously recorded ids are kept for the
    /// next attempt.
    pub fn update(
        &mut self,
        buffer: &mut dyn TextBuffer,
        cursor: Option<u32>,
        line_times: &LineTimings,
    ) {
        if buffer.model().is_none() {
            debug!("Overlay update skipped: buffer not mounted");
            return;
        }

        let decorations = build_decorations(cursor, line_times);

        let old = std::mem::take(&mut self.applied);
        self.applied = buffer.delta_decorations(&old, &decorations);

        if let Some(line) = cursor {
            buffer.reveal_line_in_center(line);
        }
    }

    /// Remove every decoration this synchronizer has applied
    ///
    /// **Public** - teardown when playback ends
    pub fn clear(&mut self, buffer: &mut dyn TextBuffer) {
        if buffer.model().is_none() {
            return;
        }
        let old = std::mem::take(&mut self.applied);
        self.applied = buffer.delta_decorations(&old, &[]);
    }
}

/// Compute the full decoration list for one update
///
/// **Private** - pure; line annotations are emitted in ascending line
/// order so repeated calls produce identical lists.
fn build_decorations(cursor: Option<u32>, line_times: &LineTimings) -> Vec<Decoration> {
    let mut decorations = Vec::with_capacity(line_times.len() + 1);

    if let Some(line) = cursor {
        decorations.push(Decoration::active_line(line));
    }

    let mut costs: Vec<(u32, u64)> = line_times
        .iter()
        .filter(|(_, &ns)| ns > 0)
        .map(|(&line, &ns)| (line, ns))
        .collect();
    costs.sort_unstable_by_key(|&(line, _)| line);

    for (line, ns) in costs {
        decorations.push(Decoration::line_cost(line, format_duration(ns)));
    }

    decorations
}
