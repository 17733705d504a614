//! Playback session: snapshot ownership, memoization, and pipeline wiring.
//!
//! The surrounding host pushes whole trace arrays and cursor updates into a
//! session; the session recomputes the flame model only when the snapshot
//! actually changes. Snapshots carry an explicit generation counter as the
//! memoization key, since reference-identity caching is not a thing we can
//! lean on here.

use crate::flame::layout::{layout, FlameModel};
use crate::flame::timeline::{render, TimelineView};
use crate::overlay::buffer::TextBuffer;
use crate::overlay::sync::OverlaySync;
use crate::trace::normalize::normalize;
use crate::trace::schema::TraceEvent;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// An immutable trace array tagged with a monotonically increasing
/// generation
///
/// Two snapshots never share a generation, so "same generation" is a safe
/// stand-in for "same trace array".
#[derive(Debug, Clone)]
pub struct TraceSnapshot {
    generation: u64,
    events: Vec<TraceEvent>,
}

impl TraceSnapshot {
    pub fn new(events: Vec<TraceEvent>) -> Self {
        Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            events,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }
}

impl Default for TraceSnapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Single-threaded driver for one visualized run
///
/// Owns the current snapshot, the playback cursor, the memoized flame
/// model, and the overlay synchronizer. Every recomputation runs to
/// completion synchronously; there are no background workers.
#[derive(Debug, Default)]
pub struct PlaybackSession {
    snapshot: TraceSnapshot,
    cursor: Option<u32>,
    cached: Option<(u64, FlameModel)>,
    overlay: OverlaySync,
    recomputes: u64,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the trace array with a new snapshot
    ///
    /// **Public** - called when the engine delivers a new run
    ///
    /// All derived state is discarded unconditionally; the cursor resets,
    /// since it indexed into the previous run.
    pub fn replace_trace(&mut self, events: Vec<TraceEvent>) {
        self.snapshot = TraceSnapshot::new(events);
        self.cursor = None;
        self.cached = None;
        debug!("Trace replaced, generation {}", self.snapshot.generation());
    }

    /// Move the playback cursor
    ///
    /// A playback step is a new cursor against the same array; the flame
    /// model is untouched.
    pub fn set_cursor(&mut self, line: Option<u32>) {
        self.cursor = line;
    }

    pub fn cursor(&self) -> Option<u32> {
        self.cursor
    }

    pub fn snapshot(&self) -> &TraceSnapshot {
        &self.snapshot
    }

    /// The flame model for the current snapshot, recomputing only when the
    /// generation changed
    pub fn flame_model(&mut self) -> &FlameModel {
        self.ensure_model()
    }

    /// Paint-ready timeline view for the current snapshot
    pub fn timeline(&mut self) -> TimelineView {
        render(self.flame_model())
    }

    /// Push the current cursor and line costs into the buffer overlay
    ///
    /// Independent of the flame recomputation and idempotent, so callers
    /// may invoke it before, after, or between timeline renders.
    pub fn sync_overlay(&mut self, buffer: &mut dyn TextBuffer) {
        self.ensure_model();
        let Some((_, model)) = self.cached.as_ref() else {
            return;
        };
        self.overlay.update(buffer, self.cursor, &model.line_times);
    }

    /// Remove this session's decorations from the buffer
    pub fn clear_overlay(&mut self, buffer: &mut dyn TextBuffer) {
        self.overlay.clear(buffer);
    }

    fn ensure_model(&mut self) -> &FlameModel {
        let generation = self.snapshot.generation();
        let fresh = matches!(&self.cached, Some((cached_gen, _)) if *cached_gen == generation);
        if !fresh {
            debug!("Recomputing flame model for generation {}", generation);
            let model = layout(normalize(self.snapshot.events()));
            self.cached = Some((generation, model));
            self.recomputes += 1;
        }

        // Populated just above; the fallback is never built
        let (_, model) = self
            .cached
            .get_or_insert_with(|| (generation, FlameModel::default()));
        model
    }
}
