use std::collections::HashMap;
use tracelens::overlay::{BufferModel, Decoration, DecorationId, OverlaySync, TextBuffer};
use tracelens::session::PlaybackSession;
use tracelens::trace::TraceEvent;
use tracelens::utils::config::{ACTIVE_LINE_CLASS, LINE_COST_CLASS};

/// In-memory stand-in for a host editor widget
#[derive(Default)]
struct ScriptedBuffer {
    mounted: bool,
    decorations: HashMap<DecorationId, Decoration>,
    next_id: u64,
    reveals: Vec<u32>,
    swap_calls: usize,
}

impl ScriptedBuffer {
    fn mounted() -> Self {
        Self {
            mounted: true,
            ..Self::default()
        }
    }

    fn own_decorations(&self) -> Vec<&Decoration> {
        let mut all: Vec<(&DecorationId, &Decoration)> = self.decorations.iter().collect();
        all.sort_by_key(|(id, _)| id.0.clone());
        all.into_iter().map(|(_, d)| d).collect()
    }
}

impl TextBuffer for ScriptedBuffer {
    fn model(&self) -> Option<BufferModel> {
        self.mounted.then_some(BufferModel { line_count: 200 })
    }

    fn delta_decorations(
        &mut self,
        old_ids: &[DecorationId],
        new: &[Decoration],
    ) -> Vec<DecorationId> {
        self.swap_calls += 1;
        for id in old_ids {
            self.decorations.remove(id);
        }
        new.iter()
            .map(|decoration| {
                self.next_id += 1;
                let id = DecorationId(format!("id-{:06}", self.next_id));
                self.decorations.insert(id.clone(), decoration.clone());
                id
            })
            .collect()
    }

    fn reveal_line_in_center(&mut self, line: u32) {
        self.reveals.push(line);
    }
}

#[test]
fn test_sequential_cursor_updates_leave_only_the_last() {
    let mut buffer = ScriptedBuffer::mounted();
    let mut sync = OverlaySync::new();
    let timings = HashMap::new();

    for line in [10, 20, 30] {
        sync.update(&mut buffer, Some(line), &timings);
    }

    assert_eq!(buffer.decorations.len(), 1);
    let remaining = buffer.own_decorations();
    assert_eq!(remaining[0].line, 30);
    assert_eq!(
        remaining[0].options.class_name.as_deref(),
        Some(ACTIVE_LINE_CLASS)
    );
    assert!(remaining[0].options.is_whole_line);
    assert_eq!(buffer.reveals, vec![10, 20, 30]);
}

#[test]
fn test_each_update_is_one_atomic_swap() {
    let mut buffer = ScriptedBuffer::mounted();
    let mut sync = OverlaySync::new();

    let mut timings = HashMap::new();
    timings.insert(1, 100u64);
    timings.insert(2, 200u64);

    sync.update(&mut buffer, Some(1), &timings);
    assert_eq!(buffer.swap_calls, 1);

    sync.update(&mut buffer, Some(2), &timings);
    assert_eq!(buffer.swap_calls, 2);
    // Never more live decorations than one cursor + one per costed line
    assert_eq!(buffer.decorations.len(), 3);
}

#[test]
fn test_annotations_carry_formatted_durations() {
    let mut buffer = ScriptedBuffer::mounted();
    let mut sync = OverlaySync::new();

    let mut timings = HashMap::new();
    timings.insert(3, 999u64);
    timings.insert(4, 2_500_000u64);
    timings.insert(5, 0u64);

    sync.update(&mut buffer, None, &timings);

    let annotations = buffer.own_decorations();
    assert_eq!(annotations.len(), 2);

    let contents: Vec<&str> = annotations
        .iter()
        .filter_map(|d| d.options.after_content.as_deref())
        .collect();
    assert!(contents.contains(&"999ns"));
    assert!(contents.contains(&"2.5ms"));
    assert!(annotations
        .iter()
        .all(|d| d.options.after_content_class_name.as_deref() == Some(LINE_COST_CLASS)));

    // No cursor, no scrolling
    assert!(buffer.reveals.is_empty());
}

#[test]
fn test_unmounted_buffer_update_is_silently_skipped() {
    let mut buffer = ScriptedBuffer::default();
    let mut sync = OverlaySync::new();

    let mut timings = HashMap::new();
    timings.insert(1, 100u64);
    sync.update(&mut buffer, Some(1), &timings);

    assert!(buffer.decorations.is_empty());
    assert_eq!(buffer.swap_calls, 0);

    // Once mounted, the next update applies normally
    buffer.mounted = true;
    sync.update(&mut buffer, Some(1), &timings);
    assert_eq!(buffer.decorations.len(), 2);
}

#[test]
fn test_session_drives_overlay_from_trace_timings() {
    let mut session = PlaybackSession::new();
    session.replace_trace(vec![
        TraceEvent::trace("setup", 1_000).with_line(2),
        TraceEvent::trace("work", 1_500_000).with_line(5),
        TraceEvent::trace("work", 500_000).with_line(5),
    ]);
    session.set_cursor(Some(5));

    let mut buffer = ScriptedBuffer::mounted();
    session.sync_overlay(&mut buffer);

    // Active line at the cursor plus annotations for lines 2 and 5
    assert_eq!(buffer.decorations.len(), 3);
    let line5 = buffer
        .own_decorations()
        .into_iter()
        .find(|d| d.line == 5 && d.options.after_content.is_some())
        .cloned()
        .unwrap();
    assert_eq!(line5.options.after_content.as_deref(), Some("2.0ms"));
    assert_eq!(buffer.reveals, vec![5]);

    // Replacing the trace and re-syncing drops stale annotations
    session.replace_trace(vec![TraceEvent::trace("only", 10).with_line(9)]);
    session.sync_overlay(&mut buffer);
    let remaining = buffer.own_decorations();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].line, 9);
}
