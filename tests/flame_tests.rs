use pretty_assertions::assert_eq;
use serde_json::json;
use tracelens::flame::{label_hue, layout, render};
use tracelens::session::PlaybackSession;
use tracelens::trace::{normalize, parse_events, EventKind, TraceEvent};

#[test]
fn test_worked_example_end_to_end() {
    let mut session = PlaybackSession::new();
    session.replace_trace(vec![
        TraceEvent::trace("root", 1000).with_depth(1),
        TraceEvent::trace("child", 500).with_depth(2),
    ]);

    let view = session.timeline();
    assert_eq!(view.total_label, "1.5µs");
    assert_eq!(view.rects.len(), 2);

    assert!((view.rects[0].left_pct - 0.0).abs() < 1e-6);
    assert!((view.rects[0].width_pct - 66.666_666).abs() < 1e-3);
    assert!((view.rects[1].left_pct - 66.666_666).abs() < 1e-3);
    assert!((view.rects[1].width_pct - 33.333_333).abs() < 1e-3);
}

#[test]
fn test_widths_cover_the_timeline_exactly() {
    let events: Vec<TraceEvent> = (0..500)
        .map(|i| TraceEvent::trace(format!("fn{}", i % 13), (i % 97) as u64 + 1))
        .collect();

    let view = render(&layout(normalize(&events)));
    let sum: f64 = view.rects.iter().map(|r| r.width_pct).sum();
    assert!((sum - 100.0).abs() < 1e-6);
}

#[test]
fn test_blocks_are_contiguous_without_gaps() {
    let events: Vec<TraceEvent> = (0..100)
        .map(|i| TraceEvent::trace(format!("fn{}", i), 31 * (i as u64 + 1)))
        .collect();

    let model = layout(normalize(&events));
    let mut expected_start = 0;
    for block in &model.blocks {
        assert_eq!(block.start, expected_start);
        expected_start += block.duration;
    }
    assert_eq!(expected_start, model.total_time);
}

#[test]
fn test_empty_trace_is_a_placeholder_not_an_error() {
    let view = render(&layout(normalize(&[])));
    assert!(view.placeholder);
    assert!(view.rects.is_empty());

    // All-malformed input degrades the same way
    let events = vec![
        TraceEvent {
            kind: EventKind::Stdout,
            ..TraceEvent::trace("x", 5)
        },
        TraceEvent {
            duration: None,
            ..TraceEvent::trace("y", 0)
        },
    ];
    let view = render(&layout(normalize(&events)));
    assert!(view.placeholder);
}

#[test]
fn test_hue_is_a_pure_function_of_the_label() {
    let trace_a = layout(normalize(&[
        TraceEvent::trace("alpha", 10),
        TraceEvent::trace("beta", 20),
    ]));
    let trace_b = layout(normalize(&[
        TraceEvent::trace("gamma", 999),
        TraceEvent::trace("alpha", 1),
    ]));

    let hue_a = trace_a.blocks[0].color_hue;
    let hue_b = trace_b.blocks[1].color_hue;
    assert_eq!(hue_a, hue_b);
    assert_eq!(hue_a, label_hue("alpha"));
}

#[test]
fn test_malformed_events_never_abort_the_batch() {
    let raw = json!([
        {"type": "Trace", "function": "good", "duration": 100, "line": 1},
        {"type": "Trace"},
        {"bogus": true},
        {"type": "FutureKind", "function": "later", "duration": 5},
        {"type": "Trace", "function": "also_good", "duration": 300, "line": 2}
    ]);

    let events = parse_events(&raw).unwrap();
    let model = layout(normalize(&events));

    // Missing "type" fails parse; bare Trace and unknown kinds are parsed
    // but excluded by normalization
    assert_eq!(model.blocks.len(), 2);
    assert_eq!(model.total_time, 400);
    assert_eq!(model.line_times.get(&1), Some(&100));
    assert_eq!(model.line_times.get(&2), Some(&300));
}

#[test]
fn test_playback_steps_reuse_the_flame_model() {
    let mut session = PlaybackSession::new();
    session.replace_trace(vec![TraceEvent::trace("f", 50).with_line(1)]);

    let first = session.timeline();
    session.set_cursor(Some(1));
    session.set_cursor(Some(2));
    let second = session.timeline();

    // Cursor movement alone never changes the flame geometry
    assert_eq!(first, second);
}
