//! End-to-end tests for the clock, history and store working together.
//!
//! ```bash
//! cargo test -p rb-app-state --test editor_integration
//! ```

use rb_app_state::{
    EditorCommand, EditorStore, HistorySnapshot, HistoryStack, KeyChord, RecordingScene,
    TickOutcome, TimelineClock,
};
use rb_common::{
    ColorEffect, EditorConfig, EditorElement, ElementId, ElementKind, ImageProperties,
    TextProperties, TimeFrame, TimeMs,
};
use rb_project::ProjectSettingsOverrides;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn text(id: &str, start: u64, end: u64) -> EditorElement {
    EditorElement::new(
        id,
        id,
        TimeFrame::from_millis(start, end).unwrap(),
        ElementKind::Text(TextProperties::default()),
    )
}

fn image(id: &str) -> EditorElement {
    EditorElement::new(
        id,
        "Still",
        TimeFrame::from_millis(0, 3000).unwrap(),
        ElementKind::Image(ImageProperties {
            src: format!("blob:{id}.png"),
            element_id: format!("image-{id}"),
            effect: ColorEffect::None,
        }),
    )
}

/// Snapshot number `n` holds `n` text elements and sits at time `n * 100`.
fn snapshot(n: u64) -> HistorySnapshot {
    let elements = (0..n).map(|i| text(&format!("el-{i}"), 0, 1000)).collect();
    HistorySnapshot::new(elements, None, TimeMs(n * 100)).unwrap()
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

#[test]
fn seek_always_lands_inside_timeline() {
    let mut clock = TimelineClock::new(10_000, 30).unwrap();
    for t in [-1e9_f64, -1.0, 0.0, 0.4, 999.9, 5000.0, 9999.99, 10_000.0, 10_000.5, 1e12] {
        let expected = t.clamp(0.0, 10_000.0).floor() as u64;
        assert_eq!(clock.seek_to(t), TimeMs(expected), "seek_to({t})");
        assert_eq!(clock.current_time_ms(), expected);
    }
}

#[test]
fn ticking_never_passes_max_time() {
    let mut clock = TimelineClock::new(1000, 60).unwrap();
    clock.play();
    let deltas = [16.7, 33.3, 0.0, 250.0, 7.5, 400.0, 500.0, 16.7];
    for delta in deltas {
        let outcome = clock.tick(delta);
        assert!(clock.current_time_ms() <= 1000);
        if outcome == TickOutcome::ReachedEnd {
            assert!(!clock.is_playing());
            assert_eq!(clock.current_time_ms(), 1000);
        }
    }
    assert!(!clock.is_playing());
    assert_eq!(clock.tick(10.0), TickOutcome::Idle);
}

#[test]
fn stop_resets_from_any_state() {
    let mut clock = TimelineClock::new(5000, 30).unwrap();
    clock.stop();
    assert_eq!((clock.current_time_ms(), clock.is_playing()), (0, false));

    clock.seek_to(2500.0);
    clock.play();
    clock.tick(100.0);
    clock.stop();
    assert_eq!((clock.current_time_ms(), clock.is_playing()), (0, false));

    clock.play();
    clock.tick(1e9);
    clock.stop();
    assert_eq!((clock.current_time_ms(), clock.is_playing()), (0, false));
}

#[test]
fn tick_past_end_scenario() {
    let mut clock = TimelineClock::new(10_000, 30).unwrap();
    clock.seek_to(8000.0);
    clock.play();
    assert_eq!(clock.tick(4000.0), TickOutcome::ReachedEnd);
    assert_eq!(clock.current_time_ms(), 10_000);
    assert!(!clock.is_playing());
    assert_eq!(clock.frame_index_at(TimeMs(10_000)), 300);
}

#[test]
fn visible_elements_at_500() {
    let elements = vec![text("long", 0, 5000), text("late", 600, 1000)];
    let mut clock = TimelineClock::new(10_000, 30).unwrap();
    clock.seek_to(500.0);
    let visible: Vec<_> = clock.visible_elements(&elements).iter().map(|e| e.id.clone()).collect();
    assert_eq!(visible, vec![ElementId::from("long")]);
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[test]
fn undo_n_then_redo_n_restores_sequence() {
    let n = 6;
    let mut history = HistoryStack::new(10).unwrap();
    let pushed: Vec<_> = (0..=n).map(snapshot).collect();
    for (i, snap) in pushed.iter().enumerate() {
        history.push(&format!("step {i}"), snap.clone()).unwrap();
    }

    let mut undone = Vec::new();
    for _ in 0..n {
        undone.push(history.undo().cloned().unwrap());
    }
    let expected_back: Vec<_> = pushed[..n as usize].iter().rev().cloned().collect();
    assert_eq!(undone, expected_back);

    let mut redone = Vec::new();
    for _ in 0..n {
        redone.push(history.redo().cloned().unwrap());
    }
    assert_eq!(redone, pushed[1..].to_vec());
    assert_eq!(history.current(), pushed.last());
}

#[test]
fn push_after_undo_drops_redo() {
    let mut history = HistoryStack::new(10).unwrap();
    for i in 0..5 {
        history.push("edit", snapshot(i)).unwrap();
    }
    history.undo();
    history.undo();
    history.undo();
    assert!(history.can_redo());
    history.push("edit", snapshot(42)).unwrap();
    assert!(!history.can_redo());
    assert!(history.redo().is_none());
}

#[test]
fn bounded_history_keeps_last_three() {
    let mut history = HistoryStack::new(3).unwrap();
    for i in 0..5 {
        history.push("edit", snapshot(i)).unwrap();
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), Some(2));
    let kept: Vec<_> = history.snapshots().cloned().collect();
    assert_eq!(kept, vec![snapshot(2), snapshot(3), snapshot(4)]);
    assert_eq!(history.current(), Some(&snapshot(4)));
}

#[test]
fn empty_history_has_nothing_to_undo() {
    let mut history = HistoryStack::new(50).unwrap();
    assert!(history.undo().is_none());
    assert!(!history.can_undo());
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[test]
fn editing_session_through_the_store() {
    let mut store = EditorStore::new(EditorConfig::default()).unwrap();
    let scene = RecordingScene::new();
    store.attach_scene(Box::new(scene.clone()));
    store
        .create_project(
            "Session",
            ProjectSettingsOverrides {
                duration: Some(TimeMs(10_000)),
                fps: Some(30),
                ..ProjectSettingsOverrides::default()
            },
        )
        .unwrap();

    store.add_element(image("bg")).unwrap();
    store.add_element(text("title", 500, 4000)).unwrap();
    store.select_element(Some(ElementId::from("bg"))).unwrap();
    store
        .dispatch(EditorCommand::SetEffect {
            id: ElementId::from("bg"),
            effect: ColorEffect::BlackAndWhite,
        })
        .unwrap();
    assert!(store.handle_key(&KeyChord::named("d").ctrl(), false).unwrap());
    assert_eq!(store.elements().len(), 3);
    assert_eq!(scene.last_ids().len(), 3);

    // Undo the duplicate and the effect, redo the effect.
    assert!(store.undo());
    assert!(store.undo());
    assert_eq!(store.element(&ElementId::from("bg")).and_then(|e| e.effect()), Some(ColorEffect::None));
    assert!(store.redo());
    assert_eq!(
        store.element(&ElementId::from("bg")).and_then(|e| e.effect()),
        Some(ColorEffect::BlackAndWhite)
    );
    assert!(store.can_redo());

    // A fresh edit forks history.
    store.remove_element(&ElementId::from("title")).unwrap();
    assert!(!store.can_redo());

    // Play to the end through the command path.
    store.dispatch(EditorCommand::Seek(9990.0)).unwrap();
    store.dispatch(EditorCommand::Play).unwrap();
    assert_eq!(store.tick(50.0), TickOutcome::ReachedEnd);
    assert_eq!(store.current_time_ms(), 10_000);
    assert!(!store.is_playing());
    assert_eq!(store.clock().current_frame(), 300);

    let json = store.save_project_json().unwrap();
    assert!(json.contains("blackAndWhite"));
    assert!(!store.is_dirty());
}

#[test]
fn history_respects_configured_limit_in_store() {
    let config = EditorConfig {
        max_history_size: 3,
        ..EditorConfig::default()
    };
    let mut store = EditorStore::new(config).unwrap();
    for i in 0..5 {
        store.add_element(text(&format!("t{i}"), 0, 100)).unwrap();
    }
    assert_eq!(store.history().len(), 3);
    assert!(store.undo());
    assert!(store.undo());
    assert!(!store.undo());
    assert_eq!(store.elements().len(), 3);
}
