use std::time::{Duration, Instant};

use super::*;
use crate::draw::color::MAP_BLUE;
use crate::draw::{Document, Element};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn create_test_engine() -> GestureEngine {
    GestureEngine::new(GestureSettings::default(), StatusPalette::default())
}

/// Assigned pit at (0,0,50,50) for team 254 plus an unassigned pit beside it.
fn create_test_document() -> Document {
    let mut doc = Document::new();
    let mut pit = Element::pit(0.0, 0.0, 50.0, 50.0, MAP_BLUE, 2.0);
    pit.set_team_number(Some(254));
    doc.add(pit);
    doc.add(Element::pit(100.0, 0.0, 50.0, 50.0, MAP_BLUE, 2.0));
    doc
}

/// Centre of the "done" circle for a hold at `(x, y)` with default settings.
fn done_circle(x: f64, y: f64) -> (f64, f64) {
    (x, y - 50.0)
}

#[test]
fn test_short_tap_produces_no_event() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    assert!(engine.on_pointer_down(&doc, 25.0, 25.0, t0));
    assert!(matches!(engine.phase(), GesturePhase::Armed { .. }));

    engine.on_pointer_up(25.0, 25.0, t0 + ms(150));
    assert!(engine.is_idle());
    assert!(engine.menu().is_none());
    assert!(engine.take_events().is_empty());
}

#[test]
fn test_hold_then_release_on_done_commits_once() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    assert!(engine.advance(t0 + ms(200)));
    assert!(matches!(engine.phase(), GesturePhase::Holding { .. }));

    let (dx, dy) = done_circle(25.0, 25.0);
    engine.on_pointer_move(dx, dy, t0 + ms(220));
    engine.on_pointer_up(dx, dy, t0 + ms(240));

    let events = engine.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].status, PitStatus::Done);
    assert_eq!(events[0].team_number, 254);
    assert_eq!(events[0].pit_id, doc.elements[0].id());
    assert!(matches!(engine.phase(), GesturePhase::Resolving { .. }));
    assert!(engine.take_events().is_empty());
}

#[test]
fn test_release_after_delay_without_tick_still_counts_as_hold() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    let (dx, dy) = done_circle(25.0, 25.0);
    engine.on_pointer_up(dx, dy, t0 + ms(500));

    assert_eq!(engine.take_events().len(), 1);
}

#[test]
fn test_release_on_absent_commits_absent() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    engine.advance(t0 + ms(250));
    let absent = engine
        .menu()
        .and_then(|menu| menu.circle(MenuChoice::Absent))
        .map(|circle| (circle.cx, circle.cy))
        .unwrap();
    engine.on_pointer_up(absent.0, absent.1, t0 + ms(300));

    let events = engine.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].status, PitStatus::Absent);
}

#[test]
fn test_release_on_cancel_or_empty_space_still_fades() {
    let doc = create_test_document();
    let t0 = Instant::now();

    let mut engine = create_test_engine();
    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    engine.advance(t0 + ms(200));
    let cancel = engine
        .menu()
        .and_then(|menu| menu.circle(MenuChoice::Cancel))
        .map(|circle| (circle.cx, circle.cy))
        .unwrap();
    assert!(engine.on_pointer_up(cancel.0, cancel.1, t0 + ms(260)));
    assert!(engine.take_events().is_empty());
    assert!(matches!(engine.phase(), GesturePhase::Resolving { .. }));

    let mut engine = create_test_engine();
    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    engine.advance(t0 + ms(200));
    assert!(engine.on_pointer_up(25.0, 25.0, t0 + ms(260)));
    assert!(engine.take_events().is_empty());
    assert!(matches!(engine.phase(), GesturePhase::Resolving { .. }));
}

#[test]
fn test_fade_runs_from_opaque_to_idle() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    engine.advance(t0 + ms(200));
    engine.on_pointer_up(25.0, 25.0, t0 + ms(300));
    assert_eq!(engine.menu().unwrap().opacity(), 1.0);

    engine.advance(t0 + ms(450));
    let opacity = engine.menu().unwrap().opacity();
    assert!((opacity - 0.5).abs() < 1e-9);

    assert!(engine.advance(t0 + ms(600)));
    assert!(engine.is_idle());
    assert!(engine.menu().is_none());
    assert!(!engine.needs_tick());
}

#[test]
fn test_leave_while_armed_cancels_timer() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    engine.on_pointer_leave(t0 + ms(100));
    assert!(engine.is_idle());

    // The timer must not fire later and resurrect the menu.
    assert!(!engine.advance(t0 + ms(1000)));
    assert!(engine.menu().is_none());
}

#[test]
fn test_leave_while_holding_discards_menu_without_fade() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    engine.advance(t0 + ms(200));
    assert!(engine.menu().is_some());

    assert!(engine.on_pointer_leave(t0 + ms(250)));
    assert!(engine.is_idle());
    assert!(engine.menu().is_none());
    assert!(engine.take_events().is_empty());
}

#[test]
fn test_press_on_unassigned_pit_or_empty_space_is_ignored() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    assert!(!engine.on_pointer_down(&doc, 125.0, 25.0, t0));
    assert!(!engine.on_pointer_down(&doc, 400.0, 400.0, t0));
    assert!(engine.is_idle());
}

#[test]
fn test_press_during_active_session_is_ignored() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    engine.advance(t0 + ms(200));
    assert!(!engine.on_pointer_down(&doc, 10.0, 10.0, t0 + ms(210)));
    assert_eq!(engine.menu().unwrap().anchor(), (25.0, 25.0));

    engine.on_pointer_up(25.0, 25.0, t0 + ms(220));
    assert!(!engine.on_pointer_down(&doc, 10.0, 10.0, t0 + ms(300)));

    // Once the fade completes the next press is accepted.
    assert!(engine.on_pointer_down(&doc, 10.0, 10.0, t0 + ms(600)));
}

#[test]
fn test_hover_grows_circle_over_time() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    engine.advance(t0 + ms(200));
    let (dx, dy) = done_circle(25.0, 25.0);
    assert!(engine.on_pointer_move(dx, dy, t0 + ms(200)));

    let hovered = |engine: &GestureEngine| {
        engine
            .menu()
            .and_then(|menu| menu.circle(MenuChoice::Done))
            .map(|circle| (circle.hovered, circle.scale))
            .unwrap()
    };
    assert_eq!(hovered(&engine), (true, 1.0));

    engine.advance(t0 + ms(250));
    let (_, mid) = hovered(&engine);
    assert!(mid > 1.0 && mid < 1.1);

    engine.advance(t0 + ms(2000));
    assert_eq!(hovered(&engine).1, 1.1);
}

#[test]
fn test_reset_clears_everything() {
    let doc = create_test_document();
    let mut engine = create_test_engine();
    let t0 = Instant::now();

    engine.on_pointer_down(&doc, 25.0, 25.0, t0);
    engine.advance(t0 + ms(200));
    engine.reset();

    assert!(engine.is_idle());
    assert!(!engine.advance(t0 + ms(400)));
    assert!(engine.menu().is_none());
}

#[test]
fn test_overlapping_assigned_pits_target_topmost() {
    let mut doc = create_test_document();
    let mut top = Element::pit(25.0, 25.0, 50.0, 50.0, MAP_BLUE, 2.0);
    top.set_team_number(Some(1678));
    doc.add(top);

    let mut engine = create_test_engine();
    let t0 = Instant::now();
    engine.on_pointer_down(&doc, 40.0, 40.0, t0);
    engine.advance(t0 + ms(200));
    let (dx, dy) = done_circle(40.0, 40.0);
    engine.on_pointer_up(dx, dy, t0 + ms(300));

    let events = engine.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].team_number, 1678);
}
