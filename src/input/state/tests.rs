use super::*;
use crate::config::PitPlacement;
use crate::draw::color::MAP_BLUE;
use crate::draw::{Document, Element, ElementKind};
use crate::input::Tool;

/// Host with canned answers for prompts and confirmations.
#[derive(Default)]
struct TestHost {
    text: Option<String>,
    confirm: bool,
    prompts: usize,
}

impl EditorHost for TestHost {
    fn prompt_text(&mut self) -> Option<String> {
        self.prompts += 1;
        self.text.clone()
    }

    fn confirm_clear(&mut self) -> bool {
        self.confirm
    }
}

fn create_test_editor(tool: Tool) -> EditorState {
    let mut editor = EditorState::new(EditorSettings::default());
    editor.set_tool(tool);
    editor
}

fn click(editor: &mut EditorState, x: f64, y: f64) {
    let mut host = TestHost::default();
    editor.on_pointer_down(x, y, &mut host);
    editor.on_pointer_up(x, y);
}

fn pit_geometry(element: &Element) -> (f64, f64, f64, f64) {
    match element.kind {
        ElementKind::Pit {
            start_x,
            start_y,
            width,
            height,
            ..
        } => (start_x, start_y, width, height),
        _ => panic!("expected a pit, got {:?}", element.kind),
    }
}

fn line_geometry(element: &Element) -> (f64, f64, f64, f64) {
    match element.kind {
        ElementKind::Line {
            start_x,
            start_y,
            end_x,
            end_y,
            ..
        } => (start_x, start_y, end_x, end_y),
        _ => panic!("expected a line, got {:?}", element.kind),
    }
}

fn assigned_pit(x: f64, y: f64, team: Option<u32>) -> Element {
    let mut pit = Element::pit(x, y, 50.0, 50.0, MAP_BLUE, 2.0);
    pit.set_team_number(team);
    pit
}

#[test]
fn test_pit_click_places_centered_pit() {
    let mut editor = create_test_editor(Tool::Pit);
    click(&mut editor, 100.0, 100.0);

    assert_eq!(editor.document.len(), 1);
    assert_eq!(pit_geometry(&editor.document.elements[0]), (75.0, 75.0, 50.0, 50.0));
    assert!(matches!(editor.state, EditState::Idle));
    assert!(matches!(
        editor.take_events().as_slice(),
        [EditorEvent::DocumentChanged(doc)] if doc.len() == 1
    ));
}

#[test]
fn test_pit_tool_grabs_existing_pit_instead_of_placing() {
    let mut editor = create_test_editor(Tool::Pit);
    editor.document.add(assigned_pit(0.0, 0.0, Some(254)));

    let mut host = TestHost::default();
    editor.on_pointer_down(10.0, 10.0, &mut host);
    assert!(matches!(
        editor.state,
        EditState::Dragging { offset_x, offset_y, .. } if offset_x == 10.0 && offset_y == 10.0
    ));

    editor.on_pointer_move(210.0, 310.0);
    editor.on_pointer_up(210.0, 310.0);

    assert_eq!(editor.document.len(), 1);
    let pit = &editor.document.elements[0];
    assert_eq!(pit_geometry(pit), (200.0, 300.0, 50.0, 50.0));
    assert_eq!(pit.team_number(), Some(254));
}

#[test]
fn test_pit_tool_ignores_lines_when_grabbing() {
    let mut editor = create_test_editor(Tool::Pit);
    let mut line = Element::line(0.0, 100.0, MAP_BLUE, 2.0);
    if let ElementKind::Line { end_x, .. } = &mut line.kind {
        *end_x = 200.0;
    }
    editor.document.add(line);

    click(&mut editor, 100.0, 100.0);

    assert_eq!(editor.document.len(), 2);
    assert!(editor.document.elements[1].is_pit());
}

#[test]
fn test_grab_miss_is_noop() {
    let mut editor = create_test_editor(Tool::Grab);
    click(&mut editor, 100.0, 100.0);
    assert!(editor.document.is_empty());
    assert!(editor.take_events().is_empty());
}

#[test]
fn test_grab_moves_line_rigidly() {
    let mut editor = create_test_editor(Tool::Grab);
    let mut line = Element::line(10.0, 10.0, MAP_BLUE, 2.0);
    if let ElementKind::Line { end_x, .. } = &mut line.kind {
        *end_x = 110.0;
    }
    editor.document.add(line);

    let mut host = TestHost::default();
    editor.on_pointer_down(50.0, 12.0, &mut host);
    editor.on_pointer_move(60.0, 42.0);
    editor.on_pointer_up(60.0, 42.0);

    assert_eq!(
        line_geometry(&editor.document.elements[0]),
        (20.0, 40.0, 120.0, 40.0)
    );
}

#[test]
fn test_drag_release_without_movement_lands_at_pointer_minus_offset() {
    let mut editor = create_test_editor(Tool::Grab);
    editor.document.add(Element::text(
        300.0,
        300.0,
        "Entrance".to_string(),
        MAP_BLUE,
        2.0,
    ));

    let mut host = TestHost::default();
    editor.on_pointer_down(305.0, 295.0, &mut host);
    editor.on_pointer_move(405.0, 395.0);
    editor.on_pointer_up(405.0, 395.0);

    assert_eq!(editor.document.elements[0].anchor(), (400.0, 400.0));
}

#[test]
fn test_drag_release_elsewhere_leaves_element_at_last_move() {
    let mut editor = create_test_editor(Tool::Grab);
    editor.document.add(assigned_pit(0.0, 0.0, Some(254)));

    let mut host = TestHost::default();
    editor.on_pointer_down(10.0, 10.0, &mut host);
    editor.on_pointer_move(110.0, 10.0);
    let _ = editor.take_events();

    editor.on_pointer_up(300.0, 300.0);

    assert!(matches!(editor.state, EditState::Idle));
    assert_eq!(editor.document.elements[0].anchor(), (100.0, 0.0));
    assert!(editor.take_events().is_empty());
}

#[test]
fn test_dragged_pit_snaps_to_neighbour_edge() {
    let mut editor = create_test_editor(Tool::Grab);
    editor.document.add(assigned_pit(0.0, 0.0, None));
    editor.document.add(assigned_pit(200.0, 200.0, Some(118)));

    let mut host = TestHost::default();
    editor.on_pointer_down(210.0, 210.0, &mut host);
    // Candidate anchor (57, 120): x is within 10 of the first pit's right edge.
    editor.on_pointer_move(67.0, 130.0);
    editor.on_pointer_up(67.0, 130.0);

    let moved = &editor.document.elements[1];
    assert_eq!(pit_geometry(moved), (50.0, 120.0, 50.0, 50.0));
    assert_eq!(moved.team_number(), Some(118));
}

#[test]
fn test_drag_preserves_every_field_but_position() {
    let mut editor = create_test_editor(Tool::Grab);
    editor.document.add(assigned_pit(0.0, 0.0, Some(254)));
    let before = editor.document.elements[0].clone();

    let mut host = TestHost::default();
    editor.on_pointer_down(25.0, 25.0, &mut host);
    for step in 1..=20 {
        let offset = step as f64 * 17.0;
        editor.on_pointer_move(25.0 + offset, 25.0 + offset / 2.0);
    }
    editor.on_pointer_up(365.0, 195.0);

    let mut after = editor.document.elements[0].clone();
    assert_eq!(after.id(), before.id());
    assert_eq!(after.team_number(), Some(254));
    assert_eq!(after.color(), before.color());
    let (ax, ay) = before.anchor();
    after.move_anchor_to(ax, ay);
    assert_eq!(after, before);
}

#[test]
fn test_line_locks_to_horizontal_axis() {
    let mut editor = create_test_editor(Tool::Line);
    let mut host = TestHost::default();
    editor.on_pointer_down(10.0, 10.0, &mut host);
    editor.on_pointer_move(100.0, 30.0);
    assert!(editor.provisional_element().is_some());
    assert!(editor.document.is_empty());
    editor.on_pointer_up(100.0, 30.0);

    let (sx, sy, ex, ey) = line_geometry(&editor.document.elements[0]);
    assert_eq!((sx, sy), (10.0, 10.0));
    assert_eq!(ex, 100.0);
    assert_eq!(ey, sy);
    assert!(editor.provisional_element().is_none());
}

#[test]
fn test_line_locks_to_vertical_axis() {
    let mut editor = create_test_editor(Tool::Line);
    let mut host = TestHost::default();
    editor.on_pointer_down(10.0, 10.0, &mut host);
    editor.on_pointer_up(25.0, -90.0);

    let (sx, _, ex, ey) = line_geometry(&editor.document.elements[0]);
    assert_eq!(ex, sx);
    assert_eq!(ey, -90.0);
}

#[test]
fn test_line_snaps_to_grid_when_enabled() {
    let settings = EditorSettings {
        snap_to_grid: true,
        ..EditorSettings::default()
    };
    let mut editor = EditorState::new(settings);
    let mut host = TestHost::default();
    editor.on_pointer_down(12.0, 29.0, &mut host);
    editor.on_pointer_up(97.0, 33.0);

    assert_eq!(
        line_geometry(&editor.document.elements[0]),
        (20.0, 20.0, 100.0, 20.0)
    );
}

#[test]
fn test_text_tool_places_prompted_text() {
    let mut editor = create_test_editor(Tool::Text);
    let mut host = TestHost {
        text: Some("Pit Admin".to_string()),
        ..TestHost::default()
    };
    editor.on_pointer_down(40.0, 60.0, &mut host);

    assert_eq!(host.prompts, 1);
    assert!(matches!(editor.state, EditState::Idle));
    match &editor.document.elements[0].kind {
        ElementKind::Text {
            start_x,
            start_y,
            text,
            ..
        } => {
            assert_eq!((*start_x, *start_y), (40.0, 60.0));
            assert_eq!(text, "Pit Admin");
        }
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_cancelled_or_empty_prompt_places_nothing() {
    let mut editor = create_test_editor(Tool::Text);
    let mut cancelled = TestHost::default();
    editor.on_pointer_down(40.0, 60.0, &mut cancelled);

    let mut empty = TestHost {
        text: Some(String::new()),
        ..TestHost::default()
    };
    editor.on_pointer_down(40.0, 60.0, &mut empty);

    assert!(editor.document.is_empty());
    assert!(editor.take_events().is_empty());
}

#[test]
fn test_eraser_removes_first_element_near_anchor() {
    let mut editor = create_test_editor(Tool::Eraser);
    editor.document.add(assigned_pit(100.0, 100.0, None));
    editor.document.add(assigned_pit(105.0, 105.0, None));
    let second = editor.document.elements[1].id().to_string();

    click(&mut editor, 103.0, 103.0);

    assert_eq!(editor.document.len(), 1);
    assert_eq!(editor.document.elements[0].id(), second);
}

#[test]
fn test_eraser_uses_anchor_not_bounds() {
    let mut editor = create_test_editor(Tool::Eraser);
    editor.document.add(assigned_pit(100.0, 100.0, None));

    // Inside the pit, but far from its top-left anchor.
    click(&mut editor, 140.0, 140.0);
    assert_eq!(editor.document.len(), 1);

    // Exactly 10 away on one axis is outside the strict radius.
    click(&mut editor, 110.0, 100.0);
    assert_eq!(editor.document.len(), 1);

    click(&mut editor, 109.0, 91.0);
    assert!(editor.document.is_empty());
}

#[test]
fn test_overlapping_pits_resolve_to_last_created() {
    let mut editor = create_test_editor(Tool::Grab);
    editor.document.add(assigned_pit(0.0, 0.0, None));
    editor.document.add(assigned_pit(25.0, 25.0, None));
    let top = editor.document.elements[1].id().to_string();

    let mut host = TestHost::default();
    editor.on_pointer_down(40.0, 40.0, &mut host);
    assert!(matches!(&editor.state, EditState::Dragging { id, .. } if *id == top));
}

#[test]
fn test_drop_moves_team_between_pits() {
    let mut editor = create_test_editor(Tool::Pit);
    editor.document.add(assigned_pit(0.0, 0.0, Some(254)));
    editor.document.add(assigned_pit(100.0, 0.0, None));
    let second = editor.document.elements[1].id().to_string();

    assert!(editor.drop_team(125.0, 25.0, r#"{"teamNumber": 254}"#));

    assert_eq!(editor.document.elements[0].team_number(), None);
    assert_eq!(editor.document.elements[1].team_number(), Some(254));
    let events = editor.take_events();
    assert!(matches!(events[0], EditorEvent::DocumentChanged(_)));
    assert_eq!(
        events[1],
        EditorEvent::TeamAssigned {
            pit_id: second,
            team_number: 254,
        }
    );
}

#[test]
fn test_drop_ignores_bad_payloads_and_misses() {
    let mut editor = create_test_editor(Tool::Pit);
    editor.document.add(assigned_pit(0.0, 0.0, Some(254)));
    let before = editor.document.clone();

    assert!(!editor.drop_team(25.0, 25.0, "not json"));
    assert!(!editor.drop_team(25.0, 25.0, r#"{"name": "Cheesy Poofs"}"#));
    assert!(!editor.drop_team(25.0, 25.0, r#"{"teamNumber": "abc"}"#));
    assert!(!editor.drop_team(25.0, 25.0, r#"{"teamNumber": 0}"#));
    assert!(!editor.drop_team(25.0, 25.0, r#"{"teamNumber": 254.5}"#));
    assert!(!editor.drop_team(25.0, 25.0, r#"{"teamNumber": -1}"#));
    assert!(!editor.drop_team(500.0, 500.0, r#"{"teamNumber": 971}"#));

    assert_eq!(editor.document, before);
    assert!(editor.take_events().is_empty());
}

#[test]
fn test_drop_accepts_whole_number_float() {
    let mut editor = create_test_editor(Tool::Pit);
    editor.document.add(assigned_pit(0.0, 0.0, None));

    assert!(editor.drop_team(25.0, 25.0, r#"{"teamNumber": 971.0}"#));
    assert_eq!(editor.document.elements[0].team_number(), Some(971));
}

#[test]
fn test_team_number_is_unique_across_pit_creations_and_drops() {
    let mut editor = create_test_editor(Tool::Pit);
    for i in 0..5 {
        click(&mut editor, 50.0 + i as f64 * 100.0, 50.0);
    }
    for i in 0..5 {
        editor.drop_team(50.0 + i as f64 * 100.0, 50.0, r#"{"teamNumber": 1323}"#);
        let holders = editor
            .document
            .elements
            .iter()
            .filter(|e| e.team_number() == Some(1323))
            .count();
        assert_eq!(holders, 1);
    }
    assert_eq!(editor.team_assignments().len(), 1);
    assert_eq!(editor.team_assignments()[0].x, 425.0);
}

#[test]
fn test_zoom_steps_and_clamps() {
    let mut editor = create_test_editor(Tool::Line);
    editor.zoom_in();
    assert!((editor.document.zoom - 1.2).abs() < 1e-12);

    for _ in 0..20 {
        editor.zoom_in();
        assert!(editor.document.zoom <= 3.0);
    }
    assert_eq!(editor.document.zoom, 3.0);

    for _ in 0..20 {
        editor.zoom_out();
    }
    assert_eq!(editor.document.zoom, 0.5);

    editor.document.pan_x = 40.0;
    editor.reset_view();
    assert_eq!(
        (editor.document.zoom, editor.document.pan_x, editor.document.pan_y),
        (1.0, 0.0, 0.0)
    );
}

#[test]
fn test_clear_requires_confirmation() {
    let mut editor = create_test_editor(Tool::Pit);
    click(&mut editor, 100.0, 100.0);
    editor.zoom_in();
    editor.take_events();

    let mut refuse = TestHost::default();
    assert!(!editor.clear(&mut refuse));
    assert_eq!(editor.document.len(), 1);

    let mut accept = TestHost {
        confirm: true,
        ..TestHost::default()
    };
    assert!(editor.clear(&mut accept));
    assert_eq!(editor.document, Document::new());
    assert!(matches!(
        editor.take_events().as_slice(),
        [EditorEvent::DocumentChanged(doc)] if doc.is_empty()
    ));
}

#[test]
fn test_drag_sized_pit_normalizes_negative_extent() {
    let settings = EditorSettings {
        pit_placement: PitPlacement::Drag,
        ..EditorSettings::default()
    };
    let mut editor = EditorState::new(settings);
    editor.set_tool(Tool::Pit);

    let mut host = TestHost::default();
    editor.on_pointer_down(100.0, 100.0, &mut host);
    editor.on_pointer_move(60.0, 130.0);
    let (x, y, w, h) = pit_geometry(editor.provisional_element().unwrap());
    assert_eq!((x, y, w, h), (60.0, 100.0, 40.0, 30.0));

    editor.on_pointer_up(60.0, 130.0);
    assert_eq!(editor.document.len(), 1);
}

#[test]
fn test_drag_sized_pit_with_zero_area_is_discarded() {
    let settings = EditorSettings {
        pit_placement: PitPlacement::Drag,
        ..EditorSettings::default()
    };
    let mut editor = EditorState::new(settings);
    editor.set_tool(Tool::Pit);
    click(&mut editor, 100.0, 100.0);
    assert!(editor.document.is_empty());
}

#[test]
fn test_pointer_leave_discards_in_progress_line() {
    let mut editor = create_test_editor(Tool::Line);
    let mut host = TestHost::default();
    editor.on_pointer_down(10.0, 10.0, &mut host);
    editor.on_pointer_move(80.0, 10.0);
    editor.on_pointer_leave();

    assert!(matches!(editor.state, EditState::Idle));
    assert!(editor.provisional_element().is_none());
    editor.on_pointer_up(90.0, 10.0);
    assert!(editor.document.is_empty());
}

#[test]
fn test_tool_switch_resets_state() {
    let mut editor = create_test_editor(Tool::Line);
    let mut host = TestHost::default();
    editor.on_pointer_down(10.0, 10.0, &mut host);
    editor.set_tool(Tool::Eraser);

    assert!(matches!(editor.state, EditState::Idle));
    editor.on_pointer_up(50.0, 10.0);
    assert!(editor.document.is_empty());
}

#[test]
fn test_consecutive_changes_coalesce_into_latest_snapshot() {
    let mut editor = create_test_editor(Tool::Pit);
    click(&mut editor, 100.0, 100.0);
    click(&mut editor, 300.0, 100.0);

    let events = editor.take_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], EditorEvent::DocumentChanged(doc) if doc.len() == 2));
}
