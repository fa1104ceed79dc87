use super::*;

fn marker(glyph: &str, x: f64, y: f64) -> EmojiMarker {
    EmojiMarker::new(glyph, LogicalPoint::new(x, y))
}

#[test]
fn press_near_marker_starts_drag() {
    let markers = vec![marker("😂", 50.0, 50.0)];
    let mut c = InteractionController::new();
    assert_eq!(c.press(LogicalPoint::new(45.0, 55.0), &markers), Some(0));
    assert_eq!(c.state(), DragState::Dragging { marker: 0 });
}

#[test]
fn press_outside_hit_box_stays_idle() {
    let markers = vec![marker("😂", 50.0, 50.0)];
    let mut c = InteractionController::new();
    assert_eq!(c.press(LogicalPoint::new(70.0, 50.0), &markers), None);
    assert_eq!(c.press(LogicalPoint::new(50.0, 29.0), &markers), None);
    assert_eq!(c.state(), DragState::Idle);
}

#[test]
fn overlapping_markers_select_earliest_inserted() {
    let markers = vec![
        marker("🤔", 100.0, 100.0),
        marker("😎", 105.0, 95.0),
        marker("🥳", 300.0, 300.0),
    ];
    let mut c = InteractionController::new();
    assert_eq!(c.press(LogicalPoint::new(103.0, 98.0), &markers), Some(0));
}

#[test]
fn move_updates_only_dragged_marker() {
    let mut markers = vec![marker("🤔", 100.0, 100.0), marker("😎", 300.0, 300.0)];
    let mut c = InteractionController::new();
    c.press(LogicalPoint::new(300.0, 300.0), &markers);

    assert!(c.move_to(LogicalPoint::new(210.5, 120.25), &mut markers));
    assert_eq!(markers[1].position(), LogicalPoint::new(210.5, 120.25));
    assert_eq!(markers[0].position(), LogicalPoint::new(100.0, 100.0));
    assert_eq!(c.state(), DragState::Dragging { marker: 1 });
}

#[test]
fn move_while_idle_is_ignored() {
    let mut markers = vec![marker("🤔", 100.0, 100.0)];
    let mut c = InteractionController::new();
    assert!(!c.move_to(LogicalPoint::new(1.0, 1.0), &mut markers));
    assert_eq!(markers[0].position(), LogicalPoint::new(100.0, 100.0));
}

#[test]
fn release_and_leave_end_the_gesture() {
    let markers = vec![marker("🤔", 100.0, 100.0)];
    let mut c = InteractionController::new();

    c.press(LogicalPoint::new(100.0, 100.0), &markers);
    assert_eq!(c.release(), Some(0));
    assert_eq!(c.state(), DragState::Idle);
    assert_eq!(c.release(), None);

    c.press(LogicalPoint::new(100.0, 100.0), &markers);
    assert_eq!(c.leave(), Some(0));
    assert_eq!(c.dragged_marker(), None);
}

#[test]
fn moves_are_clamped_into_logical_frame() {
    let mut markers = vec![marker("🤔", 10.0, 10.0)];
    let mut c = InteractionController::new();
    c.press(LogicalPoint::new(10.0, 10.0), &markers);
    c.move_to(LogicalPoint::new(-40.0, 480.0), &mut markers);
    assert_eq!(markers[0].position(), LogicalPoint::new(0.0, 400.0));
}

#[test]
fn stale_index_drops_back_to_idle() {
    let mut markers = vec![marker("🤔", 10.0, 10.0)];
    let mut c = InteractionController::new();
    c.press(LogicalPoint::new(10.0, 10.0), &markers);
    markers.clear();
    assert!(!c.move_to(LogicalPoint::new(5.0, 5.0), &mut markers));
    assert_eq!(c.state(), DragState::Idle);
}
