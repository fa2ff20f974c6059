//! Tests for surface input translation: hit-test driven dispatch,
//! modifier tracking, and keyboard nudges.

mod common;

use common::{fixture, panel_at};
use floatpane::hit::HitTarget;
use floatpane::input::InputTracker;
use floatpane::model::SessionKind;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{Key, ModifiersState, NamedKey};

fn session_kind(fx: &common::Fixture, id: &str) -> Option<SessionKind> {
    fx.manager.get(id).and_then(|p| p.session.map(|s| s.kind))
}

#[test]
fn test_header_press_starts_drag() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "a", 100, 100, 200, 150);
    let mut input = InputTracker::new();

    let outcome = input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Pressed,
        (150.0, 110.0),
    );
    assert!(outcome.consumed());
    assert_eq!(session_kind(&fx, "a"), Some(SessionKind::Drag));

    input.cursor_moved(&mut fx.manager, (180.0, 140.0));
    assert_eq!(fx.manager.position("a"), Some((130, 130)));

    input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Released,
        (180.0, 140.0),
    );
    assert_eq!(session_kind(&fx, "a"), None);
    assert_eq!(fx.manager.position("a"), Some((130, 130)));
}

#[test]
fn test_resize_corner_press_starts_resize() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "a", 100, 100, 200, 150);
    let mut input = InputTracker::new();

    // Bottom-right corner of the 200x150 panel at (100, 100)
    input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Pressed,
        (295.0, 245.0),
    );
    assert_eq!(session_kind(&fx, "a"), Some(SessionKind::Resize));

    input.cursor_moved(&mut fx.manager, (335.0, 275.0));
    input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Released,
        (335.0, 275.0),
    );
    assert_eq!(fx.manager.size("a"), Some((240, 180)));
}

#[test]
fn test_body_press_raises_without_session() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "a", 100, 100, 200, 150);
    panel_at(&mut fx.manager, "b", 400, 100, 200, 150);
    assert_eq!(fx.manager.active_id(), Some("b"));

    let mut input = InputTracker::new();
    input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Pressed,
        (150.0, 200.0),
    );

    assert_eq!(fx.manager.active_id(), Some("a"));
    assert_eq!(session_kind(&fx, "a"), None);
    input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Released,
        (150.0, 200.0),
    );
}

#[test]
fn test_press_outside_panels_is_ignored() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "a", 100, 100, 200, 150);

    let mut input = InputTracker::new();
    let outcome = input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Pressed,
        (900.0, 700.0),
    );
    assert!(!outcome.consumed());
}

#[test]
fn test_non_left_buttons_are_ignored() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "a", 100, 100, 200, 150);

    let mut input = InputTracker::new();
    let outcome = input.mouse_button(
        &mut fx.manager,
        MouseButton::Right,
        ElementState::Pressed,
        (150.0, 110.0),
    );
    assert!(!outcome.consumed());
    assert_eq!(session_kind(&fx, "a"), None);
}

#[test]
fn test_overlapping_panels_route_to_topmost() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "below", 100, 100, 200, 150);
    panel_at(&mut fx.manager, "above", 150, 120, 200, 150);

    let hit = fx
        .manager
        .hit_test(floatpane::geometry::Point::new(200, 210))
        .unwrap();
    assert!(matches!(hit, HitTarget::Body { ref id } if id == "above"));
}

#[test]
fn test_tracked_shift_suppresses_snap_on_release() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "a", 50, 50, 200, 150);
    panel_at(&mut fx.manager, "b", 260, 400, 200, 150);

    let mut input = InputTracker::new();
    input.modifiers_changed(ModifiersState::SHIFT);

    input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Pressed,
        (150.0, 60.0),
    );
    input.cursor_moved(&mut fx.manager, (358.0, 60.0));
    input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Released,
        (358.0, 60.0),
    );

    // Would snap to b's left edge at 260 without the held shift
    assert_eq!(fx.manager.position("a"), Some((258, 50)));
}

#[test]
fn test_focus_loss_clears_stale_shift() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "a", 50, 50, 200, 150);
    panel_at(&mut fx.manager, "b", 260, 400, 200, 150);

    let mut input = InputTracker::new();
    input.modifiers_changed(ModifiersState::SHIFT);
    input.focus_lost();

    input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Pressed,
        (150.0, 60.0),
    );
    input.cursor_moved(&mut fx.manager, (358.0, 60.0));
    input.mouse_button(
        &mut fx.manager,
        MouseButton::Left,
        ElementState::Released,
        (358.0, 60.0),
    );

    assert_eq!(fx.manager.position("a"), Some((260, 50)));
}

#[test]
fn test_arrow_keys_nudge_active_panel() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "a", 100, 100, 200, 150);

    let mut input = InputTracker::new();
    let outcome = input.key_pressed(&mut fx.manager, &Key::Named(NamedKey::ArrowRight));
    assert!(outcome.consumed());
    assert_eq!(fx.manager.position("a"), Some((108, 100)));

    input.key_pressed(&mut fx.manager, &Key::Named(NamedKey::ArrowDown));
    assert_eq!(fx.manager.position("a"), Some((108, 108)));

    // Shift takes the larger step
    input.modifiers_changed(ModifiersState::SHIFT);
    input.key_pressed(&mut fx.manager, &Key::Named(NamedKey::ArrowLeft));
    assert_eq!(fx.manager.position("a"), Some((88, 108)));
}

#[test]
fn test_escape_minimizes_active_panel() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "a", 100, 100, 200, 150);

    let mut input = InputTracker::new();
    input.key_pressed(&mut fx.manager, &Key::Named(NamedKey::Escape));

    assert!(fx.manager.get("a").unwrap().is_minimized());
    assert_eq!(fx.dock.borrow().entries, vec!["a"]);
}

#[test]
fn test_unhandled_keys_are_ignored() {
    let mut fx = fixture();
    panel_at(&mut fx.manager, "a", 100, 100, 200, 150);

    let mut input = InputTracker::new();
    let outcome = input.key_pressed(&mut fx.manager, &Key::Character("x".into()));
    assert!(!outcome.consumed());
    assert_eq!(fx.manager.position("a"), Some((100, 100)));
}
