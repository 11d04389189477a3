#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{Desk, Room};

fn desk_focus(id: u64, booked: bool) -> FocusElement {
    Desk { id, x: 10.0, y: 50.0, length: 20.0, width: 20.0, booked }.focus()
}

fn room_focus() -> FocusElement {
    Room {
        id: 3,
        name: "Fjord".into(),
        x: 100.0,
        y: 200.0,
        length: 80.0,
        width: 80.0,
        booked: false,
        seats: Some(8),
        additional_info: Some("Whiteboard".into()),
    }
    .focus()
}

// =============================================================
// State machine
// =============================================================

#[test]
fn starts_hidden() {
    let popup = Popup::new();
    assert_eq!(popup.state(), &PopupState::Hidden);
    assert!(!popup.is_mounted());
    assert!(popup.view().is_none());
}

#[test]
fn focus_set_enters_measuring() {
    let mut popup = Popup::new();
    popup.on_focus_changed(Some(&desk_focus(1, false)));
    assert!(matches!(popup.state(), PopupState::Measuring { .. }));
    assert!(popup.is_mounted());
    assert!(!popup.is_visible());
    assert!(popup.position().is_none());
}

#[test]
fn measurement_positions_popup() {
    let mut popup = Popup::new();
    popup.on_focus_changed(Some(&desk_focus(1, false)));
    assert!(popup.on_measured(40.0));
    assert!(popup.is_visible());
}

#[test]
fn clearing_focus_hides_from_any_state() {
    let mut popup = Popup::new();
    popup.on_focus_changed(None);
    assert_eq!(popup.state(), &PopupState::Hidden);

    popup.on_focus_changed(Some(&desk_focus(1, false)));
    popup.on_focus_changed(None);
    assert_eq!(popup.state(), &PopupState::Hidden);

    popup.on_focus_changed(Some(&desk_focus(1, false)));
    popup.on_measured(30.0);
    popup.on_focus_changed(None);
    assert_eq!(popup.state(), &PopupState::Hidden);
}

#[test]
fn measurement_while_hidden_is_ignored() {
    let mut popup = Popup::new();
    assert!(!popup.on_measured(50.0));
    assert_eq!(popup.state(), &PopupState::Hidden);
}

#[test]
fn switching_entity_remeasures() {
    let mut popup = Popup::new();
    popup.on_focus_changed(Some(&desk_focus(1, false)));
    popup.on_measured(30.0);
    popup.on_focus_changed(Some(&room_focus()));
    assert!(matches!(popup.state(), PopupState::Measuring { .. }));
}

#[test]
fn refreshing_same_entity_keeps_position() {
    let mut popup = Popup::new();
    popup.on_focus_changed(Some(&desk_focus(1, false)));
    popup.on_measured(30.0);
    popup.on_focus_changed(Some(&desk_focus(1, true)));
    assert!(popup.is_visible());
    assert!(!popup.book_enabled());
}

// =============================================================
// Position
// =============================================================

#[test]
fn position_sits_above_entity_offset_by_container() {
    let mut popup = Popup::new();
    popup.set_container_offset(Point::new(40.0, 120.0));
    popup.on_focus_changed(Some(&desk_focus(1, false)));
    popup.on_measured(47.0);

    let pos = popup.position().unwrap();
    assert_eq!(pos.left, 10.0 + 40.0);
    assert_eq!(pos.top, 50.0 + 120.0 - (47.0 + POPUP_GAP_PX));
}

#[test]
fn position_without_container_uses_origin() {
    let mut popup = Popup::new();
    popup.on_focus_changed(Some(&desk_focus(1, false)));
    popup.on_measured(10.0);
    let pos = popup.position().unwrap();
    assert_eq!(pos.left, 10.0);
    assert_eq!(pos.top, 50.0 - 13.0);
}

#[test]
fn negative_measurement_clamps_to_zero() {
    let mut popup = Popup::new();
    popup.on_focus_changed(Some(&desk_focus(1, false)));
    popup.on_measured(-5.0);
    assert_eq!(popup.position().unwrap().top, 50.0 - POPUP_GAP_PX);
}

// =============================================================
// View
// =============================================================

#[test]
fn desk_view_omits_optional_lines() {
    let mut popup = Popup::new();
    popup.on_focus_changed(Some(&desk_focus(1, false)));
    let view = popup.view().unwrap();
    assert_eq!(view.title, "Desk 1: ");
    assert_eq!(view.availability, Availability::Available);
    assert!(view.seats_line.is_none());
    assert!(view.info_line.is_none());
    assert!(view.book_enabled);
    assert!(!view.visible);
}

#[test]
fn room_view_includes_seats_and_info() {
    let mut popup = Popup::new();
    popup.on_focus_changed(Some(&room_focus()));
    popup.on_measured(60.0);
    let view = popup.view().unwrap();
    assert_eq!(view.title, "Room 3: ");
    assert_eq!(view.seats_line.as_deref(), Some("Number of seats: 8"));
    assert_eq!(view.info_line.as_deref(), Some("Additional information: Whiteboard"));
    assert!(view.visible);
    assert!(view.position.is_some());
}

#[test]
fn zero_seats_line_is_omitted() {
    let mut focus = room_focus();
    focus.seats = Some(0);
    focus.additional_info = Some(String::new());
    let mut popup = Popup::new();
    popup.on_focus_changed(Some(&focus));
    let view = popup.view().unwrap();
    assert!(view.seats_line.is_none());
    assert!(view.info_line.is_none());
}

#[test]
fn booked_focus_disables_book() {
    let mut popup = Popup::new();
    popup.on_focus_changed(Some(&desk_focus(2, true)));
    let view = popup.view().unwrap();
    assert_eq!(view.availability, Availability::Booked);
    assert!(!view.book_enabled);
}
