#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::geom::Point;

fn make_room() -> Room {
    Room {
        id: 7,
        name: "Fjord".into(),
        x: 100.0,
        y: 50.0,
        length: 160.0,
        width: 120.0,
        booked: false,
        seats: Some(6),
        additional_info: Some("Projector".into()),
    }
}

fn make_desk() -> Desk {
    Desk { id: 1, x: 10.0, y: 10.0, length: 20.0, width: 20.0, booked: false }
}

// =============================================================
// EntityKind
// =============================================================

#[test]
fn kind_serializes_capitalized() {
    assert_eq!(serde_json::to_string(&EntityKind::Room).unwrap(), "\"Room\"");
    assert_eq!(serde_json::to_string(&EntityKind::Desk).unwrap(), "\"Desk\"");
}

#[test]
fn kind_display_matches_as_str() {
    assert_eq!(EntityKind::Room.to_string(), "Room");
    assert_eq!(EntityKind::Desk.to_string(), EntityKind::Desk.as_str());
}

#[test]
fn kind_deserialize_invalid_rejects() {
    assert!(serde_json::from_str::<EntityKind>("\"Closet\"").is_err());
}

// =============================================================
// Room / Desk
// =============================================================

#[test]
fn room_uses_camel_case_additional_info() {
    let value = serde_json::to_value(make_room()).unwrap();
    assert_eq!(value["additionalInfo"], json!("Projector"));
    assert_eq!(value["seats"], json!(6));
}

#[test]
fn room_omits_absent_optional_fields() {
    let room = Room { seats: None, additional_info: None, ..make_room() };
    let value = serde_json::to_value(room).unwrap();
    assert!(value.get("seats").is_none());
    assert!(value.get("additionalInfo").is_none());
}

#[test]
fn room_deserializes_without_optionals() {
    let room: Room = serde_json::from_value(json!({
        "id": 3, "name": "Lab", "x": 1.0, "y": 2.0,
        "length": 3.0, "width": 4.0, "booked": true
    }))
    .unwrap();
    assert_eq!(room.id, 3);
    assert!(room.booked);
    assert!(room.seats.is_none());
}

#[test]
fn room_bounds_use_width_on_x_and_length_on_y() {
    let b = make_room().bounds();
    assert!(b.contains(Point::new(220.0, 60.0)));
    assert!(!b.contains(Point::new(230.0, 60.0)));
    assert!(b.contains(Point::new(110.0, 210.0)));
}

// =============================================================
// FocusElement
// =============================================================

#[test]
fn room_focus_mirrors_fields() {
    let focus = make_room().focus();
    assert_eq!(focus.kind, EntityKind::Room);
    assert_eq!(focus.id, 7);
    assert_eq!(focus.x, 100.0);
    assert_eq!(focus.y, 50.0);
    assert_eq!(focus.seats, Some(6));
    assert_eq!(focus.additional_info.as_deref(), Some("Projector"));
}

#[test]
fn desk_focus_has_no_optionals() {
    let focus = make_desk().focus();
    assert_eq!(focus.kind, EntityKind::Desk);
    assert!(focus.seats.is_none());
    assert!(focus.additional_info.is_none());
}

#[test]
fn focus_serializes_kind_as_type() {
    let value = serde_json::to_value(make_desk().focus()).unwrap();
    assert_eq!(value["type"], json!("Desk"));
    assert_eq!(value["id"], json!(1));
}

#[test]
fn refers_to_checks_kind_and_id() {
    let focus = make_desk().focus();
    assert!(focus.refers_to(EntityKind::Desk, 1));
    assert!(!focus.refers_to(EntityKind::Room, 1));
    assert!(!focus.refers_to(EntityKind::Desk, 2));
}
