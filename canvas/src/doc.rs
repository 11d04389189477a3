//! Document model: the bookable entities placed on a floor plan.
//!
//! This module defines the records that describe what is on the map
//! (`Room`, `Desk`), the discriminant shared by both (`EntityKind`), and the
//! transient projection shown in the booking popup (`FocusElement`).
//!
//! Records are built by the engine when a palette item is dropped and are
//! serialized to JSON for the host. The store owns the records; everything
//! else reads snapshots.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::Bounds;

/// Identifier of a room or desk. Unique within its collection.
pub type EntityId = u64;

/// The kind of a bookable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// An enclosed, bookable space.
    Room,
    /// A single workstation.
    Desk,
}

impl EntityKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Room => "Room",
            Self::Desk => "Desk",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable room as placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique identifier within the room collection.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Extent along the y axis.
    pub length: f64,
    /// Extent along the x axis.
    pub width: f64,
    /// Whether the room has been booked.
    pub booked: bool,
    /// Seat count, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    /// Free-form notes shown in the popup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl Room {
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds { x: self.x, y: self.y, width: self.width, length: self.length }
    }

    /// Project this room into the popup's focus element.
    #[must_use]
    pub fn focus(&self) -> FocusElement {
        FocusElement {
            kind: EntityKind::Room,
            id: self.id,
            x: self.x,
            y: self.y,
            booked: self.booked,
            seats: self.seats,
            additional_info: self.additional_info.clone(),
        }
    }
}

/// A bookable desk as placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Desk {
    /// Unique identifier within the desk collection.
    pub id: EntityId,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Extent along the y axis.
    pub length: f64,
    /// Extent along the x axis.
    pub width: f64,
    /// Whether the desk has been booked.
    pub booked: bool,
}

impl Desk {
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds { x: self.x, y: self.y, width: self.width, length: self.length }
    }

    /// Project this desk into the popup's focus element.
    #[must_use]
    pub fn focus(&self) -> FocusElement {
        FocusElement {
            kind: EntityKind::Desk,
            id: self.id,
            x: self.x,
            y: self.y,
            booked: self.booked,
            seats: None,
            additional_info: None,
        }
    }
}

/// The entity currently selected for inspection and booking.
///
/// A copy of the underlying record's fields taken at selection time, not a
/// live reference. The store refreshes `booked` when it books the focused
/// entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusElement {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub booked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl FocusElement {
    /// Whether this focus refers to the entity `(kind, id)`.
    #[must_use]
    pub fn refers_to(&self, kind: EntityKind, id: EntityId) -> bool {
        self.kind == kind && self.id == id
    }
}
