#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{EntityId, EntityKind};
use crate::geom::Point;
use crate::store::MapStore;

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub kind: EntityKind,
    pub id: EntityId,
}

/// Find the topmost entity under `pt`.
///
/// Rooms are drawn first and desks on top, each collection in insertion
/// order. The search walks that order backwards, so a desk wins over a room
/// and, within a collection, the most recently added entity wins.
#[must_use]
pub fn hit_test(pt: Point, store: &MapStore) -> Option<Hit> {
    let desks = store.desks();
    if let Some(desk) = desks.iter().rev().find(|d| d.bounds().contains(pt)) {
        return Some(Hit { kind: EntityKind::Desk, id: desk.id });
    }
    let rooms = store.rooms();
    rooms
        .iter()
        .rev()
        .find(|r| r.bounds().contains(pt))
        .map(|r| Hit { kind: EntityKind::Room, id: r.id })
}
