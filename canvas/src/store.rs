//! Map state store: the single source of truth for one editing session.
//!
//! DESIGN
//! ======
//! One `MapStore` is constructed per editing session and handed to the engine,
//! which is the only writer. Rooms and desks live behind `Arc<Vec<_>>`; every
//! write goes through `Arc::make_mut`, so a snapshot a consumer took before
//! the write keeps its old contents (replace-on-write). `revision` advances on
//! every mutation so consumers can tell when to redraw.
//!
//! ERROR HANDLING
//! ==============
//! Booking an id that is not in the store changes nothing and returns
//! `StoreError::NotFound`. Booking an already-booked entity is not an error.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use crate::doc::{Desk, EntityId, EntityKind, FocusElement, Room};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: EntityId },
    #[error("no entity has focus")]
    NoFocus,
    #[error("entity ids exhausted")]
    IdsExhausted,
}

/// Result of a successful booking call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The entity was available and is now booked.
    Booked,
    /// The entity was already booked; nothing changed.
    AlreadyBooked,
}

/// Rooms, desks and focus for the map being edited.
#[derive(Debug, Clone)]
pub struct MapStore {
    rooms: Arc<Vec<Room>>,
    desks: Arc<Vec<Desk>>,
    focus: Option<FocusElement>,
    revision: u64,
    /// `None` once `u64::MAX` has been handed out or added.
    next_id: Option<EntityId>,
}

impl MapStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { rooms: Arc::default(), desks: Arc::default(), focus: None, revision: 0, next_id: Some(1) }
    }

    // --- Collections ---

    /// Append a room. Insertion order is preserved; ids are not checked for
    /// duplicates, the caller assigns them.
    pub fn add_room(&mut self, room: Room) {
        self.reserve_id(room.id);
        Arc::make_mut(&mut self.rooms).push(room);
        self.bump();
    }

    /// Append a desk. Same contract as [`MapStore::add_room`].
    pub fn add_desk(&mut self, desk: Desk) {
        self.reserve_id(desk.id);
        Arc::make_mut(&mut self.desks).push(desk);
        self.bump();
    }

    /// Snapshot of the rooms in insertion order.
    #[must_use]
    pub fn rooms(&self) -> Arc<Vec<Room>> {
        Arc::clone(&self.rooms)
    }

    /// Snapshot of the desks in insertion order.
    #[must_use]
    pub fn desks(&self) -> Arc<Vec<Desk>> {
        Arc::clone(&self.desks)
    }

    #[must_use]
    pub fn room(&self, id: EntityId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn desk(&self, id: EntityId) -> Option<&Desk> {
        self.desks.iter().find(|d| d.id == id)
    }

    /// Allocate an id above every id added or allocated so far.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdsExhausted`] once `u64::MAX` is taken.
    pub fn next_id(&mut self) -> Result<EntityId, StoreError> {
        let id = self.next_id.ok_or(StoreError::IdsExhausted)?.max(1);
        self.next_id = id.checked_add(1);
        Ok(id)
    }

    // --- Focus ---

    /// Set or clear the focused entity.
    pub fn update_focus_element(&mut self, element: Option<FocusElement>) {
        self.focus = element;
        self.bump();
    }

    #[must_use]
    pub fn focus(&self) -> Option<&FocusElement> {
        self.focus.as_ref()
    }

    /// Project `(kind, id)` into a focus element if the entity exists.
    #[must_use]
    pub fn project(&self, kind: EntityKind, id: EntityId) -> Option<FocusElement> {
        match kind {
            EntityKind::Room => self.room(id).map(Room::focus),
            EntityKind::Desk => self.desk(id).map(Desk::focus),
        }
    }

    // --- Booking ---

    /// Mark the room `id` as booked.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no room has that id.
    pub fn book_room(&mut self, id: EntityId) -> Result<BookingOutcome, StoreError> {
        let Some(idx) = self.rooms.iter().position(|r| r.id == id) else {
            return Err(StoreError::NotFound { kind: EntityKind::Room, id });
        };
        if self.rooms[idx].booked {
            return Ok(BookingOutcome::AlreadyBooked);
        }
        Arc::make_mut(&mut self.rooms)[idx].booked = true;
        self.mark_focus_booked(EntityKind::Room, id);
        self.bump();
        Ok(BookingOutcome::Booked)
    }

    /// Mark the desk `id` as booked.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no desk has that id.
    pub fn book_desk(&mut self, id: EntityId) -> Result<BookingOutcome, StoreError> {
        let Some(idx) = self.desks.iter().position(|d| d.id == id) else {
            return Err(StoreError::NotFound { kind: EntityKind::Desk, id });
        };
        if self.desks[idx].booked {
            return Ok(BookingOutcome::AlreadyBooked);
        }
        Arc::make_mut(&mut self.desks)[idx].booked = true;
        self.mark_focus_booked(EntityKind::Desk, id);
        self.bump();
        Ok(BookingOutcome::Booked)
    }

    /// Book whichever entity currently has focus.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoFocus`] when nothing is focused, or
    /// [`StoreError::NotFound`] when the focus points at a missing entity.
    pub fn book_focused(&mut self) -> Result<(EntityKind, EntityId, BookingOutcome), StoreError> {
        let Some((kind, id)) = self.focus.as_ref().map(|f| (f.kind, f.id)) else {
            return Err(StoreError::NoFocus);
        };
        let outcome = match kind {
            EntityKind::Room => self.book_room(id)?,
            EntityKind::Desk => self.book_desk(id)?,
        };
        Ok((kind, id, outcome))
    }

    // --- Change tracking ---

    /// Mutation counter; changes whenever collections or focus change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len() + self.desks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() && self.desks.is_empty()
    }

    fn mark_focus_booked(&mut self, kind: EntityKind, id: EntityId) {
        if let Some(focus) = self.focus.as_mut() {
            if focus.refers_to(kind, id) {
                focus.booked = true;
            }
        }
    }

    fn reserve_id(&mut self, id: EntityId) {
        if let Some(next) = self.next_id {
            if id >= next {
                self.next_id = id.checked_add(1);
            }
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for MapStore {
    fn default() -> Self {
        Self::new()
    }
}
