//! Input model: palette items, mouse buttons, and the drag/drop state machine.
//!
//! A placement gesture starts when the user picks up a palette template
//! (`on_palette_drag_start`) and ends when it is dropped on the stage or the
//! drag is abandoned. `InputState` carries the template between the two
//! events. Plain clicks do not change `InputState`; they are resolved by
//! hit-testing on pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::EntityKind;

/// A template the user can drag from the palette onto the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteItem {
    Desk,
    Room,
}

impl PaletteItem {
    /// Parse the palette name carried in the browser's drag data.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "desk" => Some(Self::Desk),
            "room" => Some(Self::Room),
            _ => None,
        }
    }

    /// The kind of entity this template creates.
    #[must_use]
    pub fn kind(self) -> EntityKind {
        match self {
            Self::Desk => EntityKind::Desk,
            Self::Room => EntityKind::Room,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Internal state for the placement gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A palette template is being dragged over the page.
    DraggingPalette {
        /// Template that will be created on drop.
        item: PaletteItem,
    },
}
