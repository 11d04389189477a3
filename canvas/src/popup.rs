//! Booking popup: a positioned overlay describing the focused entity.
//!
//! DESIGN
//! ======
//! The popup sits above the focused entity, so its `top` depends on its own
//! rendered height, which is only known after the host lays it out. The state
//! machine makes that explicit:
//!
//! ```text
//! Hidden --focus set--> Measuring --on_measured(h)--> Positioned
//!    ^                                                    |
//!    +------------------- focus cleared ------------------+
//! ```
//!
//! While `Measuring` the host mounts the popup invisibly, measures it, and
//! reports the height back. That costs one frame before the popup appears.

#[cfg(test)]
#[path = "popup_test.rs"]
mod popup_test;

use serde::Serialize;

use crate::consts::POPUP_GAP_PX;
use crate::doc::FocusElement;
use crate::geom::Point;

/// Lifecycle of the popup.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    /// Nothing focused; popup not mounted.
    #[default]
    Hidden,
    /// Focus set; waiting for the host to report the rendered height.
    Measuring { focus: FocusElement },
    /// Height known; popup shown at its computed position.
    Positioned { focus: FocusElement, height: f64 },
}

/// Page-space position of the popup's top-left corner, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopupPosition {
    pub top: f64,
    pub left: f64,
}

/// Availability label shown next to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Availability {
    Booked,
    Available,
}

/// Everything the host needs to draw the popup body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupView {
    pub title: String,
    pub availability: Availability,
    pub seats_line: Option<String>,
    pub info_line: Option<String>,
    pub book_enabled: bool,
    pub visible: bool,
    pub position: Option<PopupPosition>,
}

/// Buttons on the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Book,
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct Popup {
    state: PopupState,
    /// Page offset of the canvas container the popup is positioned against.
    container: Option<Point>,
}

impl Popup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &PopupState {
        &self.state
    }

    /// Follow a focus change from the store.
    ///
    /// Clearing focus always hides the popup. A new entity starts a fresh
    /// measurement; the same entity with refreshed fields keeps its height.
    pub fn on_focus_changed(&mut self, focus: Option<&FocusElement>) {
        let Some(focus) = focus else {
            self.state = PopupState::Hidden;
            return;
        };
        self.state = match &self.state {
            PopupState::Positioned { focus: current, height } if current.refers_to(focus.kind, focus.id) => {
                PopupState::Positioned { focus: focus.clone(), height: *height }
            }
            _ => PopupState::Measuring { focus: focus.clone() },
        };
    }

    /// Record the height the host measured after layout.
    ///
    /// Returns `false` (and does nothing) when the popup is hidden.
    pub fn on_measured(&mut self, height: f64) -> bool {
        let focus = match &self.state {
            PopupState::Hidden => return false,
            PopupState::Measuring { focus } | PopupState::Positioned { focus, .. } => focus.clone(),
        };
        self.state = PopupState::Positioned { focus, height: height.max(0.0) };
        true
    }

    /// Update the page offset of the canvas container.
    pub fn set_container_offset(&mut self, offset: Point) {
        self.container = Some(offset);
    }

    /// Whether the popup should be mounted in the page (visible or measuring).
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !matches!(self.state, PopupState::Hidden)
    }

    /// Whether the popup is shown to the user.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self.state, PopupState::Positioned { .. })
    }

    #[must_use]
    pub fn focus(&self) -> Option<&FocusElement> {
        match &self.state {
            PopupState::Hidden => None,
            PopupState::Measuring { focus } | PopupState::Positioned { focus, .. } => Some(focus),
        }
    }

    /// Where to place the popup; `None` until the height is known.
    #[must_use]
    pub fn position(&self) -> Option<PopupPosition> {
        let PopupState::Positioned { focus, height } = &self.state else {
            return None;
        };
        let container = self.container.unwrap_or(Point::new(0.0, 0.0));
        Some(PopupPosition {
            top: focus.y + container.y - (height + POPUP_GAP_PX),
            left: focus.x + container.x,
        })
    }

    /// Whether the Book button is enabled.
    #[must_use]
    pub fn book_enabled(&self) -> bool {
        self.focus().is_some_and(|f| !f.booked)
    }

    /// Build the view model, or `None` when hidden.
    #[must_use]
    pub fn view(&self) -> Option<PopupView> {
        let focus = self.focus()?;
        Some(PopupView {
            title: format!("{} {}: ", focus.kind, focus.id),
            availability: if focus.booked { Availability::Booked } else { Availability::Available },
            seats_line: focus.seats.filter(|n| *n > 0).map(|n| format!("Number of seats: {n}")),
            info_line: focus
                .additional_info
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| format!("Additional information: {s}")),
            book_enabled: !focus.booked,
            visible: self.is_visible(),
            position: self.position(),
        })
    }
}
