//! Shared numeric constants for the canvas crate.

// ── Palette templates ───────────────────────────────────────────

/// Default desk footprint (width and length) in canvas pixels.
pub const DESK_SIZE_PX: f64 = 40.0;

/// Default room width in canvas pixels.
pub const ROOM_WIDTH_PX: f64 = 120.0;

/// Default room length in canvas pixels.
pub const ROOM_LENGTH_PX: f64 = 160.0;

// ── Popup layout ────────────────────────────────────────────────

/// Gap between the popup's bottom edge and the focused entity, in pixels.
pub const POPUP_GAP_PX: f64 = 3.0;

/// Maximum popup width in CSS pixels.
pub const POPUP_MAX_WIDTH_PX: f64 = 180.0;

// ── Rendering ───────────────────────────────────────────────────

/// Outline width drawn around the focused entity, in pixels.
pub const FOCUS_OUTLINE_PX: f64 = 2.0;

/// Font size for room labels, in pixels.
pub const LABEL_FONT_PX: f64 = 12.0;

// ── Upload ──────────────────────────────────────────────────────

/// Map id the "Skip" action opens when no upload is made.
pub const PLACEHOLDER_MAP_ID: i64 = 44;
