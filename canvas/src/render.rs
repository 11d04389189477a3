//! Rendering: draws the floor plan and placed entities to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the engine and produces pixels; it does
//! not mutate any application state. The popup is not drawn here, the host
//! renders it as a DOM overlay from [`crate::popup::PopupView`].
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) hands the result
//! to JavaScript.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{FOCUS_OUTLINE_PX, LABEL_FONT_PX};
use crate::doc::{Desk, EntityKind, FocusElement, Room};
use crate::engine::EngineCore;
use crate::geom::Bounds;

const ROOM_AVAILABLE_FILL: &str = "rgba(22, 163, 74, 0.18)";
const ROOM_BOOKED_FILL: &str = "rgba(220, 38, 38, 0.18)";
const DESK_AVAILABLE_FILL: &str = "#16A34A";
const DESK_BOOKED_FILL: &str = "#DC2626";
const ENTITY_STROKE: &str = "#1F1A17";
const FOCUS_STROKE: &str = "#2563EB";

/// Draw the full scene: background image, rooms, desks, focus outline.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    background: Option<&HtmlImageElement>,
) -> Result<(), JsValue> {
    // Layer 1: clear and scale for device pixels.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);

    // Layer 2: floor plan at its natural size.
    if let Some(img) = background {
        ctx.draw_image_with_html_image_element(img, 0.0, 0.0)?;
    }

    // Layer 3: rooms beneath desks; matches hit-test order.
    for room in core.store.rooms().iter() {
        draw_room(ctx, room)?;
    }
    for desk in core.store.desks().iter() {
        draw_desk(ctx, desk);
    }

    // Layer 4: focus outline.
    if let Some(focus) = core.store.focus() {
        draw_focus(ctx, core, focus);
    }

    Ok(())
}

fn draw_room(ctx: &CanvasRenderingContext2d, room: &Room) -> Result<(), JsValue> {
    let b = room.bounds();
    ctx.set_fill_style_str(if room.booked { ROOM_BOOKED_FILL } else { ROOM_AVAILABLE_FILL });
    ctx.fill_rect(b.x, b.y, b.width, b.length);
    stroke_bounds(ctx, b, ENTITY_STROKE, 1.0);

    ctx.set_fill_style_str(ENTITY_STROKE);
    ctx.set_font(&format!("{LABEL_FONT_PX}px sans-serif"));
    ctx.fill_text(&room.name, b.x + 4.0, b.y + LABEL_FONT_PX + 2.0)?;
    Ok(())
}

fn draw_desk(ctx: &CanvasRenderingContext2d, desk: &Desk) {
    let b = desk.bounds();
    ctx.set_fill_style_str(if desk.booked { DESK_BOOKED_FILL } else { DESK_AVAILABLE_FILL });
    ctx.fill_rect(b.x, b.y, b.width, b.length);
    stroke_bounds(ctx, b, ENTITY_STROKE, 1.0);
}

fn draw_focus(ctx: &CanvasRenderingContext2d, core: &EngineCore, focus: &FocusElement) {
    let bounds = match focus.kind {
        EntityKind::Room => core.store.room(focus.id).map(Room::bounds),
        EntityKind::Desk => core.store.desk(focus.id).map(Desk::bounds),
    };
    if let Some(b) = bounds {
        stroke_bounds(ctx, b, FOCUS_STROKE, FOCUS_OUTLINE_PX);
    }
}

fn stroke_bounds(ctx: &CanvasRenderingContext2d, b: Bounds, color: &str, width: f64) {
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.stroke_rect(b.x, b.y, b.width, b.length);
}
