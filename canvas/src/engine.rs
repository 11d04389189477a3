use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::{DESK_SIZE_PX, ROOM_LENGTH_PX, ROOM_WIDTH_PX};
use crate::doc::{Desk, EntityId, EntityKind, FocusElement, Room};
use crate::geom::Point;
use crate::hit;
use crate::input::{Button, InputState, PaletteItem};
use crate::popup::{Popup, PopupAction, PopupView};
use crate::render;
use crate::store::{BookingOutcome, MapStore, StoreError};
use crate::upload::map_id_from_js;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// A palette template was dropped and added to the store.
    EntityPlaced { kind: EntityKind, id: EntityId },
    /// A drop could not be turned into an entity.
    PlacementFailed { message: String },
    /// Focus moved to another entity or was cleared.
    FocusChanged { focus: Option<FocusElement> },
    /// An entity was booked by this call.
    Booked { kind: EntityKind, id: EntityId },
    /// A booking request could not be applied.
    BookingFailed { message: String },
    /// The popup must be mounted, re-measured, moved, or removed.
    PopupChanged,
    RenderNeeded,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub map_id: i64,
    pub store: MapStore,
    pub popup: Popup,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl EngineCore {
    /// Start an empty editing session for `map_id`.
    #[must_use]
    pub fn new(map_id: i64) -> Self {
        Self {
            map_id,
            store: MapStore::new(),
            popup: Popup::new(),
            input: InputState::Idle,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Placement ---

    /// The user picked up a palette template.
    pub fn on_palette_drag_start(&mut self, item: PaletteItem) {
        self.input = InputState::DraggingPalette { item };
    }

    /// The drag ended somewhere other than the stage.
    pub fn on_drag_cancel(&mut self) {
        self.input = InputState::Idle;
    }

    /// A palette template was dropped at `pt` (stage coordinates).
    pub fn on_drop(&mut self, pt: Point) -> Vec<Action> {
        let InputState::DraggingPalette { item } = std::mem::take(&mut self.input) else {
            return Vec::new();
        };
        let at = pt.clamped_to_stage();
        let id = match self.store.next_id() {
            Ok(id) => id,
            Err(e) => {
                log::warn!("map {}: cannot place {}: {e}", self.map_id, item.kind());
                return vec![Action::PlacementFailed { message: e.to_string() }];
            }
        };
        match item {
            PaletteItem::Desk => self.store.add_desk(Desk {
                id,
                x: at.x,
                y: at.y,
                length: DESK_SIZE_PX,
                width: DESK_SIZE_PX,
                booked: false,
            }),
            PaletteItem::Room => self.store.add_room(Room {
                id,
                name: format!("Room {id}"),
                x: at.x,
                y: at.y,
                length: ROOM_LENGTH_PX,
                width: ROOM_WIDTH_PX,
                booked: false,
                seats: None,
                additional_info: None,
            }),
        }
        log::debug!("map {}: placed {} {id} at ({}, {})", self.map_id, item.kind(), at.x, at.y);
        vec![Action::EntityPlaced { kind: item.kind(), id }, Action::RenderNeeded]
    }

    // --- Selection ---

    /// Pointer released over the stage. A primary click focuses the topmost
    /// entity under the pointer, or clears focus over empty floor.
    pub fn on_pointer_up(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let focus = hit::hit_test(pt, &self.store).and_then(|h| self.store.project(h.kind, h.id));
        self.set_focus(focus)
    }

    /// Set or clear focus and keep the popup in step.
    pub fn set_focus(&mut self, focus: Option<FocusElement>) -> Vec<Action> {
        self.store.update_focus_element(focus);
        self.popup.on_focus_changed(self.store.focus());
        vec![
            Action::FocusChanged { focus: self.store.focus().cloned() },
            Action::PopupChanged,
            Action::RenderNeeded,
        ]
    }

    // --- Popup ---

    /// The host measured the popup after layout.
    pub fn on_popup_measured(&mut self, height: f64) -> Vec<Action> {
        if self.popup.on_measured(height) {
            vec![Action::PopupChanged]
        } else {
            Vec::new()
        }
    }

    /// The canvas container moved within the page.
    pub fn set_container_offset(&mut self, offset: Point) -> Vec<Action> {
        self.popup.set_container_offset(offset);
        if self.popup.is_mounted() { vec![Action::PopupChanged] } else { Vec::new() }
    }

    /// A popup button was pressed.
    pub fn on_popup_action(&mut self, action: PopupAction) -> Vec<Action> {
        match action {
            PopupAction::Close => self.set_focus(None),
            PopupAction::Book => {
                let result = self.store.book_focused();
                self.after_booking(result)
            }
        }
    }

    // --- Booking ---

    /// Book an entity directly, bypassing the popup.
    pub fn book(&mut self, kind: EntityKind, id: EntityId) -> Vec<Action> {
        let result = match kind {
            EntityKind::Room => self.store.book_room(id),
            EntityKind::Desk => self.store.book_desk(id),
        };
        self.after_booking(result.map(|outcome| (kind, id, outcome)))
    }

    fn after_booking(&mut self, result: Result<(EntityKind, EntityId, BookingOutcome), StoreError>) -> Vec<Action> {
        match result {
            Ok((kind, id, BookingOutcome::Booked)) => {
                log::info!("map {}: booked {kind} {id}", self.map_id);
                self.popup.on_focus_changed(self.store.focus());
                vec![Action::Booked { kind, id }, Action::PopupChanged, Action::RenderNeeded]
            }
            Ok((_, _, BookingOutcome::AlreadyBooked)) => Vec::new(),
            Err(e) => {
                log::warn!("map {}: booking failed: {e}", self.map_id);
                vec![Action::BookingFailed { message: e.to_string() }]
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn focus(&self) -> Option<&FocusElement> {
        self.store.focus()
    }

    #[must_use]
    pub fn popup_view(&self) -> Option<PopupView> {
        self.popup.view()
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas
/// element and the floor-plan image.
#[wasm_bindgen]
pub struct Engine {
    canvas: HtmlCanvasElement,
    background: Option<HtmlImageElement>,
    core: EngineCore,
}

#[wasm_bindgen]
impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Rejects a `map_id` that is not a positive whole number.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, map_id: f64) -> Result<Engine, JsValue> {
        let map_id = map_id_from_js(map_id).ok_or_else(|| JsValue::from_str(&format!("invalid map id {map_id}")))?;
        Ok(Self { canvas, background: None, core: EngineCore::new(map_id) })
    }

    /// Set the loaded floor-plan image drawn beneath all entities.
    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, image: HtmlImageElement) {
        self.background = Some(image);
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.viewport_width = width_css.max(0.0);
        self.core.viewport_height = height_css.max(0.0);
        self.core.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.canvas.set_width((self.core.viewport_width * self.core.dpr).round() as u32);
            self.canvas.set_height((self.core.viewport_height * self.core.dpr).round() as u32);
        }
    }

    /// Page offset of the canvas container, used to anchor the popup.
    #[wasm_bindgen(js_name = setContainerOffset)]
    pub fn set_container_offset(&mut self, left: f64, top: f64) -> Result<String, JsValue> {
        encode(&self.core.set_container_offset(Point::new(left, top)))
    }

    // --- Input events ---

    /// Returns `false` if `item` is not a known palette name.
    #[wasm_bindgen(js_name = onPaletteDragStart)]
    pub fn on_palette_drag_start(&mut self, item: &str) -> bool {
        let Some(item) = PaletteItem::parse(item) else {
            return false;
        };
        self.core.on_palette_drag_start(item);
        true
    }

    #[wasm_bindgen(js_name = onDragCancel)]
    pub fn on_drag_cancel(&mut self) {
        self.core.on_drag_cancel();
    }

    #[wasm_bindgen(js_name = onDrop)]
    pub fn on_drop(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        encode(&self.core.on_drop(Point::new(x, y)))
    }

    #[wasm_bindgen(js_name = onPointerUp)]
    pub fn on_pointer_up(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsValue> {
        encode(&self.core.on_pointer_up(Point::new(x, y), Button::from_dom(button)))
    }

    // --- Popup ---

    #[wasm_bindgen(js_name = onPopupMeasured)]
    pub fn on_popup_measured(&mut self, height: f64) -> Result<String, JsValue> {
        encode(&self.core.on_popup_measured(height))
    }

    #[wasm_bindgen(js_name = pressBook)]
    pub fn press_book(&mut self) -> Result<String, JsValue> {
        encode(&self.core.on_popup_action(PopupAction::Book))
    }

    #[wasm_bindgen(js_name = pressClose)]
    pub fn press_close(&mut self) -> Result<String, JsValue> {
        encode(&self.core.on_popup_action(PopupAction::Close))
    }

    /// Popup view model as JSON, or `undefined` when hidden.
    #[wasm_bindgen(js_name = popupView)]
    pub fn popup_view(&self) -> Result<Option<String>, JsValue> {
        self.core
            .popup_view()
            .map(|view| serde_json::to_string(&view).map_err(|e| JsValue::from_str(&e.to_string())))
            .transpose()
    }

    // --- Queries ---

    /// Rooms and desks as a JSON object `{ "rooms": [...], "desks": [...] }`.
    #[must_use]
    pub fn layout(&self) -> String {
        serde_json::json!({
            "mapId": self.core.map_id,
            "rooms": *self.core.store.rooms(),
            "desks": *self.core.store.desks(),
        })
        .to_string()
    }

    #[must_use]
    pub fn revision(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let rev = self.core.store.revision() as f64;
        rev
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core, self.background.as_ref())
    }
}

/// Install the console logger. Call once from the host before creating engines.
///
/// # Errors
///
/// Fails if a logger is already installed.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() -> Result<(), JsValue> {
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn encode(actions: &[Action]) -> Result<String, JsValue> {
    serde_json::to_string(actions).map_err(|e| JsValue::from_str(&e.to_string()))
}
