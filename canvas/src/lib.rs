//! Floor-plan editor engine for the desk booking app.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! editing session for one office map: the rooms and desks placed on the
//! floor-plan image, which of them has focus, the booking popup anchored to
//! the focused entity, and the upload form that creates new maps. The host
//! page is responsible only for wiring DOM events to the engine and acting on
//! the resulting [`engine::Action`]s (network calls, navigation, toasts).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Room, desk and focus element records |
//! | [`store`] | Per-session map state store with booking |
//! | [`geom`] | Points and axis-aligned bounds |
//! | [`input`] | Palette items and the drag/drop state machine |
//! | [`hit`] | Hit-testing against placed entities |
//! | [`popup`] | Booking popup state machine and view model |
//! | [`upload`] | Floor-plan upload form state and validation |
//! | [`render`] | Scene rendering to a 2D context |
//! | [`consts`] | Shared numeric constants (template sizes, popup layout) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod popup;
pub mod render;
pub mod store;
pub mod upload;
