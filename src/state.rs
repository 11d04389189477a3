//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! map repo and image store sit behind trait objects so route tests can run
//! against in-memory fakes with no database or network.

use std::sync::Arc;

use crate::services::maps::MapRepo;
use crate::services::storage::ImageStore;

/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub maps: Arc<dyn MapRepo>,
    pub images: Arc<dyn ImageStore>,
    /// Owner recorded on every new map.
    pub owner_id: i64,
}

impl AppState {
    #[must_use]
    pub fn new(maps: Arc<dyn MapRepo>, images: Arc<dyn ImageStore>, owner_id: i64) -> Self {
        Self { maps, images, owner_id }
    }
}
