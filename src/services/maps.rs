//! Map records — the `"Maps"` table.
//!
//! DESIGN
//! ======
//! Route handlers and the ingest service talk to `MapRepo`, not to sqlx
//! directly, so tests can swap in an in-memory repo. `PgMapRepo` is the only
//! production implementation.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map not found: {0}")]
    NotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A stored map: one floor-plan image plus where it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRecord {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Public URL of the floor-plan image.
    pub img: String,
    pub address: String,
    pub floor: i32,
}

/// Fields for a map that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMap {
    pub user_id: i64,
    pub img: String,
    pub address: String,
    pub floor: i32,
}

// =============================================================================
// REPO
// =============================================================================

#[async_trait::async_trait]
pub trait MapRepo: Send + Sync {
    /// Insert a map and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Database`] if the insert fails.
    async fn create_map(&self, map: &NewMap) -> Result<i64, MapError>;

    /// Fetch one map by id.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotFound`] if no row has that id.
    async fn get_map(&self, id: i64) -> Result<MapRecord, MapError>;
}

pub struct PgMapRepo {
    pool: PgPool,
}

impl PgMapRepo {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MapRepo for PgMapRepo {
    async fn create_map(&self, map: &NewMap) -> Result<i64, MapError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO "Maps" ("userId", img, address, floor) VALUES ($1, $2, $3, $4) RETURNING id"#,
        )
        .bind(map.user_id)
        .bind(&map.img)
        .bind(&map.address)
        .bind(map.floor)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn get_map(&self, id: i64) -> Result<MapRecord, MapError> {
        let row = sqlx::query_as::<_, (i64, i64, String, String, i32)>(
            r#"SELECT id, "userId", img, address, floor FROM "Maps" WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(MapError::NotFound(id))?;

        Ok(MapRecord { id: row.0, user_id: row.1, img: row.2, address: row.3, floor: row.4 })
    }
}

#[cfg(test)]
#[path = "maps_test.rs"]
mod tests;
