//! Map routes: ingest an uploaded floor plan, look a map up by id.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::warn;

use crate::services::ingest::{self, IngestError, IngestRequest, UploadedFile};
use crate::services::maps::{MapError, MapRecord};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateMapResponse {
    pub id: i64,
    pub img: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

fn error_response(status: StatusCode, error: &'static str, message: String) -> Response {
    (status, Json(ErrorBody { error, message })).into_response()
}

/// `POST /api/maps` — multipart `file`, `address`, `floor`.
pub async fn create_map(State(state): State<AppState>, multipart: Multipart) -> Response {
    let req = match read_form(multipart).await {
        Ok(req) => req,
        Err(e) => {
            warn!(error = %e.body_text(), "unreadable upload form");
            return error_response(e.status(), "E_MULTIPART", e.body_text());
        }
    };

    match ingest::ingest(state.images.as_ref(), state.maps.as_ref(), state.owner_id, req).await {
        Ok(out) => (StatusCode::CREATED, Json(CreateMapResponse { id: out.map_id, img: out.img })).into_response(),
        Err(e) => error_response(ingest_error_to_status(&e), e.error_code(), e.to_string()),
    }
}

/// `GET /api/maps/{id}`
pub async fn get_map(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<MapRecord>, StatusCode> {
    let record = state.maps.get_map(id).await.map_err(map_error_to_status)?;
    Ok(Json(record))
}

/// Collect the known fields; unknown fields are skipped.
async fn read_form(mut multipart: Multipart) -> Result<IngestRequest, axum::extract::multipart::MultipartError> {
    let mut req = IngestRequest::default();
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?.to_vec();
                req.file = Some(UploadedFile { name, bytes });
            }
            Some("address") => req.address = Some(field.text().await?),
            Some("floor") => req.floor = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(req)
}

pub(crate) fn ingest_error_to_status(err: &IngestError) -> StatusCode {
    if err.is_validation() {
        return StatusCode::BAD_REQUEST;
    }
    match err {
        IngestError::Upload(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn map_error_to_status(err: MapError) -> StatusCode {
    match err {
        MapError::NotFound(_) => StatusCode::NOT_FOUND,
        MapError::Database(e) => {
            warn!(error = %e, "map lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "maps_test.rs"]
mod tests;
