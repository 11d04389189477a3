//! Object store client for floor-plan images.
//!
//! Thin HTTP wrapper over the storage REST API:
//! `POST {base}/storage/v1/object/{bucket}/{path}` to upload, and
//! `{base}/storage/v1/object/public/{bucket}/{path}` as the public URL.

use std::time::Duration;

use crate::config::StorageConfig;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request never produced a response.
    #[error("storage request failed: {0}")]
    Request(String),

    /// An object already exists at the path.
    #[error("object already exists: {path}")]
    Conflict { path: String },

    /// The store answered with a non-success status.
    #[error("storage response error: status {status}: {body}")]
    Response { status: u16, body: String },

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// SEAM
// =============================================================================

#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload `bytes` under `path` and return the object's public URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Conflict`] if `path` is already taken (the
    /// existing object is left alone), or another [`StorageError`] if the
    /// request fails or is rejected.
    async fn upload_image(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError>;

    /// Public URL of an object, whether or not this call uploaded it.
    fn public_url(&self, path: &str) -> String;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl StorageClient {
    /// # Errors
    ///
    /// Returns [`StorageError::HttpClientBuild`] if reqwest cannot build a client.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| StorageError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
        })
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn upload_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{path}", self.base_url, self.bucket)
    }
}

#[async_trait::async_trait]
impl ImageStore for StorageClient {
    async fn upload_image(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        let response = self
            .http
            .post(self.upload_url(path))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("x-upsert", "false")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        check_upload_response(path, status, &text)?;
        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{path}", self.base_url, self.bucket)
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    /// Some store versions answer a duplicate with HTTP 400 and put the
    /// real status here, as a string or a number.
    #[serde(rename = "statusCode")]
    status_code: Option<serde_json::Value>,
}

/// Classify an upload answer: 2xx is success, a duplicate is
/// [`StorageError::Conflict`], anything else is [`StorageError::Response`].
fn check_upload_response(path: &str, status: u16, body: &str) -> Result<(), StorageError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let embedded_conflict = serde_json::from_str::<ErrorBody>(body)
        .is_ok_and(|b| b.status_code.is_some_and(|c| c.as_str() == Some("409") || c.as_u64() == Some(409)));
    if status == 409 || embedded_conflict {
        return Err(StorageError::Conflict { path: path.to_string() });
    }
    Err(StorageError::Response { status, body: parse_error_message(body) })
}

/// Pull a human-readable message out of a store error body.
///
/// The store answers with `{"message": ...}` or `{"error": ...}`; anything
/// else is passed through trimmed.
fn parse_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(m), .. }) => m,
        Ok(ErrorBody { error: Some(e), .. }) => e,
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
