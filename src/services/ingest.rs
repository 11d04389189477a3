//! Map ingest — store the floor-plan image, then record the map.
//!
//! DESIGN
//! ======
//! Validation happens before any I/O, in the same order the upload form
//! checks its fields. The image goes to the object store first; the map row
//! is only inserted once the store has accepted it, so a failed upload never
//! leaves a row pointing at a missing image. Object paths are derived from
//! the content, so re-uploading a picture the store already holds is a
//! conflict; the existing object is reused and a new row is still inserted.
//! Uploading the same picture twice yields two rows sharing one image.

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::services::maps::{MapError, MapRepo, NewMap};
use crate::services::storage::{ImageStore, StorageError};

/// Prefix for every uploaded object path.
const UPLOAD_PREFIX: &str = "uploads";
/// Hex characters of the content hash kept in the object path.
const HASH_PREFIX_LEN: usize = 16;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Raw form fields as received; nothing is validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestRequest {
    pub file: Option<UploadedFile>,
    pub address: Option<String>,
    pub floor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    pub map_id: i64,
    pub img: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("You need to upload a file.")]
    MissingFile,
    #[error("Please add a facility address")]
    MissingAddress,
    #[error("Please add a floor number")]
    MissingFloor,
    #[error("Floor must be a whole number")]
    InvalidFloor,
    #[error("Only JPG, JPEG and PNG images are accepted")]
    UnsupportedType,
    #[error("image upload failed: {0}")]
    Upload(#[from] StorageError),
    #[error("map insert failed: {0}")]
    Database(#[from] MapError),
}

impl IngestError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFile => "E_MISSING_FILE",
            Self::MissingAddress => "E_MISSING_ADDRESS",
            Self::MissingFloor => "E_MISSING_FLOOR",
            Self::InvalidFloor => "E_INVALID_FLOOR",
            Self::UnsupportedType => "E_UNSUPPORTED_TYPE",
            Self::Upload(_) => "E_UPLOAD",
            Self::Database(_) => "E_DATABASE",
        }
    }

    /// True for errors caused by the request itself rather than a backend.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Upload(_) | Self::Database(_))
    }
}

// =============================================================================
// NAMING
// =============================================================================

/// Content type for an accepted image name, by extension (case-insensitive).
#[must_use]
pub fn content_type_for(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// Base name with every character outside `[A-Za-z0-9._-]` replaced by `_`.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    if cleaned.is_empty() { "image".to_string() } else { cleaned }
}

/// `uploads/<hash16>-<name>`: the same bytes always map to the same prefix,
/// different bytes with the same file name do not collide.
#[must_use]
pub fn object_path(name: &str, bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("{UPLOAD_PREFIX}/{}-{}", &hex[..HASH_PREFIX_LEN], sanitize_file_name(name))
}

// =============================================================================
// INGEST
// =============================================================================

struct ValidUpload {
    file: UploadedFile,
    content_type: &'static str,
    address: String,
    floor: i32,
}

fn validate(req: IngestRequest) -> Result<ValidUpload, IngestError> {
    let file = req.file.filter(|f| !f.bytes.is_empty()).ok_or(IngestError::MissingFile)?;

    let address = req
        .address
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or(IngestError::MissingAddress)?;

    let floor_raw = req
        .floor
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .ok_or(IngestError::MissingFloor)?;
    let floor = floor_raw.parse::<i32>().map_err(|_| IngestError::InvalidFloor)?;

    let content_type = content_type_for(&file.name).ok_or(IngestError::UnsupportedType)?;

    Ok(ValidUpload { file, content_type, address, floor })
}

/// Validate the form, upload the image, and insert the map row.
///
/// # Errors
///
/// Returns a validation variant of [`IngestError`] before any I/O, then
/// [`IngestError::Upload`] or [`IngestError::Database`] for backend failures.
pub async fn ingest(
    images: &dyn ImageStore,
    maps: &dyn MapRepo,
    owner_id: i64,
    req: IngestRequest,
) -> Result<IngestOutcome, IngestError> {
    let upload = validate(req)?;
    let path = object_path(&upload.file.name, &upload.file.bytes);
    let size = upload.file.bytes.len();

    let img = match images.upload_image(&path, upload.file.bytes, upload.content_type).await {
        Ok(url) => {
            info!(%path, size, "image uploaded");
            url
        }
        Err(StorageError::Conflict { .. }) => {
            info!(%path, size, "image already stored, reusing it");
            images.public_url(&path)
        }
        Err(e) => {
            warn!(%path, error = %e, "image upload failed");
            return Err(e.into());
        }
    };

    let new_map = NewMap { user_id: owner_id, img: img.clone(), address: upload.address, floor: upload.floor };
    let map_id = maps.create_map(&new_map).await.inspect_err(|e| {
        warn!(%path, error = %e, "map insert failed after upload");
    })?;
    info!(map_id, %path, floor = new_map.floor, "map created");

    Ok(IngestOutcome { map_id, img })
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
