//! Floor-plan upload form: file selection, validation, and submit lifecycle.
//!
//! DESIGN
//! ======
//! The form validates everything it can before any request is made. A
//! successful `submit` returns the fields the host should send to
//! `POST /api/maps` and disables the submit button until `complete` is called
//! with the server's answer. There is no retry or cancellation: a failed
//! upload leaves the selected file in place and the user submits again.
//!
//! Every outcome the user should see is queued as a [`Notification`] for the
//! host's toast layer.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::consts::PLACEHOLDER_MAP_ID;

/// File extensions the upload widget accepts (compared case-insensitively).
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("You need to upload a file.")]
    MissingFile,
    #[error("Please add a facility address")]
    MissingAddress,
    #[error("Please add a floor number")]
    MissingFloor,
    #[error("Floor must be a whole number, got '{0}'")]
    InvalidFloor(String),
    #[error("Unsupported file type '{0}'. Use JPG, JPEG or PNG.")]
    UnsupportedType(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadFormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("an upload is already in progress")]
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast for the host to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
}

/// The file the user picked. The host keeps the bytes; the form only needs
/// the name for validation and the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
}

/// Fields to send with the multipart upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitRequest {
    pub file_name: String,
    pub address: String,
    pub floor: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    file: Option<SelectedFile>,
    preview: bool,
    phase: UploadPhase,
    notifications: Vec<Notification>,
}

/// Whether `name` has one of the [`ACCEPTED_EXTENSIONS`].
#[must_use]
pub fn is_accepted_image(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ACCEPTED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

/// Map id from a JavaScript number. Only positive whole numbers below
/// 2^63 are ids; NaN, infinities and fractions are rejected.
#[must_use]
pub fn map_id_from_js(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value >= 2f64.powi(63) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let id = value as i64;
    Some(id)
}

/// Editor route for a map id.
#[must_use]
pub fn editor_path(map_id: i64) -> String {
    format!("/create-map/{map_id}")
}

impl UploadForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a file from the picker. Rejected files leave the previous
    /// selection untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedType`] for anything that is not
    /// JPG, JPEG or PNG.
    pub fn select_file(&mut self, name: &str, size: u64) -> Result<(), ValidationError> {
        if !is_accepted_image(name) {
            let err = ValidationError::UnsupportedType(name.to_owned());
            self.notify(NoticeLevel::Error, err.to_string());
            return Err(err);
        }
        self.file = Some(SelectedFile { name: name.to_owned(), size });
        self.preview = true;
        Ok(())
    }

    /// Validate the form and start an upload.
    ///
    /// # Errors
    ///
    /// Returns [`UploadFormError::InFlight`] while a previous submit is
    /// pending, or the first [`ValidationError`] found. Either way no request
    /// should be made.
    pub fn submit(&mut self, address: &str, floor: &str) -> Result<SubmitRequest, UploadFormError> {
        if self.phase == UploadPhase::Submitting {
            return Err(UploadFormError::InFlight);
        }
        match self.validate(address, floor) {
            Ok(request) => {
                self.phase = UploadPhase::Submitting;
                Ok(request)
            }
            Err(err) => {
                self.notify(NoticeLevel::Error, err.to_string());
                Err(err.into())
            }
        }
    }

    /// Finish the in-flight upload with the server's answer.
    ///
    /// On success returns the editor path to navigate to. On failure the file
    /// and preview are kept so the user can submit again. Ignored unless a
    /// submit is in flight.
    pub fn complete(&mut self, result: Result<i64, String>) -> Option<String> {
        if self.phase != UploadPhase::Submitting {
            return None;
        }
        self.phase = UploadPhase::Idle;
        match result {
            Ok(map_id) => {
                self.preview = false;
                self.notify(NoticeLevel::Success, "Your picture has been uploaded.".into());
                Some(editor_path(map_id))
            }
            Err(message) => {
                self.notify(NoticeLevel::Error, format!("{message}. Try another picture."));
                None
            }
        }
    }

    /// Path of the placeholder editor opened by "Skip".
    #[must_use]
    pub fn skip(&self) -> String {
        editor_path(PLACEHOLDER_MAP_ID)
    }

    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.phase == UploadPhase::Idle
    }

    #[must_use]
    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    #[must_use]
    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    #[must_use]
    pub fn has_preview(&self) -> bool {
        self.preview
    }

    /// Drain queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn validate(&self, address: &str, floor: &str) -> Result<SubmitRequest, ValidationError> {
        let file = self.file.as_ref().ok_or(ValidationError::MissingFile)?;
        let address = address.trim();
        if address.is_empty() {
            return Err(ValidationError::MissingAddress);
        }
        let floor = floor.trim();
        if floor.is_empty() {
            return Err(ValidationError::MissingFloor);
        }
        let floor = floor
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidFloor(floor.to_owned()))?;
        Ok(SubmitRequest { file_name: file.name.clone(), address: address.to_owned(), floor })
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        self.notifications.push(Notification { level, message });
    }
}

// =============================================================
// Browser bindings
// =============================================================

/// JavaScript handle for the upload page.
#[wasm_bindgen]
pub struct UploadWidget {
    form: UploadForm,
}

#[wasm_bindgen]
impl UploadWidget {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self { form: UploadForm::new() }
    }

    /// Returns `false` when the file type is rejected.
    #[wasm_bindgen(js_name = selectFile)]
    pub fn select_file(&mut self, name: &str, size: f64) -> bool {
        // File sizes from the DOM are whole, non-negative doubles.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let size = size.max(0.0) as u64;
        self.form.select_file(name, size).is_ok()
    }

    /// Returns the request fields as JSON, or `undefined` when nothing should be sent.
    pub fn submit(&mut self, address: &str, floor: &str) -> Option<String> {
        match self.form.submit(address, floor) {
            Ok(request) => match serde_json::to_string(&request) {
                Ok(json) => Some(json),
                Err(e) => {
                    log::error!("submit request encode failed: {e}");
                    self.form.complete(Err(e.to_string()));
                    None
                }
            },
            Err(e) => {
                log::debug!("submit rejected: {e}");
                None
            }
        }
    }

    /// Report success; returns the path to navigate to.
    #[wasm_bindgen(js_name = completeOk)]
    #[must_use]
    pub fn complete_ok(&mut self, map_id: f64) -> Option<String> {
        match map_id_from_js(map_id) {
            Some(id) => self.form.complete(Ok(id)),
            None => {
                log::warn!("upload returned invalid map id {map_id}");
                self.form.complete(Err("The server returned an invalid map id".into()))
            }
        }
    }

    #[wasm_bindgen(js_name = completeErr)]
    pub fn complete_err(&mut self, message: &str) {
        self.form.complete(Err(message.to_owned()));
    }

    #[must_use]
    pub fn skip(&self) -> String {
        self.form.skip()
    }

    #[wasm_bindgen(js_name = submitEnabled)]
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.form.submit_enabled()
    }

    #[wasm_bindgen(js_name = hasPreview)]
    #[must_use]
    pub fn has_preview(&self) -> bool {
        self.form.has_preview()
    }

    /// Queued toasts as a JSON array.
    #[wasm_bindgen(js_name = takeNotifications)]
    pub fn take_notifications(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.form.take_notifications()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for UploadWidget {
    fn default() -> Self {
        Self::new()
    }
}
