use super::*;
use crate::config::StorageTimeouts;

fn client() -> StorageClient {
    StorageClient::new(&StorageConfig {
        base_url: "https://store.example.com".into(),
        api_key: "key".into(),
        bucket: "MapImages".into(),
        timeouts: StorageTimeouts { request_secs: 5, connect_secs: 1 },
    })
    .unwrap()
}

#[test]
fn upload_url_includes_bucket_and_path() {
    assert_eq!(
        client().upload_url("uploads/abc-plan.png"),
        "https://store.example.com/storage/v1/object/MapImages/uploads/abc-plan.png"
    );
}

#[test]
fn public_url_uses_public_prefix() {
    assert_eq!(
        client().public_url("uploads/abc-plan.png"),
        "https://store.example.com/storage/v1/object/public/MapImages/uploads/abc-plan.png"
    );
}

#[test]
fn bucket_is_exposed() {
    assert_eq!(client().bucket(), "MapImages");
}

#[test]
fn error_message_prefers_message_field() {
    let body = r#"{"statusCode":"409","error":"Duplicate","message":"The resource already exists"}"#;
    assert_eq!(parse_error_message(body), "The resource already exists");
}

#[test]
fn error_message_falls_back_to_error_field() {
    assert_eq!(parse_error_message(r#"{"error":"Bucket not found"}"#), "Bucket not found");
}

#[test]
fn error_message_passes_plain_text_through() {
    assert_eq!(parse_error_message("  gateway timeout \n"), "gateway timeout");
}

#[test]
fn response_error_display_carries_status() {
    let err = StorageError::Response { status: 413, body: "Payload too large".into() };
    assert_eq!(err.to_string(), "storage response error: status 413: Payload too large");
}

// =============================================================================
// upload status handling
// =============================================================================

#[test]
fn success_statuses_are_accepted() {
    assert!(check_upload_response("uploads/a.png", 200, r#"{"Key":"MapImages/uploads/a.png"}"#).is_ok());
    assert!(check_upload_response("uploads/a.png", 201, "").is_ok());
}

#[test]
fn http_409_is_conflict() {
    let err = check_upload_response("uploads/a.png", 409, r#"{"error":"Duplicate"}"#).unwrap_err();
    assert!(matches!(err, StorageError::Conflict { ref path } if path == "uploads/a.png"));
}

#[test]
fn duplicate_reported_inside_400_is_conflict() {
    let body = r#"{"statusCode":"409","error":"Duplicate","message":"The resource already exists"}"#;
    let err = check_upload_response("uploads/a.png", 400, body).unwrap_err();
    assert!(matches!(err, StorageError::Conflict { .. }));
}

#[test]
fn numeric_embedded_status_is_conflict() {
    let err = check_upload_response("uploads/a.png", 400, r#"{"statusCode":409}"#).unwrap_err();
    assert!(matches!(err, StorageError::Conflict { .. }));
}

#[test]
fn other_failures_keep_status_and_message() {
    let body = r#"{"statusCode":"404","error":"Not found","message":"Bucket not found"}"#;
    let err = check_upload_response("uploads/a.png", 400, body).unwrap_err();
    assert!(matches!(err, StorageError::Response { status: 400, ref body } if body == "Bucket not found"));

    let err = check_upload_response("uploads/a.png", 503, "upstream down").unwrap_err();
    assert!(matches!(err, StorageError::Response { status: 503, ref body } if body == "upstream down"));
}
