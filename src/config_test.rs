use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

fn required() -> Vec<(&'static str, &'static str)> {
    vec![
        ("DATABASE_URL", "postgres://localhost/deskmap"),
        ("STORAGE_URL", "https://store.example.com/"),
        ("STORAGE_KEY", "service-key"),
    ]
}

#[test]
fn defaults_apply_when_optional_vars_absent() {
    let cfg = AppConfig::from_lookup(lookup_from(&required())).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.storage.bucket, DEFAULT_STORAGE_BUCKET);
    assert_eq!(cfg.default_owner_id, DEFAULT_OWNER_ID);
    assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    assert_eq!(
        cfg.storage.timeouts,
        StorageTimeouts {
            request_secs: DEFAULT_STORAGE_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_STORAGE_CONNECT_TIMEOUT_SECS,
        }
    );
}

#[test]
fn storage_url_trailing_slash_is_trimmed() {
    let cfg = AppConfig::from_lookup(lookup_from(&required())).unwrap();
    assert_eq!(cfg.storage.base_url, "https://store.example.com");
}

#[test]
fn overrides_are_parsed() {
    let mut pairs = required();
    pairs.extend([
        ("PORT", "8080"),
        ("STORAGE_BUCKET", "Plans"),
        ("DEFAULT_OWNER_ID", "42"),
        ("MAX_UPLOAD_BYTES", "1024"),
        ("STORAGE_REQUEST_TIMEOUT_SECS", " 5 "),
    ]);
    let cfg = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.storage.bucket, "Plans");
    assert_eq!(cfg.default_owner_id, 42);
    assert_eq!(cfg.max_upload_bytes, 1024);
    assert_eq!(cfg.storage.timeouts.request_secs, 5);
}

#[test]
fn missing_required_var_is_reported() {
    let pairs: Vec<_> = required().into_iter().filter(|(k, _)| *k != "STORAGE_KEY").collect();
    let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert_eq!(err, ConfigError::Missing { var: "STORAGE_KEY".into() });
}

#[test]
fn blank_required_var_counts_as_missing() {
    let mut pairs = required();
    pairs[0] = ("DATABASE_URL", "  ");
    let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert_eq!(err, ConfigError::Missing { var: "DATABASE_URL".into() });
}

#[test]
fn invalid_number_is_reported_with_value() {
    let mut pairs = required();
    pairs.push(("PORT", "eighty"));
    let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT".into(), value: "eighty".into() });
    assert_eq!(err.to_string(), "invalid value for PORT: 'eighty'");
}
