//! Server configuration parsed from environment variables.
//!
//! `main` loads an optional `.env` file first, so everything here can also be
//! supplied from a local `.env` during development.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STORAGE_BUCKET: &str = "MapImages";
pub const DEFAULT_OWNER_ID: i64 = 1;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_STORAGE_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_STORAGE_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: String },
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Object store connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub base_url: String,
    pub api_key: String,
    pub bucket: String,
    pub timeouts: StorageTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub storage: StorageConfig,
    /// Owner recorded on new maps; there is no login, so every upload uses it.
    pub default_owner_id: i64,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `DATABASE_URL`
    /// - `STORAGE_URL`: object store base URL
    /// - `STORAGE_KEY`: object store service key
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `STORAGE_BUCKET`: default `MapImages`
    /// - `DEFAULT_OWNER_ID`: default 1
    /// - `MAX_UPLOAD_BYTES`: default 10 MiB
    /// - `STORAGE_REQUEST_TIMEOUT_SECS`: default 60
    /// - `STORAGE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required var is missing or a numeric
    /// var does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::Missing { var: var.into() })
        };

        let database_url = required("DATABASE_URL")?;
        let base_url = required("STORAGE_URL")?.trim_end_matches('/').to_string();
        let api_key = required("STORAGE_KEY")?;
        let bucket = lookup("STORAGE_BUCKET").unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_string());

        Ok(Self {
            database_url,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            storage: StorageConfig {
                base_url,
                api_key,
                bucket,
                timeouts: StorageTimeouts {
                    request_secs: parse_or(&lookup, "STORAGE_REQUEST_TIMEOUT_SECS", DEFAULT_STORAGE_REQUEST_TIMEOUT_SECS)?,
                    connect_secs: parse_or(&lookup, "STORAGE_CONNECT_TIMEOUT_SECS", DEFAULT_STORAGE_CONNECT_TIMEOUT_SECS)?,
                },
            },
            default_owner_id: parse_or(&lookup, "DEFAULT_OWNER_ID", DEFAULT_OWNER_ID)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var: var.into(), value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
