//! Server configuration parsed from environment variables.
//!
//! Secrets (database URL, admin token, storage keys) are injected by the
//! deployment and never derived. Only the values in [`PublicConfig`] are ever
//! sent to clients.

use std::fmt;

use serde::Serialize;
use storefront::format::Locale;
use storefront::inventory::DEFAULT_LOW_STOCK_THRESHOLD;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_STORAGE_REGION: &str = "us-east-1";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Object storage for product and hero images.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl StorageConfig {
    /// Public base URL that uploaded image keys are served from.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region)
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "<redacted>"))
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Bearer token for admin routes. Mutations are refused when unset.
    pub admin_token: Option<String>,
    pub public_api_base_url: Option<String>,
    pub payment_client_id: Option<String>,
    pub storage: Option<StorageConfig>,
    pub low_stock_threshold: i32,
    pub locale: Locale,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("db_max_connections", &self.db_max_connections)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .field("public_api_base_url", &self.public_api_base_url)
            .field("payment_client_id", &self.payment_client_id)
            .field("storage", &self.storage)
            .field("low_stock_threshold", &self.low_stock_threshold)
            .field("locale", &self.locale.tag)
            .finish_non_exhaustive()
    }
}

/// Client-safe subset of the configuration, served at `GET /api/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicConfig {
    pub api_base_url: Option<String>,
    pub payment_client_id: Option<String>,
    pub image_base_url: Option<String>,
    pub locale: &'static str,
    pub low_stock_threshold: i32,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `PORT` (default 3000), `DB_MAX_CONNECTIONS` (default 5)
    /// - `ADMIN_TOKEN`
    /// - `PUBLIC_API_BASE_URL`, `PAYMENT_CLIENT_ID`
    /// - `STORAGE_BUCKET`, `STORAGE_REGION`, `STORAGE_ACCESS_KEY_ID`, `STORAGE_SECRET_ACCESS_KEY`
    /// - `LOW_STOCK_THRESHOLD` (default 5), `STORE_LOCALE` (default `en-US`)
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let db_max_connections = parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        let low_stock_threshold = parse_or(get("LOW_STOCK_THRESHOLD"), "LOW_STOCK_THRESHOLD", DEFAULT_LOW_STOCK_THRESHOLD)?;

        let locale = match get("STORE_LOCALE") {
            Some(tag) => Locale::for_tag(&tag).ok_or(ConfigError::Invalid { key: "STORE_LOCALE", value: tag })?,
            None => Locale::default(),
        };

        let storage = get("STORAGE_BUCKET").map(|bucket| StorageConfig {
            bucket,
            region: get("STORAGE_REGION").unwrap_or_else(|| DEFAULT_STORAGE_REGION.to_owned()),
            access_key_id: get("STORAGE_ACCESS_KEY_ID"),
            secret_access_key: get("STORAGE_SECRET_ACCESS_KEY"),
        });

        Ok(Self {
            database_url,
            port,
            db_max_connections,
            admin_token: get("ADMIN_TOKEN"),
            public_api_base_url: get("PUBLIC_API_BASE_URL").map(|url| url.trim_end_matches('/').to_owned()),
            payment_client_id: get("PAYMENT_CLIENT_ID"),
            storage,
            low_stock_threshold,
            locale,
        })
    }

    #[must_use]
    pub fn public(&self) -> PublicConfig {
        PublicConfig {
            api_base_url: self.public_api_base_url.clone(),
            payment_client_id: self.payment_client_id.clone(),
            image_base_url: self.storage.as_ref().map(StorageConfig::public_base_url),
            locale: self.locale.tag,
            low_stock_threshold: self.low_stock_threshold,
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
