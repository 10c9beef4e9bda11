use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;
use crate::identity::FacebookConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except secrets has a default suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4100`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Access and game token settings.
    pub jwt: JwtConfig,
    /// Facebook Graph API credentials.
    pub facebook: FacebookConfig,
    /// Where the option catalog and its artwork live.
    pub catalog: CatalogConfig,
}

/// Location of the option catalog metadata and artwork.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub metadata_path: PathBuf,
    pub image_dir: PathBuf,
    pub image_extension: String,
}

impl CatalogConfig {
    /// | Env Var           | Default                          |
    /// |-------------------|----------------------------------|
    /// | `CATALOG_PATH`    | `resources/metadata.json`        |
    /// | `IMAGE_DIR`       | `resources/charParts/img200x200` |
    /// | `IMAGE_EXTENSION` | `.png`                           |
    pub fn from_env() -> Self {
        Self {
            metadata_path: std::env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "resources/metadata.json".into())
                .into(),
            image_dir: std::env::var("IMAGE_DIR")
                .unwrap_or_else(|_| "resources/charParts/img200x200".into())
                .into(),
            image_extension: std::env::var("IMAGE_EXTENSION").unwrap_or_else(|_| ".png".into()),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `4100`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// Token, Facebook and catalog settings are read by
    /// [`JwtConfig::from_env`], [`FacebookConfig::from_env`] and
    /// [`CatalogConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4100".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            facebook: FacebookConfig::from_env(),
            catalog: CatalogConfig::from_env(),
        }
    }
}
