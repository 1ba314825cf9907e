use std::env;
use std::path::PathBuf;

use reqwest::Url;

use crate::auth::session::DEFAULT_TOKEN_KEY;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every API path is appended to.
    pub api_url: Url,
    /// File backing the persistent key-value store.
    pub token_path: PathBuf,
    /// Key the auth token is stored under.
    pub token_key: String,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; unset variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url_str =
            lookup("HRM_API_URL").unwrap_or_else(|| "http://localhost:8080/api".to_string());
        let api_url = Url::parse(&api_url_str)
            .map_err(|e| ConfigError::InvalidValue("HRM_API_URL".to_string(), e.to_string()))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue(
                "HRM_API_URL".to_string(),
                format!("unsupported scheme '{}'", api_url.scheme()),
            ));
        }

        let token_path = lookup("HRM_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".hrm/session.json"));

        let token_key = lookup("HRM_TOKEN_KEY").unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_string());
        if token_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "HRM_TOKEN_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let log_dir = lookup("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        Ok(Self {
            api_url,
            token_path,
            token_key,
            log_dir,
        })
    }
}
