//! # Console configuration: `console.toml`
//!
//! Read once at startup by the web binary (embedded at build time) and
//! handed to the gateway and the views.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"   # "/api" is appended per call
//! timeout_secs = 10
//!
//! [messages]
//! validation_secs = 3                  # banner window for local validation failures
//! result_secs = 4                      # banner window for submit results
//!
//! [routes]
//! login = "/login"
//! home = "/warehouses"
//! ```
//!
//! All sections derive `Default` with the values above, so a missing or
//! empty file is equivalent to the default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Top-level configuration stored in `console.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub messages: MessageConfig,
    #[serde(default)]
    pub routes: RouteConfig,
}

/// Remote API endpoint settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the warehouse API, without the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request network timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// How long transient banners stay visible.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "default_validation_secs")]
    pub validation_secs: u64,
    #[serde(default = "default_result_secs")]
    pub result_secs: u64,
}

/// Paths the shell navigates to on its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_login_path")]
    pub login: String,
    #[serde(default = "default_home_path")]
    pub home: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_validation_secs() -> u64 {
    3
}

fn default_result_secs() -> u64 {
    4
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_home_path() -> String {
    "/warehouses".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            validation_secs: default_validation_secs(),
            result_secs: default_result_secs(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login: default_login_path(),
            home: default_home_path(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl MessageConfig {
    pub fn validation_window(&self) -> Duration {
        Duration::from_secs(self.validation_secs)
    }

    pub fn result_window(&self) -> Duration {
        Duration::from_secs(self.result_secs)
    }
}

impl ConsoleConfig {
    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, StoreError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.messages.validation_window(), Duration::from_secs(3));
        assert_eq!(config.messages.result_window(), Duration::from_secs(4));
        assert_eq!(config.routes.login, "/login");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = ConsoleConfig::from_toml(
            r#"
            [api]
            base_url = "https://stock.example.com"

            [messages]
            result_secs = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://stock.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.messages.validation_secs, 3);
        assert_eq!(config.messages.result_secs, 6);
        assert_eq!(config.routes.home, "/warehouses");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(matches!(
            ConsoleConfig::from_toml("[api]\ntimeout_secs = \"ten\""),
            Err(StoreError::Config(_))
        ));
    }
}
