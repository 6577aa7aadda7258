//! Configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::CoreError;

pub const ENV_BASE_URL: &str = "ORCHARD_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "ORCHARD_TIMEOUT_MS";
pub const ENV_USER_ID: &str = "ORCHARD_USER_ID";
pub const ENV_APPLICATION_ID: &str = "ORCHARD_APPLICATION_ID";

/// Full configuration for the orchard verifier.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrchardConfig {
    /// Verification service settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the verification client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the verification service, without the `/api/v1` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Identifier of the person operating the scanner.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Identifier of this application instance.
    #[serde(default = "default_application_id")]
    pub application_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:3001".into()
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_user_id() -> String {
    "a1b2c3d4-e5f6-4789-a012-3456789abcde".into()
}
fn default_application_id() -> String {
    "f9e8d7c6-b5a4-3210-9876-543210fedcba".into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_id: default_user_id(),
            application_id: default_application_id(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check the settings before a client is built from them.
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| CoreError::InvalidConfig(format!("base_url {:?}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::InvalidConfig(format!(
                "base_url must use http or https, got: {}",
                url.scheme()
            )));
        }
        if self.timeout_ms == 0 {
            return Err(CoreError::InvalidConfig("timeout_ms must be positive".into()));
        }
        if self.user_id.trim().is_empty() {
            return Err(CoreError::InvalidConfig("user_id must not be empty".into()));
        }
        if self.application_id.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "application_id must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Full URL of an endpoint path such as `/api/v1/verify`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl OrchardConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: OrchardConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply `ORCHARD_*` environment variables on top of the loaded values.
    pub fn apply_env(&mut self) -> Result<(), CoreError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.client.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            self.client.timeout_ms = timeout.parse().map_err(|_| {
                CoreError::InvalidConfig(format!("{} must be an integer, got: {}", ENV_TIMEOUT_MS, timeout))
            })?;
        }
        if let Some(user_id) = lookup(ENV_USER_ID) {
            self.client.user_id = user_id;
        }
        if let Some(application_id) = lookup(ENV_APPLICATION_ID) {
            self.client.application_id = application_id;
        }
        Ok(())
    }
}
