//! Configuration module for greenroom.

use serde::Deserialize;
use std::path::Path;

use crate::{GreenroomError, Result};

/// Environment variable overriding the configured API base URL.
pub const ENV_API_URL: &str = "GREENROOM_API_URL";

/// Environment variable overriding the configured S3 base URL.
pub const ENV_S3_URL: &str = "GREENROOM_S3_URL";

/// How the gate reports password-verification failures.
///
/// The backend this client was written against does not let the UI tell a
/// wrong password apart from a transport failure; both surface the same
/// message. `Legacy` keeps that behavior for message-level parity with the
/// existing site. `Distinct` surfaces a separate connection-failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorDetailMode {
    /// Transport failures during password verification read as a wrong
    /// password (parity with the existing site).
    #[default]
    Legacy,
    /// Transport failures surface a connection-failure message instead.
    Distinct,
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, without the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base URL of the S3 bucket holding CMS images.
    #[serde(default = "default_s3_base_url")]
    pub s3_base_url: String,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_total_timeout")]
    pub total_timeout_secs: u64,
    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// User agent string sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Timezone for displaying dates (e.g., "Asia/Seoul", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// How password-verification failures are reported.
    #[serde(default)]
    pub error_mode: ErrorDetailMode,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_s3_base_url() -> String {
    "https://catharsis-image.s3.ap-northeast-2.amazonaws.com".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_read_timeout() -> u64 {
    20
}

fn default_total_timeout() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    5
}

fn default_user_agent() -> String {
    format!("greenroom/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            s3_base_url: default_s3_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            total_timeout_secs: default_total_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            timezone: default_timezone(),
            error_mode: ErrorDetailMode::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            GreenroomError::Config(format!(
                "failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| GreenroomError::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Apply environment overrides (API and S3 base URLs).
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(url) = std::env::var(ENV_S3_URL) {
            if !url.trim().is_empty() {
                self.s3_base_url = url;
            }
        }
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the error reporting mode.
    pub fn with_error_mode(mut self, mode: ErrorDetailMode) -> Self {
        self.error_mode = mode;
        self
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file path. Console-only when absent.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
