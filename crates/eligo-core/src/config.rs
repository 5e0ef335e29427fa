//! Runtime configuration.
//!
//! Config is an explicit object handed to constructors; nothing here reads
//! the environment or keeps process-global state. TOML is the on-disk
//! format, same as the access-policy loader.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use eligo_contracts::error::{EligoError, EligoResult};

use crate::retry::RetryPolicy;

/// Classifier gateway settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Vendor API key. Absent when a scripted backend is wired in.
    pub api_key: Option<String>,
    /// Retry budget for transient transport failures, including the first call.
    pub max_attempts: u32,
    /// First backoff delay; doubles per subsequent failed attempt.
    pub base_delay_ms: u64,
    /// Per-request transport timeout.
    pub request_timeout_ms: u64,
}

impl ClassifierConfig {
    /// The retry schedule these settings describe.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            max_attempts: 3,
            base_delay_ms: 2_000,
            request_timeout_ms: 10_000,
        }
    }
}

/// Notification dispatch settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Whether the email channel is wired into the dispatcher.
    pub email_enabled: bool,
    /// Whether the webhook channel is wired into the dispatcher.
    pub webhook_enabled: bool,
    /// Staff inboxes that receive alert emails.
    pub email_recipients: Vec<String>,
    /// Endpoint for webhook alerts.
    pub webhook_url: Option<String>,
    /// Base URL used to build verification deep links.
    pub deep_link_base: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            email_enabled: true,
            webhook_enabled: false,
            email_recipients: Vec::new(),
            webhook_url: None,
            deep_link_base: "https://eligo.example".to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub notifications: NotificationConfig,
}

impl AppConfig {
    /// Parse `s` as TOML. Missing keys take their defaults.
    ///
    /// Returns `EligoError::Config` if the TOML is malformed or does not
    /// match the expected shape.
    pub fn from_toml_str(s: &str) -> EligoResult<Self> {
        toml::from_str(s).map_err(|e| EligoError::Config {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> EligoResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| EligoError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}
