//! Configuration handling for the inquiry forms

use crate::relay::{RelaySettings, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::state::FormKind;
use crate::validation::EmailPolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the relay access key
pub const ACCESS_KEY_VAR: &str = "INQUIRY_ACCESS_KEY";
/// Environment variable overriding the relay endpoint
pub const ENDPOINT_VAR: &str = "INQUIRY_RELAY_ENDPOINT";

/// Access key baked in at build time, used when nothing else supplies one
const BUILD_ACCESS_KEY: Option<&str> = option_env!("INQUIRY_ACCESS_KEY");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// User configuration for the inquiry forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InquiryConfig {
    /// Relay access key
    pub access_key: Option<String>,
    /// Relay endpoint
    pub endpoint: String,
    /// Client-side request timeout
    pub timeout_secs: u64,
    /// How long the success panel stays up before the form returns to idle
    pub success_display_secs: u64,
    /// Reply-to used when a form has no email value
    pub reply_to: Option<String>,
    /// Restrict the booking form to Gmail addresses
    pub booking_gmail_only: bool,
    /// Inbox the relay should route to
    pub target_email: Option<String>,
}

impl Default for InquiryConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            success_display_secs: 5,
            reply_to: None,
            booking_gmail_only: true,
            target_email: None,
        }
    }
}

impl InquiryConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "inquiry", "inquiry-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the config file, then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides through `lookup`
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(ACCESS_KEY_VAR).and_then(non_blank) {
            self.access_key = Some(key);
        }
        if let Some(endpoint) = lookup(ENDPOINT_VAR).and_then(non_blank) {
            self.endpoint = endpoint;
        }
        self
    }

    /// Access key from runtime config, falling back to the build-time value
    pub fn resolved_access_key(&self) -> Option<String> {
        self.access_key
            .clone()
            .and_then(non_blank)
            .or_else(|| BUILD_ACCESS_KEY.map(str::to_string).and_then(non_blank))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_secs(self.success_display_secs)
    }

    /// Email policy for a form, honouring the booking override
    pub fn email_policy(&self, kind: FormKind) -> EmailPolicy {
        match kind {
            FormKind::Booking if !self.booking_gmail_only => EmailPolicy::AnyDomain,
            _ => kind.default_email_policy(),
        }
    }

    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            endpoint: self.endpoint.clone(),
            access_key: self.resolved_access_key(),
            reply_to: self.reply_to.clone().and_then(non_blank),
            target_email: self.target_email.clone().and_then(non_blank),
            timeout: self.timeout(),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
