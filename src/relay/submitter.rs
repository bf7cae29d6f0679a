//! Turns a form snapshot into exactly one relay request and a typed outcome

use super::client::DEFAULT_ENDPOINT;
use super::traits::RelayTransport;
use crate::state::FormSnapshot;
use crate::validation::FieldErrors;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

pub const NOT_CONFIGURED_MESSAGE: &str = "Form is not configured yet";
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please check your internet and try again.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";
pub const SUCCESS_MESSAGE: &str = "Thank you! We have received your enquiry and will contact you soon.";

/// Default client-side request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { message: Option<String> },
    ValidationFailed(FieldErrors),
    NetworkError(String),
    Timeout,
    /// Missing access key; resubmitting cannot help
    ConfigurationError(String),
}

impl SubmissionOutcome {
    /// Text shown to the user for this outcome
    pub fn user_message(&self) -> String {
        match self {
            SubmissionOutcome::Success { .. } => SUCCESS_MESSAGE.to_string(),
            SubmissionOutcome::ValidationFailed(errors) => {
                format!("Please fix {} highlighted field(s)", errors.len())
            }
            SubmissionOutcome::NetworkError(msg) => msg.clone(),
            SubmissionOutcome::Timeout => TIMEOUT_MESSAGE.to_string(),
            SubmissionOutcome::ConfigurationError(msg) => msg.clone(),
        }
    }

    /// Whether submitting again may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SubmissionOutcome::ConfigurationError(_))
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionOutcome::Success { .. } => "success",
            SubmissionOutcome::ValidationFailed(_) => "validation_failed",
            SubmissionOutcome::NetworkError(_) => "network_error",
            SubmissionOutcome::Timeout => "timeout",
            SubmissionOutcome::ConfigurationError(_) => "configuration_error",
        }
    }
}

/// Relay settings shared by every form
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub endpoint: String,
    pub access_key: Option<String>,
    /// Fallback reply-to when the form has no email field value
    pub reply_to: Option<String>,
    pub target_email: Option<String>,
    pub timeout: Duration,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: None,
            reply_to: None,
            target_email: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// JSON body accepted by the relay
#[derive(Debug, Serialize)]
pub struct RelayPayload<'a> {
    pub access_key: &'a str,
    pub subject: &'a str,
    pub from_name: &'a str,
    pub replyto: &'a str,
    /// Honeypot, always empty when sent by a person
    pub botcheck: &'a str,
    pub form_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_email: Option<&'a str>,
    #[serde(flatten)]
    pub fields: &'a BTreeMap<String, String>,
}

/// Sends validated snapshots to the relay
#[derive(Clone)]
pub struct Submitter {
    transport: Arc<dyn RelayTransport>,
    settings: RelaySettings,
}

impl Submitter {
    pub fn new(transport: Arc<dyn RelayTransport>, settings: RelaySettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Submit once. Never retries and never returns an error: every failure
    /// becomes a [`SubmissionOutcome`].
    pub async fn submit(&self, snapshot: &FormSnapshot) -> SubmissionOutcome {
        let form_type = snapshot.form().routing().form_type;

        let Some(access_key) = self.settings.access_key.as_deref() else {
            tracing::warn!("Relay access key missing, {form_type} submission not sent");
            return SubmissionOutcome::ConfigurationError(NOT_CONFIGURED_MESSAGE.to_string());
        };

        let body = match serde_json::to_value(self.payload(access_key, snapshot)) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to encode {form_type} payload: {e}");
                return SubmissionOutcome::NetworkError(GENERIC_FAILURE_MESSAGE.to_string());
            }
        };

        tracing::info!("Submitting {form_type} form to relay");
        let result = tokio::time::timeout(
            self.settings.timeout,
            self.transport.post_json(&self.settings.endpoint, &body),
        )
        .await;

        let outcome = match result {
            Err(_) => SubmissionOutcome::Timeout,
            Ok(Err(e)) => {
                tracing::warn!("Relay request for {form_type} failed: {e}");
                SubmissionOutcome::NetworkError(
                    e.server_message()
                        .unwrap_or(GENERIC_FAILURE_MESSAGE)
                        .to_string(),
                )
            }
            Ok(Ok(response)) if response.success => SubmissionOutcome::Success {
                message: response.message,
            },
            Ok(Ok(response)) => SubmissionOutcome::NetworkError(
                response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            ),
        };

        tracing::info!("Relay outcome for {form_type}: {}", outcome.kind());
        outcome
    }

    fn payload<'a>(&'a self, access_key: &'a str, snapshot: &'a FormSnapshot) -> RelayPayload<'a> {
        let routing = snapshot.form().routing();
        let replyto = snapshot
            .get("email")
            .filter(|e| !e.is_empty())
            .or(self.settings.reply_to.as_deref())
            .unwrap_or("");

        RelayPayload {
            access_key,
            subject: routing.subject,
            from_name: routing.from_name,
            replyto,
            botcheck: "",
            form_type: routing.form_type,
            target_email: self.settings.target_email.as_deref(),
            fields: snapshot.values(),
        }
    }
}
