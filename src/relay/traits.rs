//! Trait abstraction for the relay transport to enable mocking in tests

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Body returned by the relay service
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RelayResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Failures below the relay's own `success` flag
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("relay returned HTTP {status}")]
    Status { status: u16, message: Option<String> },
    #[error("relay response was not JSON: {0}")]
    InvalidBody(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Message supplied by the relay, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Status {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => Some(msg),
            _ => None,
        }
    }
}

/// Outbound JSON POST to the relay service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Send one request. Implementations never retry.
    async fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<RelayResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_defaults_missing_fields() {
        let parsed: RelayResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, RelayResponse::default());
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let parsed: RelayResponse =
            serde_json::from_str(r#"{"success": true, "message": "Sent", "data": {}}"#).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.message.as_deref(), Some("Sent"));
    }

    #[test]
    fn test_server_message_only_for_non_blank_status_messages() {
        let with_message = TransportError::Status {
            status: 400,
            message: Some("Invalid access key".to_string()),
        };
        let blank = TransportError::Status {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(with_message.server_message(), Some("Invalid access key"));
        assert_eq!(blank.server_message(), None);
        assert_eq!(TransportError::Request("reset".into()).server_message(), None);
    }
}
