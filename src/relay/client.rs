//! HTTP client for the form relay service
//!
//! Posts JSON bodies to the relay and decodes its `{ success, message }`
//! reply.

use super::traits::{RelayResponse, RelayTransport, TransportError};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

/// Default relay endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// reqwest-backed transport
#[derive(Debug, Clone, Default)]
pub struct HttpRelayTransport {
    client: reqwest::Client,
}

impl HttpRelayTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<RelayResponse, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        decode_response(status.as_u16(), status.is_success(), &text)
    }
}

/// Map a raw relay reply onto a response or a transport error
fn decode_response(
    status: u16,
    is_success: bool,
    text: &str,
) -> Result<RelayResponse, TransportError> {
    let parsed = serde_json::from_str::<RelayResponse>(text);

    if !is_success {
        return Err(TransportError::Status {
            status,
            message: parsed.ok().and_then(|r| r.message),
        });
    }

    parsed.map_err(|e| TransportError::InvalidBody(e.to_string()))
}
