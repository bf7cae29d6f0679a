//! Form relay module
//!
//! Submissions go to a third-party relay that forwards them by email; the
//! app hosts no backend of its own.

mod client;
mod submitter;
mod traits;

pub use client::{HttpRelayTransport, DEFAULT_ENDPOINT};
pub use submitter::{RelaySettings, SubmissionOutcome, Submitter, DEFAULT_TIMEOUT};
pub use traits::{RelayResponse, RelayTransport, TransportError};

#[cfg(test)]
pub use traits::MockRelayTransport;
