//! Error types for Airtable record creation.
//!
//! Every variant carries what the intake handler needs to build its 500
//! response: `details()` yields the upstream error payload for API
//! rejections and a best-effort message value otherwise. Failures are
//! terminal for the request; retry is the telephony platform's concern.

use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias for Airtable operations.
pub type Result<T> = std::result::Result<T, AirtableError>;

/// Failure modes of an Airtable record-create call.
#[derive(Debug, Clone, Error)]
pub enum AirtableError {
    /// Network-level connectivity failure.
    #[error("network connection failed: {message}")]
    Network {
        /// Error message describing the network failure
        message: String,
    },

    /// Request deadline exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out
        timeout_seconds: u64,
    },

    /// Airtable rejected the request with a non-2xx status.
    #[error("airtable error: HTTP {status_code}")]
    Api {
        /// HTTP status code returned by Airtable
        status_code: u16,
        /// Upstream error payload, parsed JSON when possible
        body: Value,
    },

    /// A 2xx response that could not be decoded into a created record.
    #[error("malformed airtable response: {message}")]
    MalformedResponse {
        /// Description of the decoding failure
        message: String,
    },

    /// HTTP client could not be constructed.
    #[error("invalid client configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl AirtableError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates an API error from an HTTP response.
    pub fn api(status_code: u16, body: Value) -> Self {
        Self::Api { status_code, body }
    }

    /// Creates a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse { message: message.into() }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Best-effort detail payload for the error response.
    ///
    /// API rejections pass the upstream body through verbatim; other
    /// variants yield their message as a JSON string.
    pub fn details(&self) -> Value {
        match self {
            Self::Api { body, .. } => body.clone(),
            other => json!(other.to_string()),
        }
    }
}
