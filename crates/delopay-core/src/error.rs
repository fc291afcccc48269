//! # Error Types
//!
//! Typed error handling for the Delopay SDK.
//! Every API call returns `Result<T, ApiError>`; client construction
//! returns `Result<T, ConfigError>`.

use serde_json::Value;
use thiserror::Error;

/// Message used for failures that never produced an HTTP response.
pub const NETWORK_FAILURE_MESSAGE: &str = "Network request failed";

/// Message used when a request could not be turned into an HTTP call.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request";

/// Where a call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Sent, but no response arrived (connection, DNS, timeout)
    Network,
    /// The server answered; `status` is its HTTP status
    Http,
    /// Rejected locally before anything was sent
    InvalidRequest,
}

/// Structured error for any failed API call.
///
/// `status` is the HTTP status code of the response, or `0` when no
/// response exists (network failures and requests that were never sent).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("API error (status {status}): {message}")]
pub struct ApiError {
    pub kind: ErrorKind,

    /// HTTP status code, `0` when there is no response
    pub status: u16,

    /// Human-readable message
    pub message: String,

    /// Provider-supplied error code (`code` or `errorCode`)
    pub code: Option<String>,

    /// Request correlation id (`x-request-id` header or `requestId` field)
    pub request_id: Option<String>,

    /// Parsed response body, raw text, or underlying failure reason
    pub raw: Option<Value>,
}

impl ApiError {
    /// Build an error for a request that never produced a response.
    pub fn network(reason: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Network,
            status: 0,
            message: NETWORK_FAILURE_MESSAGE.to_string(),
            code: None,
            request_id: None,
            raw: Some(Value::String(reason.into())),
        }
    }

    /// Build an error for a request that was rejected before sending.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidRequest,
            status: 0,
            message: INVALID_REQUEST_MESSAGE.to_string(),
            code: None,
            request_id: None,
            raw: Some(Value::String(reason.into())),
        }
    }

    /// Build an error for a success payload that is not a JSON object.
    pub fn unexpected_payload(status: u16, raw: Value) -> Self {
        Self {
            kind: ErrorKind::Http,
            status,
            message: "Unexpected response payload".to_string(),
            code: None,
            request_id: None,
            raw: Some(raw),
        }
    }

    /// Build an error from an HTTP status and a message.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Http,
            status,
            message: message.into(),
            code: None,
            request_id: None,
            raw: None,
        }
    }

    /// Builder: attach a provider error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Builder: attach a request correlation id
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Builder: attach the diagnostic payload
    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// True when the request never reached the server
    pub fn is_network_error(&self) -> bool {
        self.kind == ErrorKind::Network
    }

    /// True for 4xx responses
    pub fn is_client_error(&self) -> bool {
        self.kind == ErrorKind::Http && (400..500).contains(&self.status)
    }

    /// True for 5xx responses
    pub fn is_server_error(&self) -> bool {
        self.kind == ErrorKind::Http && self.status >= 500
    }

    /// Returns true if repeating the call may succeed.
    ///
    /// The transport only acts on this for idempotent methods.
    pub fn is_retryable(&self) -> bool {
        self.is_network_error() || self.is_server_error()
    }
}

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while constructing a client.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// API key missing or blank
    #[error("Configuration error: apiKey is required")]
    MissingApiKey,

    /// Base URL could not be used as a request base
    #[error("Configuration error: invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// API key cannot be sent as an `Authorization` header
    #[error("Configuration error: apiKey contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    /// Environment variable present but malformed
    #[error("Configuration error: {var} has invalid value {value:?}")]
    InvalidEnvVar { var: String, value: String },

    /// Underlying HTTP client could not be built
    #[error("Configuration error: failed to build HTTP client: {0}")]
    HttpClient(String),
}
