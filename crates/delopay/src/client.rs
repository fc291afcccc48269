//! # Delopay Client
//!
//! Entry point: builds one transport and hands it to every resource client.

use crate::config::ClientOptions;
use crate::http::HttpTransport;
use crate::payments::PaymentsClient;
use crate::providers::ProvidersClient;
use delopay_core::{ConfigError, SharedTransport};
use std::sync::Arc;
use tracing::debug;

/// Typed client for the Delopay API
///
/// Cheap to clone; clones share the same transport and connection pool.
#[derive(Clone)]
pub struct DelopayClient {
    payments: PaymentsClient,
    providers: ProvidersClient,
}

impl DelopayClient {
    /// Create a client over HTTPS.
    ///
    /// # Errors
    /// Returns `ConfigError` for a blank API key, a key that cannot be sent
    /// as a header, or an unusable base URL.
    pub fn new(options: ClientOptions) -> Result<Self, ConfigError> {
        debug!(
            base_url = %options.base_url,
            timeout_ms = options.timeout_ms,
            max_retries = options.max_retries,
            "Creating Delopay client"
        );
        let transport = HttpTransport::new(options)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create with defaults for everything but the key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(ClientOptions::new(api_key))
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientOptions::from_env()?)
    }

    /// Create over any transport implementation
    pub fn with_transport(transport: SharedTransport) -> Self {
        Self {
            payments: PaymentsClient::new(transport.clone()),
            providers: ProvidersClient::new(transport),
        }
    }

    pub fn payments(&self) -> &PaymentsClient {
        &self.payments
    }

    pub fn providers(&self) -> &ProvidersClient {
        &self.providers
    }
}
