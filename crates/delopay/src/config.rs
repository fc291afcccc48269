//! # Client Configuration
//!
//! Options consumed once when a client is constructed.
//! Secrets can be loaded from environment variables.

use delopay_core::ConfigError;
use reqwest::header::HeaderValue;
use std::env;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://sandbox-delopay.deloxity.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_RETRIES: u32 = 2;

pub const ENV_API_KEY: &str = "DELOPAY_API_KEY";
pub const ENV_BASE_URL: &str = "DELOPAY_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "DELOPAY_TIMEOUT_MS";
pub const ENV_MAX_RETRIES: &str = "DELOPAY_MAX_RETRIES";

/// Delopay API configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Secret API key, sent as a bearer token
    pub api_key: String,

    /// API base URL (sandbox by default)
    pub base_url: String,

    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,

    /// Extra attempts for GET/HEAD calls
    pub max_retries: u32,
}

impl ClientOptions {
    /// Options with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `DELOPAY_API_KEY`
    ///
    /// Optional: `DELOPAY_BASE_URL`, `DELOPAY_TIMEOUT_MS`, `DELOPAY_MAX_RETRIES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;
        let mut options = Self::new(api_key);

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            options.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            options.timeout_ms = parse_env(ENV_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            options.max_retries = parse_env(ENV_MAX_RETRIES, &raw)?;
        }

        options.validate()?;
        Ok(options)
    }

    /// Reject options that can never produce a working client
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        // Control characters (a trailing newline from a secrets file) would
        // only fail later, when reqwest builds the request.
        if HeaderValue::from_str(&self.auth_header()).is_err() {
            return Err(ConfigError::InvalidApiKey);
        }
        Ok(())
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Builder: set custom API base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        value: raw.to_string(),
    })
}
