//! # Transport Trait
//!
//! Seam between the resource clients and the HTTP implementation.
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐
//! │  PaymentsClient  │   │ ProvidersClient  │
//! └────────┬─────────┘   └────────┬─────────┘
//!          └───────────┬──────────┘
//!                      ▼
//!          ┌──────────────────────┐
//!          │  Transport (trait)   │
//!          │  └── send(request)   │
//!          └──────────────────────┘
//!                      ▲
//!          ┌───────────┴──────────┐
//!          │    HttpTransport     │
//!          │ (reqwest, retries)   │
//!          └──────────────────────┘
//! ```

use crate::error::{ApiError, ApiResult};
use crate::payload::decode_payload;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Methods that are safe to repeat (GET, HEAD)
    pub fn is_idempotent(self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Head)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical API call, described as plain data.
///
/// The path is held as unescaped segments; the transport percent-encodes
/// each one when it joins them onto the base URL, so an identifier such
/// as `pay test/id` stays a single segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub segments: Vec<String>,
    /// `None` values are omitted from the query string entirely
    pub query: Vec<(String, Option<String>)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new<I, S>(method: HttpMethod, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(HttpMethod::Get, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(HttpMethod::Post, segments)
    }

    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(HttpMethod::Put, segments)
    }

    /// Builder: add a query parameter, skipped on the wire when `None`
    pub fn query(mut self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.query.push((name.into(), value.map(Into::into)));
        self
    }

    /// Builder: attach a JSON body
    ///
    /// # Errors
    /// Fails with an [`ErrorKind::InvalidRequest`](crate::ErrorKind) error if
    /// `body` cannot be represented as JSON (a map with non-string keys, a
    /// non-finite amount). Such a request is never sent.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            ApiError::invalid_request(format!("Failed to serialize request body: {}", e))
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Unescaped path, for logging
    pub fn display_path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// A 2xx response: its status and parsed JSON body (`None` when empty).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Decode the body into a response DTO
    pub fn decode<T: DeserializeOwned + Default>(self) -> ApiResult<T> {
        decode_payload(self.status, self.body)
    }
}

/// Executes one logical API call.
///
/// Any non-2xx outcome comes back as an `ApiError`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

/// Type alias for a shared transport (dynamic dispatch)
pub type SharedTransport = Arc<dyn Transport>;
