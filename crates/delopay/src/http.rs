//! # HTTP Transport
//!
//! reqwest-backed implementation of [`Transport`].
//!
//! Every call carries `Authorization: Bearer <key>` and
//! `Accept: application/json`; `Content-Type: application/json` is only set
//! when a body is present. GET and HEAD calls are retried on network
//! failures and 5xx responses with exponential backoff
//! (`min(1s, 100ms * 2^attempt)`). Every other method gets exactly one
//! attempt. Redirects are followed by reqwest.

use crate::config::ClientOptions;
use async_trait::async_trait;
use delopay_core::{
    ApiError, ApiRequest, ApiResponse, ApiResult, ConfigError, HttpMethod, Transport,
};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode};
use serde_json::{Map, Value};
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Response header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const USER_AGENT: &str = concat!("delopay-rust/", env!("CARGO_PKG_VERSION"));
const BASE_BACKOFF_MS: u64 = 100;
const MAX_BACKOFF_MS: u64 = 1_000;

/// HTTP transport for the Delopay API
///
/// Holds only immutable configuration and a pooled reqwest client, so one
/// instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    options: ClientOptions,
    base_url: Url,
    client: Client,
}

impl HttpTransport {
    /// Create a transport. Fails before any network activity when the
    /// API key is blank or the base URL is unusable.
    pub fn new(options: ClientOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let base_url = parse_base_url(&options.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(options.timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            options,
            base_url,
            client,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Number of attempts a request may take
    fn max_attempts(&self, method: HttpMethod) -> u32 {
        if method.is_idempotent() {
            self.options.max_retries.saturating_add(1)
        } else {
            1
        }
    }

    /// Run a single attempt. Network failures and non-2xx responses both
    /// come back as `ApiError`.
    async fn attempt(&self, request: &ApiRequest, url: &Url) -> ApiResult<ApiResponse> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url.clone())
            .header(AUTHORIZATION, self.options.auth_header())
            .header(ACCEPT, "application/json");

        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| send_error(&e))?;

        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(String::from);

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::network(describe(&e)))?;

        if status.is_success() {
            parse_success(status, text)
        } else {
            Err(error_from_response(status, request_id, text))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.display_path()))]
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = build_url(&self.base_url, &request.segments, &request.query);
        let max_attempts = self.max_attempts(request.method);

        let mut attempt = 0;
        loop {
            debug!(attempt = attempt + 1, max_attempts, "Sending Delopay request");

            let err = match self.attempt(&request, &url).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if attempt + 1 < max_attempts && err.is_retryable() {
                let delay = backoff_delay(attempt);
                warn!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    status = err.status,
                    "Delopay request failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            error!(
                "Delopay API error: status={}, message={}, request_id={:?}",
                err.status, err.message, err.request_id
            );
            return Err(err);
        }
    }
}

/// Delay before retry number `attempt + 1`
pub fn backoff_delay(attempt: u32) -> Duration {
    let factor = 1u64 << attempt.min(10);
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(factor).min(MAX_BACKOFF_MS))
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("expected an http(s) URL".to_string()));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Join path segments onto the base URL and append present query values.
///
/// Each segment is percent-encoded on its own, so `/`, `#` and spaces
/// inside an identifier cannot change the shape of the path.
fn build_url(base: &Url, segments: &[String], query: &[(String, Option<String>)]) -> Url {
    let mut url = base.clone();

    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }

    let present: Vec<(&str, &str)> = query
        .iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name.as_str(), v)))
        .collect();
    if !present.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in present {
            pairs.append_pair(name, value);
        }
    }

    url
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn parse_success(status: StatusCode, text: String) -> ApiResult<ApiResponse> {
    if text.trim().is_empty() {
        return Ok(ApiResponse::new(status.as_u16(), None));
    }

    match serde_json::from_str(&text) {
        Ok(body) => Ok(ApiResponse::new(status.as_u16(), Some(body))),
        Err(_) => Err(ApiError::http(status.as_u16(), "Invalid JSON in response body")
            .with_raw(Value::String(text))),
    }
}

/// A request reqwest refused to build never left the process.
fn send_error(err: &reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::invalid_request(describe(err))
    } else {
        ApiError::network(describe(err))
    }
}

fn error_from_response(status: StatusCode, request_id: Option<String>, text: String) -> ApiError {
    let fallback = status.canonical_reason().unwrap_or("Request failed");
    let mut err = ApiError::http(status.as_u16(), fallback);
    err.request_id = request_id;

    if text.trim().is_empty() {
        return err;
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(parsed) => {
            if let Value::Object(ref body) = parsed {
                if let Some(message) = first_text(body, &["message", "error"]) {
                    err.message = message;
                }
                err.code = first_text(body, &["code", "errorCode"]);
                if err.request_id.is_none() {
                    err.request_id = first_text(body, &["requestId"]);
                }
            }
            err.raw = Some(parsed);
        }
        Err(_) => err.raw = Some(Value::String(text)),
    }

    err
}

/// First non-empty string (or number) among `keys`
fn first_text(body: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match body.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// reqwest's top-level message plus its source chain
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base(raw: &str) -> Url {
        parse_base_url(raw).unwrap()
    }

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_backoff_delay() {
        assert_eq!(backoff_delay(0), Duration::from_millis(100));
        assert_eq!(backoff_delay(1), Duration::from_millis(200));
        assert_eq!(backoff_delay(2), Duration::from_millis(400));
        assert_eq!(backoff_delay(3), Duration::from_millis(800));
        assert_eq!(backoff_delay(4), Duration::from_millis(1000));
        assert_eq!(backoff_delay(40), Duration::from_millis(1000));
    }

    #[test]
    fn test_build_url_with_and_without_trailing_slash() {
        for raw in ["https://api.test.com", "https://api.test.com/"] {
            let url = build_url(&base(raw), &segments(&["api", "payments", "create"]), &[]);
            assert_eq!(url.as_str(), "https://api.test.com/api/payments/create");
        }
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let url = build_url(&base("https://gw.test.com/v2/"), &segments(&["api", "providers"]), &[]);
        assert_eq!(url.as_str(), "https://gw.test.com/v2/api/providers");
    }

    #[test]
    fn test_build_url_escapes_segments() {
        let url = build_url(
            &base("https://api.test.com"),
            &segments(&["api", "payments", "pay test/id"]),
            &[],
        );
        assert_eq!(url.path(), "/api/payments/pay%20test%2Fid");

        let url = build_url(
            &base("https://api.test.com"),
            &segments(&["api", "payments", "by-order", "order#1?x"]),
            &[],
        );
        assert_eq!(url.path(), "/api/payments/by-order/order%231%3Fx");
        assert!(url.fragment().is_none());
        assert!(url.query().is_none());
    }

    #[test]
    fn test_build_url_skips_absent_query_values() {
        let query = vec![
            ("merchantCountry".to_string(), Some("DE".to_string())),
            ("customerCountry".to_string(), Some("NL".to_string())),
            ("currency".to_string(), None),
        ];
        let url = build_url(&base("https://api.test.com"), &segments(&["x"]), &query);
        assert_eq!(url.query(), Some("merchantCountry=DE&customerCountry=NL"));

        let only_absent = vec![("currency".to_string(), None)];
        let url = build_url(&base("https://api.test.com"), &segments(&["x"]), &only_absent);
        assert!(url.query().is_none());
    }

    #[test]
    fn test_build_url_keeps_empty_string_query_value() {
        let query = vec![("currency".to_string(), Some(String::new()))];
        let url = build_url(&base("https://api.test.com"), &segments(&["x"]), &query);
        assert_eq!(url.query(), Some("currency="));
    }

    #[test]
    fn test_build_url_encodes_query_values() {
        let query = vec![("note".to_string(), Some("a&b c".to_string()))];
        let url = build_url(&base("https://api.test.com"), &segments(&["x"]), &query);
        assert_eq!(url.query(), Some("note=a%26b+c"));
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("mailto:ops@test.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_new_rejects_blank_key() {
        let result = HttpTransport::new(ClientOptions::new(" "));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_new_rejects_key_with_newline() {
        let result = HttpTransport::new(ClientOptions::new("sk_test_123\n"));
        assert!(matches!(result, Err(ConfigError::InvalidApiKey)));
    }

    #[test]
    fn test_retry_budget_per_method() {
        let transport = HttpTransport::new(ClientOptions::new("key").with_max_retries(3)).unwrap();

        assert_eq!(transport.max_attempts(HttpMethod::Get), 4);
        assert_eq!(transport.max_attempts(HttpMethod::Head), 4);
        assert_eq!(transport.max_attempts(HttpMethod::Post), 1);
        assert_eq!(transport.max_attempts(HttpMethod::Put), 1);
        assert_eq!(transport.max_attempts(HttpMethod::Delete), 1);
    }

    #[test]
    fn test_parse_success() {
        assert_eq!(
            parse_success(StatusCode::NO_CONTENT, String::new()).unwrap(),
            ApiResponse::new(204, None)
        );
        assert_eq!(
            parse_success(StatusCode::OK, r#"{"resent":2}"#.to_string()).unwrap(),
            ApiResponse::new(200, Some(json!({"resent": 2})))
        );

        let err = parse_success(StatusCode::OK, "<html>".to_string()).unwrap_err();
        assert_eq!(err.status, 200);
        assert_eq!(err.raw, Some(json!("<html>")));
    }

    #[test]
    fn test_error_from_json_body() {
        let body = json!({"message": "Not found", "code": "PAYMENT_NOT_FOUND", "requestId": "req_body"});
        let err = error_from_response(StatusCode::NOT_FOUND, None, body.to_string());

        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Not found");
        assert_eq!(err.code.as_deref(), Some("PAYMENT_NOT_FOUND"));
        assert_eq!(err.request_id.as_deref(), Some("req_body"));
        assert_eq!(err.raw, Some(body));
    }

    #[test]
    fn test_error_header_request_id_wins() {
        let body = json!({"error": "Bad amount", "errorCode": "E42", "requestId": "req_body"});
        let err = error_from_response(
            StatusCode::BAD_REQUEST,
            Some("req_header".to_string()),
            body.to_string(),
        );

        assert_eq!(err.message, "Bad amount");
        assert_eq!(err.code.as_deref(), Some("E42"));
        assert_eq!(err.request_id.as_deref(), Some("req_header"));
    }

    #[test]
    fn test_error_falls_back_to_status_phrase() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, None, "upstream down".to_string());
        assert_eq!(err.message, "Bad Gateway");
        assert_eq!(err.raw, Some(json!("upstream down")));
        assert!(err.code.is_none());

        let err = error_from_response(StatusCode::CONFLICT, None, json!({"detail": "x"}).to_string());
        assert_eq!(err.message, "Conflict");

        let err = error_from_response(StatusCode::UNAUTHORIZED, None, String::new());
        assert_eq!(err.message, "Unauthorized");
        assert!(err.raw.is_none());
    }

    #[test]
    fn test_error_with_non_object_json() {
        let err = error_from_response(StatusCode::FORBIDDEN, None, r#"["denied"]"#.to_string());
        assert_eq!(err.message, "Forbidden");
        assert_eq!(err.raw, Some(json!(["denied"])));
    }
}
