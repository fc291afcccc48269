//! # delopay-core
//!
//! Core types and traits for the Delopay payments SDK.
//!
//! This crate provides:
//! - `ApiError` for any failed API call and `ConfigError` for client setup
//! - Request and response records for payments and providers
//! - `Transport` trait and `ApiRequest`, the seam resource clients call through
//! - `decode_payload` for tolerant response decoding
//!
//! ## Example
//!
//! ```rust
//! use delopay_core::{decode_payload, PaymentResponse};
//! use serde_json::json;
//!
//! let payment: PaymentResponse =
//!     decode_payload(200, Some(json!({"paymentId": "pay_1", "status": "PENDING"}))).unwrap();
//!
//! assert_eq!(payment.payment_id.as_deref(), Some("pay_1"));
//! assert!(payment.metadata.is_empty());
//! ```

pub mod error;
pub mod payload;
pub mod payment;
pub mod provider;
pub mod transport;

// Re-exports for convenience
pub use error::{
    ApiError, ApiResult, ConfigError, ErrorKind, INVALID_REQUEST_MESSAGE, NETWORK_FAILURE_MESSAGE,
};
pub use payload::decode_payload;
pub use payment::{
    CreatePaymentRequest, PaymentResponse, PaymentStatus, RefundPaymentRequest, RefundResponse,
    ResendCallbacksResponse, UpdatePaymentRequest,
};
pub use provider::{
    PaymentMethodDetail, PaymentMethodsResponse, ProviderClientConfig, ProviderInfo,
    ProviderListResponse, ProviderType, StripePaymentMethodsQuery,
};
pub use transport::{ApiRequest, ApiResponse, HttpMethod, SharedTransport, Transport};
