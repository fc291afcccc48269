//! # delopay
//!
//! Typed client for the Delopay payments gateway API.
//!
//! - **PaymentsClient** - create, read, update, capture and refund payments
//! - **ProvidersClient** - provider discovery, client-side config and
//!   Stripe payment method lookup
//!
//! Calls go through one shared [`HttpTransport`], which adds bearer auth,
//! retries GET/HEAD calls on network failures and 5xx responses, and turns
//! every failure into an [`ApiError`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use delopay::{ClientOptions, CreatePaymentRequest, DelopayClient};
//!
//! let client = DelopayClient::new(ClientOptions::new("sk_test_..."))?;
//!
//! let payment = client
//!     .payments()
//!     .create(&CreatePaymentRequest::new(
//!         "order_123",
//!         "STRIPE",
//!         100.0,
//!         "EUR",
//!         "https://shop.example/success",
//!         "https://shop.example/cancel",
//!     ))
//!     .await?;
//!
//! // Redirect the customer to payment.checkout_url
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! match client.payments().get("pay_123").await {
//!     Ok(payment) => println!("status: {:?}", payment.status),
//!     Err(err) if err.is_network_error() => eprintln!("gateway unreachable: {:?}", err.raw),
//!     Err(err) => eprintln!("{} (code {:?}, request {:?})", err, err.code, err.request_id),
//! }
//! ```

pub mod client;
pub mod config;
pub mod http;
pub mod payments;
pub mod providers;

#[cfg(test)]
mod testing;

// Re-exports
pub use client::DelopayClient;
pub use config::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_MS};
pub use delopay_core::*;
pub use http::{HttpTransport, REQUEST_ID_HEADER};
pub use payments::PaymentsClient;
pub use providers::ProvidersClient;
