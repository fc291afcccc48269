//! # Payment Types
//!
//! Request and response records for the payments endpoints.

use crate::payload::{finite_amount, finite_amount_opt, parse_timestamp};
use crate::provider::ProviderType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnError};
use std::fmt;

/// Lifecycle status reported by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Authorized,
    Completed,
    Failed,
    Canceled,
    Refunded,
    /// A status this SDK version does not know about
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Authorized => "AUTHORIZED",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Canceled => "CANCELED",
            PaymentStatus::Refunded => "REFUNDED",
            PaymentStatus::Other(other) => other,
        }
    }

    /// No further transitions are expected
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Completed
                | PaymentStatus::Failed
                | PaymentStatus::Canceled
                | PaymentStatus::Refunded
        )
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            "PENDING" => PaymentStatus::Pending,
            "AUTHORIZED" => PaymentStatus::Authorized,
            "COMPLETED" => PaymentStatus::Completed,
            "FAILED" => PaymentStatus::Failed,
            "CANCELED" => PaymentStatus::Canceled,
            "REFUNDED" => PaymentStatus::Refunded,
            other => PaymentStatus::Other(other.to_string()),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/payments/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    /// Merchant-side order reference
    pub client_order_id: String,

    /// Provider to route through (e.g. `STRIPE`)
    pub provider: String,

    #[serde(serialize_with = "finite_amount")]
    pub amount: f64,

    /// ISO currency code
    pub currency: String,

    pub success_url: String,

    pub cancel_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    /// Merchant endpoint notified on status changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    /// Capture immediately after authorization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_capture: Option<bool>,
}

impl CreatePaymentRequest {
    /// Create a request with the mandatory fields
    pub fn new(
        client_order_id: impl Into<String>,
        provider: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            client_order_id: client_order_id.into(),
            provider: provider.into(),
            amount,
            currency: currency.into(),
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
            description: None,
            customer_email: None,
            callback_url: None,
            metadata: None,
            auto_capture: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_auto_capture(mut self, auto_capture: bool) -> Self {
        self.auto_capture = Some(auto_capture);
        self
    }

    /// Typed view of `provider`
    pub fn provider_type(&self) -> ProviderType {
        ProviderType::from(self.provider.as_str())
    }
}

/// Body of `PUT /api/payments/{id}`
///
/// Only the fields that are set are sent, so the gateway leaves the
/// others untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    #[serde(
        serialize_with = "finite_amount_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,

    #[serde(
        serialize_with = "finite_amount_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_paid: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdatePaymentRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_amount_paid(mut self, amount_paid: f64) -> Self {
        self.amount_paid = Some(amount_paid);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Body of `POST /api/payments/{id}/refund`
///
/// Without an amount the gateway refunds the remaining balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundPaymentRequest {
    #[serde(
        serialize_with = "finite_amount_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RefundPaymentRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

// =============================================================================
// Responses
// =============================================================================

/// A payment as reported by the gateway
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentResponse {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub payment_id: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub client_order_id: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub provider: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub status: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub amount: Option<f64>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub amount_paid: Option<f64>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub currency: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub description: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub customer_email: Option<String>,

    /// Hosted checkout page to redirect the customer to
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub checkout_url: Option<String>,

    /// Identifier at the underlying provider (e.g. Stripe payment intent)
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub provider_payment_id: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub created_at: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub completed_at: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub expires_at: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub metadata: Map<String, Value>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub error_message: Option<String>,
}

impl PaymentResponse {
    /// Typed view of `status`
    pub fn payment_status(&self) -> Option<PaymentStatus> {
        self.status.as_deref().map(PaymentStatus::from)
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }

    pub fn completed_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.completed_at.as_deref())
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.expires_at.as_deref())
    }

    /// True once `expires_at` has passed. Unknown expiry never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at_utc().map_or(false, |expires| expires <= now)
    }
}

/// Result of a refund
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefundResponse {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub refund_id: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub payment_id: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub provider_refund_id: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub amount: Option<f64>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub original_amount: Option<f64>,

    /// Balance still refundable after this refund
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub remaining_amount: Option<f64>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub status: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub reason: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub created_at: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub completed_at: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub error_message: Option<String>,
}

impl RefundResponse {
    /// True when nothing is left to refund
    pub fn is_full_refund(&self) -> bool {
        self.remaining_amount == Some(0.0)
    }
}

/// Result of `POST /api/payments/resend-failed-callbacks`
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResendCallbacksResponse {
    /// Number of callbacks queued for redelivery
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub resent: u64,
}
