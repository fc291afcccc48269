//! # Provider Types
//!
//! Records for the provider discovery endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use std::fmt;

/// Payment provider known to the gateway
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderType {
    Stripe,
    PayPal,
    NowPayments,
    Paysafe,
    Other(String),
}

impl ProviderType {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderType::Stripe => "STRIPE",
            ProviderType::PayPal => "PAYPAL",
            ProviderType::NowPayments => "NOWPAYMENTS",
            ProviderType::Paysafe => "PAYSAFE",
            ProviderType::Other(other) => other,
        }
    }
}

impl From<&str> for ProviderType {
    fn from(value: &str) -> Self {
        match value {
            "STRIPE" => ProviderType::Stripe,
            "PAYPAL" => ProviderType::PayPal,
            "NOWPAYMENTS" => ProviderType::NowPayments,
            "PAYSAFE" => ProviderType::Paysafe,
            other => ProviderType::Other(other.to_string()),
        }
    }
}

impl From<ProviderType> for String {
    fn from(provider: ProviderType) -> Self {
        provider.as_str().to_string()
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider configured on the gateway
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderInfo {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub id: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub name: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub enabled: bool,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub supported_currencies: Vec<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub features: Vec<String>,

    /// Crypto assets, for crypto providers
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub supported_crypto: Vec<String>,
}

impl ProviderInfo {
    pub fn provider_type(&self) -> Option<ProviderType> {
        self.id.as_deref().map(ProviderType::from)
    }

    pub fn supports_currency(&self, currency: &str) -> bool {
        self.supported_currencies
            .iter()
            .any(|c| c.eq_ignore_ascii_case(currency))
    }
}

/// Result of `GET /api/providers`
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderListResponse {
    #[serde_as(deserialize_as = "DefaultOnError<Vec<DefaultOnError>>")]
    pub providers: Vec<ProviderInfo>,
}

impl ProviderListResponse {
    /// Providers currently accepting payments
    pub fn enabled(&self) -> impl Iterator<Item = &ProviderInfo> {
        self.providers.iter().filter(|p| p.enabled)
    }
}

/// Public settings a browser or mobile client needs for a provider
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderClientConfig {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub provider: Option<String>,

    /// Stripe publishable key
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub publishable_key: Option<String>,

    /// PayPal client id
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub client_id: Option<String>,
}

/// Query for `GET /api/providers/stripe/payment-methods`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripePaymentMethodsQuery {
    pub merchant_country: String,
    pub customer_country: String,
    /// Omitted from the query string when `None`
    pub currency: Option<String>,
}

impl StripePaymentMethodsQuery {
    pub fn new(merchant_country: impl Into<String>, customer_country: impl Into<String>) -> Self {
        Self {
            merchant_country: merchant_country.into(),
            customer_country: customer_country.into(),
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethodDetail {
    /// Stripe payment method type (e.g. `card`, `sepa_debit`)
    #[serde(rename = "type")]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub method_type: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub name: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub icon: Option<String>,
}

/// Stripe payment methods available for a merchant/customer pairing
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentMethodsResponse {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub success: bool,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub merchant_country: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub customer_country: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    pub currency: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError<Vec<DefaultOnError>>")]
    pub payment_methods: Vec<PaymentMethodDetail>,
}
