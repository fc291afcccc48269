//! # Providers
//!
//! Client for the `/api/providers` discovery endpoints.

use delopay_core::{
    ApiRequest, ApiResult, PaymentMethodsResponse, ProviderClientConfig, ProviderListResponse,
    SharedTransport, StripePaymentMethodsQuery,
};

/// Providers resource client
#[derive(Clone)]
pub struct ProvidersClient {
    transport: SharedTransport,
}

impl ProvidersClient {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    /// `GET /api/providers`
    pub async fn list(&self) -> ApiResult<ProviderListResponse> {
        let request = ApiRequest::get(["api", "providers"]);
        self.transport.send(request).await?.decode()
    }

    /// `GET /api/providers/{id}/client-config`
    pub async fn get_client_config(&self, provider_id: &str) -> ApiResult<ProviderClientConfig> {
        let request = ApiRequest::get(["api", "providers", provider_id, "client-config"]);
        self.transport.send(request).await?.decode()
    }

    /// `GET /api/providers/stripe/payment-methods`
    ///
    /// `currency` is left out of the query string when not set.
    pub async fn get_stripe_payment_methods(
        &self,
        query: &StripePaymentMethodsQuery,
    ) -> ApiResult<PaymentMethodsResponse> {
        let request = ApiRequest::get(["api", "providers", "stripe", "payment-methods"])
            .query("merchantCountry", Some(query.merchant_country.as_str()))
            .query("customerCountry", Some(query.customer_country.as_str()))
            .query("currency", query.currency.as_deref());
        self.transport.send(request).await?.decode()
    }
}
