//! # Payments
//!
//! Client for the `/api/payments` endpoints.

use delopay_core::{
    ApiRequest, ApiResult, CreatePaymentRequest, PaymentResponse, RefundPaymentRequest,
    RefundResponse, ResendCallbacksResponse, SharedTransport, UpdatePaymentRequest,
};
use tracing::instrument;

const PAYMENTS: [&str; 2] = ["api", "payments"];

/// Payments resource client
///
/// Each method is a single call through the shared transport.
#[derive(Clone)]
pub struct PaymentsClient {
    transport: SharedTransport,
}

impl PaymentsClient {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    /// `POST /api/payments/create`
    #[instrument(skip(self, input), fields(client_order_id = %input.client_order_id))]
    pub async fn create(&self, input: &CreatePaymentRequest) -> ApiResult<PaymentResponse> {
        let request = ApiRequest::post(path(&["create"])).json(input)?;
        self.transport.send(request).await?.decode()
    }

    /// `GET /api/payments/{id}`
    pub async fn get(&self, payment_id: &str) -> ApiResult<PaymentResponse> {
        let request = ApiRequest::get(path(&[payment_id]));
        self.transport.send(request).await?.decode()
    }

    /// `GET /api/payments/by-order/{clientOrderId}`
    pub async fn get_by_order(&self, client_order_id: &str) -> ApiResult<PaymentResponse> {
        let request = ApiRequest::get(path(&["by-order", client_order_id]));
        self.transport.send(request).await?.decode()
    }

    /// `PUT /api/payments/{id}`
    pub async fn update(
        &self,
        payment_id: &str,
        input: &UpdatePaymentRequest,
    ) -> ApiResult<PaymentResponse> {
        let request = ApiRequest::put(path(&[payment_id])).json(input)?;
        self.transport.send(request).await?.decode()
    }

    /// `POST /api/payments/{id}/capture`
    pub async fn capture(&self, payment_id: &str) -> ApiResult<PaymentResponse> {
        let request = ApiRequest::post(path(&[payment_id, "capture"]));
        self.transport.send(request).await?.decode()
    }

    /// `POST /api/payments/{id}/refund`
    #[instrument(skip(self, input))]
    pub async fn refund(
        &self,
        payment_id: &str,
        input: &RefundPaymentRequest,
    ) -> ApiResult<RefundResponse> {
        let request = ApiRequest::post(path(&[payment_id, "refund"])).json(input)?;
        self.transport.send(request).await?.decode()
    }

    /// `POST /api/payments/resend-failed-callbacks`
    pub async fn resend_failed_callbacks(&self) -> ApiResult<ResendCallbacksResponse> {
        let request = ApiRequest::post(path(&["resend-failed-callbacks"]));
        self.transport.send(request).await?.decode()
    }
}

fn path<'a>(tail: &[&'a str]) -> Vec<&'a str> {
    PAYMENTS.iter().copied().chain(tail.iter().copied()).collect()
}
