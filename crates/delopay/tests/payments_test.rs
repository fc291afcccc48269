use delopay::{
    ClientOptions, CreatePaymentRequest, DelopayClient, PaymentStatus, RefundPaymentRequest,
    UpdatePaymentRequest,
};
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> DelopayClient {
    DelopayClient::new(ClientOptions::new("test_key").with_base_url(server.uri())).unwrap()
}

fn payment_response(payment_id: &str, overrides: Value) -> Value {
    let mut body = json!({
        "paymentId": payment_id,
        "clientOrderId": "order_123",
        "provider": "STRIPE",
        "status": "PENDING",
        "amount": 100.0,
        "currency": "EUR",
        "description": "Test payment",
        "customerEmail": "test@example.com",
        "checkoutUrl": "https://checkout.example.com",
        "providerPaymentId": "pi_123",
        "createdAt": "2026-02-12T10:00:00Z",
        "metadata": {"orderId": "internal_123"}
    });
    if let (Some(base), Value::Object(extra)) = (body.as_object_mut(), overrides) {
        base.extend(extra);
    }
    body
}

#[tokio::test]
async fn test_create_payment_minimal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create"))
        .and(body_json(json!({
            "clientOrderId": "order_123",
            "provider": "STRIPE",
            "amount": 100.0,
            "currency": "EUR",
            "successUrl": "https://shop.test/success",
            "cancelUrl": "https://shop.test/cancel"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(payment_response("pay_new_123", json!({}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = CreatePaymentRequest::new(
        "order_123",
        "STRIPE",
        100.0,
        "EUR",
        "https://shop.test/success",
        "https://shop.test/cancel",
    );
    let payment = client(&server).payments().create(&request).await.unwrap();

    assert_eq!(payment.payment_id.as_deref(), Some("pay_new_123"));
    assert_eq!(payment.status.as_deref(), Some("PENDING"));
    assert_eq!(payment.payment_status(), Some(PaymentStatus::Pending));
}

#[tokio::test]
async fn test_create_payment_with_all_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_response(
            "pay_new_123",
            json!({"checkoutUrl": "https://checkout.stripe.com/test"}),
        )))
        .mount(&server)
        .await;

    let mut metadata = Map::new();
    metadata.insert("orderId".to_string(), json!("internal_123"));
    let request = CreatePaymentRequest::new(
        "order_123",
        "STRIPE",
        100.0,
        "EUR",
        "https://shop.test/success",
        "https://shop.test/cancel",
    )
    .with_description("Test payment")
    .with_customer_email("customer@test.com")
    .with_callback_url("https://shop.test/webhook")
    .with_metadata(metadata)
    .with_auto_capture(true);

    let payment = client(&server).payments().create(&request).await.unwrap();
    assert_eq!(
        payment.checkout_url.as_deref(),
        Some("https://checkout.stripe.com/test")
    );

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["autoCapture"], true);
    assert_eq!(body["callbackUrl"], "https://shop.test/webhook");
    assert_eq!(body["metadata"], json!({"orderId": "internal_123"}));
}

#[tokio::test]
async fn test_get_payment_escapes_identifier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/payments/pay%20test%2Fid"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(payment_response("pay test/id", json!({}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let payment = client(&server).payments().get("pay test/id").await.unwrap();

    assert_eq!(payment.payment_id.as_deref(), Some("pay test/id"));
    assert_eq!(payment.metadata["orderId"], "internal_123");
    assert!(payment.created_at_utc().is_some());
}

#[tokio::test]
async fn test_get_by_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/payments/by-order/order%23123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_response(
            "pay_1",
            json!({"clientOrderId": "order#123"}),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let payment = client(&server)
        .payments()
        .get_by_order("order#123")
        .await
        .unwrap();

    assert_eq!(payment.client_order_id.as_deref(), Some("order#123"));
}

#[tokio::test]
async fn test_update_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/payments/pay_1"))
        .and(body_json(json!({"description": "Updated", "amountPaid": 40.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_response(
            "pay_1",
            json!({"description": "Updated", "amountPaid": 40.0}),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let update = UpdatePaymentRequest::new()
        .with_description("Updated")
        .with_amount_paid(40.0);
    let payment = client(&server)
        .payments()
        .update("pay_1", &update)
        .await
        .unwrap();

    assert_eq!(payment.description.as_deref(), Some("Updated"));
    assert_eq!(payment.amount_paid, Some(40.0));
}

#[tokio::test]
async fn test_capture_with_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/pay_1/capture"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let payment = client(&server).payments().capture("pay_1").await.unwrap();

    assert!(payment.payment_id.is_none());
    assert!(payment.metadata.is_empty());
}

#[tokio::test]
async fn test_refund_payment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/pay_refund/refund"))
        .and(body_json(json!({"amount": 100.0, "reason": "Customer request"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "refundId": "ref_123",
            "paymentId": "pay_refund",
            "providerRefundId": "re_123",
            "amount": 100.0,
            "originalAmount": 100.0,
            "remainingAmount": 0.0,
            "status": "COMPLETED",
            "reason": "Customer request"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let refund = client(&server)
        .payments()
        .refund(
            "pay_refund",
            &RefundPaymentRequest::new()
                .with_amount(100.0)
                .with_reason("Customer request"),
        )
        .await
        .unwrap();

    assert_eq!(refund.refund_id.as_deref(), Some("ref_123"));
    assert_eq!(refund.remaining_amount, Some(0.0));
    assert!(refund.is_full_refund());
}

#[tokio::test]
async fn test_resend_failed_callbacks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/resend-failed-callbacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resent": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .payments()
        .resend_failed_callbacks()
        .await
        .unwrap();

    assert_eq!(result.resent, 5);
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_resend_failed_callbacks_missing_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/resend-failed-callbacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let result = client(&server)
        .payments()
        .resend_failed_callbacks()
        .await
        .unwrap();

    assert_eq!(result.resent, 0);
}
