use checkout_core::{
    normalize_cart, CheckoutError, Currency, PaymentStrategy, RedirectUrls, SessionOptions,
    SessionRequest,
};
use checkout_stripe::{StripeCheckoutStrategy, StripeConfig};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mug_request() -> SessionRequest {
    let items = normalize_cart(
        Some(&json!([{"name": "Mug", "price": 9.99, "quantity": 2}])),
        Currency::USD,
    )
    .unwrap();
    SessionRequest::payment(
        items,
        &RedirectUrls::from_origin("http://localhost:5173"),
        &SessionOptions::default(),
    )
}

fn strategy_for(server: &MockServer) -> StripeCheckoutStrategy {
    let config = StripeConfig::new("sk_test_123").with_api_base_url(server.uri());
    StripeCheckoutStrategy::new(config).unwrap()
}

#[tokio::test]
async fn creates_hosted_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(header("authorization", "Bearer sk_test_123"))
        .and(header("stripe-version", "2024-06-20"))
        .and(body_string_contains("mode=payment"))
        .and(body_string_contains("allow_promotion_codes=true"))
        .and(body_string_contains("billing_address_collection=auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_abc",
            "object": "checkout.session",
            "url": "https://checkout.stripe.com/c/pay/cs_test_abc",
            "expires_at": 1_700_000_000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = strategy_for(&server)
        .create_session(&mug_request())
        .await
        .unwrap();

    assert_eq!(session.session_id, "cs_test_abc");
    assert_eq!(session.checkout_url, "https://checkout.stripe.com/c/pay/cs_test_abc");
    assert_eq!(session.provider, "stripe");
    assert_eq!(session.expires_at.map(|t| t.timestamp()), Some(1_700_000_000));
}

#[tokio::test]
async fn surfaces_stripe_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "type": "invalid_request_error",
                "message": "Invalid API Key provided: sk_test_***123"
            }
        })))
        .mount(&server)
        .await;

    let err = strategy_for(&server)
        .create_session(&mug_request())
        .await
        .unwrap_err();

    match err {
        CheckoutError::ProviderError { provider, message } => {
            assert_eq!(provider, "stripe");
            assert_eq!(message, "Invalid API Key provided: sk_test_***123");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn non_json_error_body_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = strategy_for(&server)
        .create_session(&mug_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "provider_failure");
    let message = err.to_string();
    assert!(message.contains("500"), "{}", message);
    assert!(message.contains("upstream exploded"), "{}", message);
}

#[tokio::test]
async fn session_without_url_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_nourl",
            "url": null
        })))
        .mount(&server)
        .await;

    let err = strategy_for(&server)
        .create_session(&mug_request())
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Serialization(_)));
}

#[tokio::test]
async fn unreachable_provider_is_network_error() {
    let config = StripeConfig::new("sk_test_123").with_api_base_url("http://127.0.0.1:1");
    let strategy = StripeCheckoutStrategy::new(config).unwrap();

    let err = strategy.create_session(&mug_request()).await.unwrap_err();

    assert!(matches!(err, CheckoutError::NetworkError(_)));
    assert_eq!(err.status_code(), 503);
}

#[tokio::test]
async fn empty_request_never_reaches_stripe() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = SessionRequest::payment(
        Vec::new(),
        &RedirectUrls::from_origin("http://localhost:5173"),
        &SessionOptions::default(),
    );
    let err = strategy_for(&server)
        .create_session(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::MalformedRequest(_)));
}
