//! # Request Handlers
//!
//! Axum request handlers for the checkout API.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use checkout_core::{cart_total, normalize_cart, CheckoutError, SessionRequest};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout session request
#[derive(Debug)]
pub struct CreateCheckoutRequest {
    /// Raw cart entries; validated by `normalize_cart`
    pub products: Option<Value>,
}

impl CreateCheckoutRequest {
    /// Read `products` from a JSON object body. Any other top-level value is malformed.
    pub fn from_body(body: Value) -> Result<Self, CheckoutError> {
        match body {
            Value::Object(mut map) => Ok(Self {
                products: map.remove("products"),
            }),
            other => Err(CheckoutError::MalformedRequest(format!(
                "Invalid request body: expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Create checkout session response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Session ID
    pub id: String,
    /// Checkout URL (redirect user here)
    pub url: String,
    /// Session expiration time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16, kind: &'static str) -> Self {
        Self {
            error: error.into(),
            code,
            kind,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn checkout_error_to_response(err: CheckoutError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code, err.kind());
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cart-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Validate the posted cart and open a hosted checkout session
#[instrument(skip(state, payload))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreateCheckoutResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!("Rejected checkout body: {}", rejection.body_text());
        checkout_error_to_response(CheckoutError::MalformedRequest(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    })?;
    let request = CreateCheckoutRequest::from_body(body).map_err(|e| {
        warn!("Rejected checkout body: {}", e);
        checkout_error_to_response(e)
    })?;

    let currency = state.config.currency;
    let line_items = normalize_cart(request.products.as_ref(), currency).map_err(|e| {
        warn!(kind = e.kind(), "Rejected cart: {}", e);
        checkout_error_to_response(e)
    })?;

    let total = cart_total(&line_items);
    let session_request = SessionRequest::payment(
        line_items,
        &state.config.redirect_urls,
        &state.config.session_options,
    );

    info!(
        "Creating checkout: {} line items, {} units, total={} {} (minor units)",
        session_request.line_items.len(),
        session_request.item_count(),
        total,
        currency
    );

    let session = state
        .strategy
        .create_session(&session_request)
        .await
        .map_err(|e| {
            error!(
                provider = state.strategy.provider_name(),
                kind = e.kind(),
                "Failed to create checkout session: {}",
                e
            );
            checkout_error_to_response(e)
        })?;

    info!("Created checkout session: {}", session.session_id);

    Ok(Json(CreateCheckoutResponse {
        id: session.session_id,
        url: session.checkout_url,
        expires_at: session.expires_at.map(|t| t.to_rfc3339()),
    }))
}
