//! # Application State
//!
//! Shared state for the Axum application: validated configuration and the
//! payment strategy used to open sessions.

use axum::http::HeaderValue;
use checkout_core::{
    BillingAddressCollection, BoxedPaymentStrategy, CheckoutError, CheckoutResult, Currency,
    RedirectUrls, SessionOptions,
};
use checkout_stripe::StripeCheckoutStrategy;
use std::env;
use std::sync::Arc;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Origin allowed to call the API from a browser
    pub allowed_origin: HeaderValue,
    /// Currency applied to every line item
    pub currency: Currency,
    /// Where the hosted checkout sends the customer afterwards
    pub redirect_urls: RedirectUrls,
    /// Options applied to every session
    pub session_options: SessionOptions,
    /// Environment (development, staging, production)
    pub environment: String,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> CheckoutResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup, validating every value
    pub fn from_vars<F>(var: F) -> CheckoutResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match var("PORT") {
            None => 5000,
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                CheckoutError::Configuration(format!("PORT must be a valid port number, got {}", raw))
            })?,
        };

        let client_origin =
            var("CLIENT_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());
        let allowed_origin = HeaderValue::from_str(client_origin.trim_end_matches('/'))
            .map_err(|_| {
                CheckoutError::Configuration(format!("CLIENT_ORIGIN is not a valid origin: {}", client_origin))
            })?;

        let currency = match var("CHECKOUT_CURRENCY") {
            None => Currency::default(),
            Some(raw) => raw.parse()?,
        };

        let mut redirect_urls = RedirectUrls::from_origin(&client_origin);
        if let Some(url) = var("SUCCESS_URL") {
            redirect_urls = redirect_urls.with_success_url(url);
        }
        if let Some(url) = var("CANCEL_URL") {
            redirect_urls = redirect_urls.with_cancel_url(url);
        }

        let mut session_options = SessionOptions::default();
        if let Some(raw) = var("ALLOW_PROMOTION_CODES") {
            session_options.allow_promotion_codes = parse_bool("ALLOW_PROMOTION_CODES", &raw)?;
        }
        if let Some(raw) = var("BILLING_ADDRESS_COLLECTION") {
            session_options.billing_address_collection = raw.parse::<BillingAddressCollection>()?;
        }

        let log_format = match var("LOG_FORMAT").as_deref().map(str::trim) {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            allowed_origin,
            currency,
            redirect_urls,
            session_options,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_format,
        })
    }

    /// Address the server listens on, for display
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_bool(name: &str, raw: &str) -> CheckoutResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CheckoutError::Configuration(format!(
            "{} must be true or false, got {}",
            name, raw
        ))),
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment strategy used to open sessions
    pub strategy: BoxedPaymentStrategy,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state backed by Stripe, configured from the environment
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let stripe = StripeCheckoutStrategy::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        tracing::info!(
            "Stripe configured: mode={}",
            if stripe.config().is_live_mode() { "live" } else { "test" }
        );

        Ok(Self::with_strategy(config, Arc::new(stripe)))
    }

    /// Create state around an existing strategy
    pub fn with_strategy(config: AppConfig, strategy: BoxedPaymentStrategy) -> Self {
        Self {
            strategy,
            config: Arc::new(config),
        }
    }
}
