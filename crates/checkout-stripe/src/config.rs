//! # Stripe Configuration
//!
//! Configuration management for Stripe integration.
//! Secrets are loaded from environment variables (or a `.env` file).

use checkout_core::CheckoutError;
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
pub const DEFAULT_API_VERSION: &str = "2024-06-20";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const KEY_PREFIXES: [&str; 4] = ["sk_test_", "sk_live_", "rk_test_", "rk_live_"];

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...; restricted rk_ keys also accepted)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version sent in the `Stripe-Version` header
    pub api_version: String,

    /// Upper bound for a single API call
    pub timeout: Duration,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `STRIPE_SECRET_KEY`.
    /// Optional: `STRIPE_API_BASE`, `STRIPE_API_VERSION`, `STRIPE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Result<Self, CheckoutError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = var("STRIPE_SECRET_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CheckoutError::Configuration("STRIPE_SECRET_KEY not set".to_string()))?;

        if !KEY_PREFIXES.iter().any(|p| secret_key.starts_with(p)) {
            return Err(CheckoutError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_, sk_live_, rk_test_ or rk_live_"
                    .to_string(),
            ));
        }

        let timeout_secs = match var("STRIPE_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    CheckoutError::Configuration(format!(
                        "STRIPE_TIMEOUT_SECS must be a positive integer, got {}",
                        raw
                    ))
                })?,
        };

        let mut config = Self::new(secret_key).with_timeout(Duration::from_secs(timeout_secs));
        if let Some(url) = var("STRIPE_API_BASE") {
            config = config.with_api_base_url(url);
        }
        if let Some(version) = var("STRIPE_API_VERSION") {
            config.api_version = version;
        }
        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_") || self.secret_key.starts_with("rk_test_")
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_") || self.secret_key.starts_with("rk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_modes() {
        let config = StripeConfig::new("sk_test_abc123");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());

        let config = StripeConfig::new("sk_live_abc123");
        assert!(!config.is_test_mode());
        assert!(config.is_live_mode());
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StripeConfig::new("sk_test_abc123");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("abc123"));
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = StripeConfig::from_vars(lookup(&[("STRIPE_SECRET_KEY", "sk_test_abc")])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_vars_overrides() {
        let config = StripeConfig::from_vars(lookup(&[
            ("STRIPE_SECRET_KEY", "rk_live_abc"),
            ("STRIPE_API_BASE", "http://localhost:12111/"),
            ("STRIPE_API_VERSION", "2025-01-27.acacia"),
            ("STRIPE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:12111");
        assert_eq!(config.api_version, "2025-01-27.acacia");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.is_live_mode());
    }

    #[test]
    fn test_from_vars_missing_key() {
        let result = StripeConfig::from_vars(lookup(&[]));
        assert!(matches!(result, Err(CheckoutError::Configuration(_))));

        let result = StripeConfig::from_vars(lookup(&[("STRIPE_SECRET_KEY", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_vars_rejects_bad_values() {
        assert!(StripeConfig::from_vars(lookup(&[("STRIPE_SECRET_KEY", "pk_test_abc")])).is_err());
        assert!(StripeConfig::from_vars(lookup(&[
            ("STRIPE_SECRET_KEY", "sk_test_abc"),
            ("STRIPE_TIMEOUT_SECS", "0"),
        ]))
        .is_err());
    }
}
