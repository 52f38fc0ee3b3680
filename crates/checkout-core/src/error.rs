//! # Checkout Error Types
//!
//! Typed error handling for the cart-checkout service.
//! All checkout operations return `Result<T, CheckoutError>`.

use std::fmt;
use thiserror::Error;

/// Which field of a cart entry failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Price,
    Quantity,
}

impl EntryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::Price => "price",
            EntryField::Quantity => "quantity",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request as a whole is unusable (no product list, bad JSON)
    #[error("{0}")]
    MalformedRequest(String),

    /// A single cart entry failed validation
    #[error("Invalid {field} for \"{item}\": {value}")]
    InvalidEntry {
        /// Display name of the offending entry
        item: String,
        field: EntryField,
        /// Raw value as supplied by the client
        value: String,
    },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Provider response could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Stable error kind, surfaced in responses and logs
    pub fn kind(&self) -> &'static str {
        match self {
            CheckoutError::Configuration(_) => "configuration",
            CheckoutError::MalformedRequest(_) => "malformed_request",
            CheckoutError::InvalidEntry { .. } => "invalid_entry",
            CheckoutError::ProviderError { .. }
            | CheckoutError::NetworkError(_)
            | CheckoutError::Serialization(_) => "provider_failure",
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::MalformedRequest(_) => 400,
            CheckoutError::InvalidEntry { .. } => 400,
            CheckoutError::ProviderError { .. } => 502,
            CheckoutError::NetworkError(_) => 503,
            CheckoutError::Serialization(_) => 502,
        }
    }

    /// True for errors caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CheckoutError::MalformedRequest(_) | CheckoutError::InvalidEntry { .. }
        )
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
