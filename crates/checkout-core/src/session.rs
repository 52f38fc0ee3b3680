//! # Payment Session Types
//!
//! What is sent to a payment provider to open a hosted checkout, and what
//! comes back.

use crate::cart::LineItem;
use crate::error::CheckoutError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Checkout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment
    #[default]
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
        }
    }
}

/// Whether the hosted page asks the customer for a billing address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingAddressCollection {
    /// Only when the provider needs it
    #[default]
    Auto,
    /// Always
    Required,
}

impl BillingAddressCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingAddressCollection::Auto => "auto",
            BillingAddressCollection::Required => "required",
        }
    }
}

impl FromStr for BillingAddressCollection {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(BillingAddressCollection::Auto),
            "required" => Ok(BillingAddressCollection::Required),
            other => Err(CheckoutError::Configuration(format!(
                "billing address collection must be auto or required, got {}",
                other
            ))),
        }
    }
}

/// Where the hosted checkout sends the customer afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl RedirectUrls {
    /// Derive `/success` and `/cancel` pages from the client origin
    pub fn from_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            success_url: format!("{}/success", origin),
            cancel_url: format!("{}/cancel", origin),
        }
    }

    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = url.into();
        self
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = url.into();
        self
    }
}

/// Options applied to every session this service opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub allow_promotion_codes: bool,
    pub billing_address_collection: BillingAddressCollection,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            allow_promotion_codes: true,
            billing_address_collection: BillingAddressCollection::Auto,
        }
    }
}

/// Everything a provider needs to open a hosted checkout
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub mode: CheckoutMode,
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
    pub allow_promotion_codes: bool,
    pub billing_address_collection: BillingAddressCollection,
}

impl SessionRequest {
    /// Build a one-time payment request
    pub fn payment(line_items: Vec<LineItem>, urls: &RedirectUrls, options: &SessionOptions) -> Self {
        Self {
            mode: CheckoutMode::Payment,
            line_items,
            success_url: urls.success_url.clone(),
            cancel_url: urls.cancel_url.clone(),
            allow_promotion_codes: options.allow_promotion_codes,
            billing_address_collection: options.billing_address_collection,
        }
    }

    /// Total units across all line items
    pub fn item_count(&self) -> u64 {
        self.line_items
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(u64::from(i.quantity)))
    }
}

/// A hosted checkout session opened by a payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Provider's session ID
    pub session_id: String,

    /// URL to redirect the customer to
    pub checkout_url: String,

    /// Provider name (e.g., "stripe")
    pub provider: String,

    /// When the session expires, if the provider says
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl PaymentSession {
    pub fn new(
        session_id: impl Into<String>,
        checkout_url: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            checkout_url: checkout_url.into(),
            provider: provider.into(),
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}
