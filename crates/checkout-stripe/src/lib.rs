//! # checkout-stripe
//!
//! Stripe payment strategy for cart-checkout.
//!
//! `StripeCheckoutStrategy` opens a hosted Checkout Session with dynamic
//! line items and returns the redirect URL.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::StripeCheckoutStrategy;
//! use checkout_core::PaymentStrategy;
//!
//! // Create strategy from environment
//! let strategy = StripeCheckoutStrategy::from_env()?;
//!
//! // Create checkout session
//! let session = strategy.create_session(&request).await?;
//!
//! // Redirect user to session.checkout_url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutStrategy;
pub use config::StripeConfig;
