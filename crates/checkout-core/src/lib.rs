//! # checkout-core
//!
//! Core types and traits for the cart-checkout service.
//!
//! This crate provides:
//! - `normalize_cart` turning a raw client cart into validated `LineItem`s
//! - `PaymentStrategy` trait for payment providers
//! - `SessionRequest` and `PaymentSession` for the hosted checkout flow
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{normalize_cart, Currency, RedirectUrls, SessionOptions, SessionRequest};
//!
//! let items = normalize_cart(body.get("products"), Currency::USD)?;
//! let request = SessionRequest::payment(items, &urls, &SessionOptions::default());
//! let session = strategy.create_session(&request).await?;
//!
//! // Redirect user to session.checkout_url
//! ```

pub mod cart;
pub mod currency;
pub mod error;
pub mod session;
pub mod strategy;

// Re-exports for convenience
pub use cart::{
    cart_total, normalize_cart, resolve_display_name, resolve_quantity, CartEntry, LineItem,
    NO_PRODUCTS_MESSAGE,
};
pub use currency::Currency;
pub use error::{CheckoutError, CheckoutResult, EntryField};
pub use session::{
    BillingAddressCollection, CheckoutMode, PaymentSession, RedirectUrls, SessionOptions,
    SessionRequest,
};
pub use strategy::{BoxedPaymentStrategy, PaymentStrategy};
