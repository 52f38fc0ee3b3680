//! # Payment Strategy Trait
//!
//! The one capability the service needs from a payment provider: open a
//! hosted payment session for a set of line items.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │         PaymentStrategy (trait)          │
//! │  ├── create_session()                    │
//! │  └── provider_name()                     │
//! └──────────────────────────────────────────┘
//!                      ▲
//!          ┌───────────┴───────────┐
//!  ┌───────┴────────┐     ┌────────┴───────┐
//!  │ StripeCheckout │     │  test doubles  │
//!  │    Strategy    │     │                │
//!  └────────────────┘     └────────────────┘
//! ```

use crate::error::CheckoutResult;
use crate::session::{PaymentSession, SessionRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Open a hosted checkout session.
    ///
    /// Provider-side failures are returned as-is; callers do not retry.
    async fn create_session(&self, request: &SessionRequest) -> CheckoutResult<PaymentSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;
