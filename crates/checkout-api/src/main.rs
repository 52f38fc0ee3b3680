//! # Cart Checkout
//!
//! Accepts a cart from the storefront and hands back a hosted Stripe
//! Checkout URL.
//!
//! ## Usage
//!
//! ```bash
//! export STRIPE_SECRET_KEY=sk_test_...
//! export CLIENT_ORIGIN=http://localhost:5173
//!
//! cart-checkout
//! ```

use checkout_api::{routes, telemetry, AppConfig, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    telemetry::init(config.log_format);

    print_banner();

    let state = AppState::new(config)?;
    let config = state.config.clone();

    info!("Environment: {}", config.environment);
    info!("Currency: {}", config.currency);
    info!("Payment provider: {}", state.strategy.provider_name());

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("🚀 Cart checkout listening on http://{}", config.bind_address());

    if !config.is_production() {
        info!("💳 Checkout: POST http://{}/create-checkout-session", config.bind_address());
        info!("🌐 Allowed origin: {:?}", config.allowed_origin);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn print_banner() {
    println!(
        r#"
  🛒 Cart Checkout 🛒
  ━━━━━━━━━━━━━━━━━━━━━━━
  Hosted payment sessions
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
