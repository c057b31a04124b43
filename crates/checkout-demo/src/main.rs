//! # Checkout Demo
//!
//! Drives a real purchase against the sandbox of the configured provider.
//!
//! ## Usage
//!
//! ```bash
//! # PayPal sandbox
//! export PAYPAL_CLIENT_ID=...
//! export PAYPAL_CLIENT_SECRET=...
//! CHECKOUT_PROVIDER=paypal checkout-demo
//!
//! # Stripe test mode
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//! CHECKOUT_PROVIDER=stripe checkout-demo
//! ```
//!
//! The approval URL is printed to the console; open it in a browser and
//! complete the sandbox payment while the demo polls.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use checkout::Checkout;
use checkout_core::{CancellationToken, CheckoutSurface, LogOpener, WindowCopy};
use checkout_paypal::PayPalClient;
use checkout_stripe::StripeClient;

/// Presents checkout windows as console prompts.
struct ConsoleSurface {
    dismissal: CancellationToken,
}

impl ConsoleSurface {
    fn new() -> Self {
        Self {
            dismissal: CancellationToken::new(),
        }
    }
}

#[async_trait]
impl CheckoutSurface for ConsoleSurface {
    async fn confirm(&self, copy: &WindowCopy) -> bool {
        println!("\n== {} ==", copy.header);
        println!("{}", copy.body);
        println!("[{}] press Enter to continue, or type q to cancel", copy.button_title);

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        if reader.read_line(&mut line).await.is_err() {
            return false;
        }
        line.trim() != "q"
    }

    fn show_waiting(&self, copy: &WindowCopy) {
        println!("\n== {} ==", copy.header);
        println!("{}", copy.body);
    }

    fn hide(&self) {}

    fn dismissed(&self) -> CancellationToken {
        self.dismissal.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    dotenvy::dotenv().ok();
    print_banner();

    let surface = Arc::new(ConsoleSurface::new());
    let opener = Arc::new(LogOpener);

    let provider = std::env::var("CHECKOUT_PROVIDER").unwrap_or_else(|_| "stripe".to_string());
    let checkout = match provider.as_str() {
        "paypal" => Checkout::paypal(PayPalClient::from_env(surface, opener)?),
        "stripe" => Checkout::stripe(StripeClient::from_env(surface, opener)?),
        other => anyhow::bail!("CHECKOUT_PROVIDER must be paypal or stripe, got {other}"),
    };

    info!(provider, "starting demo purchase: 2 × Widget at 4.99");

    let outcome = checkout.buy("Widget", "4.99", 2).await?;

    match outcome.id() {
        Some(order_id) => {
            let order = checkout.get_order_data(order_id).await?;
            info!(
                product = %order.product,
                quantity = order.quantity,
                total = %order.total,
                currency = %order.currency,
                "purchase complete"
            );
        }
        None => info!("checkout abandoned before approval"),
    }

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Hosted Checkout RS
  ━━━━━━━━━━━━━━━━━━
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
