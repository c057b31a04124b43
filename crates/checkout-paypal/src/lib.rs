//! # checkout-paypal
//!
//! PayPal adapter for the hosted-checkout engine.
//!
//! One-time purchases run create-order → browser approval → capture; the
//! capture step is explicit and driven through the confirm window.
//! Subscriptions run the three-resource chain product → plan → subscription
//! and are live as soon as the user approves.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use checkout_core::{CheckoutClient, HeadlessSurface, LogOpener, PaymentPeriod};
//! use checkout_paypal::PayPalClient;
//!
//! let client = PayPalClient::from_env(
//!     Arc::new(HeadlessSurface::new()),
//!     Arc::new(LogOpener),
//! )?;
//!
//! let outcome = client.create_order("Widget", "4.99", 2).await?;
//! ```

pub mod api;
pub mod client;
pub mod config;

// Re-exports
pub use client::{is_subscription_id, PayPalClient};
pub use config::{PayPalConfig, PayPalEnvironment};
