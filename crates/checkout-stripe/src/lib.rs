//! # checkout-stripe
//!
//! Stripe adapter for the hosted-checkout engine.
//!
//! Every purchase, one-time or recurring, runs the same chain:
//! product, then price, then checkout session; the user pays on Stripe's
//! hosted page. Capture is automatic there, so this client has no confirm
//! step; approval is detected by polling the session for a customer
//! reference.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use checkout_core::{CheckoutClient, HeadlessSurface, LogOpener, PaymentPeriod};
//! use checkout_stripe::StripeClient;
//!
//! let client = StripeClient::from_env(
//!     Arc::new(HeadlessSurface::new()),
//!     Arc::new(LogOpener),
//! )?;
//!
//! let outcome = client
//!     .create_subscription("Gold Plan", "9.99", PaymentPeriod::Month, 1)
//!     .await?;
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod redirect;

// Re-exports
pub use client::StripeClient;
pub use config::{RedirectMode, StripeConfig};
