//! # checkout-core
//!
//! Core contract and shared components for the hosted-checkout engine.
//!
//! This crate provides:
//! - `CheckoutClient` trait implemented by each payment provider adapter
//! - `ApprovalPoller` for the shared wait-for-user-approval loop
//! - `money` helpers: decimal-string amounts and minor-unit conversion
//! - `CheckoutSurface`/`UrlOpener` traits for the presentation boundary
//! - `MessageConfig` UI copy container
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutClient, PaymentPeriod};
//!
//! // One-time purchase: 2 × Widget at 4.99 each
//! let outcome = client.create_order("Widget", "4.99", 2).await?;
//!
//! // Recurring purchase: 9.99 every month
//! let outcome = client
//!     .create_subscription("Gold Plan", "9.99", PaymentPeriod::Month, 1)
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod messages;
pub mod money;
pub mod poller;
pub mod surface;
pub mod transport;

// Re-exports for convenience
pub use client::{CheckoutClient, CheckoutOutcome, PaymentPeriod};
pub use error::{CheckoutError, CheckoutResult};
pub use messages::{MessageConfig, StateWindowCopy, WindowCopy};
pub use poller::{ApprovalPoller, PollOutcome, PollTick, Verdict};
pub use surface::{CheckoutSurface, HeadlessSurface, LogOpener, UrlOpener};
pub use transport::ApiResponse;

/// Re-exported so adapters and embedders share one token type.
pub use tokio_util::sync::CancellationToken;
