//! # checkout
//!
//! Provider-agnostic checkout orchestration over PayPal and Stripe.
//!
//! The [`Checkout`] facade wraps one [`Provider`] for its lifetime and
//! exposes purchases, subscriptions, and the canonical [`OrderData`] /
//! [`SubscriptionData`] records, the only shapes callers above this crate
//! see. Construct it once in the embedding application and pass it around;
//! there is no ambient instance.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use checkout::{Checkout, PaymentPeriod};
//! use checkout_core::{HeadlessSurface, LogOpener};
//! use checkout_paypal::PayPalClient;
//!
//! let client = PayPalClient::from_env(
//!     Arc::new(HeadlessSurface::new()),
//!     Arc::new(LogOpener),
//! )?;
//! let checkout = Checkout::paypal(client);
//!
//! // One-time purchase
//! let outcome = checkout.buy("Widget", "4.99", 2).await?;
//!
//! // Canonical order record, same shape for either provider
//! if let Some(order_id) = outcome.id() {
//!     let order = checkout.get_order_data(order_id).await?;
//!     println!("{} × {} = {} {}", order.quantity, order.product, order.total, order.currency);
//! }
//! ```

pub mod data;
pub mod provider;

use tracing::instrument;

use checkout_core::{CheckoutClient, CheckoutOutcome, CheckoutResult, MessageConfig};
use checkout_paypal::PayPalClient;
use checkout_stripe::StripeClient;

// Re-exports
pub use checkout_core::{CheckoutError, PaymentPeriod};
pub use data::{OrderData, SubscriptionData};
pub use provider::{OrderDetails, Provider, SubscriptionDetails};

/// Provider-agnostic checkout front end.
///
/// Owns exactly one provider client; to switch providers, construct a new
/// `Checkout`.
pub struct Checkout {
    provider: Provider,
}

impl Checkout {
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    /// A checkout backed by PayPal.
    pub fn paypal(client: PayPalClient) -> Self {
        Self::new(Provider::PayPal(client))
    }

    /// A checkout backed by Stripe.
    pub fn stripe(client: StripeClient) -> Self {
        Self::new(Provider::Stripe(client))
    }

    /// The underlying provider, for operations not wrapped here.
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// UI copy used by the active provider's flows.
    pub fn message_config(&self) -> &MessageConfig {
        self.provider.message_config()
    }

    pub fn set_message_config(&mut self, config: MessageConfig) {
        self.provider.set_message_config(config);
    }

    /// Charge a one-time fee: `quantity × item_name` at `price` each.
    #[instrument(skip(self, price))]
    pub async fn buy(
        &self,
        item_name: &str,
        price: &str,
        quantity: u32,
    ) -> CheckoutResult<CheckoutOutcome> {
        self.provider.create_order(item_name, price, quantity).await
    }

    /// Charge a recurring fee: `price` every `intervals` × `period`.
    /// Monthly is (`PaymentPeriod::Month`, 1); every 2 weeks is
    /// (`PaymentPeriod::Week`, 2).
    #[instrument(skip(self, price))]
    pub async fn subscribe(
        &self,
        plan_name: &str,
        price: &str,
        period: PaymentPeriod,
        intervals: u32,
    ) -> CheckoutResult<CheckoutOutcome> {
        self.provider
            .create_subscription(plan_name, price, period, intervals)
            .await
    }

    /// Canonical record for a completed one-time purchase.
    pub async fn get_order_data(&self, order_id: &str) -> CheckoutResult<OrderData> {
        let details = self.provider.get_order_details(order_id).await?;
        OrderData::from_details(&details)
    }

    /// Canonical record for a subscription, by the id the initial
    /// subscribe returned.
    pub async fn get_subscription_data(
        &self,
        subscription_id: &str,
    ) -> CheckoutResult<SubscriptionData> {
        let details = self.provider.get_subscription_details(subscription_id).await?;
        SubscriptionData::from_details(&details)
    }

    /// Resume billing on a paused subscription.
    ///
    /// Takes the id the initial subscribe returned; the provider-internal
    /// id the operation actually needs is resolved with a detail fetch
    /// first.
    pub async fn activate_subscription(&self, subscription_id: &str) -> CheckoutResult<String> {
        let provider_id = self.resolve_provider_id(subscription_id).await?;
        self.provider.activate_subscription(&provider_id).await
    }

    /// Pause billing on a subscription. Same id resolution as activation.
    pub async fn deactivate_subscription(&self, subscription_id: &str) -> CheckoutResult<String> {
        let provider_id = self.resolve_provider_id(subscription_id).await?;
        self.provider.deactivate_subscription(&provider_id).await
    }

    /// Change a subscription's recurring price. Same id resolution as
    /// activation.
    pub async fn update_subscription_pricing(
        &self,
        subscription_id: &str,
        price: &str,
    ) -> CheckoutResult<String> {
        let provider_id = self.resolve_provider_id(subscription_id).await?;
        self.provider
            .update_subscription_pricing(&provider_id, price)
            .await
    }

    /// The subscribe-result id is not the id management operations take;
    /// fetch details and read the provider-internal one.
    async fn resolve_provider_id(&self, subscription_id: &str) -> CheckoutResult<String> {
        let details = self.provider.get_subscription_details(subscription_id).await?;
        Ok(details.provider_id().to_string())
    }
}
