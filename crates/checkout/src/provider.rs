//! # Provider Dispatch
//!
//! The closed set of payment providers as a sum type. Detail responses come
//! back tagged with their provider, so normalization matches on variants
//! instead of inspecting concrete client types.

use async_trait::async_trait;

use checkout_core::{
    CheckoutClient, CheckoutOutcome, CheckoutResult, MessageConfig, PaymentPeriod,
};
use checkout_paypal::{api as paypal, PayPalClient};
use checkout_stripe::{api as stripe, StripeClient};

/// The active payment provider.
pub enum Provider {
    PayPal(PayPalClient),
    Stripe(StripeClient),
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::PayPal(_) => "paypal",
            Provider::Stripe(_) => "stripe",
        }
    }
}

/// Raw order/session details, tagged by provider.
#[derive(Debug, Clone)]
pub enum OrderDetails {
    PayPal(paypal::Order),
    Stripe(stripe::Session),
}

/// Raw plan/subscription details, tagged by provider.
#[derive(Debug, Clone)]
pub enum SubscriptionDetails {
    PayPal(paypal::Plan),
    Stripe(stripe::Subscription),
}

impl SubscriptionDetails {
    /// The id management operations need: PayPal manages the plan, Stripe
    /// the subscription. Neither is the id the initial subscribe returned.
    pub fn provider_id(&self) -> &str {
        match self {
            SubscriptionDetails::PayPal(plan) => &plan.id,
            SubscriptionDetails::Stripe(subscription) => &subscription.id,
        }
    }
}

#[async_trait]
impl CheckoutClient for Provider {
    type OrderDetails = OrderDetails;
    type SubscriptionDetails = SubscriptionDetails;

    fn message_config(&self) -> &MessageConfig {
        match self {
            Provider::PayPal(client) => client.message_config(),
            Provider::Stripe(client) => client.message_config(),
        }
    }

    fn set_message_config(&mut self, config: MessageConfig) {
        match self {
            Provider::PayPal(client) => client.set_message_config(config),
            Provider::Stripe(client) => client.set_message_config(config),
        }
    }

    async fn create_order(
        &self,
        item_name: &str,
        price: &str,
        quantity: u32,
    ) -> CheckoutResult<CheckoutOutcome> {
        match self {
            Provider::PayPal(client) => client.create_order(item_name, price, quantity).await,
            Provider::Stripe(client) => client.create_order(item_name, price, quantity).await,
        }
    }

    async fn wait_for_approval(&self, transaction_id: &str) -> CheckoutResult<CheckoutOutcome> {
        match self {
            Provider::PayPal(client) => client.wait_for_approval(transaction_id).await,
            Provider::Stripe(client) => client.wait_for_approval(transaction_id).await,
        }
    }

    async fn confirm_purchase(&self, transaction_id: &str) -> CheckoutResult<String> {
        match self {
            Provider::PayPal(client) => client.confirm_purchase(transaction_id).await,
            Provider::Stripe(client) => client.confirm_purchase(transaction_id).await,
        }
    }

    async fn get_order_details(&self, transaction_id: &str) -> CheckoutResult<OrderDetails> {
        match self {
            Provider::PayPal(client) => client
                .get_order_details(transaction_id)
                .await
                .map(OrderDetails::PayPal),
            Provider::Stripe(client) => client
                .get_order_details(transaction_id)
                .await
                .map(OrderDetails::Stripe),
        }
    }

    async fn create_subscription(
        &self,
        plan_name: &str,
        price: &str,
        period: PaymentPeriod,
        intervals: u32,
    ) -> CheckoutResult<CheckoutOutcome> {
        match self {
            Provider::PayPal(client) => {
                client
                    .create_subscription(plan_name, price, period, intervals)
                    .await
            }
            Provider::Stripe(client) => {
                client
                    .create_subscription(plan_name, price, period, intervals)
                    .await
            }
        }
    }

    async fn activate_subscription(&self, provider_id: &str) -> CheckoutResult<String> {
        match self {
            Provider::PayPal(client) => client.activate_subscription(provider_id).await,
            Provider::Stripe(client) => client.activate_subscription(provider_id).await,
        }
    }

    async fn deactivate_subscription(&self, provider_id: &str) -> CheckoutResult<String> {
        match self {
            Provider::PayPal(client) => client.deactivate_subscription(provider_id).await,
            Provider::Stripe(client) => client.deactivate_subscription(provider_id).await,
        }
    }

    async fn update_subscription_pricing(
        &self,
        provider_id: &str,
        price: &str,
    ) -> CheckoutResult<String> {
        match self {
            Provider::PayPal(client) => {
                client.update_subscription_pricing(provider_id, price).await
            }
            Provider::Stripe(client) => {
                client.update_subscription_pricing(provider_id, price).await
            }
        }
    }

    async fn get_subscription_details(
        &self,
        subscription_id: &str,
    ) -> CheckoutResult<SubscriptionDetails> {
        match self {
            Provider::PayPal(client) => client
                .get_subscription_details(subscription_id)
                .await
                .map(SubscriptionDetails::PayPal),
            Provider::Stripe(client) => client
                .get_subscription_details(subscription_id)
                .await
                .map(SubscriptionDetails::Stripe),
        }
    }
}
