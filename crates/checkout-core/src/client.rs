//! # Checkout Client Contract
//!
//! The provider-facing contract implemented by each payment adapter.
//!
//! ## Design
//!
//! Each provider drives a different multi-step workflow behind the same
//! nine operations. Detail-returning operations use associated types so an
//! adapter exposes its own typed wire model; the facade crate wraps the two
//! adapters in a sum type and normalizes from there.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  CheckoutClient (trait)                  │
//! │  ├── create_order() / wait_for_approval() / confirm()    │
//! │  ├── create_subscription() / activate / deactivate       │
//! │  └── get_order_details() / get_subscription_details()    │
//! └──────────────────────────────────────────────────────────┘
//!                  ▲                        ▲
//!         ┌────────┴───────┐       ┌────────┴───────┐
//!         │  PayPalClient  │       │  StripeClient  │
//!         └────────────────┘       └────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CheckoutResult;
use crate::messages::MessageConfig;

/// Billing period for recurring purchases. Paired with an `intervals`
/// count: period `Month` with 3 intervals bills every 3 months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl PaymentPeriod {
    /// Lowercase wire form ("month").
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentPeriod::Day => "day",
            PaymentPeriod::Week => "week",
            PaymentPeriod::Month => "month",
            PaymentPeriod::Year => "year",
        }
    }
}

impl std::fmt::Display for PaymentPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentPeriod {
    type Err = String;

    /// Case-insensitive: providers report "month" or "MONTH".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(PaymentPeriod::Day),
            "week" => Ok(PaymentPeriod::Week),
            "month" => Ok(PaymentPeriod::Month),
            "year" => Ok(PaymentPeriod::Year),
            other => Err(format!("unknown payment period: {other}")),
        }
    }
}

/// How an approval-driven flow ended.
///
/// `Abandoned` is the "no answer" outcome: the user dismissed the waiting
/// surface before approving. It is not a failure and carries no payload;
/// callers must not treat the purchase as either completed or declined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The flow ran to completion; carries the provider's transaction id
    /// (order id, subscription id, or session id depending on flow).
    Completed(String),
    /// The waiting surface was dismissed before approval.
    Abandoned,
}

impl CheckoutOutcome {
    pub fn id(&self) -> Option<&str> {
        match self {
            CheckoutOutcome::Completed(id) => Some(id),
            CheckoutOutcome::Abandoned => None,
        }
    }

    pub fn is_abandoned(&self) -> bool {
        matches!(self, CheckoutOutcome::Abandoned)
    }
}

/// Contract implemented by every payment provider adapter.
///
/// All operations resolve `Err` with the provider's raw response body on
/// failure; they do not panic for runtime conditions. The one exception is
/// [`confirm_purchase`](CheckoutClient::confirm_purchase) on a provider
/// whose checkout auto-captures; calling it there is an integration bug
/// and panics.
#[async_trait]
pub trait CheckoutClient: Send + Sync {
    /// Provider-specific order/session detail model.
    type OrderDetails;
    /// Provider-specific plan/subscription detail model.
    type SubscriptionDetails;

    /// UI copy used by this client's flows. Pass-through only.
    fn message_config(&self) -> &MessageConfig;

    /// Replace the UI copy.
    fn set_message_config(&mut self, config: MessageConfig);

    /// Start a one-time purchase of `quantity × item_name` at `price` each
    /// ("4.99"-style decimal string). Drives the full flow: resource
    /// creation, approval wait, and capture where the provider needs one.
    async fn create_order(
        &self,
        item_name: &str,
        price: &str,
        quantity: u32,
    ) -> CheckoutResult<CheckoutOutcome>;

    /// Poll the provider until the user approves the identified transaction
    /// or the waiting surface is dismissed, then finalize.
    async fn wait_for_approval(&self, transaction_id: &str) -> CheckoutResult<CheckoutOutcome>;

    /// Capture a previously approved payment.
    ///
    /// # Panics
    ///
    /// Panics on providers whose hosted checkout captures automatically;
    /// there is nothing to confirm and calling this indicates a caller bug.
    async fn confirm_purchase(&self, transaction_id: &str) -> CheckoutResult<String>;

    /// Fetch the provider's raw order/session details.
    async fn get_order_details(&self, transaction_id: &str)
        -> CheckoutResult<Self::OrderDetails>;

    /// Start a recurring purchase: bill `price` every `intervals` ×
    /// `period` (period `Month`, intervals 3 bills every 3 months).
    async fn create_subscription(
        &self,
        plan_name: &str,
        price: &str,
        period: PaymentPeriod,
        intervals: u32,
    ) -> CheckoutResult<CheckoutOutcome>;

    /// Resume billing on a paused subscription. Takes the provider's
    /// *internal* id, resolved via
    /// [`get_subscription_details`](CheckoutClient::get_subscription_details).
    async fn activate_subscription(&self, provider_id: &str) -> CheckoutResult<String>;

    /// Pause billing on a subscription. Same id caveat as activation.
    async fn deactivate_subscription(&self, provider_id: &str) -> CheckoutResult<String>;

    /// Change the recurring price. Same id caveat as activation.
    async fn update_subscription_pricing(
        &self,
        provider_id: &str,
        price: &str,
    ) -> CheckoutResult<String>;

    /// Fetch the provider's raw plan/subscription details for the id
    /// returned by the initial subscribe.
    async fn get_subscription_details(
        &self,
        subscription_id: &str,
    ) -> CheckoutResult<Self::SubscriptionDetails>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_period_parse_is_case_insensitive() {
        assert_eq!(PaymentPeriod::from_str("MONTH").unwrap(), PaymentPeriod::Month);
        assert_eq!(PaymentPeriod::from_str("week").unwrap(), PaymentPeriod::Week);
        assert!(PaymentPeriod::from_str("fortnight").is_err());
    }

    #[test]
    fn test_period_wire_forms() {
        assert_eq!(PaymentPeriod::Year.as_str(), "year");
        assert_eq!(PaymentPeriod::Day.to_string(), "day");
    }

    #[test]
    fn test_outcome_accessors() {
        let done = CheckoutOutcome::Completed("ord_1".into());
        assert_eq!(done.id(), Some("ord_1"));
        assert!(!done.is_abandoned());
        assert!(CheckoutOutcome::Abandoned.is_abandoned());
    }
}
