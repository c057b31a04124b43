//! # Stripe Wire Types
//!
//! Response shapes for the Stripe endpoints this adapter drives. Requests
//! are form-urlencoded and built inline; only responses are modeled.
//! Every field defaults so a partial answer still decodes.

use serde::Deserialize;

/// Catalog product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Recurrence descriptor on a price.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Recurring {
    #[serde(default)]
    pub interval: String,
    #[serde(default)]
    pub interval_count: u32,
}

/// A price attached to a product. `unit_amount` is in minor units (cents).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Price {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub unit_amount: i64,
    #[serde(default)]
    pub recurring: Option<Recurring>,
}

/// Metadata echoed onto a checkout session at creation so order details can
/// be reconstructed without a second round trip.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionMetadata {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub quantity: String,
    /// Unit price in minor units, as a string.
    #[serde(default)]
    pub unit_price: String,
}

/// A checkout session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub currency: String,
    /// Total in minor units.
    #[serde(default)]
    pub amount_total: i64,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub metadata: SessionMetadata,
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub payment_intent: Option<String>,
    /// Hosted checkout URL.
    #[serde(default)]
    pub url: Option<String>,
}

impl Session {
    /// A customer reference appears once the user completes the hosted
    /// checkout; this is the approval predicate.
    pub fn has_customer(&self) -> bool {
        self.customer.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Subscription reference, when this session created one.
    pub fn subscription_ref(&self) -> Option<&str> {
        self.subscription.as_deref().filter(|s| !s.is_empty())
    }
}

/// Billing-pause state on a subscription.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PauseCollection {
    #[serde(default)]
    pub behavior: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub price: Price,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionItemList {
    #[serde(default)]
    pub data: Vec<SubscriptionItem>,
}

/// A recurring-billing subscription.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub items: SubscriptionItemList,
    #[serde(default)]
    pub pause_collection: Option<PauseCollection>,
}

impl Subscription {
    /// Billing runs unless a pause behavior is set.
    pub fn is_collecting(&self) -> bool {
        self.pause_collection
            .as_ref()
            .map_or(true, |pause| pause.behavior.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_predicate() {
        let pending: Session = serde_json::from_str(
            r#"{"id": "cs_test_1", "customer": null}"#,
        )
        .unwrap();
        assert!(!pending.has_customer());

        let approved: Session = serde_json::from_str(
            r#"{"id": "cs_test_1", "customer": "cus_9s6XKzkNRiz8i3"}"#,
        )
        .unwrap();
        assert!(approved.has_customer());
    }

    #[test]
    fn test_subscription_ref_filters_empty() {
        let one_time: Session =
            serde_json::from_str(r#"{"id": "cs_test_1", "subscription": ""}"#).unwrap();
        assert_eq!(one_time.subscription_ref(), None);

        let recurring: Session =
            serde_json::from_str(r#"{"id": "cs_test_1", "subscription": "sub_123"}"#).unwrap();
        assert_eq!(recurring.subscription_ref(), Some("sub_123"));
    }

    #[test]
    fn test_pause_state() {
        let active: Subscription =
            serde_json::from_str(r#"{"id": "sub_1", "pause_collection": null}"#).unwrap();
        assert!(active.is_collecting());

        let paused: Subscription = serde_json::from_str(
            r#"{"id": "sub_1", "pause_collection": {"behavior": "void"}}"#,
        )
        .unwrap();
        assert!(!paused.is_collecting());
    }
}
