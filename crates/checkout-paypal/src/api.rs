//! # PayPal Wire Types
//!
//! Request and response shapes for the PayPal REST endpoints this adapter
//! drives. Response structs default every field so a partial provider
//! answer still decodes; callers branch on the fields they need.

use serde::{Deserialize, Serialize};

/// An amount as PayPal carries it: decimal string plus ISO currency code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Amount {
    pub currency_code: String,
    pub value: String,
}

impl Amount {
    pub fn new(currency_code: &str, value: &str) -> Self {
        Self {
            currency_code: currency_code.to_string(),
            value: value.to_string(),
        }
    }
}

/// Return/cancel URLs attached to orders and subscriptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationContext {
    pub return_url: String,
    pub cancel_url: String,
}

/// HATEOAS link from a create/get response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub rel: String,
    #[serde(default)]
    pub method: String,
}

/// One line item inside a purchase unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub unit_amount: Amount,
    /// PayPal carries quantity as a string.
    pub quantity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmountBreakdown {
    pub item_total: Amount,
}

/// Purchase-unit total with its item breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmountWithBreakdown {
    pub currency_code: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<AmountBreakdown>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseUnit {
    pub amount: AmountWithBreakdown,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Body for `POST v2/checkout/orders`.
#[derive(Debug, Serialize)]
pub struct OrderRequest {
    pub intent: &'static str,
    pub application_context: ApplicationContext,
    pub purchase_units: Vec<PurchaseUnit>,
}

impl OrderRequest {
    /// A capture-intent order holding one line item.
    pub fn single_item(
        name: &str,
        unit_price: &str,
        total: &str,
        quantity: u32,
        currency_code: &str,
        return_url: &str,
        cancel_url: &str,
    ) -> Self {
        let total_amount = Amount::new(currency_code, total);
        Self {
            intent: "CAPTURE",
            application_context: ApplicationContext {
                return_url: return_url.to_string(),
                cancel_url: cancel_url.to_string(),
            },
            purchase_units: vec![PurchaseUnit {
                amount: AmountWithBreakdown {
                    currency_code: currency_code.to_string(),
                    value: total.to_string(),
                    breakdown: Some(AmountBreakdown {
                        item_total: total_amount,
                    }),
                },
                items: vec![OrderItem {
                    name: name.to_string(),
                    unit_amount: Amount::new(currency_code, unit_price),
                    quantity: quantity.to_string(),
                }],
            }],
        }
    }
}

/// Order as returned by create/get/capture.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub purchase_units: Vec<PurchaseUnit>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Order {
    /// The `rel == "approve"` hyperlink the user must visit.
    pub fn approve_link(&self) -> Option<&str> {
        approve_link(&self.links)
    }
}

/// Minimal probe for polling: any resource with a status field.
#[derive(Debug, Deserialize)]
pub struct StatusProbe {
    #[serde(default)]
    pub status: String,
}

/// Body for `POST v1/catalogs/products`.
#[derive(Debug, Serialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: &'static str,
}

/// Catalog product response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frequency {
    pub interval_unit: String,
    pub interval_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingScheme {
    pub fixed_price: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingCycle {
    pub frequency: Frequency,
    pub tenure_type: String,
    pub pricing_scheme: PricingScheme,
    pub sequence: u32,
    pub total_cycles: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentPreferences {
    pub auto_bill_outstanding: bool,
    pub setup_fee: Amount,
    pub payment_failure_threshold: u32,
}

/// Body for `POST v1/billing/plans`.
#[derive(Debug, Serialize)]
pub struct PlanRequest {
    pub product_id: String,
    pub name: String,
    pub billing_cycles: Vec<BillingCycle>,
    pub payment_preferences: PaymentPreferences,
}

/// Billing plan response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub billing_cycles: Vec<BillingCycle>,
}

/// Body for `POST v1/billing/subscriptions`.
#[derive(Debug, Serialize)]
pub struct SubscriptionRequest {
    pub plan_id: String,
    pub application_context: ApplicationContext,
}

/// Billing subscription response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Subscription {
    pub fn approve_link(&self) -> Option<&str> {
        approve_link(&self.links)
    }
}

/// Body for `POST v1/billing/plans/{id}/update-pricing-schemes`.
#[derive(Debug, Serialize)]
pub struct PricingUpdateRequest {
    pub pricing_schemes: Vec<PricingSchemeUpdate>,
}

#[derive(Debug, Serialize)]
pub struct PricingSchemeUpdate {
    pub billing_cycle_sequence: u32,
    pub pricing_scheme: PricingScheme,
}

/// Token-exchange response for the client-credentials grant.
#[derive(Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
}

fn approve_link(links: &[Link]) -> Option<&str> {
    links
        .iter()
        .find(|link| link.rel == "approve")
        .map(|link| link.href.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_shape() {
        let request =
            OrderRequest::single_item("Widget", "4.99", "9.98", 2, "USD", "https://s", "https://c");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["intent"], "CAPTURE");
        assert_eq!(json["purchase_units"][0]["amount"]["value"], "9.98");
        assert_eq!(
            json["purchase_units"][0]["amount"]["breakdown"]["item_total"]["value"],
            "9.98"
        );
        assert_eq!(json["purchase_units"][0]["items"][0]["quantity"], "2");
        assert_eq!(
            json["purchase_units"][0]["items"][0]["unit_amount"]["value"],
            "4.99"
        );
    }

    #[test]
    fn test_approve_link_lookup() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "5O190127TN364715T",
                "status": "CREATED",
                "links": [
                    {"href": "https://api.sandbox.paypal.com/v2/checkout/orders/5O1", "rel": "self", "method": "GET"},
                    {"href": "https://www.sandbox.paypal.com/checkoutnow?token=5O1", "rel": "approve", "method": "GET"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            order.approve_link(),
            Some("https://www.sandbox.paypal.com/checkoutnow?token=5O1")
        );
    }

    #[test]
    fn test_partial_response_decodes() {
        let order: Order = serde_json::from_str(r#"{"status": "APPROVED"}"#).unwrap();
        assert_eq!(order.status, "APPROVED");
        assert!(order.id.is_empty());
        assert!(order.links.is_empty());
    }
}
