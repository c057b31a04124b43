//! # Canonical Records
//!
//! The only data shapes exposed above the orchestrator. Both providers'
//! raw detail responses reduce to these; the derivation lives here and
//! nowhere else, so repeated calls over unchanged raw input always produce
//! identical records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use checkout_core::{money, CheckoutError, CheckoutResult, PaymentPeriod};
use checkout_paypal::api as paypal;
use checkout_stripe::api as stripe;

use crate::provider::{OrderDetails, SubscriptionDetails};

/// A one-time purchase, provider-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderData {
    pub product: String,
    pub unit_price: Decimal,
    pub total: Decimal,
    pub quantity: u32,
    /// Currency code as the provider reports it.
    pub currency: String,
}

/// A recurring purchase, provider-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionData {
    pub plan: String,
    pub price: Decimal,
    pub period: PaymentPeriod,
    pub intervals: u32,
    pub active: bool,
    pub status: String,
}

impl OrderData {
    pub(crate) fn from_details(details: &OrderDetails) -> CheckoutResult<Self> {
        match details {
            OrderDetails::PayPal(order) => Self::from_paypal(order),
            OrderDetails::Stripe(session) => Self::from_stripe(session),
        }
    }

    fn from_paypal(order: &paypal::Order) -> CheckoutResult<Self> {
        let unit = order
            .purchase_units
            .first()
            .ok_or_else(|| malformed("order has no purchase units"))?;
        let item = unit
            .items
            .first()
            .ok_or_else(|| malformed("purchase unit has no items"))?;

        Ok(Self {
            product: item.name.clone(),
            unit_price: money::parse_amount(&item.unit_amount.value)?,
            total: money::parse_amount(&unit.amount.value)?,
            quantity: item
                .quantity
                .parse()
                .map_err(|_| malformed("item quantity is not numeric"))?,
            currency: unit.amount.currency_code.clone(),
        })
    }

    fn from_stripe(session: &stripe::Session) -> CheckoutResult<Self> {
        let unit_price_cents: i64 = session
            .metadata
            .unit_price
            .parse()
            .map_err(|_| malformed("session metadata lacks a unit price"))?;

        Ok(Self {
            product: session.metadata.product.clone(),
            unit_price: money::from_minor_units(unit_price_cents),
            total: money::from_minor_units(session.amount_total),
            quantity: session
                .metadata
                .quantity
                .parse()
                .map_err(|_| malformed("session metadata lacks a quantity"))?,
            currency: session.currency.clone(),
        })
    }
}

impl SubscriptionData {
    pub(crate) fn from_details(details: &SubscriptionDetails) -> CheckoutResult<Self> {
        match details {
            SubscriptionDetails::PayPal(plan) => Self::from_paypal(plan),
            SubscriptionDetails::Stripe(subscription) => Self::from_stripe(subscription),
        }
    }

    fn from_paypal(plan: &paypal::Plan) -> CheckoutResult<Self> {
        let cycle = plan
            .billing_cycles
            .first()
            .ok_or_else(|| malformed("plan has no billing cycles"))?;

        Ok(Self {
            plan: plan.name.clone(),
            price: money::parse_amount(&cycle.pricing_scheme.fixed_price.value)?,
            period: cycle
                .frequency
                .interval_unit
                .parse()
                .map_err(|e: String| malformed(&e))?,
            intervals: cycle.frequency.interval_count,
            active: plan.status.eq_ignore_ascii_case("active"),
            status: plan.status.clone(),
        })
    }

    fn from_stripe(subscription: &stripe::Subscription) -> CheckoutResult<Self> {
        let item = subscription
            .items
            .data
            .first()
            .ok_or_else(|| malformed("subscription has no items"))?;
        let recurring = item
            .price
            .recurring
            .as_ref()
            .ok_or_else(|| malformed("subscription price is not recurring"))?;

        let active = subscription.is_collecting();

        Ok(Self {
            plan: item.price.nickname.clone(),
            price: money::from_minor_units(item.price.unit_amount),
            period: recurring
                .interval
                .parse()
                .map_err(|e: String| malformed(&e))?,
            intervals: recurring.interval_count,
            active,
            status: if active { "active" } else { "inactive" }.to_string(),
        })
    }
}

fn malformed(detail: &str) -> CheckoutError {
    CheckoutError::Serialization(format!("malformed provider details: {detail}"))
}
