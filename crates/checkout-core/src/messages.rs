//! # Checkout Message Copy
//!
//! Container for the copy displayed throughout the checkout process.
//! Adapters hold one of these and hand the relevant window copy to the
//! [`CheckoutSurface`](crate::surface::CheckoutSurface) at each step; the
//! engine itself never renders anything.

use serde::{Deserialize, Serialize};

/// Copy for one window in the flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowCopy {
    pub header: String,
    pub body: String,
    pub button_title: String,
}

impl WindowCopy {
    pub fn new(
        header: impl Into<String>,
        body: impl Into<String>,
        button_title: impl Into<String>,
    ) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
            button_title: button_title.into(),
        }
    }
}

/// Copy for a window with distinct success and failure states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateWindowCopy {
    pub success: WindowCopy,
    pub failure: WindowCopy,
}

/// All copy used by a checkout flow. Embedders replace any of it before
/// starting a purchase; the engine only passes it through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    /// First window of a one-time purchase; its button opens the payment URL.
    pub order_window: WindowCopy,
    /// Shown, buttonless, while waiting for the user to authorize payment.
    pub wait_window: WindowCopy,
    /// Asks the user to confirm capture. Stripe auto-captures and never
    /// shows this window.
    pub confirm_window: WindowCopy,
    /// Shown after capture, success or failure state.
    pub complete_window: StateWindowCopy,
    /// First window of a subscription purchase.
    pub subscribe_window: WindowCopy,
    /// Shown once a new subscription is approved.
    pub subscribe_complete_window: WindowCopy,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            order_window: WindowCopy::new(
                "Complete Your Purchase",
                "You will be redirected to our payment provider to authorize this purchase.",
                "Continue",
            ),
            wait_window: WindowCopy::new(
                "Waiting for Payment",
                "Finish authorizing the payment in your browser.",
                "",
            ),
            confirm_window: WindowCopy::new(
                "Confirm Purchase",
                "Payment authorized. Complete the purchase?",
                "Pay Now",
            ),
            complete_window: StateWindowCopy {
                success: WindowCopy::new("Thank You", "Your purchase is complete.", "OK"),
                failure: WindowCopy::new(
                    "Payment Failed",
                    "The payment could not be completed.",
                    "OK",
                ),
            },
            subscribe_window: WindowCopy::new(
                "Start Your Subscription",
                "You will be redirected to our payment provider to authorize this subscription.",
                "Continue",
            ),
            subscribe_complete_window: WindowCopy::new(
                "Subscribed",
                "Your subscription is now active.",
                "OK",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_copy_round_trips() {
        let config = MessageConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: MessageConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.order_window.header, config.order_window.header);
        assert_eq!(
            back.complete_window.failure.header,
            config.complete_window.failure.header
        );
    }
}
