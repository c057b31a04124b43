//! # Stripe Configuration
//!
//! Configuration management for the Stripe integration.
//! All secrets are loaded from environment variables.

use checkout_core::CheckoutError;
use std::env;

/// How the user reaches Stripe's hosted checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectMode {
    /// Open the session's hosted URL directly.
    #[default]
    HostedUrl,
    /// Write a local redirect document and open that instead. Works around
    /// platforms that cannot open an https URL straight into a browser.
    LocalPage,
}

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Publishable key (pk_test_... or pk_live_...)
    pub publishable_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,

    /// URL Stripe redirects to after the user completes the order
    pub success_url: String,

    /// URL Stripe redirects to if the user cancels
    pub cancel_url: String,

    /// Three-letter ISO-4217 currency code used for all charges
    pub currency_code: String,

    /// Hosted URL vs. local redirect page
    pub redirect_mode: RedirectMode,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_PUBLISHABLE_KEY`
    ///
    /// Optional:
    /// - `STRIPE_SUCCESS_URL` / `STRIPE_CANCEL_URL`
    /// - `CHECKOUT_CURRENCY` (default "USD")
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| CheckoutError::Configuration("STRIPE_SECRET_KEY not set".to_string()))?;

        let publishable_key = env::var("STRIPE_PUBLISHABLE_KEY").map_err(|_| {
            CheckoutError::Configuration("STRIPE_PUBLISHABLE_KEY not set".to_string())
        })?;

        // Validate key formats
        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(CheckoutError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if !publishable_key.starts_with("pk_test_") && !publishable_key.starts_with("pk_live_") {
            return Err(CheckoutError::Configuration(
                "STRIPE_PUBLISHABLE_KEY must start with pk_test_ or pk_live_".to_string(),
            ));
        }

        let mut config = Self::new(secret_key, publishable_key);

        if let Ok(url) = env::var("STRIPE_SUCCESS_URL") {
            config.success_url = url;
        }
        if let Ok(url) = env::var("STRIPE_CANCEL_URL") {
            config.cancel_url = url;
        }
        if let Ok(currency) = env::var("CHECKOUT_CURRENCY") {
            config.currency_code = currency;
        }

        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            publishable_key: publishable_key.into(),
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
            success_url: "https://example.com/payment-approved".to_string(),
            cancel_url: "https://example.com/payment-canceled".to_string(),
            currency_code: "USD".to_string(),
            redirect_mode: RedirectMode::HostedUrl,
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Lowercase currency for Stripe's wire format.
    pub fn wire_currency(&self) -> String {
        self.currency_code.to_lowercase()
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set the redirect URLs
    pub fn with_redirect_urls(
        mut self,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        self.success_url = success_url.into();
        self.cancel_url = cancel_url.into();
        self
    }

    /// Builder: open checkout through a local redirect page
    pub fn with_redirect_mode(mut self, mode: RedirectMode) -> Self {
        self.redirect_mode = mode;
        self
    }

    /// Builder: set the currency code
    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    /// Full URL for an API endpoint path like `v1/checkout/sessions`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789");
        assert!(config.is_test_mode());

        let config = StripeConfig::new("sk_live_abc123", "pk_live_xyz789");
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_wire_currency_is_lowercase() {
        let config = StripeConfig::new("sk_test_a", "pk_test_b").with_currency("EUR");
        assert_eq!(config.wire_currency(), "eur");
    }

    #[test]
    fn test_endpoint_join() {
        let config = StripeConfig::new("sk_test_a", "pk_test_b")
            .with_api_base_url("http://127.0.0.1:9000/");
        assert_eq!(
            config.endpoint("v1/checkout/sessions"),
            "http://127.0.0.1:9000/v1/checkout/sessions"
        );
    }
}
