//! # PayPal Configuration
//!
//! Configuration management for the PayPal integration.
//! All secrets are loaded from environment variables.

use checkout_core::CheckoutError;
use std::env;

/// Sandbox or live API environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayPalEnvironment {
    Sandbox,
    Live,
}

impl PayPalEnvironment {
    pub fn api_base_url(&self) -> &'static str {
        match self {
            PayPalEnvironment::Sandbox => "https://api.sandbox.paypal.com",
            PayPalEnvironment::Live => "https://api.paypal.com",
        }
    }
}

/// PayPal API configuration
#[derive(Debug, Clone)]
pub struct PayPalConfig {
    /// REST app client id
    pub client_id: String,

    /// REST app client secret
    pub client_secret: String,

    /// Sandbox or live
    pub environment: PayPalEnvironment,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// URL the provider redirects to after the user approves
    pub success_url: String,

    /// URL the provider redirects to if the user cancels
    pub cancel_url: String,

    /// Three-letter ISO-4217 currency code used for all charges
    pub currency_code: String,
}

impl PayPalConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYPAL_CLIENT_ID`
    /// - `PAYPAL_CLIENT_SECRET`
    ///
    /// Optional:
    /// - `PAYPAL_ENVIRONMENT` ("sandbox" or "live", default sandbox)
    /// - `PAYPAL_SUCCESS_URL` / `PAYPAL_CANCEL_URL`
    /// - `CHECKOUT_CURRENCY` (default "USD")
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let client_id = env::var("PAYPAL_CLIENT_ID")
            .map_err(|_| CheckoutError::Configuration("PAYPAL_CLIENT_ID not set".to_string()))?;

        let client_secret = env::var("PAYPAL_CLIENT_SECRET").map_err(|_| {
            CheckoutError::Configuration("PAYPAL_CLIENT_SECRET not set".to_string())
        })?;

        let environment = match env::var("PAYPAL_ENVIRONMENT").as_deref() {
            Ok("live") => PayPalEnvironment::Live,
            Ok("sandbox") | Err(_) => PayPalEnvironment::Sandbox,
            Ok(other) => {
                return Err(CheckoutError::Configuration(format!(
                    "PAYPAL_ENVIRONMENT must be sandbox or live, got {other}"
                )))
            }
        };

        let mut config = Self::new(client_id, client_secret, environment);

        if let Ok(url) = env::var("PAYPAL_SUCCESS_URL") {
            config.success_url = url;
        }
        if let Ok(url) = env::var("PAYPAL_CANCEL_URL") {
            config.cancel_url = url;
        }
        if let Ok(currency) = env::var("CHECKOUT_CURRENCY") {
            config.currency_code = currency;
        }

        config.validate()?;
        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        environment: PayPalEnvironment,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            environment,
            api_base_url: environment.api_base_url().to_string(),
            success_url: "https://example.com/payment-approved".to_string(),
            cancel_url: "https://example.com/payment-canceled".to_string(),
            currency_code: "USD".to_string(),
        }
    }

    fn validate(&self) -> Result<(), CheckoutError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(CheckoutError::Configuration(
                "PayPal client id and secret must be non-empty".to_string(),
            ));
        }
        if self.currency_code.len() != 3 {
            return Err(CheckoutError::Configuration(format!(
                "currency code must be a 3-letter ISO-4217 code, got {}",
                self.currency_code
            )));
        }
        Ok(())
    }

    /// Check if using the sandbox environment
    pub fn is_sandbox(&self) -> bool {
        self.environment == PayPalEnvironment::Sandbox
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

    /// Builder: set the currency code
    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    /// Full URL for an API endpoint path like `v2/checkout/orders`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_base_urls() {
        let sandbox = PayPalConfig::new("id", "secret", PayPalEnvironment::Sandbox);
        assert!(sandbox.is_sandbox());
        assert_eq!(sandbox.api_base_url, "https://api.sandbox.paypal.com");

        let live = PayPalConfig::new("id", "secret", PayPalEnvironment::Live);
        assert!(!live.is_sandbox());
        assert_eq!(live.api_base_url, "https://api.paypal.com");
    }

    #[test]
    fn test_endpoint_join() {
        let config = PayPalConfig::new("id", "secret", PayPalEnvironment::Sandbox)
            .with_api_base_url("http://127.0.0.1:9000/");
        assert_eq!(
            config.endpoint("v2/checkout/orders"),
            "http://127.0.0.1:9000/v2/checkout/orders"
        );
    }

    #[test]
    fn test_validation() {
        let config = PayPalConfig::new("", "secret", PayPalEnvironment::Sandbox);
        assert!(config.validate().is_err());

        let config =
            PayPalConfig::new("id", "secret", PayPalEnvironment::Sandbox).with_currency("DOLLARS");
        assert!(config.validate().is_err());
    }
}
