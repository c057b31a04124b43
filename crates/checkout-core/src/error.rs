//! # Checkout Error Types
//!
//! Typed error handling for the hosted-checkout engine.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations.
///
/// Provider error bodies are carried verbatim so the caller always sees the
/// raw response the provider sent, even when it is not parseable JSON.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A price string that could not be parsed as a decimal amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Network/IO error communicating with the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Provider answered with a non-2xx status
    #[error("Provider error [{provider}]: HTTP {status}: {body}")]
    Provider {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Provider answered 2xx but the resource is not in the expected state
    #[error("Unexpected {provider} state: expected {expected}: {body}")]
    UnexpectedState {
        provider: &'static str,
        expected: &'static str,
        body: String,
    },

    /// A 2xx response body that failed to decode
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Local I/O failure (e.g. the checkout redirect document)
    #[error("I/O error: {0}")]
    Io(String),
}

impl CheckoutError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::Network(_) | CheckoutError::Provider { .. }
        )
    }

    /// The raw provider response body, when this error carries one.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            CheckoutError::Provider { body, .. } => Some(body),
            CheckoutError::UnexpectedState { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(CheckoutError::Network("timeout".into()).is_retryable());
        assert!(CheckoutError::Provider {
            provider: "paypal",
            status: 502,
            body: "{}".into()
        }
        .is_retryable());
        assert!(!CheckoutError::InvalidAmount("abc".into()).is_retryable());
    }

    #[test]
    fn test_raw_body_passthrough() {
        let err = CheckoutError::UnexpectedState {
            provider: "stripe",
            expected: "customer present",
            body: r#"{"error":"nope"}"#.into(),
        };
        assert_eq!(err.raw_body(), Some(r#"{"error":"nope"}"#));
        assert_eq!(CheckoutError::Configuration("x".into()).raw_body(), None);
    }
}
