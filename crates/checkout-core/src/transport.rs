//! # Provider Transport
//!
//! Thin dispatch layer over the HTTP client. Every provider call funnels
//! through [`send`], which resolves to a status code plus the raw body text.
//! Callers branch on `is_success()`; non-2xx bodies are passed through
//! verbatim as the failure payload, whether or not they parse as JSON.

use crate::error::{CheckoutError, CheckoutResult};
use reqwest::Client;

/// A completed provider call: status code and raw body text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// 2xx is success, everything else is failure.
    pub fn is_success(&self) -> bool {
        self.status / 100 == 2
    }
}

/// Build the shared HTTP client.
pub fn http_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client")
}

/// Execute a prepared request, resolving to `(status, body)`.
///
/// Only transport-level failures (unreachable host, timeout) map to an
/// error; any HTTP answer, including 4xx/5xx, resolves as an [`ApiResponse`].
pub async fn send(request: reqwest::RequestBuilder) -> CheckoutResult<ApiResponse> {
    let response = request
        .send()
        .await
        .map_err(|e| CheckoutError::Network(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| CheckoutError::Network(e.to_string()))?;

    Ok(ApiResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let ok = ApiResponse {
            status: 201,
            body: String::new(),
        };
        let err = ApiResponse {
            status: 422,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!err.is_success());
    }
}
