//! # Checkout Redirect Page
//!
//! Some platforms cannot hand an https URL straight to a browser. For those,
//! the adapter writes a small local document that bounces the user to the
//! hosted checkout page via Stripe.js, opens the file instead, and deletes
//! it once polling concludes.
//!
//! Lifecycle contract: write before open, delete after the approval wait
//! ends, whether it ended in approval or abandonment.

use std::path::PathBuf;

use checkout_core::{CheckoutError, CheckoutResult};

const TEMPLATE: &str = include_str!("redirect_template.html");

const SESSION_ID_TOKEN: &str = "STRIPE_SESSION_ID";
const PUBLISHABLE_KEY_TOKEN: &str = "STRIPE_PKEY";

/// Where the redirect document lives between open and cleanup.
pub fn page_path() -> PathBuf {
    std::env::temp_dir().join("stripe_redirect.html")
}

/// The template with the session id and publishable key substituted.
fn render(session_id: &str, publishable_key: &str) -> String {
    TEMPLATE
        .replace(SESSION_ID_TOKEN, session_id)
        .replace(PUBLISHABLE_KEY_TOKEN, publishable_key)
}

/// Render and write the redirect document to [`page_path`]. Returns a
/// `file://` URL for the opener.
pub fn write_page(session_id: &str, publishable_key: &str) -> CheckoutResult<String> {
    let path = page_path();
    std::fs::write(&path, render(session_id, publishable_key))
        .map_err(|e| CheckoutError::Io(format!("failed to write redirect page: {e}")))?;

    Ok(format!("file://{}", path.display()))
}

/// Delete the redirect document. A missing file is fine; the hosted-URL
/// path never writes one.
pub fn remove_page() {
    let _ = std::fs::remove_file(page_path());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_both_tokens() {
        let html = render("cs_test_a1b2c3", "pk_test_xyz");

        assert!(html.contains("sessionId: 'cs_test_a1b2c3'"));
        assert!(html.contains("Stripe('pk_test_xyz')"));
        assert!(!html.contains(SESSION_ID_TOKEN));
        assert!(!html.contains(PUBLISHABLE_KEY_TOKEN));
    }

    #[test]
    fn test_page_path_is_stable() {
        // Open and cleanup must agree on the location.
        assert_eq!(page_path(), page_path());
        assert!(page_path().ends_with("stripe_redirect.html"));
    }
}
