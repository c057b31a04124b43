//! # Presentation Boundary
//!
//! Traits for the surfaces the checkout engine talks to but does not own:
//! the window/dialog presenter and the external URL opener. The engine
//! drives these at well-defined points in each flow; how they render is the
//! embedder's concern.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::CheckoutResult;
use crate::messages::WindowCopy;

/// The window/dialog surface a checkout flow is presented on.
#[async_trait]
pub trait CheckoutSurface: Send + Sync {
    /// Display a window with a confirm button. Resolves `true` when the
    /// user presses it, `false` when the window is dismissed instead.
    async fn confirm(&self, copy: &WindowCopy) -> bool;

    /// Display a buttonless waiting window.
    fn show_waiting(&self, copy: &WindowCopy);

    /// Hide whatever window is currently displayed.
    fn hide(&self);

    /// Token cancelled when the waiting surface is dismissed. The approval
    /// poll for a flow runs until approval or this token fires.
    fn dismissed(&self) -> CancellationToken;
}

/// Opens an external URL (system browser or equivalent).
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> CheckoutResult<()>;
}

/// A surface with no UI: every prompt is auto-confirmed and the waiting
/// window is never dismissed unless [`HeadlessSurface::dismiss`] is called.
/// Suitable for tests and unattended flows.
#[derive(Default)]
pub struct HeadlessSurface {
    dismissal: CancellationToken,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user closing the waiting window.
    pub fn dismiss(&self) {
        self.dismissal.cancel();
    }
}

#[async_trait]
impl CheckoutSurface for HeadlessSurface {
    async fn confirm(&self, copy: &WindowCopy) -> bool {
        info!(header = %copy.header, "auto-confirming prompt");
        true
    }

    fn show_waiting(&self, copy: &WindowCopy) {
        info!(header = %copy.header, "waiting for approval");
    }

    fn hide(&self) {}

    fn dismissed(&self) -> CancellationToken {
        self.dismissal.clone()
    }
}

/// An opener that only logs the URL. Useful headless, and as the default in
/// environments where launching a browser is someone else's job.
#[derive(Default)]
pub struct LogOpener;

impl UrlOpener for LogOpener {
    fn open(&self, url: &str) -> CheckoutResult<()> {
        info!(%url, "open this URL to continue checkout");
        Ok(())
    }
}
