//! # Cart Notifications
//!
//! The one-line user notification seam.
//!
//! Every failure mode of the cart (out of stock, not in cart, lookup
//! failure, persist failure) surfaces to the user as a single toast line.
//! This module only defines the seam; rendering belongs to the UI.
//!
//! Notifications are fire-and-forget: no acknowledgment, no retry, and a
//! slow notifier must never block a cart operation, so the trait is sync.

use tracing::warn;

use trolley_core::CartError;

/// Trait for delivering user-facing cart notifications
/// (implemented by the storefront's toast integration).
pub trait CartNotifier: Send + Sync {
    /// Delivers a one-line error notification.
    fn notify(&self, error: &CartError);
}

/// No-op notifier for tests and headless use.
pub struct NoOpNotifier;

impl CartNotifier for NoOpNotifier {
    fn notify(&self, _error: &CartError) {}
}

/// Default notifier: routes the message to the tracing pipeline.
///
/// Useful for development and for deployments where the UI subscribes to
/// log events instead of a dedicated toast channel.
pub struct TracingNotifier;

impl CartNotifier for TracingNotifier {
    fn notify(&self, error: &CartError) {
        warn!(notification = %error, "Cart operation rejected");
    }
}
