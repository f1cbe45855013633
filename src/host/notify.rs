//! Notification capability

use thiserror::Error;

/// Failure to deliver a notification
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Fire-and-forget message sink the host may provide
pub trait Notifier {
    /// Deliver a text message
    fn send(&self, message: &str) -> Result<(), NotifyError>;
}
