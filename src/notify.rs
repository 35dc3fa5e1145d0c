//! Outbound notification collaborator.
//!
//! The engine never talks to a mail server or webhook itself. It hands a
//! recipient, subject and body to a [`Notifier`] and treats any error as
//! recoverable.

use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("notification to {recipient} failed: {reason}")]
    Delivery { recipient: String, reason: String },
}

/// Delivers a message to a recipient.
pub trait Notifier {
    fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        (**self).notify(recipient, subject, body)
    }
}

/// Writes notifications to the `tracing` log instead of delivering them.
///
/// Useful for deployments without a transport and for the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        info!("Notification for {}: {}", recipient, subject);
        for line in body.lines().filter(|l| !l.is_empty()) {
            info!("  {}", line);
        }
        Ok(())
    }
}

/// Drops every notification. Used when notifications are disabled anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _recipient: &str, _subject: &str, _body: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}
