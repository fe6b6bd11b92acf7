//! UI notification sink.
//!
//! Single-channel, fire-and-forget: the engine pushes user-facing messages
//! through [`NotificationSink::notify`] and never blocks on or inspects the
//! outcome. What a sink does with a message (snackbar, toast, log line) is
//! presentation and out of scope here.

use std::fmt;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        write!(f, "{label}")
    }
}

/// Sink for user-facing notifications.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification. Must not block.
    fn notify(&self, message: &str, severity: Severity);
}

/// Sink that routes notifications onto the matching `tracing` level.
///
/// The default sink when an embedder does not supply its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!(target: "greenbasket::notify", "{message}"),
            Severity::Warning => tracing::warn!(target: "greenbasket::notify", "{message}"),
            Severity::Error => tracing::error!(target: "greenbasket::notify", "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
