//! Event system error types

use thiserror::Error;

/// Errors surfaced by event dispatch.
///
/// The registry itself never fails: registration accepts any event name and
/// any listener, and removing something that was never registered is a safe
/// no-op. The only errors a caller observes are the ones their own listeners
/// return, propagated unchanged out of [`emit`](crate::EventRegistry::emit).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// A listener reported a failure while handling an emitted event.
    #[error("Listener failed: {0}")]
    Listener(String),

    /// General error
    #[error("{0}")]
    Other(String),
}

impl EventError {
    /// Create a listener failure error
    pub fn listener(message: impl Into<String>) -> Self {
        Self::Listener(message.into())
    }

    /// Create a general error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Specialized Result type for emit and listener callbacks
pub type EmitResult<T> = Result<T, EventError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EventError::listener("database unavailable");
        assert_eq!(format!("{}", error), "Listener failed: database unavailable");

        let error = EventError::other("boom");
        assert_eq!(format!("{}", error), "boom");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(EventError::listener("x"), EventError::Listener("x".into()));
        assert_ne!(EventError::listener("x"), EventError::other("x"));
    }
}
