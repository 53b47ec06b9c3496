//! Diagnostic sinks for registry observability.
//!
//! The registry reports what it does (registrations, removals, dispatches)
//! to a [`DiagnosticSink`] injected at construction time. The sink is purely
//! observational: it receives leveled text messages and returns nothing, so
//! it cannot alter registry behavior or surface errors to registry callers.
//!
//! Two implementations ship with the crate:
//!
//! - [`NoOpSink`]: drops every message (the default)
//! - [`TracingSink`]: forwards messages to `tracing` at debug level

/// Destination for registry diagnostics.
///
/// Implementations must be infallible from the caller's point of view:
/// `debug` returns nothing and must not panic on any message.
pub trait DiagnosticSink: Send + Sync {
    /// Record a debug-level diagnostic message.
    fn debug(&self, message: &str);
}

/// Sink that drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

impl DiagnosticSink for NoOpSink {
    fn debug(&self, _message: &str) {}
}

/// Sink that forwards messages to the `tracing` ecosystem at debug level.
///
/// Install a subscriber (e.g. `tracing_subscriber::fmt`) to see the output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "beacon::events", "{message}");
    }
}
