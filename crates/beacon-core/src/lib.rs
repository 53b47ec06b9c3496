//! Synchronous publish/subscribe event registry.
//!
//! This crate provides [`EventRegistry`], a minimal in-process event
//! emitter: callers register named-event listeners, emit events with an
//! arbitrary payload, and deregister listeners individually, per-event, or
//! globally. Dispatch is synchronous and runs on the caller's thread; there
//! is no queueing, no I/O, and no deferred delivery.
//!
//! # Architecture
//!
//! ```text
//! EventRegistry<P>
//!    │
//!    ├── listener table: event name -> ordered Vec of registrations
//!    ├── silent flag:    suppresses all dispatch while set
//!    └── DiagnosticSink: observational debug output (NoOpSink default)
//! ```
//!
//! # Key Components
//!
//! - [`EventRegistry`]: listener table plus registration, dispatch, and
//!   removal operations
//! - [`Listener`]: cloneable callback handle; identity is per-handle and
//!   drives removal-by-reference
//! - [`DiagnosticSink`]: narrow logging interface injected at construction
//!   ([`NoOpSink`], [`TracingSink`])
//! - [`EventError`] / [`EmitResult`]: the error surface of dispatch
//!
//! # Dispatch Semantics
//!
//! Listeners run strictly in registration order, each receiving a shared
//! reference to the same payload. `emit` iterates a snapshot of the
//! registrations present when it started, so listeners may mutate the
//! registry (or re-enter `emit`) without corrupting the iteration. One-shot
//! registrations ([`EventRegistry::once`]) are unregistered before their
//! callback body runs. The first listener error aborts the remaining
//! invocations and propagates unchanged to the `emit` caller.
//!
//! # Example
//!
//! ```
//! use beacon_core::{EventRegistry, Listener};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let logins = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&logins);
//!
//! let registry: EventRegistry<String> = EventRegistry::new();
//! let on_login = Listener::new(move |name: &String| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//!     println!("{name} logged in");
//!     Ok(())
//! });
//!
//! registry.on("login", &on_login);
//! registry.emit("login", &"ada".to_string())?;
//! assert_eq!(logins.load(Ordering::Relaxed), 1);
//!
//! // Nothing runs while the registry is silent.
//! registry.set_silent(true);
//! registry.emit("login", &"ada".to_string())?;
//! assert_eq!(logins.load(Ordering::Relaxed), 1);
//!
//! // Removal is by handle identity.
//! assert!(registry.off("login", &on_login).is_some());
//! # Ok::<(), beacon_core::EventError>(())
//! ```
//!
//! # Threading
//!
//! The registry is `Send + Sync`: the listener table lives behind a lock
//! and the silent flag is atomic. No lock is held while a listener runs, so
//! re-entrant use from inside a listener is safe. Dispatch itself never
//! yields or blocks on anything but that lock.

pub mod error;
pub mod listener;
pub mod registry;
pub mod sink;

pub use error::{EmitResult, EventError};
pub use listener::Listener;
pub use registry::EventRegistry;
pub use sink::{DiagnosticSink, NoOpSink, TracingSink};
