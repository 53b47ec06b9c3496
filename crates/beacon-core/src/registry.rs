//! The event registry: registration, dispatch, and removal.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::EmitResult;
use crate::listener::Listener;
use crate::sink::{DiagnosticSink, NoOpSink};

/// A stored listener plus its lifecycle tag.
///
/// One-shot registrations carry `once: true` and are consumed by the
/// dispatch path before their callback body runs.
struct Registration<P: 'static> {
    listener: Listener<P>,
    once: bool,
}

impl<P: 'static> Clone for Registration<P> {
    fn clone(&self) -> Self {
        Self {
            listener: self.listener.clone(),
            once: self.once,
        }
    }
}

/// Synchronous publish/subscribe registry mapping event names to ordered
/// listener lists.
///
/// Listeners are invoked in registration order, on the caller's thread,
/// each receiving a shared reference to the emitted payload. The payload
/// type is a per-registry type parameter defaulting to
/// [`serde_json::Value`] for heterogeneous payloads.
///
/// All methods take `&self`: the listener table lives behind a lock, which
/// also makes the registry safe to share across threads. No lock is held
/// while a listener runs, so listeners may freely call back into the same
/// registry (including emitting the event currently being dispatched).
///
/// Registration methods return `&Self` so calls can be chained:
///
/// ```
/// use beacon_core::{EventRegistry, Listener};
///
/// let registry: EventRegistry<u32> = EventRegistry::new();
/// let first = Listener::new(|_: &u32| Ok(()));
/// let second = Listener::new(|_: &u32| Ok(()));
/// registry.on("tick", &first).on("tick", &second);
/// assert_eq!(registry.listener_count("tick"), 2);
/// ```
pub struct EventRegistry<P: 'static = serde_json::Value> {
    /// Event name -> ordered registrations. Keys exist only while they hold
    /// at least one registration.
    listeners: RwLock<HashMap<String, Vec<Registration<P>>>>,

    /// While set, `emit` runs no listeners and consumes no one-shots.
    silent: AtomicBool,

    /// Observational diagnostics; never affects registry behavior.
    sink: Arc<dyn DiagnosticSink>,
}

impl<P: 'static> EventRegistry<P> {
    /// Create a registry with the no-op diagnostic sink.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NoOpSink))
    }

    /// Create a registry reporting diagnostics to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        let registry = Self {
            listeners: RwLock::new(HashMap::new()),
            silent: AtomicBool::new(false),
            sink,
        };
        registry.sink.debug("New event registry created.");
        registry
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a listener that runs every time `event` is emitted.
    ///
    /// Any event name and any listener are accepted; registering the same
    /// listener several times creates that many independent registrations.
    pub fn on(&self, event: impl Into<String>, listener: &Listener<P>) -> &Self {
        let event = event.into();
        self.insert(&event, listener.clone(), false);
        self.sink.debug(&format!("New listener for {event:?}."));
        self
    }

    /// Register a listener that runs at most once.
    ///
    /// The registration is removed before the callback body runs, so a
    /// re-entrant [`emit`](Self::emit) from inside the listener cannot fire
    /// it a second time.
    pub fn once(&self, event: impl Into<String>, listener: &Listener<P>) -> &Self {
        let event = event.into();
        self.insert(&event, listener.clone(), true);
        self.sink.debug(&format!("New once listener for {event:?}."));
        self
    }

    fn insert(&self, event: &str, listener: Listener<P>, once: bool) {
        let mut table = self.listeners.write();
        table
            .entry(event.to_owned())
            .or_default()
            .push(Registration { listener, once });
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Run all listeners registered for `event`, in registration order.
    ///
    /// Dispatch iterates over a snapshot of the registrations present when
    /// the call started: listeners registered or removed while the dispatch
    /// runs do not change which snapshot entries are invoked. One-shot
    /// entries are unregistered before their callback runs, and skipped
    /// entirely when a re-entrant emit already consumed them.
    ///
    /// While the registry is silent, or when `event` has no listeners,
    /// nothing runs and `Ok` is returned.
    ///
    /// # Errors
    ///
    /// The first `Err` a listener returns is propagated unchanged and the
    /// remaining snapshot entries are skipped. One-shots consumed before
    /// the failure stay unregistered.
    pub fn emit(&self, event: &str, payload: &P) -> EmitResult<&Self> {
        if self.is_silent() {
            self.sink.debug(&format!("Silent, no listeners run for {event:?}."));
            return Ok(self);
        }

        let snapshot = self.listeners.read().get(event).cloned();
        let Some(snapshot) = snapshot else {
            self.sink.debug(&format!("No listener for {event:?}."));
            return Ok(self);
        };

        self.sink.debug(&format!("Call listeners for {event:?}."));
        for registration in &snapshot {
            if registration.once {
                // Consume the registration first; a re-entrant emit must not
                // see it, and a None here means one already did.
                let consumed = self
                    .remove_first(event, |r| r.once && r.listener.ptr_eq(&registration.listener));
                if consumed.is_none() {
                    continue;
                }
                self.sink.debug(&format!("Call once listener for {event:?}."));
            }
            registration.listener.invoke(payload)?;
        }

        Ok(self)
    }

    /// Whether `emit` is currently suppressed.
    pub fn is_silent(&self) -> bool {
        self.silent.load(Ordering::Relaxed)
    }

    /// Toggle dispatch suppression. While silent, `emit` runs no listeners
    /// and leaves one-shot registrations in place.
    pub fn set_silent(&self, silent: bool) -> &Self {
        self.silent.store(silent, Ordering::Relaxed);
        self
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Remove the first registration of `listener` for `event`.
    ///
    /// Matching is by handle identity ([`Listener::ptr_eq`]); when the same
    /// listener is registered several times only the earliest registration
    /// is removed and the rest keep their relative order. Pending one-shot
    /// registrations are matched like any other.
    ///
    /// Returns the removed listener handle, or `None` when `event` is
    /// unknown or `listener` was never registered for it.
    pub fn off(&self, event: &str, listener: &Listener<P>) -> Option<Listener<P>> {
        self.remove_first(event, |r| r.listener.ptr_eq(listener))
    }

    /// Remove every listener for `event`, returning them in registration
    /// order. The event key is dropped from the table; an unknown event
    /// yields an empty vec.
    pub fn off_event(&self, event: &str) -> Vec<Listener<P>> {
        let removed = { self.listeners.write().remove(event) }.unwrap_or_default();
        self.sink.debug(&format!("All listeners for {event:?} removed."));
        removed.into_iter().map(|r| r.listener).collect()
    }

    /// Remove every listener for every event, returning the prior mapping.
    pub fn off_all(&self) -> HashMap<String, Vec<Listener<P>>> {
        let stored = { std::mem::take(&mut *self.listeners.write()) };
        self.sink.debug("All listeners removed.");
        stored
            .into_iter()
            .map(|(event, registrations)| {
                let handles = registrations.into_iter().map(|r| r.listener).collect();
                (event, handles)
            })
            .collect()
    }

    /// Remove the first registration for `event` matching `matches`,
    /// returning its listener handle.
    ///
    /// Copy-on-remove: the stored list is rebuilt without the matched
    /// entry, so snapshots taken by an in-flight `emit` are undisturbed.
    /// A list emptied by the removal drops its key.
    fn remove_first<F>(&self, event: &str, matches: F) -> Option<Listener<P>>
    where
        F: Fn(&Registration<P>) -> bool,
    {
        let mut table = self.listeners.write();
        let registrations = table.get(event)?;
        let index = registrations.iter().position(|r| matches(r))?;
        let removed = registrations[index].listener.clone();
        let remaining: Vec<Registration<P>> = registrations
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, registration)| registration.clone())
            .collect();
        if remaining.is_empty() {
            table.remove(event);
        } else {
            table.insert(event.to_owned(), remaining);
        }
        drop(table);

        self.sink.debug(&format!("Listener for {event:?} removed."));
        Some(removed)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Listener handles currently registered for `event`, in registration
    /// order (a snapshot; empty for unknown events).
    pub fn listeners_of(&self, event: &str) -> Vec<Listener<P>> {
        self.listeners
            .read()
            .get(event)
            .map(|registrations| registrations.iter().map(|r| r.listener.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of registrations for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.read().get(event).map_or(0, Vec::len)
    }

    /// Whether `event` has at least one registration.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listeners.read().contains_key(event)
    }

    /// Names of all events with at least one registration.
    pub fn event_names(&self) -> Vec<String> {
        self.listeners.read().keys().cloned().collect()
    }

    /// Number of events with at least one registration.
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Whether no event has any registration.
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }
}

impl<P: 'static> Default for EventRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static> fmt::Debug for EventRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.listeners.read();
        let mut events: Vec<(&String, usize)> = table
            .iter()
            .map(|(event, registrations)| (event, registrations.len()))
            .collect();
        events.sort();
        f.debug_struct("EventRegistry")
            .field("events", &events)
            .field("silent", &self.is_silent())
            .finish()
    }
}
