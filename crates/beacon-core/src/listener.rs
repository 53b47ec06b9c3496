//! Listener handles with reference identity.

use std::fmt;
use std::sync::Arc;

use crate::error::EmitResult;

/// Callback signature stored by the registry.
type ListenerCallback<P> = dyn Fn(&P) -> EmitResult<()> + Send + Sync;

/// A cloneable handle to an event callback.
///
/// Cloning a `Listener` shares the underlying callback, and all clones
/// compare equal: equality is pointer identity, not behavioral equality.
/// That identity is what [`EventRegistry::off`](crate::EventRegistry::off)
/// uses to find the registration to remove, so keep a clone of the handle
/// around if you intend to unregister it later.
///
/// Two separately constructed listeners never compare equal, even when they
/// wrap the same function.
pub struct Listener<P: 'static> {
    callback: Arc<ListenerCallback<P>>,
}

impl<P: 'static> Listener<P> {
    /// Wrap a callback in a listener handle.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&P) -> EmitResult<()> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Run the callback with the given payload.
    pub fn invoke(&self, payload: &P) -> EmitResult<()> {
        (self.callback)(payload)
    }

    /// Whether `self` and `other` are handles to the same registration target.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<P: 'static> Clone for Listener<P> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<P: 'static> PartialEq for Listener<P> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<P: 'static> Eq for Listener<P> {}

impl<P: 'static> fmt::Debug for Listener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("callback", &Arc::as_ptr(&self.callback))
            .finish()
    }
}
