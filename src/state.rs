//! Shared per-subscription state: the inset value cache and the ordered
//! listener registry.
//!
//! One `SharedState` is owned by exactly one subscription (or one legacy
//! facade) together with its pump task. Instances are never shared across
//! subscriptions, even identically configured ones.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::InsetRect;

/// Callback invoked with each new inset measurement.
///
/// Listeners are compared by `Arc` identity: registering the same `Arc`
/// twice is permitted and results in two invocations per update, and
/// removal drops the first identity match only.
pub type InsetListener = Arc<dyn Fn(InsetRect) + Send + Sync>;

/// Inset value cache plus listener registry.
pub(crate) struct SharedState {
    inset: RwLock<InsetRect>,
    listeners: RwLock<Vec<InsetListener>>,
}

impl SharedState {
    pub(crate) fn new() -> Self {
        Self {
            inset: RwLock::new(InsetRect::ZERO),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// The most recent measurement, or the zero rect if none has arrived.
    pub(crate) fn current(&self) -> InsetRect {
        *self.inset.read()
    }

    /// Replace the cache without notifying listeners.
    pub(crate) fn replace(&self, inset: InsetRect) {
        *self.inset.write() = inset;
    }

    /// Replace the cache, then fan out to every registered listener in
    /// registration order.
    ///
    /// Fan-out iterates a snapshot taken before the first invocation, so a
    /// listener adding or removing listeners cannot corrupt the dispatch
    /// in progress. A panicking listener unwinds out of the loop and skips
    /// the remaining listeners for this event.
    pub(crate) fn apply_update(&self, inset: InsetRect) {
        *self.inset.write() = inset;
        let snapshot = self.listeners.read().clone();
        for listener in &snapshot {
            listener(inset);
        }
    }

    /// Append a listener without replaying the cached value.
    pub(crate) fn add_listener(&self, listener: InsetListener) {
        self.listeners.write().push(listener);
    }

    /// Append a listener, then invoke it once with the cached value so
    /// late subscribers see current state without waiting for the next
    /// native event.
    pub(crate) fn add_listener_with_current(&self, listener: InsetListener) {
        self.listeners.write().push(Arc::clone(&listener));
        listener(self.current());
    }

    /// Remove the first entry matching `listener` by identity. No-op when
    /// absent.
    pub(crate) fn remove_listener(&self, listener: &InsetListener) {
        let mut listeners = self.listeners.write();
        if let Some(idx) = listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            listeners.remove(idx);
        }
    }
}
