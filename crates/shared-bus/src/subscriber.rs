//! # Subscriptions
//!
//! Listener registry and the handle returned to subscribers.
//!
//! A [`Subscription`] owns its registry entry: dropping the handle removes
//! the listener. Call [`Subscription::detach`] to keep a listener for the
//! lifetime of the bus instead.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Callback fired with the published snapshot.
pub(crate) type SnapshotCallback<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Derived watcher: re-evaluates its selector and reports whether it fired.
pub(crate) type DerivedWatcher<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

pub(crate) enum Listener<K, S> {
    Keyed {
        key: K,
        callback: SnapshotCallback<S>,
    },
    Derived(DerivedWatcher<S>),
}

impl<K: Clone, S> Clone for Listener<K, S> {
    fn clone(&self) -> Self {
        match self {
            Listener::Keyed { key, callback } => Listener::Keyed {
                key: key.clone(),
                callback: Arc::clone(callback),
            },
            Listener::Derived(watcher) => Listener::Derived(Arc::clone(watcher)),
        }
    }
}

/// Listeners ordered by subscription id, which is also subscription order.
pub(crate) struct ListenerRegistry<K, S> {
    next_id: u64,
    listeners: BTreeMap<u64, Listener<K, S>>,
}

impl<K: Clone, S> ListenerRegistry<K, S> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 1,
            listeners: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, listener: Listener<K, S>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Clone out every listener so callbacks can run without the lock held.
    pub(crate) fn snapshot(&self) -> Vec<Listener<K, S>> {
        self.listeners.values().cloned().collect()
    }
}

/// Type-erased removal hook so the handle does not carry the bus generics.
trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: u64) -> bool;
}

impl<K, S> Unsubscribe for Mutex<ListenerRegistry<K, S>>
where
    K: Clone + Send + Sync,
    S: 'static,
{
    fn unsubscribe(&self, id: u64) -> bool {
        self.lock().remove(id)
    }
}

/// Handle for one registered listener.
///
/// When dropped, the listener is removed from the bus.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Option<Weak<dyn Unsubscribe>>,
}

impl Subscription {
    pub(crate) fn new<K, S>(id: u64, registry: &Arc<Mutex<ListenerRegistry<K, S>>>) -> Self
    where
        K: Clone + Send + Sync + 'static,
        S: 'static,
    {
        let registry: Arc<dyn Unsubscribe> = registry.clone();
        Self {
            id,
            registry: Some(Arc::downgrade(&registry)),
        }
    }

    /// Subscription id, unique per bus.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the listener is still registered on a live bus.
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .is_some_and(|registry| registry.strong_count() > 0)
    }

    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Keep the listener registered for the lifetime of the bus.
    pub fn detach(mut self) {
        self.registry = None;
    }

    fn release(&mut self) {
        let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) else {
            return;
        };
        if registry.unsubscribe(self.id) {
            debug!(subscription = self.id, "Subscription dropped");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
