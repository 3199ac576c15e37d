//! # Change Bus
//!
//! Synchronous publish/subscribe over a snapshot type `S` keyed by `K`.
//!
//! Callbacks run on the publishing thread, after the registry lock has been
//! released, so a callback may subscribe, unsubscribe or trigger a nested
//! publish without deadlocking.

use crate::events::ChangeSet;
use crate::subscriber::{Listener, ListenerRegistry, Subscription};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Publishing side of the bus.
pub trait ChangePublisher<K, S>: Send + Sync {
    /// Deliver `snapshot` to every listener interested in `changed`.
    ///
    /// # Returns
    ///
    /// The number of callbacks invoked.
    fn publish(&self, changed: &ChangeSet<K>, snapshot: &S) -> usize;

    /// Total callbacks invoked since the bus was created.
    fn notifications_delivered(&self) -> u64;
}

/// In-process change bus.
///
/// Two kinds of listeners:
///
/// - **keyed**: fire whenever the key is part of a publish's change set;
/// - **derived**: re-evaluate a selector on every publish and fire only when
///   the selected value differs from the last one they saw.
pub struct ChangeBus<K, S> {
    registry: Arc<Mutex<ListenerRegistry<K, S>>>,
    publishes: AtomicU64,
    delivered: AtomicU64,
}

impl<K, S> ChangeBus<K, S>
where
    K: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
    S: 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(ListenerRegistry::new())),
            publishes: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
        }
    }

    /// Fire `callback` with the new snapshot whenever `key` changes.
    pub fn subscribe_key<F>(&self, key: K, callback: F) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        debug!(key = ?key, "Keyed subscription created");
        let id = self.registry.lock().insert(Listener::Keyed {
            key,
            callback: Arc::new(callback),
        });
        Subscription::new(id, &self.registry)
    }

    /// Fire `callback` when the value picked by `select` changes.
    ///
    /// `select` returning `None` means the value cannot be resolved for this
    /// snapshot; nothing fires and the remembered value is kept. The first
    /// resolved value always fires.
    pub fn subscribe_derived<V, Sel, F>(&self, select: Sel, callback: F) -> Subscription
    where
        V: PartialEq + Clone + Send + 'static,
        Sel: Fn(&S) -> Option<V> + Send + Sync + 'static,
        F: Fn(&V) + Send + Sync + 'static,
    {
        let previous: Mutex<Option<V>> = Mutex::new(None);
        let watcher = move |snapshot: &S| -> bool {
            let Some(next) = select(snapshot) else {
                return false;
            };
            {
                let mut previous = previous.lock();
                if previous.as_ref() == Some(&next) {
                    return false;
                }
                *previous = Some(next.clone());
            }
            callback(&next);
            true
        };

        debug!("Derived subscription created");
        let id = self
            .registry
            .lock()
            .insert(Listener::Derived(Arc::new(watcher)));
        Subscription::new(id, &self.registry)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Number of publish calls, including ones nobody listened to.
    #[must_use]
    pub fn publishes(&self) -> u64 {
        self.publishes.load(Ordering::Relaxed)
    }
}

impl<K, S> Default for ChangeBus<K, S>
where
    K: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
    S: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> ChangePublisher<K, S> for ChangeBus<K, S>
where
    K: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
    S: 'static,
{
    fn publish(&self, changed: &ChangeSet<K>, snapshot: &S) -> usize {
        self.publishes.fetch_add(1, Ordering::Relaxed);

        let listeners = self.registry.lock().snapshot();
        let mut invoked = 0;
        for listener in listeners {
            match listener {
                Listener::Keyed { key, callback } => {
                    if changed.contains(&key) {
                        callback(snapshot);
                        invoked += 1;
                    }
                }
                Listener::Derived(watcher) => {
                    if watcher(snapshot) {
                        invoked += 1;
                    }
                }
            }
        }

        self.delivered.fetch_add(invoked as u64, Ordering::Relaxed);
        debug!(changed = ?changed, invoked, "Change published");
        invoked
    }

    fn notifications_delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}
