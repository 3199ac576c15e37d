//! Change subscriptions
//!
//! Callbacks run synchronously on the mutating thread once the mutation has
//! committed. Dropping the returned [`Subscription`] unsubscribes.

use shared_bus::Subscription;
use shared_types::{CaipAddress, CaipNetwork, ChainNamespace};

use super::core::ChainCoordinator;
use crate::domain::{ChainAdapter, CoordinatorState, StateKey};

impl ChainCoordinator {
    /// Fire `callback` with the committed state whenever `key` changed.
    pub fn subscribe_key<F>(&self, key: StateKey, callback: F) -> Subscription
    where
        F: Fn(&CoordinatorState) + Send + Sync + 'static,
    {
        self.bus.subscribe_key(key, callback)
    }

    pub fn subscribe_active_chain<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&ChainNamespace>) + Send + Sync + 'static,
    {
        self.bus.subscribe_key(StateKey::ActiveChain, move |state| {
            callback(state.active_chain.as_ref())
        })
    }

    pub fn subscribe_active_caip_network<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&CaipNetwork>) + Send + Sync + 'static,
    {
        self.bus.subscribe_key(StateKey::ActiveCaipNetwork, move |state| {
            callback(state.active_caip_network.as_ref())
        })
    }

    pub fn subscribe_active_caip_address<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&CaipAddress>) + Send + Sync + 'static,
    {
        self.bus.subscribe_key(StateKey::ActiveCaipAddress, move |state| {
            callback(state.active_caip_address.as_ref())
        })
    }

    /// Watch one property of a namespace's adapter record.
    ///
    /// The namespace is `pinned`, or the active one at the time of each
    /// change. `callback` gets `None` when that namespace has no record and
    /// only runs when the selected value differs from the last one
    /// delivered. Nothing fires while no namespace resolves.
    pub fn subscribe_chain_prop<V, Sel, F>(
        &self,
        select: Sel,
        callback: F,
        pinned: Option<ChainNamespace>,
    ) -> Subscription
    where
        V: PartialEq + Clone + Send + 'static,
        Sel: Fn(&ChainAdapter) -> V + Send + Sync + 'static,
        F: Fn(Option<&V>) + Send + Sync + 'static,
    {
        self.bus.subscribe_derived(
            move |state: &CoordinatorState| {
                let namespace = pinned.as_ref().or(state.active_chain.as_ref())?;
                Some(state.chains.get(namespace).map(&select))
            },
            move |value: &Option<V>| callback(value.as_ref()),
        )
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }
}
