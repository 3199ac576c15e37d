//! # Namespace Adapter Registry
//!
//! Namespace -> [`ChainAdapter`] map. Entries are inserted or overwritten,
//! never removed or merged. Iteration follows first insertion order.

use std::collections::HashMap;

use shared_types::ChainNamespace;

use super::entities::ChainAdapter;

#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    adapters: HashMap<ChainNamespace, ChainAdapter>,
    order: Vec<ChainNamespace>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `adapter` under its own namespace, replacing any previous
    /// record. An overwrite keeps the original position.
    pub fn register(&mut self, adapter: ChainAdapter) -> Option<ChainAdapter> {
        let namespace = adapter.chain_namespace.clone();
        let previous = self.adapters.insert(namespace.clone(), adapter);
        if previous.is_none() {
            self.order.push(namespace);
        }
        previous
    }

    pub fn get(&self, namespace: &ChainNamespace) -> Option<&ChainAdapter> {
        self.adapters.get(namespace)
    }

    pub fn get_mut(&mut self, namespace: &ChainNamespace) -> Option<&mut ChainAdapter> {
        self.adapters.get_mut(namespace)
    }

    pub fn contains(&self, namespace: &ChainNamespace) -> bool {
        self.adapters.contains_key(namespace)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Adapters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ChainAdapter> {
        self.order.iter().filter_map(|ns| self.adapters.get(ns))
    }

    pub fn namespaces(&self) -> Vec<ChainNamespace> {
        self.order.clone()
    }
}
