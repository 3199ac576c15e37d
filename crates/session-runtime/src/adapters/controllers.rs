//! Controllers that keep the most recent sub-state they were handed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ms_01_chain_coordinator::{AccountController, NetworkController};
use parking_lot::RwLock;
use shared_types::{AccountState, NetworkState};

/// Latest replacement value plus a count of replacements.
#[derive(Debug)]
pub struct LatestState<T> {
    current: RwLock<Option<Arc<T>>>,
    replacements: AtomicU64,
}

impl<T> Default for LatestState<T> {
    fn default() -> Self {
        Self {
            current: RwLock::new(None),
            replacements: AtomicU64::new(0),
        }
    }
}

impl<T> LatestState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<T>> {
        self.current.read().clone()
    }

    pub fn replacements(&self) -> u64 {
        self.replacements.load(Ordering::Relaxed)
    }

    fn store(&self, state: Arc<T>) {
        *self.current.write() = Some(state);
        self.replacements.fetch_add(1, Ordering::Relaxed);
    }
}

impl NetworkController for LatestState<NetworkState> {
    fn replace_state(&self, state: Arc<NetworkState>) {
        self.store(state);
    }
}

impl AccountController for LatestState<AccountState> {
    fn replace_state(&self, state: Arc<AccountState>) {
        self.store(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::presets;

    #[test]
    fn test_keeps_only_latest() {
        let controller = LatestState::<NetworkState>::new();
        assert!(controller.current().is_none());

        controller.replace_state(Arc::new(NetworkState::default()));
        let selected = NetworkState {
            caip_network: Some(presets::solana_mainnet()),
            ..Default::default()
        };
        controller.replace_state(Arc::new(selected.clone()));

        assert_eq!(controller.current().as_deref(), Some(&selected));
        assert_eq!(controller.replacements(), 2);
    }
}
