//! Recording controllers and an in-memory public-state mirror.

use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::{AccountState, CaipNetworkId, ChainNamespace, NetworkState};

use crate::domain::PublicStateUpdate;
use crate::ports::outbound::{AccountController, NetworkController, PublicStateMirror};

/// Keeps every network state it was handed, oldest first.
#[derive(Debug, Default)]
pub struct RecordingNetworkController {
    received: Mutex<Vec<Arc<NetworkState>>>,
}

impl RecordingNetworkController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<Arc<NetworkState>> {
        self.received.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.received.lock().len()
    }

    pub fn last(&self) -> Option<Arc<NetworkState>> {
        self.received.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.received.lock().clear();
    }
}

impl NetworkController for RecordingNetworkController {
    fn replace_state(&self, state: Arc<NetworkState>) {
        self.received.lock().push(state);
    }
}

/// Keeps every account state it was handed, oldest first.
#[derive(Debug, Default)]
pub struct RecordingAccountController {
    received: Mutex<Vec<Arc<AccountState>>>,
}

impl RecordingAccountController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<Arc<AccountState>> {
        self.received.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.received.lock().len()
    }

    pub fn last(&self) -> Option<Arc<AccountState>> {
        self.received.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.received.lock().clear();
    }
}

impl AccountController for RecordingAccountController {
    fn replace_state(&self, state: Arc<AccountState>) {
        self.received.lock().push(state);
    }
}

#[derive(Debug, Default)]
struct MirrorInner {
    active_chain: Option<ChainNamespace>,
    selected_network_id: Option<CaipNetworkId>,
    updates: Vec<PublicStateUpdate>,
}

/// Public-state mirror that folds updates into a current value.
#[derive(Debug, Default)]
pub struct InMemoryPublicState {
    inner: Mutex<MirrorInner>,
}

impl InMemoryPublicState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_chain(&self) -> Option<ChainNamespace> {
        self.inner.lock().active_chain.clone()
    }

    pub fn selected_network_id(&self) -> Option<CaipNetworkId> {
        self.inner.lock().selected_network_id.clone()
    }

    /// Raw updates in arrival order.
    pub fn updates(&self) -> Vec<PublicStateUpdate> {
        self.inner.lock().updates.clone()
    }

    pub fn update_count(&self) -> usize {
        self.inner.lock().updates.len()
    }
}

impl PublicStateMirror for InMemoryPublicState {
    fn set(&self, update: PublicStateUpdate) {
        let mut inner = self.inner.lock();
        if let Some(chain) = &update.active_chain {
            inner.active_chain = Some(chain.clone());
        }
        if let Some(network) = &update.selected_network_id {
            inner.selected_network_id = network.clone();
        }
        inner.updates.push(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::presets;

    #[test]
    fn test_mirror_folds_partial_updates() {
        let mirror = InMemoryPublicState::new();
        mirror.set(PublicStateUpdate::chain_and_network(
            ChainNamespace::eip155(),
            Some(presets::ethereum_mainnet().id),
        ));
        mirror.set(PublicStateUpdate::active_chain(ChainNamespace::solana()));

        assert_eq!(mirror.active_chain(), Some(ChainNamespace::solana()));
        assert_eq!(
            mirror.selected_network_id(),
            Some(presets::ethereum_mainnet().id)
        );

        mirror.set(PublicStateUpdate::chain_and_network(
            ChainNamespace::solana(),
            None,
        ));
        assert!(mirror.selected_network_id().is_none());
        assert_eq!(mirror.update_count(), 3);
    }

    #[test]
    fn test_recording_controllers_keep_order() {
        let network = RecordingNetworkController::new();
        network.replace_state(Arc::new(NetworkState::default()));
        let second = Arc::new(NetworkState {
            supports_all_networks: false,
            ..Default::default()
        });
        network.replace_state(second.clone());

        assert_eq!(network.count(), 2);
        assert!(Arc::ptr_eq(&network.last().unwrap(), &second));

        let account = RecordingAccountController::new();
        assert!(account.last().is_none());
    }
}
