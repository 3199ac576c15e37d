use shared_types::{CaipNetwork, CaipNetworkId, ConnectorType};
use tracing::debug;

use crate::domain::entities::{remember_wallet, DeepLink, RecentWallet};
use crate::domain::keys::StorageKey;
use crate::ports::inbound::SessionStorageApi;
use crate::service::SafeStorage;

/// Typed session values persisted across restarts.
#[derive(Clone)]
pub struct SessionStorage {
    storage: SafeStorage,
}

impl SessionStorage {
    pub fn new(storage: SafeStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &SafeStorage {
        &self.storage
    }
}

impl SessionStorageApi for SessionStorage {
    fn active_caip_network(&self) -> Option<CaipNetwork> {
        self.storage.get_json(StorageKey::ActiveCaipNetwork)
    }

    fn active_caip_network_id(&self) -> Option<CaipNetworkId> {
        self.storage
            .get_item(StorageKey::ActiveCaipNetworkId)?
            .parse()
            .ok()
    }

    fn set_active_caip_network(&self, network: &CaipNetwork) {
        self.storage.set_json(StorageKey::ActiveCaipNetwork, network);
        self.storage
            .set_item(StorageKey::ActiveCaipNetworkId, network.id.as_str());
        debug!(network = %network.id, "Active network persisted");
    }

    fn wallet_id(&self) -> Option<String> {
        self.storage.get_item(StorageKey::WalletId)
    }

    fn set_wallet_id(&self, wallet_id: &str) {
        self.storage.set_item(StorageKey::WalletId, wallet_id);
    }

    fn clear_wallet_id(&self) {
        self.storage.remove_item(StorageKey::WalletId);
    }

    fn connected_connector(&self) -> Option<String> {
        self.storage.get_item(StorageKey::ConnectedConnector)
    }

    fn set_connected_connector(&self, connector: ConnectorType) {
        self.storage
            .set_item(StorageKey::ConnectedConnector, connector.as_str());
    }

    fn clear_connected_connector(&self) {
        self.storage.remove_item(StorageKey::ConnectedConnector);
    }

    fn connected_social_provider(&self) -> Option<String> {
        self.storage.get_item(StorageKey::ConnectedSocial)
    }

    fn set_connected_social_provider(&self, provider: &str) {
        self.storage.set_item(StorageKey::ConnectedSocial, provider);
    }

    fn connected_social_username(&self) -> Option<String> {
        self.storage.get_item(StorageKey::SocialUsername)
    }

    fn wallet_connect_deep_link(&self) -> Option<DeepLink> {
        self.storage.get_json(StorageKey::WalletConnectDeepLink)
    }

    fn set_wallet_connect_deep_link(&self, link: &DeepLink) {
        self.storage.set_json(StorageKey::WalletConnectDeepLink, link);
    }

    fn delete_wallet_connect_deep_link(&self) {
        self.storage.remove_item(StorageKey::WalletConnectDeepLink);
    }

    fn recent_wallets(&self) -> Vec<RecentWallet> {
        self.storage
            .get_json(StorageKey::RecentWallets)
            .unwrap_or_default()
    }

    fn add_recent_wallet(&self, wallet: RecentWallet) {
        let mut recent = self.recent_wallets();
        if remember_wallet(&mut recent, wallet) {
            self.storage.set_json(StorageKey::RecentWallets, &recent);
        }
    }
}
