//! # Inbound Ports (Driving Ports)
//!
//! Typed, best-effort access to the session values. Every method swallows
//! storage failures: getters return `None`/empty, setters do nothing.

use crate::domain::entities::{DeepLink, RecentWallet};
use shared_types::{CaipNetwork, CaipNetworkId, ConnectorType};

pub trait SessionStorageApi: Send + Sync {
    // Active network

    /// Persisted active network; `None` when absent or unparseable.
    fn active_caip_network(&self) -> Option<CaipNetwork>;

    fn active_caip_network_id(&self) -> Option<CaipNetworkId>;

    /// Persist the network as JSON together with its id.
    fn set_active_caip_network(&self, network: &CaipNetwork);

    // Wallet and connector

    fn wallet_id(&self) -> Option<String>;

    fn set_wallet_id(&self, wallet_id: &str);

    fn clear_wallet_id(&self);

    /// Raw connector tag. Unknown tags are returned as stored.
    fn connected_connector(&self) -> Option<String>;

    fn set_connected_connector(&self, connector: ConnectorType);

    fn clear_connected_connector(&self);

    // Social login

    fn connected_social_provider(&self) -> Option<String>;

    fn set_connected_social_provider(&self, provider: &str);

    fn connected_social_username(&self) -> Option<String>;

    // WalletConnect deep link

    fn wallet_connect_deep_link(&self) -> Option<DeepLink>;

    fn set_wallet_connect_deep_link(&self, link: &DeepLink);

    fn delete_wallet_connect_deep_link(&self);

    // Recent wallets

    /// Most recent first.
    fn recent_wallets(&self) -> Vec<RecentWallet>;

    fn add_recent_wallet(&self, wallet: RecentWallet);
}
