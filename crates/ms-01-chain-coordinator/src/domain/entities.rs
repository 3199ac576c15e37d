//! # Coordinator Entities
//!
//! The per-namespace adapter record, the bring-up descriptor it is built
//! from, and the aggregate the coordinator guards.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared_types::{
    AccountState, AdapterType, CaipAddress, CaipNetwork, CaipNetworkId, ChainNamespace, Connector,
    NetworkState,
};

use super::clients::{ConnectionClientHandle, NetworkClientHandle};
use super::registry::ChainRegistry;

/// Registry record for one namespace.
///
/// `chain_namespace` always equals the key it is registered under. Account
/// and network sub-states are shared immutable snapshots: an update builds a
/// new value and swaps the `Arc`.
#[derive(Clone)]
pub struct ChainAdapter {
    pub chain_namespace: ChainNamespace,
    pub network_client: Option<NetworkClientHandle>,
    pub connection_client: Option<ConnectionClientHandle>,
    pub adapter_type: Option<AdapterType>,
    /// `None` only for records registered without sub-state; such a record
    /// gets a full account reset the first time it becomes active.
    pub account_state: Option<Arc<AccountState>>,
    pub network_state: Option<Arc<NetworkState>>,
    /// Fixed at registration.
    pub caip_networks: Arc<[CaipNetwork]>,
}

impl ChainAdapter {
    /// A record with fresh default sub-states and no clients.
    pub fn bare(chain_namespace: ChainNamespace) -> Self {
        Self {
            chain_namespace,
            network_client: None,
            connection_client: None,
            adapter_type: None,
            account_state: Some(Arc::new(AccountState::default())),
            network_state: Some(Arc::new(NetworkState::default())),
            caip_networks: Arc::from(Vec::new()),
        }
    }

    /// A record carrying no account or network sub-state at all.
    pub fn without_state(chain_namespace: ChainNamespace) -> Self {
        Self {
            account_state: None,
            network_state: None,
            ..Self::bare(chain_namespace)
        }
    }

    pub fn with_adapter_type(mut self, adapter_type: AdapterType) -> Self {
        self.adapter_type = Some(adapter_type);
        self
    }

    pub fn with_caip_networks(mut self, networks: Arc<[CaipNetwork]>) -> Self {
        self.caip_networks = networks;
        self
    }

    pub fn caip_address(&self) -> Option<&CaipAddress> {
        self.account_state.as_ref()?.caip_address.as_ref()
    }

    /// Id of the network selected in this namespace's network sub-state.
    pub fn selected_network_id(&self) -> Option<&CaipNetworkId> {
        self.network_state
            .as_ref()?
            .caip_network
            .as_ref()
            .map(|network| &network.id)
    }
}

impl fmt::Debug for ChainAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainAdapter")
            .field("chain_namespace", &self.chain_namespace)
            .field("network_client", &self.network_client.is_some())
            .field("connection_client", &self.connection_client.is_some())
            .field("adapter_type", &self.adapter_type)
            .field("account_state", &self.account_state)
            .field("network_state", &self.network_state)
            .field("caip_networks", &self.caip_networks.len())
            .finish()
    }
}

/// Bring-up descriptor for one adapter.
#[derive(Clone)]
pub struct AdapterConfig {
    pub chain_namespace: ChainNamespace,
    pub network_client: Option<NetworkClientHandle>,
    pub connection_client: Option<ConnectionClientHandle>,
    pub adapter_type: Option<AdapterType>,
    pub default_network: Option<CaipNetwork>,
    pub caip_networks: Vec<CaipNetwork>,
}

impl AdapterConfig {
    pub fn new(chain_namespace: ChainNamespace) -> Self {
        Self {
            chain_namespace,
            network_client: None,
            connection_client: None,
            adapter_type: None,
            default_network: None,
            caip_networks: Vec::new(),
        }
    }

    pub fn with_network_client(mut self, client: NetworkClientHandle) -> Self {
        self.network_client = Some(client);
        self
    }

    pub fn with_connection_client(mut self, client: ConnectionClientHandle) -> Self {
        self.connection_client = Some(client);
        self
    }

    pub fn with_adapter_type(mut self, adapter_type: AdapterType) -> Self {
        self.adapter_type = Some(adapter_type);
        self
    }

    pub fn with_default_network(mut self, network: CaipNetwork) -> Self {
        self.default_network = Some(network);
        self
    }

    pub fn with_caip_networks(mut self, networks: Vec<CaipNetwork>) -> Self {
        self.caip_networks = networks;
        self
    }

    /// Default network, else the first configured one.
    pub fn fallback_network(&self) -> Option<&CaipNetwork> {
        self.default_network
            .as_ref()
            .or_else(|| self.caip_networks.first())
    }

    /// Registry record with fresh default sub-states.
    pub fn to_chain_adapter(&self) -> ChainAdapter {
        ChainAdapter {
            chain_namespace: self.chain_namespace.clone(),
            network_client: self.network_client.clone(),
            connection_client: self.connection_client.clone(),
            adapter_type: self.adapter_type,
            account_state: Some(Arc::new(AccountState::default())),
            network_state: Some(Arc::new(NetworkState::default())),
            caip_networks: Arc::from(self.caip_networks.clone()),
        }
    }

    /// Distinct namespaces referenced by the configured networks, in first
    /// appearance order.
    pub fn referenced_namespaces(&self) -> Vec<ChainNamespace> {
        let mut namespaces: Vec<ChainNamespace> = Vec::new();
        for network in &self.caip_networks {
            if !namespaces.contains(&network.chain_namespace) {
                namespaces.push(network.chain_namespace.clone());
            }
        }
        namespaces
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("chain_namespace", &self.chain_namespace)
            .field("adapter_type", &self.adapter_type)
            .field("default_network", &self.default_network.as_ref().map(|n| &n.id))
            .field("caip_networks", &self.caip_networks.len())
            .finish_non_exhaustive()
    }
}

/// Client pair of the shared fallback adapter.
#[derive(Clone, Default)]
pub struct UniversalAdapter {
    pub network_client: Option<NetworkClientHandle>,
    pub connection_client: Option<ConnectionClientHandle>,
}

impl UniversalAdapter {
    pub fn from_config(config: &AdapterConfig) -> Self {
        Self {
            network_client: config.network_client.clone(),
            connection_client: config.connection_client.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.network_client.is_none() && self.connection_client.is_none()
    }
}

impl fmt::Debug for UniversalAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniversalAdapter")
            .field("network_client", &self.network_client.is_some())
            .field("connection_client", &self.connection_client.is_some())
            .finish()
    }
}

/// Top-level coordinator fields, also used as the change-bus snapshot.
#[derive(Debug, Clone, Default)]
pub struct CoordinatorState {
    pub active_chain: Option<ChainNamespace>,
    pub active_caip_address: Option<CaipAddress>,
    pub active_caip_network: Option<CaipNetwork>,
    pub chains: ChainRegistry,
    /// Held by reference; owned by whoever registered it.
    pub active_connector: Option<Arc<Connector>>,
    pub universal_adapter: UniversalAdapter,
    pub no_adapters: bool,
}

impl CoordinatorState {
    /// Adapter of the active namespace.
    pub fn active_adapter(&self) -> Option<&ChainAdapter> {
        self.chains.get(self.active_chain.as_ref()?)
    }

    /// `namespace` if given, else the active namespace.
    pub fn target<'a>(&'a self, namespace: Option<&'a ChainNamespace>) -> Option<&'a ChainNamespace> {
        namespace.or(self.active_chain.as_ref())
    }

    /// Whether a sub-state change on `namespace` reaches the controllers.
    pub fn should_propagate(&self, namespace: &ChainNamespace, replace: bool) -> bool {
        replace || self.chains.len() == 1 || self.active_chain.as_ref() == Some(namespace)
    }
}

/// Top-level coordinator field, the key of keyed subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    ActiveChain,
    ActiveCaipAddress,
    ActiveCaipNetwork,
    Chains,
    ActiveConnector,
    UniversalAdapter,
    NoAdapters,
}

impl StateKey {
    pub const ALL: [StateKey; 7] = [
        StateKey::ActiveChain,
        StateKey::ActiveCaipAddress,
        StateKey::ActiveCaipNetwork,
        StateKey::Chains,
        StateKey::ActiveConnector,
        StateKey::UniversalAdapter,
        StateKey::NoAdapters,
    ];
}

/// Coarse status published to the public-state mirror.
///
/// `selected_network_id` is doubly optional: `None` leaves the mirrored id
/// untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_chain: Option<ChainNamespace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_network_id: Option<Option<CaipNetworkId>>,
}

impl PublicStateUpdate {
    pub fn active_chain(namespace: ChainNamespace) -> Self {
        Self {
            active_chain: Some(namespace),
            selected_network_id: None,
        }
    }

    pub fn chain_and_network(namespace: ChainNamespace, network: Option<CaipNetworkId>) -> Self {
        Self {
            active_chain: Some(namespace),
            selected_network_id: Some(network),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::presets;

    #[test]
    fn test_adapter_config_fallback_network() {
        let config = AdapterConfig::new(ChainNamespace::solana())
            .with_caip_networks(vec![presets::solana_devnet(), presets::solana_mainnet()]);
        assert_eq!(config.fallback_network(), Some(&presets::solana_devnet()));

        let config = config.with_default_network(presets::solana_mainnet());
        assert_eq!(config.fallback_network(), Some(&presets::solana_mainnet()));

        assert!(AdapterConfig::new(ChainNamespace::bip122())
            .fallback_network()
            .is_none());
    }

    #[test]
    fn test_referenced_namespaces_are_distinct_and_ordered() {
        let config = AdapterConfig::new(ChainNamespace::eip155()).with_caip_networks(vec![
            presets::solana_mainnet(),
            presets::ethereum_mainnet(),
            presets::solana_devnet(),
            presets::polygon_mainnet(),
        ]);
        assert_eq!(
            config.referenced_namespaces(),
            vec![ChainNamespace::solana(), ChainNamespace::eip155()]
        );
    }

    #[test]
    fn test_to_chain_adapter_has_fresh_state() {
        let adapter = AdapterConfig::new(ChainNamespace::eip155())
            .with_adapter_type(AdapterType::Wagmi)
            .with_caip_networks(vec![presets::ethereum_mainnet()])
            .to_chain_adapter();

        assert_eq!(adapter.adapter_type, Some(AdapterType::Wagmi));
        assert_eq!(
            adapter.account_state.as_deref(),
            Some(&AccountState::default())
        );
        assert!(adapter.network_state.as_ref().unwrap().supports_all_networks);
        assert_eq!(adapter.caip_networks.len(), 1);
        assert!(adapter.selected_network_id().is_none());
    }

    #[test]
    fn test_public_state_update_json() {
        let update = PublicStateUpdate::chain_and_network(
            ChainNamespace::solana(),
            Some(presets::solana_mainnet().id),
        );
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(
            json,
            r#"{"activeChain":"solana","selectedNetworkId":"solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp"}"#
        );

        let only_chain = serde_json::to_string(&PublicStateUpdate::active_chain(
            ChainNamespace::eip155(),
        ))
        .unwrap();
        assert_eq!(only_chain, r#"{"activeChain":"eip155"}"#);
    }

    #[test]
    fn test_should_propagate_rules() {
        let mut state = CoordinatorState::default();
        state.chains.register(ChainAdapter::bare(ChainNamespace::eip155()));
        let solana = ChainNamespace::solana();

        assert!(state.should_propagate(&solana, false));

        state.chains.register(ChainAdapter::bare(solana.clone()));
        state.active_chain = Some(ChainNamespace::eip155());
        assert!(!state.should_propagate(&solana, false));
        assert!(state.should_propagate(&solana, true));
        assert!(state.should_propagate(&ChainNamespace::eip155(), false));
    }
}
