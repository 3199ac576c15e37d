//! Inbound Ports (Driving Ports)
//!
//! The coordinator API. Bring-up code calls `initialize` (and optionally
//! `initialize_universal_adapter`) once before anything else; wallet events
//! and UI actions drive the rest.

use std::sync::Arc;

use shared_types::{
    AccountKey, AccountPatch, AccountProp, CaipNetwork, CaipNetworkId, ChainNamespace, Connector,
    NetworkKey, NetworkPatch, NetworkProp,
};

use crate::domain::{AdapterConfig, ConnectionClientHandle, CoordinatorError, NetworkClientHandle};

pub trait ChainCoordinatorApi: Send + Sync {
    /// Register the configured adapters and activate the first one.
    ///
    /// An empty list only sets `no_adapters`.
    fn initialize(&self, adapters: Vec<AdapterConfig>);

    /// Store the universal client pair and register a bare adapter for every
    /// namespace its networks reference that has no adapter yet.
    ///
    /// With no `siblings`, the persisted active network is restored first.
    fn initialize_universal_adapter(&self, adapter: AdapterConfig, siblings: &[AdapterConfig]);

    /// Merge `patch` into the namespace's network sub-state.
    ///
    /// Reaches the network controller when `replace` is set, the registry
    /// holds a single namespace, or `namespace` is active.
    fn set_chain_network_data(
        &self,
        namespace: Option<&ChainNamespace>,
        patch: NetworkPatch,
        replace: bool,
    ) -> Result<(), CoordinatorError>;

    /// Merge `patch` into the namespace's account sub-state.
    ///
    /// Same propagation rule as [`Self::set_chain_network_data`]. A
    /// propagated patch carrying an address also makes it the active one.
    fn set_chain_account_data(
        &self,
        namespace: Option<&ChainNamespace>,
        patch: AccountPatch,
        replace: bool,
    ) -> Result<(), CoordinatorError>;

    fn set_account_prop(
        &self,
        prop: AccountProp,
        namespace: Option<&ChainNamespace>,
        replace: bool,
    ) -> Result<(), CoordinatorError> {
        self.set_chain_account_data(namespace, AccountPatch::from(prop), replace)
    }

    /// Make `namespace` active and republish its sub-states.
    ///
    /// No-op when the namespace is missing, unregistered or already active.
    fn set_active_chain(&self, namespace: Option<&ChainNamespace>, network: Option<CaipNetwork>);

    /// Switch network, switching namespace first if the network lives in
    /// another one. Same-namespace switches are persisted.
    fn set_active_caip_network(&self, network: Option<CaipNetwork>);

    /// Set the active network without a namespace switch and record it in
    /// the namespace's network sub-state.
    fn set_caip_network(
        &self,
        namespace: Option<&ChainNamespace>,
        network: Option<CaipNetwork>,
        should_replace: bool,
    ) -> Result<(), CoordinatorError>;

    /// Hold `connector` by reference. `None` is ignored.
    fn set_active_connector(&self, connector: Option<Arc<Connector>>);

    fn network_controller_client(
        &self,
        namespace: Option<&ChainNamespace>,
    ) -> Result<NetworkClientHandle, CoordinatorError>;

    fn connection_controller_client(
        &self,
        namespace: Option<&ChainNamespace>,
    ) -> Result<ConnectionClientHandle, CoordinatorError>;

    /// `None` when no namespace resolves or it has no account sub-state.
    fn get_account_prop(
        &self,
        key: AccountKey,
        namespace: Option<&ChainNamespace>,
    ) -> Option<AccountProp>;

    fn get_network_prop(
        &self,
        key: NetworkKey,
        namespace: Option<&ChainNamespace>,
    ) -> Option<NetworkProp>;

    /// Approved ids of every namespace, in registry order, duplicates kept.
    fn get_all_approved_caip_networks(&self) -> Vec<CaipNetworkId>;

    /// Clear the active address and force the disconnected account state
    /// onto `namespace`, always propagating.
    fn reset_account(&self, namespace: Option<&ChainNamespace>) -> Result<(), CoordinatorError>;
}
