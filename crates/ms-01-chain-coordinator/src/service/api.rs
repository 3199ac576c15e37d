use std::sync::Arc;

use session_telemetry::{metric_inc, COORDINATOR_CLIENT_RESOLUTIONS};
use shared_types::{
    AccountKey, AccountPatch, AccountProp, CaipNetwork, CaipNetworkId, ChainNamespace, Connector,
    NetworkKey, NetworkPatch, NetworkProp,
};
use tracing::{debug, warn};

use super::core::ChainCoordinator;
use crate::algorithms::resolution::{self, ClientSource};
use crate::domain::{
    AdapterConfig, ClientFamily, ConnectionClientHandle, CoordinatorError, NetworkClientHandle,
};
use crate::ports::inbound::ChainCoordinatorApi;

impl ChainCoordinator {
    fn record_resolution<T>(
        &self,
        family: ClientFamily,
        outcome: Result<(T, ClientSource), CoordinatorError>,
    ) -> Result<T, CoordinatorError> {
        match outcome {
            Ok((client, source)) => {
                debug!(family = %family, source = ?source, "Client resolved");
                metric_inc!(
                    COORDINATOR_CLIENT_RESOLUTIONS,
                    &[family.as_str(), source.label()]
                );
                Ok(client)
            }
            Err(err) => {
                warn!(family = %family, error = %err, "Client resolution failed");
                metric_inc!(COORDINATOR_CLIENT_RESOLUTIONS, &[family.as_str(), "error"]);
                Err(err)
            }
        }
    }

    /// Which side would serve `family` for `namespace`, without handing out
    /// a client. Missing client handles are not checked.
    pub fn client_source(
        &self,
        family: ClientFamily,
        namespace: Option<&ChainNamespace>,
    ) -> Result<ClientSource, CoordinatorError> {
        let hint = match family {
            ClientFamily::Network => self.deps.storage.wallet_id(),
            ClientFamily::Connection => self.deps.storage.connected_connector(),
        };
        let state = self.state.read();
        resolution::decide_source(family, namespace, hint.as_deref(), &state, &self.config)
    }
}

impl ChainCoordinatorApi for ChainCoordinator {
    fn initialize(&self, adapters: Vec<AdapterConfig>) {
        if self.mark_initialized() {
            warn!("Coordinator initialized more than once");
        }
        self.mutate("initialize", |m| m.initialize(adapters));
    }

    fn initialize_universal_adapter(&self, adapter: AdapterConfig, siblings: &[AdapterConfig]) {
        self.mark_initialized();
        let restored = if siblings.is_empty() {
            self.deps.storage.active_caip_network()
        } else {
            None
        };
        self.mutate("initialize_universal_adapter", |m| {
            m.initialize_universal(&adapter, siblings, restored)
        });
    }

    fn set_chain_network_data(
        &self,
        namespace: Option<&ChainNamespace>,
        patch: NetworkPatch,
        replace: bool,
    ) -> Result<(), CoordinatorError> {
        self.mutate("set_chain_network_data", |m| {
            m.set_chain_network_data(namespace, patch, replace)
        })
    }

    fn set_chain_account_data(
        &self,
        namespace: Option<&ChainNamespace>,
        patch: AccountPatch,
        replace: bool,
    ) -> Result<(), CoordinatorError> {
        self.mutate("set_chain_account_data", |m| {
            m.set_chain_account_data(namespace, patch, replace)
        })
    }

    fn set_active_chain(&self, namespace: Option<&ChainNamespace>, network: Option<CaipNetwork>) {
        self.mutate("set_active_chain", |m| m.set_active_chain(namespace, network));
    }

    fn set_active_caip_network(&self, network: Option<CaipNetwork>) {
        self.mutate("set_active_caip_network", |m| {
            m.set_active_caip_network(network)
        });
    }

    fn set_caip_network(
        &self,
        namespace: Option<&ChainNamespace>,
        network: Option<CaipNetwork>,
        should_replace: bool,
    ) -> Result<(), CoordinatorError> {
        self.mutate("set_caip_network", |m| {
            m.set_caip_network(namespace, network, should_replace)
        })
    }

    fn set_active_connector(&self, connector: Option<Arc<Connector>>) {
        self.mutate("set_active_connector", |m| m.set_active_connector(connector));
    }

    fn network_controller_client(
        &self,
        namespace: Option<&ChainNamespace>,
    ) -> Result<NetworkClientHandle, CoordinatorError> {
        let hint = self.deps.storage.wallet_id();
        let outcome = {
            let state = self.state.read();
            resolution::resolve_network_client(namespace, hint.as_deref(), &state, &self.config)
        };
        self.record_resolution(ClientFamily::Network, outcome)
    }

    fn connection_controller_client(
        &self,
        namespace: Option<&ChainNamespace>,
    ) -> Result<ConnectionClientHandle, CoordinatorError> {
        let hint = self.deps.storage.connected_connector();
        let outcome = {
            let state = self.state.read();
            resolution::resolve_connection_client(namespace, hint.as_deref(), &state, &self.config)
        };
        self.record_resolution(ClientFamily::Connection, outcome)
    }

    fn get_account_prop(
        &self,
        key: AccountKey,
        namespace: Option<&ChainNamespace>,
    ) -> Option<AccountProp> {
        let state = self.state.read();
        let target = state.target(namespace)?;
        let account = state.chains.get(target)?.account_state.as_ref()?;
        Some(account.get(key))
    }

    fn get_network_prop(
        &self,
        key: NetworkKey,
        namespace: Option<&ChainNamespace>,
    ) -> Option<NetworkProp> {
        let state = self.state.read();
        let target = state.target(namespace)?;
        let network = state.chains.get(target)?.network_state.as_ref()?;
        Some(network.get(key))
    }

    fn get_all_approved_caip_networks(&self) -> Vec<CaipNetworkId> {
        let state = self.state.read();
        state
            .chains
            .iter()
            .filter_map(|adapter| adapter.network_state.as_ref())
            .filter_map(|network| network.approved_caip_network_ids.as_ref())
            .flatten()
            .cloned()
            .collect()
    }

    fn reset_account(&self, namespace: Option<&ChainNamespace>) -> Result<(), CoordinatorError> {
        self.mutate("reset_account", |m| m.reset_account(namespace))
    }
}
