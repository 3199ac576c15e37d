//! # Mutations
//!
//! Every write to the aggregate runs as one [`Mutation`]: the operation edits
//! the state in place and queues its outside effects, which are delivered
//! in order only after the state lock has been released. A mutation that
//! queues nothing and changes nothing publishes nothing.

use std::sync::Arc;

use session_telemetry::{metric_inc, COORDINATOR_NAMESPACE_SWITCHES};
use shared_bus::ChangeSet;
use shared_types::{
    AccountPatch, AccountState, CaipAddress, CaipNetwork, ChainNamespace, Connector, NetworkPatch,
    NetworkState,
};
use tracing::{debug, info, warn};

use crate::domain::{
    AdapterConfig, ChainAdapter, CoordinatorError, CoordinatorState, PublicStateUpdate, StateKey,
    UniversalAdapter,
};

/// Outside effect queued by a mutation.
#[derive(Debug, Clone)]
pub(crate) enum Effect {
    Network(Arc<NetworkState>),
    Account(Arc<AccountState>),
    Mirror(PublicStateUpdate),
    PersistNetwork(CaipNetwork),
}

/// Scalar fields compared before and after a mutation.
pub(crate) struct Fingerprint {
    active_chain: Option<ChainNamespace>,
    active_caip_address: Option<CaipAddress>,
    active_caip_network: Option<CaipNetwork>,
    active_connector: Option<Arc<Connector>>,
    no_adapters: bool,
}

impl Fingerprint {
    pub(crate) fn of(state: &CoordinatorState) -> Self {
        Self {
            active_chain: state.active_chain.clone(),
            active_caip_address: state.active_caip_address.clone(),
            active_caip_network: state.active_caip_network.clone(),
            active_connector: state.active_connector.clone(),
            no_adapters: state.no_adapters,
        }
    }

    pub(crate) fn diff(&self, after: &CoordinatorState, changed: &mut ChangeSet<StateKey>) {
        changed.mark_if(
            StateKey::ActiveChain,
            self.active_chain != after.active_chain,
        );
        changed.mark_if(
            StateKey::ActiveCaipAddress,
            self.active_caip_address != after.active_caip_address,
        );
        changed.mark_if(
            StateKey::ActiveCaipNetwork,
            self.active_caip_network != after.active_caip_network,
        );
        let connector_changed = match (&self.active_connector, &after.active_connector) {
            (Some(before), Some(now)) => !Arc::ptr_eq(before, now),
            (None, None) => false,
            _ => true,
        };
        changed.mark_if(StateKey::ActiveConnector, connector_changed);
        changed.mark_if(StateKey::NoAdapters, self.no_adapters != after.no_adapters);
    }
}

pub(crate) struct Mutation<'a> {
    pub(crate) state: &'a mut CoordinatorState,
    effects: Vec<Effect>,
    touched: ChangeSet<StateKey>,
}

impl<'a> Mutation<'a> {
    pub(crate) fn new(state: &'a mut CoordinatorState) -> Self {
        Self {
            state,
            effects: Vec::new(),
            touched: ChangeSet::new(),
        }
    }

    pub(crate) fn finish(self) -> (Vec<Effect>, ChangeSet<StateKey>) {
        (self.effects, self.touched)
    }

    fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn touch(&mut self, key: StateKey) {
        self.touched.insert(key);
    }

    pub(crate) fn register(&mut self, adapter: ChainAdapter) {
        debug!(namespace = %adapter.chain_namespace, "Registering chain adapter");
        self.state.chains.register(adapter);
        self.touch(StateKey::Chains);
    }

    pub(crate) fn initialize(&mut self, adapters: Vec<AdapterConfig>) {
        if adapters.is_empty() {
            info!("No chain adapters configured, the universal adapter serves every request");
            self.state.no_adapters = true;
            return;
        }

        if self.state.no_adapters {
            warn!("Coordinator already initialized without adapters, ignoring adapter list");
            return;
        }

        let first = &adapters[0];
        let namespace = first.chain_namespace.clone();
        info!(
            namespace = %namespace,
            adapters = adapters.len(),
            "Initializing chain coordinator"
        );

        self.state.active_chain = Some(namespace.clone());
        self.emit(Effect::Mirror(PublicStateUpdate::active_chain(namespace)));
        self.set_active_caip_network(first.default_network.clone());

        for config in &adapters {
            self.register(config.to_chain_adapter());
        }
    }

    /// `restored` is the persisted active network, already read and parsed.
    pub(crate) fn initialize_universal(
        &mut self,
        adapter: &AdapterConfig,
        siblings: &[AdapterConfig],
        restored: Option<CaipNetwork>,
    ) {
        info!(
            namespace = %adapter.chain_namespace,
            siblings = siblings.len(),
            "Initializing universal adapter"
        );
        self.state.universal_adapter = UniversalAdapter::from_config(adapter);
        self.touch(StateKey::UniversalAdapter);

        if siblings.is_empty() {
            let network = match restored {
                Some(network) => {
                    info!(network = %network.id, "Restoring persisted active network");
                    Some(network)
                }
                None => adapter.fallback_network().cloned(),
            };

            if let Some(network) = network {
                self.state.active_chain = Some(network.chain_namespace.clone());
                self.set_active_caip_network(Some(network));
            }
        }

        for namespace in adapter.referenced_namespaces() {
            if self.state.chains.contains(&namespace) {
                debug!(namespace = %namespace, "Namespace already has an adapter, keeping it");
                continue;
            }
            let networks: Vec<CaipNetwork> = adapter
                .caip_networks
                .iter()
                .filter(|network| network.chain_namespace == namespace)
                .cloned()
                .collect();

            let mut record = ChainAdapter::bare(namespace).with_caip_networks(Arc::from(networks));
            record.adapter_type = adapter.adapter_type;
            self.register(record);
        }

        self.set_active_chain(Some(&adapter.chain_namespace), None);
    }

    pub(crate) fn set_chain_network_data(
        &mut self,
        namespace: Option<&ChainNamespace>,
        patch: NetworkPatch,
        replace: bool,
    ) -> Result<(), CoordinatorError> {
        let namespace = namespace.ok_or(CoordinatorError::NamespaceRequired {
            operation: "update chain network data",
        })?;

        let propagate = self.state.should_propagate(namespace, replace);
        let Some(adapter) = self.state.chains.get_mut(namespace) else {
            debug!(namespace = %namespace, "No adapter for network update, skipping");
            return Ok(());
        };

        let base = adapter.network_state.as_deref().cloned().unwrap_or_default();
        let next = Arc::new(patch.apply_to(&base));
        adapter.network_state = Some(next.clone());
        self.touch(StateKey::Chains);

        debug!(namespace = %namespace, propagate, "Chain network data updated");
        if propagate {
            self.emit(Effect::Network(next));
        }
        Ok(())
    }

    pub(crate) fn set_chain_account_data(
        &mut self,
        namespace: Option<&ChainNamespace>,
        patch: AccountPatch,
        replace: bool,
    ) -> Result<(), CoordinatorError> {
        let namespace = namespace.ok_or(CoordinatorError::NamespaceRequired {
            operation: "update chain account data",
        })?;
        self.update_account(namespace, patch, replace);
        Ok(())
    }

    fn update_account(&mut self, namespace: &ChainNamespace, patch: AccountPatch, replace: bool) {
        let propagate = self.state.should_propagate(namespace, replace);
        let Some(adapter) = self.state.chains.get_mut(namespace) else {
            debug!(namespace = %namespace, "No adapter for account update, skipping");
            return;
        };

        let base = adapter.account_state.as_deref().cloned().unwrap_or_default();
        let next = Arc::new(patch.apply_to(&base));
        adapter.account_state = Some(next.clone());
        self.touch(StateKey::Chains);

        debug!(
            namespace = %namespace,
            fields = patch.len(),
            propagate,
            "Chain account data updated"
        );
        if propagate {
            if let Some(address) = patch.new_caip_address() {
                self.state.active_caip_address = Some(address.clone());
            }
            self.emit(Effect::Account(next));
        }
    }

    pub(crate) fn set_active_chain(
        &mut self,
        namespace: Option<&ChainNamespace>,
        network: Option<CaipNetwork>,
    ) {
        let Some(namespace) = namespace else {
            return;
        };
        let Some(adapter) = self.state.chains.get(namespace) else {
            debug!(namespace = %namespace, "Namespace not registered, ignoring switch");
            return;
        };
        if self.state.active_chain.as_ref() == Some(namespace) {
            return;
        }

        let previous = self.state.active_chain.replace(namespace.clone());
        self.state.active_caip_address = adapter.caip_address().cloned();
        self.state.active_caip_network = network;
        let needs_reset = adapter.account_state.is_none();
        let needs_network_state = adapter.network_state.is_none();

        info!(
            from = ?previous.as_ref().map(|ns| ns.as_str()),
            to = %namespace,
            "Switching active namespace"
        );
        metric_inc!(COORDINATOR_NAMESPACE_SWITCHES);

        if needs_reset {
            self.reset_known_account(namespace);
        }

        let Some(adapter) = self.state.chains.get_mut(namespace) else {
            return;
        };
        if needs_network_state {
            adapter.network_state = Some(Arc::new(NetworkState::default()));
            self.touched.insert(StateKey::Chains);
        }
        let network_state = adapter.network_state.clone().unwrap_or_default();
        let account_state = adapter.account_state.clone().unwrap_or_default();
        let selected = adapter.selected_network_id().cloned();

        self.emit(Effect::Network(network_state));
        self.emit(Effect::Account(account_state));
        self.emit(Effect::Mirror(PublicStateUpdate::chain_and_network(
            namespace.clone(),
            selected,
        )));
    }

    pub(crate) fn set_active_caip_network(&mut self, network: Option<CaipNetwork>) {
        let Some(network) = network else {
            return;
        };

        if self.state.active_chain.as_ref() != Some(&network.chain_namespace) {
            let namespace = network.chain_namespace.clone();
            self.set_active_chain(Some(&namespace), Some(network));
            return;
        }

        debug!(network = %network.id, "Setting active network");
        self.state.active_caip_network = Some(network.clone());
        self.state.active_chain = Some(network.chain_namespace.clone());
        self.emit(Effect::Mirror(PublicStateUpdate::chain_and_network(
            network.chain_namespace.clone(),
            Some(network.id.clone()),
        )));
        self.emit(Effect::PersistNetwork(network));
    }

    pub(crate) fn set_caip_network(
        &mut self,
        namespace: Option<&ChainNamespace>,
        network: Option<CaipNetwork>,
        should_replace: bool,
    ) -> Result<(), CoordinatorError> {
        if namespace.is_none() {
            return Err(CoordinatorError::NamespaceRequired {
                operation: "update chain network data",
            });
        }

        if let Some(network) = &network {
            if self.state.chains.contains(&network.chain_namespace) {
                self.state.active_chain = Some(network.chain_namespace.clone());
            }
        }
        self.state.active_caip_network = network.clone();

        self.set_chain_network_data(
            namespace,
            NetworkPatch::new().caip_network(network),
            should_replace,
        )
    }

    pub(crate) fn set_active_connector(&mut self, connector: Option<Arc<Connector>>) {
        if let Some(connector) = connector {
            debug!(connector = %connector.id, "Active connector set");
            self.state.active_connector = Some(connector);
        }
    }

    pub(crate) fn reset_account(
        &mut self,
        namespace: Option<&ChainNamespace>,
    ) -> Result<(), CoordinatorError> {
        let namespace = namespace.ok_or(CoordinatorError::NamespaceRequired {
            operation: "reset the account",
        })?;
        self.reset_known_account(namespace);
        Ok(())
    }

    fn reset_known_account(&mut self, namespace: &ChainNamespace) {
        info!(namespace = %namespace, "Resetting account");
        self.state.active_caip_address = None;
        self.update_account(namespace, AccountPatch::disconnected(), true);
    }
}
