//! Wiring shared by the integration flows.

use std::sync::Arc;

use ms_01_chain_coordinator::{
    AdapterConfig, ChainCoordinator, CoordinatorConfig, CoordinatorDependencies,
    InMemoryPublicState, RecordingAccountController, RecordingNetworkController,
};
use ms_02_session_storage::{InMemoryStore, KeyValueStore, SafeStorage, SessionStorage};
use shared_types::{presets, AdapterType, CaipAddress, ChainNamespace};

pub(crate) struct Wired {
    pub coordinator: Arc<ChainCoordinator>,
    pub network: Arc<RecordingNetworkController>,
    pub account: Arc<RecordingAccountController>,
    pub mirror: Arc<InMemoryPublicState>,
    pub session: Arc<SessionStorage>,
}

impl Wired {
    pub fn clear_recordings(&self) {
        self.network.clear();
        self.account.clear();
    }
}

pub(crate) fn wire(store: Arc<dyn KeyValueStore>) -> Wired {
    let network = Arc::new(RecordingNetworkController::new());
    let account = Arc::new(RecordingAccountController::new());
    let mirror = Arc::new(InMemoryPublicState::new());
    let session = Arc::new(SessionStorage::new(SafeStorage::new(store)));

    let deps = CoordinatorDependencies {
        network_controller: network.clone(),
        account_controller: account.clone(),
        public_state: mirror.clone(),
        storage: session.clone(),
    };
    let coordinator = ChainCoordinator::new(deps, CoordinatorConfig::default())
        .expect("default coordinator config is valid");

    Wired {
        coordinator: Arc::new(coordinator),
        network,
        account,
        mirror,
        session,
    }
}

pub(crate) fn wire_in_memory() -> Wired {
    wire(Arc::new(InMemoryStore::new()))
}

pub(crate) fn evm() -> AdapterConfig {
    AdapterConfig::new(ChainNamespace::eip155())
        .with_default_network(presets::ethereum_mainnet())
        .with_caip_networks(vec![presets::ethereum_mainnet(), presets::polygon_mainnet()])
}

pub(crate) fn solana() -> AdapterConfig {
    AdapterConfig::new(ChainNamespace::solana())
        .with_adapter_type(AdapterType::Solana)
        .with_default_network(presets::solana_mainnet())
        .with_caip_networks(vec![presets::solana_mainnet(), presets::solana_devnet()])
}

/// Universal adapter tagged with `namespace` over the stock networks.
pub(crate) fn universal(namespace: ChainNamespace) -> AdapterConfig {
    AdapterConfig::new(namespace)
        .with_adapter_type(AdapterType::Universal)
        .with_caip_networks(presets::all())
}

pub(crate) fn evm_address() -> CaipAddress {
    "eip155:1:0xab16a96D359eC26a11e2C2b3d8f8B8942d5Bfcdb"
        .parse()
        .expect("valid CAIP-10 address")
}

pub(crate) fn solana_address() -> CaipAddress {
    "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp:7S3P4HxJpyyigGzodYwHtCxZyUQe9JiBMHyRWXArAaKv"
        .parse()
        .expect("valid CAIP-10 address")
}
