//! Dependency wiring for one session.

use std::sync::Arc;

use ms_01_chain_coordinator::{ChainCoordinator, CoordinatorDependencies, CoordinatorError};
use ms_02_session_storage::{
    JsonFileStore, KeyValueStore, SafeStorage, SessionStorage, StorageError,
};
use shared_types::{AccountState, NetworkState};
use thiserror::Error;
use tracing::info;

use super::config::RuntimeConfig;
use crate::adapters::{LatestState, WatchPublicState};

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Failed to open session store: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid coordinator configuration: {0}")]
    Coordinator(#[from] CoordinatorError),
}

/// Everything one session needs, created in dependency order: store,
/// session helpers, controllers and mirror, then the coordinator.
pub struct SessionContainer {
    pub session: Arc<SessionStorage>,
    pub network_controller: Arc<LatestState<NetworkState>>,
    pub account_controller: Arc<LatestState<AccountState>>,
    pub public_state: Arc<WatchPublicState>,
    pub coordinator: Arc<ChainCoordinator>,
}

impl SessionContainer {
    /// Wire a session backed by the JSON file named in `config`.
    pub fn new(config: &RuntimeConfig) -> Result<Self, ContainerError> {
        info!(path = %config.storage.path.display(), "Opening session store");
        let store = JsonFileStore::open(&config.storage.path)?;
        Self::with_store(config, Arc::new(store))
    }

    /// Wire a session over an arbitrary store.
    pub fn with_store(
        config: &RuntimeConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ContainerError> {
        let session = Arc::new(SessionStorage::new(SafeStorage::new(store)));
        let network_controller = Arc::new(LatestState::new());
        let account_controller = Arc::new(LatestState::new());
        let public_state = Arc::new(WatchPublicState::new());

        let deps = CoordinatorDependencies {
            network_controller: network_controller.clone(),
            account_controller: account_controller.clone(),
            public_state: public_state.clone(),
            storage: session.clone(),
        };
        let coordinator = Arc::new(ChainCoordinator::new(deps, config.coordinator.clone())?);

        Ok(Self {
            session,
            network_controller,
            account_controller,
            public_state,
            coordinator,
        })
    }
}
