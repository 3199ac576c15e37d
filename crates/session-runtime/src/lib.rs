//! # Session Runtime
//!
//! Wires the chain coordinator to the JSON session store, telemetry and a
//! watch-channel public-state mirror. The `ms-session` binary in `main.rs`
//! drives it from the command line.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, session file, environment)
//! 2. Open the session store and wire the coordinator
//! 3. Register the dedicated adapters, then the universal adapter
//! 4. Restore the persisted active network
//!
//! ## Modules
//!
//! - `container/` - configuration and dependency wiring
//! - `adapters/` - latest-state controllers and the watch mirror
//! - `commands` - CLI commands and status reports

pub mod adapters;
pub mod commands;
pub mod container;
pub mod error;

use std::sync::Arc;

use ms_01_chain_coordinator::{AdapterConfig, ChainCoordinator, ChainCoordinatorApi};
use ms_02_session_storage::{KeyValueStore, SessionStorage, SessionStorageApi};
use shared_types::{CaipNetworkId, NetworkPatch};
use tracing::{debug, info};
use uuid::Uuid;

pub use adapters::{LatestState, PublicStatus, WatchPublicState};
pub use commands::{Cli, Command, NamespaceReport, StatusReport};
pub use container::{RuntimeConfig, SessionContainer, SessionFile};
pub use error::RuntimeError;

/// One wired session.
pub struct SessionRuntime {
    config: RuntimeConfig,
    container: SessionContainer,
    run_id: Uuid,
}

impl SessionRuntime {
    /// Open the configured JSON store and wire the coordinator to it.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let container = SessionContainer::new(&config)?;
        Ok(Self::assemble(config, container))
    }

    pub fn with_store(
        config: RuntimeConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, RuntimeError> {
        let container = SessionContainer::with_store(&config, store)?;
        Ok(Self::assemble(config, container))
    }

    fn assemble(config: RuntimeConfig, container: SessionContainer) -> Self {
        let run_id = Uuid::new_v4();
        debug!(run_id = %run_id, "Session runtime created");
        Self {
            config,
            container,
            run_id,
        }
    }

    /// Bring the coordinator up from the session file and the store.
    pub fn start(&self) -> Result<(), RuntimeError> {
        let adapters = self.config.session.adapter_configs()?;
        let universal = self.config.session.universal_config()?;
        info!(
            run_id = %self.run_id,
            adapters = adapters.len(),
            universal = universal.is_some(),
            "Starting session runtime"
        );

        // Read before bring-up, which persists the first adapter's default
        let persisted = self.session().active_caip_network_id();

        let coordinator = self.coordinator();
        coordinator.initialize(adapters.clone());

        if let Some(universal) = universal {
            let universal = self.follow_persisted_namespace(universal, &adapters);
            coordinator.initialize_universal_adapter(universal, &adapters);
        }
        if !adapters.is_empty() {
            self.restore_dedicated_network(persisted);
        }

        if let Some(active) = coordinator.active_caip_network() {
            coordinator.set_chain_network_data(
                Some(&active.chain_namespace),
                NetworkPatch::new().caip_network(Some(active.clone())),
                false,
            )?;
        }

        info!(
            run_id = %self.run_id,
            active_chain = ?coordinator.active_chain().map(|ns| ns.to_string()),
            active_network = ?coordinator.active_caip_network().map(|n| n.id.to_string()),
            "Session runtime started"
        );
        Ok(())
    }

    /// Universal bring-up ends on the adapter's own namespace; tag it with
    /// the persisted network's namespace so the restored network stays
    /// active.
    fn follow_persisted_namespace(
        &self,
        mut universal: AdapterConfig,
        siblings: &[AdapterConfig],
    ) -> AdapterConfig {
        if !siblings.is_empty() {
            return universal;
        }
        if let Some(restored) = self.session().active_caip_network() {
            if universal
                .referenced_namespaces()
                .contains(&restored.chain_namespace)
            {
                universal.chain_namespace = restored.chain_namespace;
            }
        }
        universal
    }

    /// With dedicated adapters nothing is restored during bring-up; select
    /// the persisted network when some adapter carries it.
    fn restore_dedicated_network(&self, persisted: Option<CaipNetworkId>) {
        let Some(id) = persisted else {
            return;
        };
        let Some(network) = self.find_network(&id) else {
            return;
        };
        if !self
            .coordinator()
            .namespaces()
            .contains(&network.chain_namespace)
        {
            debug!(network = %id, "Persisted network has no adapter, keeping default");
            return;
        }
        info!(network = %id, "Restoring persisted active network");
        self.coordinator().set_active_caip_network(Some(network));
    }

    pub fn coordinator(&self) -> &Arc<ChainCoordinator> {
        &self.container.coordinator
    }

    pub fn session(&self) -> &Arc<SessionStorage> {
        &self.container.session
    }

    pub fn public_state(&self) -> &Arc<WatchPublicState> {
        &self.container.public_state
    }

    pub fn container(&self) -> &SessionContainer {
        &self.container
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}
