use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ms_02_session_storage::SessionStorageApi;
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use session_telemetry::{metric_add, metric_inc, BUS_NOTIFICATIONS, COORDINATOR_PROPAGATIONS};
use shared_bus::{ChangeBus, ChangePublisher, ChangeSet};
use shared_types::{CaipAddress, CaipNetwork, ChainNamespace, Connector};
use tracing::{debug, warn};

use super::mutation::{Effect, Fingerprint, Mutation};
use crate::domain::{
    invariants, ChainAdapter, CoordinatorConfig, CoordinatorError, CoordinatorState, StateKey,
};
use crate::ports::outbound::{AccountController, NetworkController, PublicStateMirror};

/// Collaborators the coordinator publishes to and persists through.
#[derive(Clone)]
pub struct CoordinatorDependencies {
    pub network_controller: Arc<dyn NetworkController>,
    pub account_controller: Arc<dyn AccountController>,
    pub public_state: Arc<dyn PublicStateMirror>,
    pub storage: Arc<dyn SessionStorageApi>,
}

/// The chain state coordinator.
///
/// One instance per process. Call `initialize` (and optionally
/// `initialize_universal_adapter`) before any other operation.
///
/// Mutations are serialized by a re-entrant writer lock, so a change
/// callback may itself call back into the coordinator on the same thread.
/// Changes made that way are published after the current pass, against the
/// latest committed state. Reads take only the state lock and never observe a half-applied
/// mutation.
///
/// # Example
///
/// ```rust,ignore
/// use ms_01_chain_coordinator::{AdapterConfig, ChainCoordinator, ChainCoordinatorApi};
///
/// let coordinator = ChainCoordinator::new(deps, CoordinatorConfig::default())?;
/// coordinator.initialize(vec![
///     AdapterConfig::new(ChainNamespace::eip155()).with_default_network(presets::ethereum_mainnet()),
/// ]);
/// coordinator.set_active_caip_network(Some(presets::polygon_mainnet()));
/// ```
pub struct ChainCoordinator {
    writer: ReentrantMutex<()>,
    pub(crate) state: RwLock<CoordinatorState>,
    pub(crate) bus: ChangeBus<StateKey, CoordinatorState>,
    pub(crate) deps: CoordinatorDependencies,
    pub(crate) config: CoordinatorConfig,
    initialized: AtomicBool,
    publishing: AtomicBool,
    pending: Mutex<ChangeSet<StateKey>>,
}

impl ChainCoordinator {
    pub fn new(
        deps: CoordinatorDependencies,
        config: CoordinatorConfig,
    ) -> Result<Self, CoordinatorError> {
        config.validate()?;
        Ok(Self {
            writer: ReentrantMutex::new(()),
            state: RwLock::new(CoordinatorState::default()),
            bus: ChangeBus::new(),
            deps,
            config,
            initialized: AtomicBool::new(false),
            publishing: AtomicBool::new(false),
            pending: Mutex::new(ChangeSet::new()),
        })
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Whether a bring-up call has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    #[cfg(test)]
    pub(crate) fn is_publishing(&self) -> bool {
        self.publishing.load(Ordering::Acquire)
    }

    /// Record a bring-up call; returns whether one had already run.
    pub(crate) fn mark_initialized(&self) -> bool {
        self.initialized.swap(true, Ordering::AcqRel)
    }

    /// Run `operation` as one atomic mutation.
    ///
    /// Effects are delivered after the state lock is released, then the bus
    /// is notified with the committed snapshot.
    pub(crate) fn mutate<R>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut Mutation<'_>) -> R,
    ) -> R {
        let _writer = self.writer.lock();

        let (result, effects, changed) = {
            let mut state = self.state.write();
            let before = Fingerprint::of(&state);

            let mut mutation = Mutation::new(&mut state);
            let result = apply(&mut mutation);
            let (effects, mut changed) = mutation.finish();
            before.diff(&state, &mut changed);

            if let Err(violation) = invariants::check_all(&state) {
                warn!(operation, ?violation, "Coordinator invariant violated");
            }

            (result, effects, changed)
        };

        debug!(
            operation,
            effects = effects.len(),
            changed = ?changed,
            "Mutation committed"
        );
        self.deliver(effects);
        self.notify(changed);
        result
    }

    fn deliver(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Network(state) => {
                    metric_inc!(COORDINATOR_PROPAGATIONS, &["network"]);
                    self.deps.network_controller.replace_state(state);
                }
                Effect::Account(state) => {
                    metric_inc!(COORDINATOR_PROPAGATIONS, &["account"]);
                    self.deps.account_controller.replace_state(state);
                }
                Effect::Mirror(update) => self.deps.public_state.set(update),
                Effect::PersistNetwork(network) => {
                    self.deps.storage.set_active_caip_network(&network)
                }
            }
        }
    }

    /// Publish `changed`. Called with the writer lock held.
    ///
    /// A mutation made by a callback lands here while a pass is running; its
    /// keys are queued and published in a further pass once the current one
    /// finishes, so the last value any listener sees is the committed one.
    fn notify(&self, changed: ChangeSet<StateKey>) {
        if changed.is_empty() {
            return;
        }
        if self.publishing.swap(true, Ordering::AcqRel) {
            self.pending.lock().merge(changed);
            return;
        }
        let _publishing = PublishingGuard(&self.publishing);

        let mut changed = changed;
        loop {
            let snapshot = self.state.read().clone();
            let delivered = self.bus.publish(&changed, &snapshot);
            if delivered > 0 {
                metric_add!(BUS_NOTIFICATIONS, delivered);
            }

            let queued = std::mem::take(&mut *self.pending.lock());
            if queued.is_empty() {
                break;
            }
            debug!(changed = ?queued, "Publishing changes made by callbacks");
            changed = queued;
        }
    }

    /// Insert a prebuilt record, replacing any previous one for its
    /// namespace.
    pub fn register_chain_adapter(&self, adapter: ChainAdapter) {
        self.mutate("register_chain_adapter", |m| m.register(adapter));
    }

    // Snapshot reads

    pub fn active_chain(&self) -> Option<ChainNamespace> {
        self.state.read().active_chain.clone()
    }

    pub fn active_caip_network(&self) -> Option<CaipNetwork> {
        self.state.read().active_caip_network.clone()
    }

    pub fn active_caip_address(&self) -> Option<CaipAddress> {
        self.state.read().active_caip_address.clone()
    }

    pub fn active_connector(&self) -> Option<Arc<Connector>> {
        self.state.read().active_connector.clone()
    }

    pub fn no_adapters(&self) -> bool {
        self.state.read().no_adapters
    }

    pub fn chain_adapter(&self, namespace: &ChainNamespace) -> Option<ChainAdapter> {
        self.state.read().chains.get(namespace).cloned()
    }

    /// Registered namespaces in registration order.
    pub fn namespaces(&self) -> Vec<ChainNamespace> {
        self.state.read().chains.namespaces()
    }

    /// Copy of the whole aggregate.
    pub fn snapshot(&self) -> CoordinatorState {
        self.state.read().clone()
    }
}

/// Clears the publishing flag even if a callback panics.
struct PublishingGuard<'a>(&'a AtomicBool);

impl Drop for PublishingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
