//! Public-state mirror over a `tokio::sync::watch` channel.
//!
//! Receivers see the folded status, never the individual updates; a burst
//! of updates may wake an observer once.

use serde::Serialize;
use shared_types::{CaipNetworkId, ChainNamespace};
use tokio::sync::watch;
use tracing::trace;

use ms_01_chain_coordinator::{PublicStateMirror, PublicStateUpdate};

/// Coarse status as seen by observers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStatus {
    pub active_chain: Option<ChainNamespace>,
    pub selected_network_id: Option<CaipNetworkId>,
}

impl PublicStatus {
    /// Fold an update in; returns whether anything changed.
    pub fn apply(&mut self, update: PublicStateUpdate) -> bool {
        let before = self.clone();
        if let Some(namespace) = update.active_chain {
            self.active_chain = Some(namespace);
        }
        if let Some(network) = update.selected_network_id {
            self.selected_network_id = network;
        }
        *self != before
    }
}

#[derive(Debug)]
pub struct WatchPublicState {
    tx: watch::Sender<PublicStatus>,
}

impl Default for WatchPublicState {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(PublicStatus::default());
        Self { tx }
    }
}

impl WatchPublicState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> watch::Receiver<PublicStatus> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> PublicStatus {
        self.tx.borrow().clone()
    }
}

impl PublicStateMirror for WatchPublicState {
    fn set(&self, update: PublicStateUpdate) {
        let changed = self.tx.send_if_modified(|status| status.apply(update));
        trace!(changed, "Public status updated");
    }
}
