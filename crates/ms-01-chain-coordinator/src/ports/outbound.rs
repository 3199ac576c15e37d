//! Outbound Ports (Driven Ports)
//!
//! State receivers the coordinator is the only writer of. Each receives a
//! complete replacement value; nothing is merged on the receiving side.
//!
//! Persistence goes through [`ms_02_session_storage::SessionStorageApi`],
//! which absorbs storage failures before they reach the coordinator.

use std::sync::Arc;

use shared_types::{AccountState, NetworkState};

use crate::domain::PublicStateUpdate;

/// Receiver of the active namespace's network sub-state.
pub trait NetworkController: Send + Sync {
    fn replace_state(&self, state: Arc<NetworkState>);
}

/// Receiver of the active namespace's account sub-state.
pub trait AccountController: Send + Sync {
    fn replace_state(&self, state: Arc<AccountState>);
}

/// Fire-and-forget coarse status for UI observers.
pub trait PublicStateMirror: Send + Sync {
    fn set(&self, update: PublicStateUpdate);
}
