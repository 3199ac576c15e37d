//! # Shared Types Crate
//!
//! Value types shared by every crate in the workspace: chain-agnostic
//! identifiers, per-namespace account and network snapshots, the partial
//! updates applied to them, and connector descriptors.
//!
//! ## Design Principles
//!
//! - **Immutable snapshots**: `AccountState` and `NetworkState` are replaced
//!   as whole values; `AccountPatch`/`NetworkPatch` describe the change.
//! - **Validated identifiers**: CAIP-2/CAIP-10 strings are parsed once at the
//!   edge and carried as typed values afterwards.

pub mod account;
pub mod caip;
pub mod connector;
pub mod errors;
pub mod network;
pub mod presets;

pub use account::{
    AccountEntry, AccountKey, AccountPatch, AccountProp, AccountState, AccountStatus, AccountType,
    ConnectedWalletInfo, TokenBalance,
};
pub use caip::{CaipAddress, CaipNetwork, CaipNetworkId, ChainNamespace};
pub use connector::{AdapterType, Connector, ConnectorType, WALLET_CONNECT_CONNECTOR_ID};
pub use errors::CaipError;
pub use network::{NetworkKey, NetworkPatch, NetworkProp, NetworkState};
