//! # Chain Coordinator (ms-01)
//!
//! Owns the wallet session state of every blockchain namespace, decides
//! which client serves a network or connection request, and publishes the
//! active namespace's state to the network and account controllers.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): aggregate, adapter registry, errors
//!   - `CoordinatorState`: the guarded aggregate and bus snapshot
//!   - `ChainRegistry`: namespace -> `ChainAdapter`, insertion ordered
//!   - `CoordinatorConfig`: resolution markers
//! - **Algorithms** (`algorithms/`): the client resolution policy
//! - **Ports Layer** (`ports/`)
//!   - `ChainCoordinatorApi`: driving port
//!   - `NetworkController`, `AccountController`, `PublicStateMirror`: driven ports
//! - **Adapters Layer** (`adapters/`): recording controllers, mock clients
//! - **Service Layer** (`service/`): `ChainCoordinator`
//!
//! ## Propagation Rule
//!
//! A sub-state update reaches the controllers when it is forced, when only
//! one namespace is registered, or when it targets the active namespace.
//! Other updates are stored and published the next time their namespace
//! becomes active.
//!
//! ## Invariants
//!
//! - The active namespace, when set, is registered.
//! - A record's namespace equals its registry key.
//! - Sub-states are replaced as whole values, never edited in place.
//! - The active address follows the active namespace's account, except
//!   during a reset, which clears it first.
//!
//! ## Usage Example
//!
//! ```ignore
//! use ms_01_chain_coordinator::{AdapterConfig, ChainCoordinatorApi};
//! use shared_types::{presets, ChainNamespace, NetworkPatch};
//!
//! coordinator.initialize(vec![
//!     AdapterConfig::new(ChainNamespace::eip155()).with_default_network(presets::ethereum_mainnet()),
//!     AdapterConfig::new(ChainNamespace::solana()).with_default_network(presets::solana_mainnet()),
//! ]);
//!
//! // Stored for solana, not propagated while eip155 is active
//! coordinator.set_chain_network_data(
//!     Some(&ChainNamespace::solana()),
//!     NetworkPatch::new().caip_network(Some(presets::solana_devnet())),
//!     false,
//! )?;
//!
//! // Publishes solana's stored network state
//! coordinator.set_active_chain(Some(&ChainNamespace::solana()), None);
//! ```

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{
    InMemoryPublicState, MockConnectionClient, MockNetworkClient, RecordingAccountController,
    RecordingNetworkController,
};
pub use algorithms::ClientSource;
pub use domain::{
    AdapterConfig, ApprovedNetworks, ChainAdapter, ChainRegistry, ClientError, ClientFamily,
    ConnectionClientHandle, ConnectionControllerClient, CoordinatorConfig, CoordinatorError,
    CoordinatorState, NetworkClientHandle, NetworkControllerClient, PublicStateUpdate, StateKey,
    UniversalAdapter,
};
pub use ports::{AccountController, ChainCoordinatorApi, NetworkController, PublicStateMirror};
pub use service::{ChainCoordinator, CoordinatorDependencies};
