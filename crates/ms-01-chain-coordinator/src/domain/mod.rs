//! Domain Layer
//!
//! The aggregate, its registry and the values that cross the coordinator's
//! boundary. No I/O.

pub mod clients;
pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod registry;

pub use clients::{
    ApprovedNetworks, ClientError, ConnectionClientHandle, ConnectionControllerClient,
    NetworkClientHandle, NetworkControllerClient,
};
pub use config::CoordinatorConfig;
pub use entities::{
    AdapterConfig, ChainAdapter, CoordinatorState, PublicStateUpdate, StateKey, UniversalAdapter,
};
pub use errors::{ClientFamily, CoordinatorError};
pub use invariants::InvariantViolation;
pub use registry::ChainRegistry;
