//! Adapters Layer
//!
//! In-process implementations of the outbound ports and client handles,
//! used by tests and by the runtime when no UI is attached.

pub mod clients;
pub mod controllers;

pub use clients::{MockConnectionClient, MockNetworkClient};
pub use controllers::{InMemoryPublicState, RecordingAccountController, RecordingNetworkController};
