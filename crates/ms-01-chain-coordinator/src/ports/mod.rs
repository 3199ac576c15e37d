//! Ports Layer
//!
//! - `inbound`: the coordinator API driven by bring-up code and wallet events
//! - `outbound`: the controllers and mirror the coordinator publishes to

pub mod inbound;
pub mod outbound;

pub use inbound::ChainCoordinatorApi;
pub use outbound::{AccountController, NetworkController, PublicStateMirror};
