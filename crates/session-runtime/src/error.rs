//! Runtime errors.

use ms_01_chain_coordinator::CoordinatorError;
use shared_types::{CaipError, CaipNetworkId, ChainNamespace};
use thiserror::Error;

use crate::container::config::ConfigError;
use crate::container::session::ContainerError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),

    #[error(transparent)]
    Identifier(#[from] CaipError),

    #[error("Network {0} is not configured")]
    UnknownNetwork(CaipNetworkId),

    #[error("Namespace {0} has no adapter")]
    NamespaceNotRegistered(ChainNamespace),
}
