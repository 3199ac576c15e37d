//! # Client Handles
//!
//! Per-namespace clients that perform network and connection operations on
//! behalf of the UI. The coordinator stores and hands out these handles; it
//! never calls them itself and does not own them.

use std::sync::Arc;

use shared_types::{CaipNetwork, CaipNetworkId, ChainNamespace};

/// Failure reported by a client implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Wallet rejected the request: {0}")]
    Rejected(String),

    #[error("Network {0} is not supported by the wallet")]
    UnsupportedNetwork(CaipNetworkId),

    #[error("Client failure: {0}")]
    Other(String),
}

/// Networks the connected wallet approved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovedNetworks {
    pub approved_caip_network_ids: Vec<CaipNetworkId>,
    pub supports_all_networks: bool,
}

pub trait NetworkControllerClient: Send + Sync {
    /// Ask the wallet to switch to `network`.
    fn switch_caip_network(&self, network: &CaipNetwork) -> Result<(), ClientError>;

    fn approved_caip_networks_data(&self) -> Result<ApprovedNetworks, ClientError>;
}

pub trait ConnectionControllerClient: Send + Sync {
    /// Start a connection through the connector with `connector_id`.
    fn connect(
        &self,
        connector_id: &str,
        chain: Option<&ChainNamespace>,
    ) -> Result<(), ClientError>;

    fn disconnect(&self) -> Result<(), ClientError>;
}

pub type NetworkClientHandle = Arc<dyn NetworkControllerClient>;
pub type ConnectionClientHandle = Arc<dyn ConnectionControllerClient>;
