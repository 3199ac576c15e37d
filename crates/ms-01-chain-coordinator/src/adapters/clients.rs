//! Scriptable client handles.

use parking_lot::Mutex;
use shared_types::{CaipNetwork, CaipNetworkId, ChainNamespace};

use crate::domain::{
    ApprovedNetworks, ClientError, ConnectionControllerClient, NetworkControllerClient,
};

/// Network client that records switch requests.
#[derive(Debug)]
pub struct MockNetworkClient {
    label: String,
    approved: Mutex<ApprovedNetworks>,
    switches: Mutex<Vec<CaipNetworkId>>,
    reject_switches: bool,
}

impl MockNetworkClient {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            approved: Mutex::new(ApprovedNetworks {
                approved_caip_network_ids: Vec::new(),
                supports_all_networks: true,
            }),
            switches: Mutex::new(Vec::new()),
            reject_switches: false,
        }
    }

    /// A client whose wallet refuses every switch.
    pub fn rejecting(label: impl Into<String>) -> Self {
        Self {
            reject_switches: true,
            ..Self::new(label)
        }
    }

    /// Identifies which client a resolution returned.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_approved(&self, ids: Vec<CaipNetworkId>, supports_all_networks: bool) {
        *self.approved.lock() = ApprovedNetworks {
            approved_caip_network_ids: ids,
            supports_all_networks,
        };
    }

    pub fn switches(&self) -> Vec<CaipNetworkId> {
        self.switches.lock().clone()
    }
}

impl NetworkControllerClient for MockNetworkClient {
    fn switch_caip_network(&self, network: &CaipNetwork) -> Result<(), ClientError> {
        if self.reject_switches {
            return Err(ClientError::Rejected(format!(
                "{} refused {}",
                self.label, network.id
            )));
        }
        self.switches.lock().push(network.id.clone());
        Ok(())
    }

    fn approved_caip_networks_data(&self) -> Result<ApprovedNetworks, ClientError> {
        Ok(self.approved.lock().clone())
    }
}

/// Connection client that tracks whether it is connected.
#[derive(Debug)]
pub struct MockConnectionClient {
    label: String,
    connected: Mutex<Option<String>>,
    connects: Mutex<u32>,
}

impl MockConnectionClient {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            connected: Mutex::new(None),
            connects: Mutex::new(0),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Connector id of the live connection.
    pub fn connected_via(&self) -> Option<String> {
        self.connected.lock().clone()
    }

    pub fn connect_count(&self) -> u32 {
        *self.connects.lock()
    }
}

impl ConnectionControllerClient for MockConnectionClient {
    fn connect(
        &self,
        connector_id: &str,
        _chain: Option<&ChainNamespace>,
    ) -> Result<(), ClientError> {
        *self.connects.lock() += 1;
        *self.connected.lock() = Some(connector_id.to_string());
        Ok(())
    }

    fn disconnect(&self) -> Result<(), ClientError> {
        self.connected.lock().take();
        Ok(())
    }
}
