//! # Network Sub-State
//!
//! Per-namespace network snapshot: the selected network, what the wallet
//! approved, and capability flags.

use serde::{Deserialize, Serialize};

use crate::caip::{CaipNetwork, CaipNetworkId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkState {
    pub caip_network: Option<CaipNetwork>,
    pub requested_caip_networks: Option<Vec<CaipNetwork>>,
    /// Network ids the connected wallet approved, in wallet order.
    pub approved_caip_network_ids: Option<Vec<CaipNetworkId>>,
    pub supports_all_networks: bool,
    pub is_default_caip_network: bool,
    /// EVM chain ids where smart accounts are available.
    pub smart_account_enabled_networks: Vec<u64>,
}

impl Default for NetworkState {
    fn default() -> Self {
        Self {
            caip_network: None,
            requested_caip_networks: None,
            approved_caip_network_ids: None,
            supports_all_networks: true,
            is_default_caip_network: false,
            smart_account_enabled_networks: Vec::new(),
        }
    }
}

/// A single named network field together with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkProp {
    CaipNetwork(Option<CaipNetwork>),
    RequestedCaipNetworks(Option<Vec<CaipNetwork>>),
    ApprovedCaipNetworkIds(Option<Vec<CaipNetworkId>>),
    SupportsAllNetworks(bool),
    IsDefaultCaipNetwork(bool),
    SmartAccountEnabledNetworks(Vec<u64>),
}

/// Name of a network field, used for keyed reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkKey {
    CaipNetwork,
    RequestedCaipNetworks,
    ApprovedCaipNetworkIds,
    SupportsAllNetworks,
    IsDefaultCaipNetwork,
    SmartAccountEnabledNetworks,
}

impl NetworkState {
    /// Read one field as a tagged value.
    pub fn get(&self, key: NetworkKey) -> NetworkProp {
        match key {
            NetworkKey::CaipNetwork => NetworkProp::CaipNetwork(self.caip_network.clone()),
            NetworkKey::RequestedCaipNetworks => {
                NetworkProp::RequestedCaipNetworks(self.requested_caip_networks.clone())
            }
            NetworkKey::ApprovedCaipNetworkIds => {
                NetworkProp::ApprovedCaipNetworkIds(self.approved_caip_network_ids.clone())
            }
            NetworkKey::SupportsAllNetworks => {
                NetworkProp::SupportsAllNetworks(self.supports_all_networks)
            }
            NetworkKey::IsDefaultCaipNetwork => {
                NetworkProp::IsDefaultCaipNetwork(self.is_default_caip_network)
            }
            NetworkKey::SmartAccountEnabledNetworks => {
                NetworkProp::SmartAccountEnabledNetworks(self.smart_account_enabled_networks.clone())
            }
        }
    }
}

impl NetworkProp {
    pub fn key(&self) -> NetworkKey {
        match self {
            NetworkProp::CaipNetwork(_) => NetworkKey::CaipNetwork,
            NetworkProp::RequestedCaipNetworks(_) => NetworkKey::RequestedCaipNetworks,
            NetworkProp::ApprovedCaipNetworkIds(_) => NetworkKey::ApprovedCaipNetworkIds,
            NetworkProp::SupportsAllNetworks(_) => NetworkKey::SupportsAllNetworks,
            NetworkProp::IsDefaultCaipNetwork(_) => NetworkKey::IsDefaultCaipNetwork,
            NetworkProp::SmartAccountEnabledNetworks(_) => NetworkKey::SmartAccountEnabledNetworks,
        }
    }

    fn apply(&self, state: &mut NetworkState) {
        match self.clone() {
            NetworkProp::CaipNetwork(v) => state.caip_network = v,
            NetworkProp::RequestedCaipNetworks(v) => state.requested_caip_networks = v,
            NetworkProp::ApprovedCaipNetworkIds(v) => state.approved_caip_network_ids = v,
            NetworkProp::SupportsAllNetworks(v) => state.supports_all_networks = v,
            NetworkProp::IsDefaultCaipNetwork(v) => state.is_default_caip_network = v,
            NetworkProp::SmartAccountEnabledNetworks(v) => {
                state.smart_account_enabled_networks = v
            }
        }
    }
}

/// Shallow partial update of a [`NetworkState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkPatch {
    props: Vec<NetworkProp>,
}

impl NetworkPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, prop: NetworkProp) -> Self {
        self.props.push(prop);
        self
    }

    pub fn caip_network(self, network: Option<CaipNetwork>) -> Self {
        self.with(NetworkProp::CaipNetwork(network))
    }

    pub fn approved_caip_network_ids(self, ids: Vec<CaipNetworkId>) -> Self {
        self.with(NetworkProp::ApprovedCaipNetworkIds(Some(ids)))
    }

    pub fn supports_all_networks(self, supported: bool) -> Self {
        self.with(NetworkProp::SupportsAllNetworks(supported))
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Produce the merged snapshot; `base` is left untouched.
    pub fn apply_to(&self, base: &NetworkState) -> NetworkState {
        let mut next = base.clone();
        for prop in &self.props {
            prop.apply(&mut next);
        }
        next
    }
}

impl From<NetworkProp> for NetworkPatch {
    fn from(prop: NetworkProp) -> Self {
        Self { props: vec![prop] }
    }
}

impl FromIterator<NetworkProp> for NetworkPatch {
    fn from_iter<I: IntoIterator<Item = NetworkProp>>(iter: I) -> Self {
        Self {
            props: iter.into_iter().collect(),
        }
    }
}
