//! # Chain-Agnostic Identifiers
//!
//! CAIP-2 network identifiers (`namespace:reference`), CAIP-10 account
//! addresses (`namespace:reference:address`) and the network descriptor that
//! the coordinator persists as the active network.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CaipError;

/// Identifier of a blockchain family (`eip155`, `solana`, `bip122`, ...).
///
/// Opaque to the coordinator; only equality and hashing matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainNamespace(String);

impl ChainNamespace {
    /// EVM-compatible chains.
    pub const EIP155: &'static str = "eip155";
    /// Solana clusters.
    pub const SOLANA: &'static str = "solana";
    /// Bitcoin networks.
    pub const BIP122: &'static str = "bip122";
    /// Polkadot relay chains and parachains.
    pub const POLKADOT: &'static str = "polkadot";

    /// Wrap a namespace string as-is.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self(namespace.into())
    }

    pub fn eip155() -> Self {
        Self::new(Self::EIP155)
    }

    pub fn solana() -> Self {
        Self::new(Self::SOLANA)
    }

    pub fn bip122() -> Self {
        Self::new(Self::BIP122)
    }

    /// The namespace as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChainNamespace {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ChainNamespace {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ChainNamespace {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ChainNamespace {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ChainNamespace {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Check a CAIP segment against its allowed alphabet and length bounds.
fn valid_segment(segment: &str, min: usize, max: usize, extra: &[char]) -> bool {
    (min..=max).contains(&segment.len())
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || extra.contains(&c))
}

/// CAIP-2 network identifier, e.g. `eip155:1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaipNetworkId {
    raw: String,
    split: usize,
}

impl CaipNetworkId {
    /// Build an id from its two parts.
    pub fn new(namespace: &ChainNamespace, reference: &str) -> Result<Self, CaipError> {
        format!("{}:{}", namespace, reference).parse()
    }

    /// The namespace part (`eip155` in `eip155:1`).
    pub fn namespace(&self) -> ChainNamespace {
        ChainNamespace::new(&self.raw[..self.split])
    }

    /// The reference part (`1` in `eip155:1`).
    pub fn reference(&self) -> &str {
        &self.raw[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Build an id from a literal that is known to be well formed.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        Self {
            raw: raw.to_string(),
            split: raw.find(':').unwrap_or_default(),
        }
    }
}

impl FromStr for CaipNetworkId {
    type Err = CaipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(':')
            .ok_or_else(|| CaipError::InvalidNetworkId(s.to_string()))?;
        let (namespace, reference) = (&s[..split], &s[split + 1..]);

        if !valid_segment(namespace, 3, 8, &['-']) || !valid_segment(reference, 1, 32, &['-', '_'])
        {
            return Err(CaipError::InvalidNetworkId(s.to_string()));
        }

        Ok(Self {
            raw: s.to_string(),
            split,
        })
    }
}

impl TryFrom<String> for CaipNetworkId {
    type Error = CaipError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CaipNetworkId> for String {
    fn from(value: CaipNetworkId) -> Self {
        value.raw
    }
}

impl fmt::Display for CaipNetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// CAIP-10 account address, e.g. `eip155:1:0xab16...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaipAddress {
    network: CaipNetworkId,
    address: String,
}

impl CaipAddress {
    /// Build an address on the given network.
    pub fn new(network: &CaipNetworkId, address: &str) -> Result<Self, CaipError> {
        format!("{}:{}", network, address).parse()
    }

    pub fn network_id(&self) -> &CaipNetworkId {
        &self.network
    }

    pub fn namespace(&self) -> ChainNamespace {
        self.network.namespace()
    }

    /// The plain account address without the network prefix.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl FromStr for CaipAddress {
    type Err = CaipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .rfind(':')
            .ok_or_else(|| CaipError::InvalidAddress(s.to_string()))?;
        let network = s[..split]
            .parse::<CaipNetworkId>()
            .map_err(|_| CaipError::InvalidAddress(s.to_string()))?;
        let address = &s[split + 1..];

        if !valid_segment(address, 1, 128, &['-', '.', '%']) {
            return Err(CaipError::InvalidAddress(s.to_string()));
        }

        Ok(Self {
            network,
            address: address.to_string(),
        })
    }
}

impl TryFrom<String> for CaipAddress {
    type Error = CaipError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CaipAddress> for String {
    fn from(value: CaipAddress) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CaipAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.network, self.address)
    }
}

/// Network descriptor.
///
/// Serialized with camelCase keys; this is the exact form written to the
/// persistent store under the active-network key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaipNetwork {
    /// CAIP-2 id.
    pub id: CaipNetworkId,
    /// Chain reference within the namespace.
    pub chain_id: String,
    pub name: String,
    pub chain_namespace: ChainNamespace,
    /// Native currency symbol.
    pub currency: String,
    pub explorer_url: String,
    pub rpc_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(default)]
    pub testnet: bool,
}

impl CaipNetwork {
    /// Build a descriptor from its CAIP-2 id; the namespace and chain
    /// reference are taken from the id.
    pub fn new(id: CaipNetworkId, name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            chain_id: id.reference().to_string(),
            chain_namespace: id.namespace(),
            id,
            name: name.into(),
            currency: currency.into(),
            explorer_url: String::new(),
            rpc_url: String::new(),
            image_id: None,
            testnet: false,
        }
    }

    pub fn with_explorer_url(mut self, url: impl Into<String>) -> Self {
        self.explorer_url = url.into();
        self
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn as_testnet(mut self) -> Self {
        self.testnet = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_id_parts() {
        let id: CaipNetworkId = "eip155:137".parse().unwrap();
        assert_eq!(id.namespace(), ChainNamespace::eip155());
        assert_eq!(id.reference(), "137");
        assert_eq!(id.to_string(), "eip155:137");
    }

    #[test]
    fn test_network_id_rejects_malformed() {
        assert!("eip155".parse::<CaipNetworkId>().is_err());
        assert!("e:1".parse::<CaipNetworkId>().is_err());
        assert!("eip155:".parse::<CaipNetworkId>().is_err());
        assert!("eip155:a b".parse::<CaipNetworkId>().is_err());
    }

    #[test]
    fn test_address_parts() {
        let addr: CaipAddress = "eip155:1:0xab16a96D359eC26a11e2C2b3d8f8B8942d5Bfcdb"
            .parse()
            .unwrap();
        assert_eq!(addr.namespace(), ChainNamespace::eip155());
        assert_eq!(addr.network_id().as_str(), "eip155:1");
        assert_eq!(addr.address(), "0xab16a96D359eC26a11e2C2b3d8f8B8942d5Bfcdb");
    }

    #[test]
    fn test_solana_address() {
        let addr: CaipAddress =
            "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp:7S3P4HxJpyyigGzodYwHtCxZyUQe9JiBMHyRWXArAaKv"
                .parse()
                .unwrap();
        assert_eq!(addr.namespace().as_str(), "solana");
    }

    #[test]
    fn test_address_rejects_missing_account() {
        assert!("eip155:1:".parse::<CaipAddress>().is_err());
        assert!("0xabc".parse::<CaipAddress>().is_err());
    }

    #[test]
    fn test_network_json_shape() {
        let id: CaipNetworkId = "eip155:1".parse().unwrap();
        let network = CaipNetwork::new(id, "Ethereum", "ETH");
        let json = serde_json::to_string(&network).unwrap();
        assert!(json.contains("\"chainNamespace\":\"eip155\""));
        assert!(json.contains("\"id\":\"eip155:1\""));

        let parsed: CaipNetwork = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, network);
    }

    #[test]
    fn test_network_json_rejects_bad_id() {
        let json = r#"{"id":"nonsense","chainId":"1","name":"x","chainNamespace":"eip155",
            "currency":"ETH","explorerUrl":"","rpcUrl":""}"#;
        assert!(serde_json::from_str::<CaipNetwork>(json).is_err());
    }

    #[test]
    fn test_namespace_compares_with_str() {
        assert_eq!(ChainNamespace::solana(), "solana");
    }
}
