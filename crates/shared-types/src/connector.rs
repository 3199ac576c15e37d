//! # Connectors and Adapter Tags
//!
//! A connector is one way of reaching a wallet (injected provider, the
//! WalletConnect relay, an embedded auth wallet). An adapter type tags the
//! client library wired up for a namespace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::caip::ChainNamespace;
use crate::errors::CaipError;

/// Connector id written as the "wallet id" when a session goes through the
/// WalletConnect relay.
pub const WALLET_CONNECT_CONNECTOR_ID: &str = "walletConnect";

/// Client library driving a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterType {
    /// Dedicated EVM integration with its own connector management.
    Wagmi,
    Ethers,
    Ethers5,
    Solana,
    Bitcoin,
    Polkadot,
    /// Fallback adapter backed by the protocol-wide universal provider.
    Universal,
}

impl AdapterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterType::Wagmi => "wagmi",
            AdapterType::Ethers => "ethers",
            AdapterType::Ethers5 => "ethers5",
            AdapterType::Solana => "solana",
            AdapterType::Bitcoin => "bitcoin",
            AdapterType::Polkadot => "polkadot",
            AdapterType::Universal => "universal",
        }
    }
}

impl fmt::Display for AdapterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterType {
    type Err = CaipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wagmi" => Ok(AdapterType::Wagmi),
            "ethers" => Ok(AdapterType::Ethers),
            "ethers5" => Ok(AdapterType::Ethers5),
            "solana" => Ok(AdapterType::Solana),
            "bitcoin" => Ok(AdapterType::Bitcoin),
            "polkadot" => Ok(AdapterType::Polkadot),
            "universal" => Ok(AdapterType::Universal),
            other => Err(CaipError::UnknownTag {
                kind: "adapter",
                value: other.to_string(),
            }),
        }
    }
}

/// Transport family of a connector.
///
/// The string forms are what the session store keeps under the
/// connected-connector key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorType {
    External,
    WalletConnect,
    Injected,
    Announced,
    Auth,
    MultiChain,
    IdAuth,
}

impl ConnectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorType::External => "EXTERNAL",
            ConnectorType::WalletConnect => "WALLET_CONNECT",
            ConnectorType::Injected => "INJECTED",
            ConnectorType::Announced => "ANNOUNCED",
            ConnectorType::Auth => "AUTH",
            ConnectorType::MultiChain => "MULTI_CHAIN",
            ConnectorType::IdAuth => "ID_AUTH",
        }
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorType {
    type Err = CaipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXTERNAL" => Ok(ConnectorType::External),
            "WALLET_CONNECT" => Ok(ConnectorType::WalletConnect),
            "INJECTED" => Ok(ConnectorType::Injected),
            "ANNOUNCED" => Ok(ConnectorType::Announced),
            "AUTH" => Ok(ConnectorType::Auth),
            "MULTI_CHAIN" => Ok(ConnectorType::MultiChain),
            "ID_AUTH" => Ok(ConnectorType::IdAuth),
            other => Err(CaipError::UnknownTag {
                kind: "connector",
                value: other.to_string(),
            }),
        }
    }
}

/// A wallet connector.
///
/// The coordinator keeps the active one behind an `Arc` and never copies or
/// serializes it; the registering side owns its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub id: String,
    pub name: String,
    pub connector_type: ConnectorType,
    pub chain: ChainNamespace,
    pub image_url: Option<String>,
    pub explorer_id: Option<String>,
}

impl Connector {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        connector_type: ConnectorType,
        chain: ChainNamespace,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            connector_type,
            chain,
            image_url: None,
            explorer_id: None,
        }
    }
}
