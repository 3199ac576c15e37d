//! Coordinator configuration
//!
//! The markers that drive client resolution. The defaults encode the one
//! special case the resolver knows about: an `eip155` adapter tagged `wagmi`
//! is authoritative for its namespace even while a WalletConnect session is
//! recorded.

use shared_types::{AdapterType, ChainNamespace, ConnectorType, WALLET_CONNECT_CONNECTOR_ID};

use super::errors::CoordinatorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Namespace checked for a dedicated adapter.
    pub dedicated_evm_namespace: ChainNamespace,
    /// Adapter tag that marks the dedicated adapter.
    pub dedicated_evm_adapter: AdapterType,
    /// Stored wallet id meaning "connected through WalletConnect" (network family).
    pub network_hint_marker: String,
    /// Stored connector tag meaning the same thing (connection family).
    pub connection_hint_marker: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            dedicated_evm_namespace: ChainNamespace::eip155(),
            dedicated_evm_adapter: AdapterType::Wagmi,
            network_hint_marker: WALLET_CONNECT_CONNECTOR_ID.to_string(),
            connection_hint_marker: ConnectorType::WalletConnect.as_str().to_string(),
        }
    }
}

impl CoordinatorConfig {
    pub fn validate(&self) -> Result<(), CoordinatorError> {
        if self.dedicated_evm_namespace.as_str().is_empty() {
            return Err(CoordinatorError::InvalidConfig(
                "dedicated_evm_namespace cannot be empty".to_string(),
            ));
        }

        if self.dedicated_evm_adapter == AdapterType::Universal {
            return Err(CoordinatorError::InvalidConfig(
                "the universal adapter cannot be the dedicated adapter".to_string(),
            ));
        }

        if self.network_hint_marker.is_empty() || self.connection_hint_marker.is_empty() {
            return Err(CoordinatorError::InvalidConfig(
                "hint markers cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn with_dedicated_adapter(mut self, namespace: ChainNamespace, tag: AdapterType) -> Self {
        self.dedicated_evm_namespace = namespace;
        self.dedicated_evm_adapter = tag;
        self
    }

    pub fn with_hint_markers(
        mut self,
        network: impl Into<String>,
        connection: impl Into<String>,
    ) -> Self {
        self.network_hint_marker = network.into();
        self.connection_hint_marker = connection.into();
        self
    }
}
