//! # CLI Commands
//!
//! Each command runs against a started [`SessionRuntime`] and answers with
//! the resulting [`StatusReport`].

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ms_01_chain_coordinator::{
    ChainAdapter, ChainCoordinatorApi, ClientFamily, ClientSource, CoordinatorError,
};
use ms_02_session_storage::SessionStorageApi;
use serde::Serialize;
use shared_types::{
    presets, AdapterType, CaipAddress, CaipNetwork, CaipNetworkId, ChainNamespace, Connector,
    ConnectorType, NetworkPatch, WALLET_CONNECT_CONNECTOR_ID,
};
use tracing::info;

use crate::adapters::PublicStatus;
use crate::error::RuntimeError;
use crate::SessionRuntime;

/// Argument accepted by `connector` to forget the stored connector.
pub const CLEAR_CONNECTOR: &str = "clear";

#[derive(Debug, Parser)]
#[command(name = "ms-session", version, about = "Inspect and drive the multichain wallet session")]
pub struct Cli {
    /// Session store path; overrides MS_STORAGE_PATH
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the active namespace, network and per-namespace state
    Status,
    /// Make a network active and remember it for the next run
    Switch {
        /// CAIP-2 id, e.g. eip155:137
        network_id: String,
    },
    /// Clear the account of one namespace
    Reset { namespace: String },
    /// Record the connector used for the session (e.g. WALLET_CONNECT), or `clear`
    Connector { value: String },
}

/// One registered namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceReport {
    pub namespace: ChainNamespace,
    pub adapter_type: Option<AdapterType>,
    pub selected_network: Option<CaipNetworkId>,
    pub caip_address: Option<CaipAddress>,
    pub is_connected: bool,
    pub networks: Vec<CaipNetworkId>,
}

impl From<&ChainAdapter> for NamespaceReport {
    fn from(adapter: &ChainAdapter) -> Self {
        Self {
            namespace: adapter.chain_namespace.clone(),
            adapter_type: adapter.adapter_type,
            selected_network: adapter.selected_network_id().cloned(),
            caip_address: adapter.caip_address().cloned(),
            is_connected: adapter
                .account_state
                .as_ref()
                .is_some_and(|account| account.is_connected),
            networks: adapter.caip_networks.iter().map(|n| n.id.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub active_chain: Option<ChainNamespace>,
    pub active_caip_network: Option<CaipNetworkId>,
    pub active_caip_address: Option<CaipAddress>,
    pub persisted_network: Option<CaipNetworkId>,
    pub wallet_id: Option<String>,
    pub connected_connector: Option<String>,
    pub network_client: String,
    pub connection_client: String,
    pub approved_caip_networks: Vec<CaipNetworkId>,
    pub public: PublicStatus,
    pub namespaces: Vec<NamespaceReport>,
}

fn describe(source: Result<ClientSource, CoordinatorError>) -> String {
    match source {
        Ok(ClientSource::Universal) => "universal".to_string(),
        Ok(ClientSource::Namespace(namespace)) => format!("namespace:{}", namespace),
        Err(err) => format!("unavailable: {}", err),
    }
}

impl SessionRuntime {
    pub fn execute(&self, command: Command) -> Result<StatusReport, RuntimeError> {
        match command {
            Command::Status => {}
            Command::Switch { network_id } => self.switch_network(&network_id)?,
            Command::Reset { namespace } => self.reset_namespace(&namespace)?,
            Command::Connector { value } => self.record_connector(&value)?,
        }
        Ok(self.status())
    }

    pub fn status(&self) -> StatusReport {
        let coordinator = self.coordinator();
        let session = self.session();

        StatusReport {
            active_chain: coordinator.active_chain(),
            active_caip_network: coordinator.active_caip_network().map(|n| n.id),
            active_caip_address: coordinator.active_caip_address(),
            persisted_network: session.active_caip_network_id(),
            wallet_id: session.wallet_id(),
            connected_connector: session.connected_connector(),
            network_client: describe(coordinator.client_source(ClientFamily::Network, None)),
            connection_client: describe(coordinator.client_source(ClientFamily::Connection, None)),
            approved_caip_networks: coordinator.get_all_approved_caip_networks(),
            public: self.public_state().current(),
            namespaces: coordinator
                .namespaces()
                .iter()
                .filter_map(|namespace| coordinator.chain_adapter(namespace))
                .map(|adapter| NamespaceReport::from(&adapter))
                .collect(),
        }
    }

    /// A network registered with some adapter, else a stock descriptor.
    pub fn find_network(&self, id: &CaipNetworkId) -> Option<CaipNetwork> {
        let id = presets::canonical_solana_id(id);
        let coordinator = self.coordinator();
        coordinator
            .namespaces()
            .iter()
            .filter_map(|namespace| coordinator.chain_adapter(namespace))
            .find_map(|adapter| adapter.caip_networks.iter().find(|n| n.id == id).cloned())
            .or_else(|| presets::by_id(id.as_str()))
    }

    fn switch_network(&self, raw: &str) -> Result<(), RuntimeError> {
        let id: CaipNetworkId = raw.parse()?;
        let network = self
            .find_network(&id)
            .ok_or_else(|| RuntimeError::UnknownNetwork(id.clone()))?;
        let namespace = network.chain_namespace.clone();
        let coordinator = self.coordinator();
        if !coordinator.namespaces().contains(&namespace) {
            return Err(RuntimeError::NamespaceNotRegistered(namespace));
        }

        let crossing = coordinator.active_chain().as_ref() != Some(&namespace);
        coordinator.set_active_caip_network(Some(network.clone()));
        coordinator.set_chain_network_data(
            Some(&namespace),
            NetworkPatch::new().caip_network(Some(network.clone())),
            false,
        )?;
        if crossing {
            // A namespace switch selects the network without persisting it
            coordinator.set_active_caip_network(Some(network.clone()));
        }

        info!(network = %network.id, crossing, "Switched network");
        Ok(())
    }

    fn reset_namespace(&self, raw: &str) -> Result<(), RuntimeError> {
        let namespace = ChainNamespace::new(raw);
        if !self.coordinator().namespaces().contains(&namespace) {
            return Err(RuntimeError::NamespaceNotRegistered(namespace));
        }
        self.coordinator().reset_account(Some(&namespace))?;
        info!(namespace = %namespace, "Account reset");
        Ok(())
    }

    fn record_connector(&self, value: &str) -> Result<(), RuntimeError> {
        let session = self.session();
        if value == CLEAR_CONNECTOR {
            session.clear_connected_connector();
            session.clear_wallet_id();
            info!("Connector cleared");
            return Ok(());
        }

        let connector_type: ConnectorType = value.parse()?;
        session.set_connected_connector(connector_type);
        let id = if connector_type == ConnectorType::WalletConnect {
            session.set_wallet_id(WALLET_CONNECT_CONNECTOR_ID);
            WALLET_CONNECT_CONNECTOR_ID.to_string()
        } else {
            connector_type.as_str().to_lowercase()
        };

        let chain = self
            .coordinator()
            .active_chain()
            .unwrap_or_else(ChainNamespace::eip155);
        self.coordinator().set_active_connector(Some(Arc::new(Connector::new(
            id,
            connector_type.as_str(),
            connector_type,
            chain,
        ))));
        info!(connector = %connector_type, "Connector recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["ms-session", "switch", "eip155:137"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Switch {
                network_id: "eip155:137".to_string()
            }
        );
        assert!(cli.storage.is_none());

        let cli =
            Cli::try_parse_from(["ms-session", "--storage", "/tmp/s.json", "connector", "clear"])
                .unwrap();
        assert_eq!(cli.storage, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(
            cli.command,
            Command::Connector {
                value: CLEAR_CONNECTOR.to_string()
            }
        );
    }

    #[test]
    fn test_cli_requires_a_command() {
        assert!(Cli::try_parse_from(["ms-session"]).is_err());
    }

    #[test]
    fn test_describe_sources() {
        assert_eq!(describe(Ok(ClientSource::Universal)), "universal");
        assert_eq!(
            describe(Ok(ClientSource::Namespace(ChainNamespace::solana()))),
            "namespace:solana"
        );
        let err = CoordinatorError::AdapterNotFound {
            namespace: ChainNamespace::bip122(),
        };
        assert!(describe(Err(err)).starts_with("unavailable: "));
    }
}
