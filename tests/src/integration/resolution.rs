//! # Client Resolution Flows
//!
//! Resolution reads its hints from the session store, so these flows set
//! them through `SessionStorageApi` exactly as a connector would.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ms_01_chain_coordinator::{
        AdapterConfig, ChainCoordinatorApi, ClientFamily, ConnectionControllerClient,
        CoordinatorError, MockConnectionClient, MockNetworkClient, NetworkControllerClient,
    };
    use ms_02_session_storage::SessionStorageApi;
    use shared_types::{presets, AdapterType, ChainNamespace, ConnectorType};

    use crate::integration::support::*;

    struct Clients {
        evm: Arc<MockNetworkClient>,
        universal: Arc<MockNetworkClient>,
    }

    fn wire_with(evm_type: AdapterType) -> (Wired, Clients) {
        let w = wire_in_memory();
        let clients = Clients {
            evm: Arc::new(MockNetworkClient::new("eip155")),
            universal: Arc::new(MockNetworkClient::new("universal")),
        };
        let evm = evm()
            .with_adapter_type(evm_type)
            .with_network_client(clients.evm.clone());
        w.coordinator.initialize(vec![evm.clone(), solana()]);
        w.coordinator.initialize_universal_adapter(
            universal(ChainNamespace::eip155()).with_network_client(clients.universal.clone()),
            &[evm, solana()],
        );
        (w, clients)
    }

    fn switch_through(w: &Wired) {
        w.coordinator
            .network_controller_client(Some(&ChainNamespace::eip155()))
            .unwrap()
            .switch_caip_network(&presets::polygon_mainnet())
            .unwrap();
    }

    #[test]
    fn test_wagmi_adapter_ignores_wallet_connect_hint() {
        let (w, clients) = wire_with(AdapterType::Wagmi);
        w.session.set_wallet_id("walletConnect");

        switch_through(&w);

        assert_eq!(clients.evm.switches().len(), 1);
        assert!(clients.universal.switches().is_empty());
    }

    #[test]
    fn test_other_evm_adapter_defers_to_universal() {
        let (w, clients) = wire_with(AdapterType::Ethers5);
        w.session.set_wallet_id("walletConnect");

        switch_through(&w);

        assert!(clients.evm.switches().is_empty());
        assert_eq!(
            clients.universal.switches(),
            vec![presets::polygon_mainnet().id]
        );
    }

    #[test]
    fn test_no_hint_uses_namespace_client() {
        let (w, clients) = wire_with(AdapterType::Ethers);
        switch_through(&w);
        assert_eq!(clients.evm.switches().len(), 1);
    }

    #[test]
    fn test_no_adapters_always_uses_universal() {
        let w = wire_in_memory();
        let client = Arc::new(MockConnectionClient::new("universal"));
        w.coordinator.initialize(Vec::new());
        w.coordinator.initialize_universal_adapter(
            universal(ChainNamespace::eip155()).with_connection_client(client.clone()),
            &[],
        );

        w.coordinator
            .connection_controller_client(Some(&ChainNamespace::solana()))
            .unwrap()
            .connect("injected", Some(&ChainNamespace::solana()))
            .unwrap();
        assert_eq!(client.connected_via().as_deref(), Some("injected"));
    }

    #[test]
    fn test_missing_universal_connection_client() {
        let w = wire_in_memory();
        w.coordinator.initialize(vec![evm()]);
        w.session
            .set_connected_connector(ConnectorType::WalletConnect);

        let err = w.coordinator.connection_controller_client(None).err().unwrap();
        assert_eq!(
            err,
            CoordinatorError::UniversalClientNotSet {
                family: ClientFamily::Connection
            }
        );
        assert!(err.to_string().contains("ConnectionController"));
    }

    #[test]
    fn test_no_active_namespace_needs_explicit_one() {
        let w = wire_in_memory();
        w.coordinator.register_chain_adapter(
            AdapterConfig::new(ChainNamespace::solana()).to_chain_adapter(),
        );

        let err = w.coordinator.network_controller_client(None).err().unwrap();
        assert_eq!(
            err,
            CoordinatorError::NamespaceRequiredForClient {
                family: ClientFamily::Network
            }
        );
        assert!(err.is_configuration());
    }
}
