//! # Persistence Flows
//!
//! Restarts over the JSON file store, and a store that fails every call.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ms_01_chain_coordinator::ChainCoordinatorApi;
    use ms_02_session_storage::{
        DeepLink, FailingStore, JsonFileStore, KeyValueStore, RecentWallet, SessionStorageApi,
        StorageKey,
    };
    use session_runtime::{Command, RuntimeConfig, SessionFile, SessionRuntime};
    use shared_types::{presets, ChainNamespace};

    use crate::integration::support::*;

    fn json_store(path: &std::path::Path) -> Arc<JsonFileStore> {
        Arc::new(JsonFileStore::open(path).unwrap())
    }

    #[test]
    fn test_active_network_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let w = wire(json_store(&path));
            w.coordinator.initialize(vec![evm()]);
            w.coordinator
                .set_active_caip_network(Some(presets::polygon_mainnet()));
        }

        let w = wire(json_store(&path));
        w.coordinator
            .initialize_universal_adapter(universal(ChainNamespace::eip155()), &[]);

        assert_eq!(w.coordinator.active_chain(), Some(ChainNamespace::eip155()));
        assert_eq!(
            w.coordinator.active_caip_network(),
            Some(presets::polygon_mainnet())
        );
        assert_eq!(
            w.session.active_caip_network_id(),
            Some(presets::polygon_mainnet().id)
        );
    }

    #[test]
    fn test_corrupt_persisted_network_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        json_store(&path)
            .set(StorageKey::ActiveCaipNetwork.as_str(), "[1, 2")
            .unwrap();

        let w = wire(json_store(&path));
        w.coordinator.initialize_universal_adapter(
            universal(ChainNamespace::solana()).with_default_network(presets::solana_testnet()),
            &[],
        );

        assert_eq!(
            w.coordinator.active_caip_network(),
            Some(presets::solana_testnet())
        );
    }

    #[test]
    fn test_session_helpers_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let w = wire(json_store(&path));
            w.session.set_wallet_connect_deep_link(&DeepLink {
                href: "https://link.example/wc".to_string(),
                name: "Example".to_string(),
            });
            w.session.add_recent_wallet(RecentWallet::new("a", "Wallet A"));
            w.session.add_recent_wallet(RecentWallet::new("b", "Wallet B"));
            w.session.add_recent_wallet(RecentWallet::new("c", "Wallet C"));
        }

        let w = wire(json_store(&path));
        assert_eq!(
            w.session.wallet_connect_deep_link().map(|link| link.name),
            Some("Example".to_string())
        );
        let ids: Vec<String> = w
            .session
            .recent_wallets()
            .into_iter()
            .map(|wallet| wallet.id)
            .collect();
        assert_eq!(ids, vec!["c".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_failing_store_never_reaches_coordinator() {
        let store = Arc::new(FailingStore::new());
        let w = wire(store.clone());

        w.coordinator.initialize(vec![evm(), solana()]);
        w.coordinator
            .set_active_caip_network(Some(presets::polygon_mainnet()));
        w.coordinator
            .initialize_universal_adapter(universal(ChainNamespace::eip155()), &[]);

        assert_eq!(
            w.coordinator.active_caip_network(),
            Some(presets::ethereum_mainnet())
        );
        assert!(w.session.active_caip_network().is_none());
        assert!(!store.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_runtime_mirror_wakes_async_observer() {
        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig::default()
            .with_storage_path(dir.path().join("session.json"))
            .with_session(SessionFile::default());
        let runtime = SessionRuntime::new(config).unwrap();
        runtime.start().unwrap();

        let mut rx = runtime.public_state().subscribe();
        runtime
            .execute(Command::Switch {
                network_id: presets::bitcoin_mainnet().id.to_string(),
            })
            .unwrap();

        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .unwrap()
            .unwrap();
        let status = rx.borrow_and_update().clone();
        assert_eq!(status.active_chain, Some(ChainNamespace::bip122()));
        assert_eq!(status.selected_network_id, Some(presets::bitcoin_mainnet().id));
    }
}
