//! # Bring-Up and Switching Flows
//!
//! The coordinator wired to in-memory storage and recording controllers,
//! driven the way an application's startup and network picker would.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use proptest::prelude::*;

    use ms_01_chain_coordinator::ChainCoordinatorApi;
    use shared_types::{
        presets, AccountKey, AccountPatch, AccountProp, ChainNamespace, NetworkKey, NetworkPatch,
        NetworkProp,
    };

    use crate::integration::support::*;

    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    #[test]
    fn test_initialize_activates_first_and_registers_all() {
        let w = wire_in_memory();
        w.coordinator.initialize(vec![solana(), evm()]);

        assert_eq!(w.coordinator.active_chain(), Some(ChainNamespace::solana()));
        assert_eq!(
            w.coordinator.active_caip_network(),
            Some(presets::solana_mainnet())
        );
        assert_eq!(w.coordinator.namespaces().len(), 2);
        assert_eq!(w.mirror.active_chain(), Some(ChainNamespace::solana()));
    }

    #[test]
    fn test_initialize_empty_leaves_nothing_active() {
        let w = wire_in_memory();
        w.coordinator.initialize(Vec::new());

        assert!(w.coordinator.no_adapters());
        assert!(w.coordinator.namespaces().is_empty());
        assert!(w.coordinator.active_chain().is_none());
        assert_eq!(w.network.count(), 0);
    }

    // =========================================================================
    // PROPAGATION
    // =========================================================================

    #[test]
    fn test_solana_network_data_waits_for_switch() {
        let w = wire_in_memory();
        w.coordinator.initialize(vec![evm(), solana()]);
        w.clear_recordings();

        let solana_ns = ChainNamespace::solana();
        w.coordinator
            .set_chain_network_data(
                Some(&solana_ns),
                NetworkPatch::new().caip_network(Some(presets::solana_devnet())),
                false,
            )
            .unwrap();
        w.coordinator
            .set_chain_network_data(
                Some(&solana_ns),
                NetworkPatch::new().supports_all_networks(false),
                false,
            )
            .unwrap();
        assert_eq!(w.network.count(), 0);

        w.coordinator.set_active_chain(Some(&solana_ns), None);

        assert_eq!(w.network.count(), 1);
        assert_eq!(w.account.count(), 1);
        let published = w.network.last().unwrap();
        assert_eq!(published.caip_network, Some(presets::solana_devnet()));
        assert!(!published.supports_all_networks);
        assert_eq!(
            w.mirror.selected_network_id(),
            Some(presets::solana_devnet().id)
        );
    }

    #[test]
    fn test_account_update_for_inactive_namespace_is_stored_only() {
        let w = wire_in_memory();
        w.coordinator.initialize(vec![evm(), solana()]);
        w.clear_recordings();

        let solana_ns = ChainNamespace::solana();
        w.coordinator
            .set_chain_account_data(
                Some(&solana_ns),
                AccountPatch::new()
                    .caip_address(solana_address())
                    .is_connected(true),
                false,
            )
            .unwrap();

        assert_eq!(w.account.count(), 0);
        assert!(w.coordinator.active_caip_address().is_none());
        assert_eq!(
            w.coordinator
                .get_account_prop(AccountKey::IsConnected, Some(&solana_ns)),
            Some(AccountProp::IsConnected(true))
        );

        // Switching adopts the stored address
        w.coordinator.set_active_chain(Some(&solana_ns), None);
        assert_eq!(w.coordinator.active_caip_address(), Some(solana_address()));
    }

    #[test]
    fn test_reset_always_propagates() {
        let w = wire_in_memory();
        w.coordinator.initialize(vec![evm(), solana()]);
        w.coordinator
            .set_chain_account_data(
                Some(&ChainNamespace::eip155()),
                AccountPatch::new().caip_address(evm_address()),
                true,
            )
            .unwrap();
        w.clear_recordings();

        w.coordinator
            .reset_account(Some(&ChainNamespace::eip155()))
            .unwrap();

        assert!(w.coordinator.active_caip_address().is_none());
        assert_eq!(w.account.count(), 1);
        let account = w.account.last().unwrap();
        assert!(!account.is_connected);
        assert!(account.caip_address.is_none());
    }

    // =========================================================================
    // SUBSCRIPTIONS
    // =========================================================================

    #[test]
    fn test_subscribers_see_committed_switch() {
        let w = wire_in_memory();
        w.coordinator.initialize(vec![evm(), solana()]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _chain = w.coordinator.subscribe_active_chain(move |ns| {
            sink.lock().push(ns.cloned());
        });

        let networks = Arc::new(Mutex::new(Vec::new()));
        let sink = networks.clone();
        let _selected = w.coordinator.subscribe_chain_prop(
            |adapter| adapter.selected_network_id().cloned(),
            move |id| sink.lock().push(id.cloned().flatten()),
            None,
        );

        w.coordinator
            .set_active_caip_network(Some(presets::solana_devnet()));
        w.coordinator
            .set_chain_network_data(
                Some(&ChainNamespace::solana()),
                NetworkPatch::new().caip_network(Some(presets::solana_devnet())),
                false,
            )
            .unwrap();

        assert_eq!(*seen.lock(), vec![Some(ChainNamespace::solana())]);
        assert_eq!(
            networks.lock().last().cloned().flatten(),
            Some(presets::solana_devnet().id)
        );
        assert_eq!(
            w.coordinator
                .get_network_prop(NetworkKey::CaipNetwork, None),
            Some(NetworkProp::CaipNetwork(Some(presets::solana_devnet())))
        );
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    proptest! {
        #[test]
        fn prop_switching_network_twice_is_idempotent(pick in 0usize..4) {
            let networks = [
                presets::ethereum_mainnet(),
                presets::polygon_mainnet(),
                presets::solana_mainnet(),
                presets::solana_devnet(),
            ];
            let w = wire_in_memory();
            w.coordinator.initialize(vec![evm(), solana()]);

            w.coordinator.set_active_caip_network(Some(networks[pick].clone()));
            let once = w.coordinator.snapshot();
            w.coordinator.set_active_caip_network(Some(networks[pick].clone()));
            let twice = w.coordinator.snapshot();

            prop_assert_eq!(once.active_chain, twice.active_chain);
            prop_assert_eq!(once.active_caip_network, twice.active_caip_network);
            prop_assert_eq!(once.active_caip_address, twice.active_caip_address);
            prop_assert_eq!(once.chains.namespaces(), twice.chains.namespaces());
        }
    }
}
