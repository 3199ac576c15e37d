//! # Well-Known Networks
//!
//! Descriptors for networks that bring-up code and tests refer to by name,
//! plus the Solana storage keys and error codes used by Solana adapters.

use crate::caip::{CaipNetwork, CaipNetworkId};

/// Blockchain API RPC endpoint shared by the stock descriptors.
pub const BLOCKCHAIN_API_RPC_URL: &str = "https://rpc.walletconnect.org";

/// Relay used by the universal provider.
pub const UNIVERSAL_PROVIDER_RELAY_URL: &str = "wss://relay.walletconnect.org";

/// Solana cluster ids, including the pre-genesis-hash ids older wallets
/// still report.
pub mod solana_chain_ids {
    pub const MAINNET: &str = "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp";
    pub const DEVNET: &str = "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1";
    pub const TESTNET: &str = "solana:4uhcVJyU9pJkvQyS88uRDiswHXSCkY3z";
    pub const DEPRECATED_MAINNET: &str = "solana:4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZ";
    pub const DEPRECATED_DEVNET: &str = "solana:8E9rvCKLFQia2Y35HXjjpWzj8weVo44K";
}

/// Storage key under which Solana adapters remember the chosen wallet.
pub const SOLANA_WALLET_ID_KEY: &str = "@w3m/solana_wallet";
/// Storage key under which Solana adapters remember the chosen cluster.
pub const SOLANA_CAIP_CHAIN_KEY: &str = "@w3m/solana_caip_chain";
/// Wallet error code for a cluster the wallet does not know.
pub const SOLANA_ERROR_CODE_UNRECOGNIZED_CHAIN_ID: i32 = 4902;
pub const SOLANA_ERROR_CODE_DEFAULT: i32 = 5000;
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

const SOLSCAN: &str = "https://solscan.io";

fn solana_rpc() -> String {
    format!("{}/v1", BLOCKCHAIN_API_RPC_URL)
}

/// Solana mainnet-beta, the default Solana network.
pub fn solana_mainnet() -> CaipNetwork {
    CaipNetwork::new(
        CaipNetworkId::from_static(solana_chain_ids::MAINNET),
        "Solana",
        "SOL",
    )
    .with_explorer_url(SOLSCAN)
    .with_rpc_url(solana_rpc())
}

pub fn solana_devnet() -> CaipNetwork {
    CaipNetwork::new(
        CaipNetworkId::from_static(solana_chain_ids::DEVNET),
        "Solana Devnet",
        "SOL",
    )
    .with_explorer_url(SOLSCAN)
    .with_rpc_url(solana_rpc())
    .as_testnet()
}

pub fn solana_testnet() -> CaipNetwork {
    CaipNetwork::new(
        CaipNetworkId::from_static(solana_chain_ids::TESTNET),
        "Solana Testnet",
        "SOL",
    )
    .with_explorer_url(SOLSCAN)
    .with_rpc_url(solana_rpc())
    .as_testnet()
}

pub fn ethereum_mainnet() -> CaipNetwork {
    CaipNetwork::new(CaipNetworkId::from_static("eip155:1"), "Ethereum", "ETH")
        .with_explorer_url("https://etherscan.io")
        .with_rpc_url("https://cloudflare-eth.com")
}

pub fn polygon_mainnet() -> CaipNetwork {
    CaipNetwork::new(CaipNetworkId::from_static("eip155:137"), "Polygon", "POL")
        .with_explorer_url("https://polygonscan.com")
        .with_rpc_url("https://polygon-rpc.com")
}

pub fn bitcoin_mainnet() -> CaipNetwork {
    CaipNetwork::new(
        CaipNetworkId::from_static("bip122:000000000019d6689c085ae165831e93"),
        "Bitcoin",
        "BTC",
    )
    .with_explorer_url("https://mempool.space")
}

/// Map a deprecated Solana cluster id onto its current form.
///
/// Ids that are not deprecated are returned unchanged.
pub fn canonical_solana_id(id: &CaipNetworkId) -> CaipNetworkId {
    match id.as_str() {
        solana_chain_ids::DEPRECATED_MAINNET => {
            CaipNetworkId::from_static(solana_chain_ids::MAINNET)
        }
        solana_chain_ids::DEPRECATED_DEVNET => CaipNetworkId::from_static(solana_chain_ids::DEVNET),
        _ => id.clone(),
    }
}

/// Every stock descriptor, in a stable order.
pub fn all() -> Vec<CaipNetwork> {
    vec![
        ethereum_mainnet(),
        polygon_mainnet(),
        solana_mainnet(),
        solana_devnet(),
        solana_testnet(),
        bitcoin_mainnet(),
    ]
}

/// Look a stock descriptor up by its CAIP-2 id.
pub fn by_id(id: &str) -> Option<CaipNetwork> {
    all().into_iter().find(|network| network.id.as_str() == id)
}
