//! # Persisted Values
//!
//! Shapes of the JSON values kept under [`super::keys::StorageKey`].

use serde::{Deserialize, Serialize};

/// Maximum number of wallets remembered as "recent".
pub const MAX_RECENT_WALLETS: usize = 2;

/// A WalletConnect deep link the user picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLink {
    pub href: String,
    pub name: String,
}

/// Wallet listing entry remembered in the recent-wallets list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentWallet {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_link: Option<String>,
}

impl RecentWallet {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            homepage: None,
            image_url: None,
            mobile_link: None,
        }
    }
}

/// Push `wallet` to the front of `recent` unless a wallet with the same id is
/// already listed; keeps at most [`MAX_RECENT_WALLETS`] entries.
///
/// Returns `true` if the list changed.
pub fn remember_wallet(recent: &mut Vec<RecentWallet>, wallet: RecentWallet) -> bool {
    if recent.iter().any(|w| w.id == wallet.id) {
        return false;
    }
    recent.insert(0, wallet);
    recent.truncate(MAX_RECENT_WALLETS);
    true
}
