//! # Storage Keys
//!
//! Every key the session runtime reads or writes. Values are plain strings;
//! the comment on each variant names the value format.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// JSON-encoded `CaipNetwork`.
    ActiveCaipNetwork,
    /// CAIP-2 id of the active network.
    ActiveCaipNetworkId,
    /// Id of the wallet used for the current session.
    WalletId,
    /// `ConnectorType` string of the connector used for the current session.
    ConnectedConnector,
    /// Social login provider name.
    ConnectedSocial,
    /// Username reported by the social login provider.
    SocialUsername,
    /// JSON array of recently used wallets, most recent first.
    RecentWallets,
    /// JSON `{href, name}` of the WalletConnect deep link last chosen.
    WalletConnectDeepLink,
}

impl StorageKey {
    pub const ALL: [StorageKey; 8] = [
        StorageKey::ActiveCaipNetwork,
        StorageKey::ActiveCaipNetworkId,
        StorageKey::WalletId,
        StorageKey::ConnectedConnector,
        StorageKey::ConnectedSocial,
        StorageKey::SocialUsername,
        StorageKey::RecentWallets,
        StorageKey::WalletConnectDeepLink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::ActiveCaipNetwork => "@appkit/active_caip_network",
            StorageKey::ActiveCaipNetworkId => "@appkit/active_caip_network_id",
            StorageKey::WalletId => "@appkit/wallet_id",
            StorageKey::ConnectedConnector => "@appkit/connected_connector",
            StorageKey::ConnectedSocial => "@appkit/connected_social",
            StorageKey::SocialUsername => "@appkit/social_username",
            StorageKey::RecentWallets => "@appkit/recent",
            StorageKey::WalletConnectDeepLink => "WALLETCONNECT_DEEPLINK_CHOICE",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
