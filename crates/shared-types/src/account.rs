//! # Account Sub-State
//!
//! The per-namespace account snapshot and the partial updates applied to it.
//!
//! Snapshots are immutable values: an update produces a new `AccountState`
//! from the old one plus an [`AccountPatch`], the old value is never edited
//! in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::caip::CaipAddress;

/// Kind of account the wallet prefers to expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    Eoa,
    SmartAccount,
    Payment,
    Ordinal,
    Stx,
}

/// Connection lifecycle of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountStatus {
    Reconnecting,
    Connected,
    Disconnected,
    Connecting,
}

/// Balance of one token held by the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub name: String,
    pub symbol: String,
    pub chain_id: String,
    /// Decimal amount as reported by the balance API.
    pub quantity: String,
    pub icon_url: Option<String>,
}

/// Wallet that owns the connected session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedWalletInfo {
    pub name: String,
    pub icon: Option<String>,
}

/// One of possibly many accounts exposed by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEntry {
    pub address: String,
    pub account_type: AccountType,
}

/// Account snapshot for one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    pub is_connected: bool,
    pub current_tab: u32,
    pub caip_address: Option<CaipAddress>,
    pub address: Option<String>,
    pub balance: Option<String>,
    pub balance_symbol: Option<String>,
    pub profile_name: Option<String>,
    pub profile_image: Option<String>,
    pub address_explorer_url: Option<String>,
    pub smart_account_deployed: bool,
    pub token_balance: Vec<TokenBalance>,
    pub connected_wallet_info: Option<ConnectedWalletInfo>,
    pub preferred_account_type: Option<AccountType>,
    pub social_provider: Option<String>,
    pub farcaster_url: Option<String>,
    pub status: Option<AccountStatus>,
    /// Address -> human label.
    pub address_labels: BTreeMap<String, String>,
    pub all_accounts: Vec<AccountEntry>,
}

impl Default for AccountState {
    fn default() -> Self {
        Self {
            is_connected: false,
            current_tab: 0,
            caip_address: None,
            address: None,
            balance: None,
            balance_symbol: None,
            profile_name: None,
            profile_image: None,
            address_explorer_url: None,
            smart_account_deployed: false,
            token_balance: Vec::new(),
            connected_wallet_info: None,
            preferred_account_type: None,
            social_provider: None,
            farcaster_url: None,
            status: None,
            address_labels: BTreeMap::new(),
            all_accounts: Vec::new(),
        }
    }
}

/// A single named account field together with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountProp {
    IsConnected(bool),
    CurrentTab(u32),
    CaipAddress(Option<CaipAddress>),
    Address(Option<String>),
    Balance(Option<String>),
    BalanceSymbol(Option<String>),
    ProfileName(Option<String>),
    ProfileImage(Option<String>),
    AddressExplorerUrl(Option<String>),
    SmartAccountDeployed(bool),
    TokenBalance(Vec<TokenBalance>),
    ConnectedWalletInfo(Option<ConnectedWalletInfo>),
    PreferredAccountType(Option<AccountType>),
    SocialProvider(Option<String>),
    FarcasterUrl(Option<String>),
    Status(Option<AccountStatus>),
    AddressLabels(BTreeMap<String, String>),
    AllAccounts(Vec<AccountEntry>),
}

/// Name of an account field, used for keyed reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKey {
    IsConnected,
    CurrentTab,
    CaipAddress,
    Address,
    Balance,
    BalanceSymbol,
    ProfileName,
    ProfileImage,
    AddressExplorerUrl,
    SmartAccountDeployed,
    TokenBalance,
    ConnectedWalletInfo,
    PreferredAccountType,
    SocialProvider,
    FarcasterUrl,
    Status,
    AddressLabels,
    AllAccounts,
}

impl AccountState {
    /// Read one field as a tagged value.
    pub fn get(&self, key: AccountKey) -> AccountProp {
        match key {
            AccountKey::IsConnected => AccountProp::IsConnected(self.is_connected),
            AccountKey::CurrentTab => AccountProp::CurrentTab(self.current_tab),
            AccountKey::CaipAddress => AccountProp::CaipAddress(self.caip_address.clone()),
            AccountKey::Address => AccountProp::Address(self.address.clone()),
            AccountKey::Balance => AccountProp::Balance(self.balance.clone()),
            AccountKey::BalanceSymbol => AccountProp::BalanceSymbol(self.balance_symbol.clone()),
            AccountKey::ProfileName => AccountProp::ProfileName(self.profile_name.clone()),
            AccountKey::ProfileImage => AccountProp::ProfileImage(self.profile_image.clone()),
            AccountKey::AddressExplorerUrl => {
                AccountProp::AddressExplorerUrl(self.address_explorer_url.clone())
            }
            AccountKey::SmartAccountDeployed => {
                AccountProp::SmartAccountDeployed(self.smart_account_deployed)
            }
            AccountKey::TokenBalance => AccountProp::TokenBalance(self.token_balance.clone()),
            AccountKey::ConnectedWalletInfo => {
                AccountProp::ConnectedWalletInfo(self.connected_wallet_info.clone())
            }
            AccountKey::PreferredAccountType => {
                AccountProp::PreferredAccountType(self.preferred_account_type)
            }
            AccountKey::SocialProvider => AccountProp::SocialProvider(self.social_provider.clone()),
            AccountKey::FarcasterUrl => AccountProp::FarcasterUrl(self.farcaster_url.clone()),
            AccountKey::Status => AccountProp::Status(self.status),
            AccountKey::AddressLabels => AccountProp::AddressLabels(self.address_labels.clone()),
            AccountKey::AllAccounts => AccountProp::AllAccounts(self.all_accounts.clone()),
        }
    }
}

impl AccountProp {
    /// The field this value belongs to.
    pub fn key(&self) -> AccountKey {
        match self {
            AccountProp::IsConnected(_) => AccountKey::IsConnected,
            AccountProp::CurrentTab(_) => AccountKey::CurrentTab,
            AccountProp::CaipAddress(_) => AccountKey::CaipAddress,
            AccountProp::Address(_) => AccountKey::Address,
            AccountProp::Balance(_) => AccountKey::Balance,
            AccountProp::BalanceSymbol(_) => AccountKey::BalanceSymbol,
            AccountProp::ProfileName(_) => AccountKey::ProfileName,
            AccountProp::ProfileImage(_) => AccountKey::ProfileImage,
            AccountProp::AddressExplorerUrl(_) => AccountKey::AddressExplorerUrl,
            AccountProp::SmartAccountDeployed(_) => AccountKey::SmartAccountDeployed,
            AccountProp::TokenBalance(_) => AccountKey::TokenBalance,
            AccountProp::ConnectedWalletInfo(_) => AccountKey::ConnectedWalletInfo,
            AccountProp::PreferredAccountType(_) => AccountKey::PreferredAccountType,
            AccountProp::SocialProvider(_) => AccountKey::SocialProvider,
            AccountProp::FarcasterUrl(_) => AccountKey::FarcasterUrl,
            AccountProp::Status(_) => AccountKey::Status,
            AccountProp::AddressLabels(_) => AccountKey::AddressLabels,
            AccountProp::AllAccounts(_) => AccountKey::AllAccounts,
        }
    }

    fn apply(&self, state: &mut AccountState) {
        match self.clone() {
            AccountProp::IsConnected(v) => state.is_connected = v,
            AccountProp::CurrentTab(v) => state.current_tab = v,
            AccountProp::CaipAddress(v) => state.caip_address = v,
            AccountProp::Address(v) => state.address = v,
            AccountProp::Balance(v) => state.balance = v,
            AccountProp::BalanceSymbol(v) => state.balance_symbol = v,
            AccountProp::ProfileName(v) => state.profile_name = v,
            AccountProp::ProfileImage(v) => state.profile_image = v,
            AccountProp::AddressExplorerUrl(v) => state.address_explorer_url = v,
            AccountProp::SmartAccountDeployed(v) => state.smart_account_deployed = v,
            AccountProp::TokenBalance(v) => state.token_balance = v,
            AccountProp::ConnectedWalletInfo(v) => state.connected_wallet_info = v,
            AccountProp::PreferredAccountType(v) => state.preferred_account_type = v,
            AccountProp::SocialProvider(v) => state.social_provider = v,
            AccountProp::FarcasterUrl(v) => state.farcaster_url = v,
            AccountProp::Status(v) => state.status = v,
            AccountProp::AddressLabels(v) => state.address_labels = v,
            AccountProp::AllAccounts(v) => state.all_accounts = v,
        }
    }
}

/// Shallow partial update: every listed field replaces the base field,
/// unlisted fields carry over. Later entries win over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    props: Vec<AccountProp>,
}

impl AccountPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed "disconnected" update applied on account reset.
    ///
    /// Clears identity, balance and wallet fields; address labels and the
    /// account list are left alone.
    pub fn disconnected() -> Self {
        Self {
            props: vec![
                AccountProp::IsConnected(false),
                AccountProp::SmartAccountDeployed(false),
                AccountProp::CurrentTab(0),
                AccountProp::CaipAddress(None),
                AccountProp::Address(None),
                AccountProp::Balance(None),
                AccountProp::BalanceSymbol(None),
                AccountProp::ProfileName(None),
                AccountProp::ProfileImage(None),
                AccountProp::AddressExplorerUrl(None),
                AccountProp::TokenBalance(Vec::new()),
                AccountProp::ConnectedWalletInfo(None),
                AccountProp::PreferredAccountType(None),
                AccountProp::SocialProvider(None),
                AccountProp::FarcasterUrl(None),
            ],
        }
    }

    /// Add a field update.
    pub fn with(mut self, prop: AccountProp) -> Self {
        self.props.push(prop);
        self
    }

    pub fn caip_address(self, address: CaipAddress) -> Self {
        self.with(AccountProp::CaipAddress(Some(address)))
    }

    pub fn address(self, address: impl Into<String>) -> Self {
        self.with(AccountProp::Address(Some(address.into())))
    }

    pub fn is_connected(self, connected: bool) -> Self {
        self.with(AccountProp::IsConnected(connected))
    }

    pub fn balance(self, balance: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.with(AccountProp::Balance(Some(balance.into())))
            .with(AccountProp::BalanceSymbol(Some(symbol.into())))
    }

    pub fn status(self, status: AccountStatus) -> Self {
        self.with(AccountProp::Status(Some(status)))
    }

    /// The address this patch sets, if it sets a non-empty one.
    pub fn new_caip_address(&self) -> Option<&CaipAddress> {
        self.props
            .iter()
            .rev()
            .find_map(|prop| match prop {
                AccountProp::CaipAddress(address) => Some(address.as_ref()),
                _ => None,
            })
            .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Produce the merged snapshot; `base` is left untouched.
    pub fn apply_to(&self, base: &AccountState) -> AccountState {
        let mut next = base.clone();
        for prop in &self.props {
            prop.apply(&mut next);
        }
        next
    }
}

impl From<AccountProp> for AccountPatch {
    fn from(prop: AccountProp) -> Self {
        Self { props: vec![prop] }
    }
}

impl FromIterator<AccountProp> for AccountPatch {
    fn from_iter<I: IntoIterator<Item = AccountProp>>(iter: I) -> Self {
        Self {
            props: iter.into_iter().collect(),
        }
    }
}
