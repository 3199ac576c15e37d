//! # Runtime Configuration
//!
//! Where the session store lives and which adapters bring-up registers.
//!
//! ## Load Order
//!
//! 1. Built-in defaults (a universal adapter over the stock networks)
//! 2. The JSON session file named by `MS_SESSION_CONFIG`, if set
//! 3. Environment overrides (`MS_STORAGE_PATH`)

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ms_01_chain_coordinator::{AdapterConfig, CoordinatorConfig};
use serde::{Deserialize, Serialize};
use shared_types::{presets, AdapterType, CaipNetwork, CaipNetworkId, ChainNamespace};
use thiserror::Error;
use tracing::info;

/// Store location used when `MS_STORAGE_PATH` is not set.
pub const DEFAULT_STORAGE_PATH: &str = "./session-storage.json";

/// Environment variable naming the JSON session file.
pub const SESSION_CONFIG_ENV: &str = "MS_SESSION_CONFIG";

/// Environment variable overriding the store location.
pub const STORAGE_PATH_ENV: &str = "MS_STORAGE_PATH";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse session file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown network {0}; give a full descriptor instead of an id")]
    UnknownNetwork(CaipNetworkId),

    #[error("Namespace {0} is configured more than once")]
    DuplicateNamespace(ChainNamespace),

    #[error("Adapter for {0} cannot use the universal adapter type")]
    UniversalAsDedicated(ChainNamespace),
}

/// A network given either by stock id or as a full descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkEntry {
    Id(CaipNetworkId),
    Descriptor(CaipNetwork),
}

impl NetworkEntry {
    pub fn resolve(&self) -> Result<CaipNetwork, ConfigError> {
        match self {
            NetworkEntry::Id(id) => {
                presets::by_id(id.as_str()).ok_or_else(|| ConfigError::UnknownNetwork(id.clone()))
            }
            NetworkEntry::Descriptor(network) => Ok(network.clone()),
        }
    }
}

impl From<CaipNetwork> for NetworkEntry {
    fn from(network: CaipNetwork) -> Self {
        NetworkEntry::Id(network.id)
    }
}

/// One adapter as written in the session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterEntry {
    pub chain_namespace: ChainNamespace,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapter_type: Option<AdapterType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_network: Option<NetworkEntry>,
    #[serde(default)]
    pub caip_networks: Vec<NetworkEntry>,
}

impl AdapterEntry {
    /// Coordinator bring-up descriptor; client handles are left unset.
    pub fn to_adapter_config(&self) -> Result<AdapterConfig, ConfigError> {
        let networks = self
            .caip_networks
            .iter()
            .map(NetworkEntry::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        let mut config =
            AdapterConfig::new(self.chain_namespace.clone()).with_caip_networks(networks);
        if let Some(adapter_type) = self.adapter_type {
            config = config.with_adapter_type(adapter_type);
        }
        if let Some(default_network) = &self.default_network {
            config = config.with_default_network(default_network.resolve()?);
        }
        Ok(config)
    }
}

/// Contents of the JSON session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFile {
    #[serde(default)]
    pub adapters: Vec<AdapterEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universal: Option<AdapterEntry>,
}

impl Default for SessionFile {
    /// Universal adapter over every stock network, EVM first.
    fn default() -> Self {
        Self {
            adapters: Vec::new(),
            universal: Some(AdapterEntry {
                chain_namespace: ChainNamespace::eip155(),
                adapter_type: Some(AdapterType::Universal),
                default_network: Some(presets::ethereum_mainnet().into()),
                caip_networks: presets::all().into_iter().map(NetworkEntry::from).collect(),
            }),
        }
    }
}

impl SessionFile {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: SessionFile = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        file.validate()?;
        Ok(file)
    }

    /// Rejects repeated namespaces and dedicated adapters tagged universal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.adapters {
            if !seen.insert(&entry.chain_namespace) {
                return Err(ConfigError::DuplicateNamespace(
                    entry.chain_namespace.clone(),
                ));
            }
            if entry.adapter_type == Some(AdapterType::Universal) {
                return Err(ConfigError::UniversalAsDedicated(
                    entry.chain_namespace.clone(),
                ));
            }
        }
        Ok(())
    }

    /// Dedicated adapters, in file order.
    pub fn adapter_configs(&self) -> Result<Vec<AdapterConfig>, ConfigError> {
        self.adapters
            .iter()
            .map(AdapterEntry::to_adapter_config)
            .collect()
    }

    pub fn universal_config(&self) -> Result<Option<AdapterConfig>, ConfigError> {
        self.universal
            .as_ref()
            .map(AdapterEntry::to_adapter_config)
            .transpose()
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// JSON file backing the session store.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub storage: StorageConfig,
    pub session: SessionFile,
    pub coordinator: CoordinatorConfig,
}

impl RuntimeConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(SESSION_CONFIG_ENV) {
            config.session = SessionFile::from_path(Path::new(&path))?;
            info!(path = %path, "Loaded session file");
        }

        if let Some(path) = lookup(STORAGE_PATH_ENV) {
            config.storage.path = PathBuf::from(path);
        }

        Ok(config)
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.path = path.into();
        self
    }

    pub fn with_session(mut self, session: SessionFile) -> Self {
        self.session = session;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = RuntimeConfig::load_with(lookup(&[])).unwrap();
        assert_eq!(config.storage.path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert!(config.session.adapters.is_empty());

        let universal = config.session.universal_config().unwrap().unwrap();
        assert_eq!(universal.caip_networks, presets::all());
        assert_eq!(universal.fallback_network(), Some(&presets::ethereum_mainnet()));
    }

    #[test]
    fn test_session_file_then_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("session.json");
        fs::write(
            &session_path,
            r#"{
                "adapters": [
                    {
                        "chainNamespace": "solana",
                        "adapterType": "solana",
                        "defaultNetwork": "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1",
                        "caipNetworks": ["solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp"]
                    }
                ]
            }"#,
        )
        .unwrap();

        let config = RuntimeConfig::load_with(lookup(&[
            (SESSION_CONFIG_ENV, session_path.to_str().unwrap()),
            (STORAGE_PATH_ENV, "/tmp/elsewhere.json"),
        ]))
        .unwrap();

        assert_eq!(config.storage.path, PathBuf::from("/tmp/elsewhere.json"));
        assert!(config.session.universal.is_none());

        let adapters = config.session.adapter_configs().unwrap();
        assert_eq!(adapters.len(), 1);
        assert_eq!(adapters[0].adapter_type, Some(AdapterType::Solana));
        assert_eq!(adapters[0].default_network, Some(presets::solana_devnet()));
        assert_eq!(adapters[0].caip_networks, vec![presets::solana_mainnet()]);
    }

    #[test]
    fn test_full_descriptor_is_accepted() {
        let json = r#"{
            "universal": {
                "chainNamespace": "eip155",
                "caipNetworks": [{
                    "id": "eip155:8453", "chainId": "8453", "name": "Base",
                    "chainNamespace": "eip155", "currency": "ETH",
                    "explorerUrl": "https://basescan.org", "rpcUrl": "https://mainnet.base.org"
                }]
            }
        }"#;
        let file: SessionFile = serde_json::from_str(json).unwrap();
        let universal = file.universal_config().unwrap().unwrap();
        assert_eq!(universal.caip_networks[0].name, "Base");
    }

    #[test]
    fn test_unknown_stock_id_is_rejected() {
        let file = SessionFile {
            adapters: vec![AdapterEntry {
                chain_namespace: ChainNamespace::eip155(),
                adapter_type: None,
                default_network: None,
                caip_networks: vec![NetworkEntry::Id("eip155:424242".parse().unwrap())],
            }],
            universal: None,
        };
        assert!(matches!(
            file.adapter_configs(),
            Err(ConfigError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates_and_universal_tag() {
        let entry = AdapterEntry {
            chain_namespace: ChainNamespace::eip155(),
            adapter_type: Some(AdapterType::Wagmi),
            default_network: None,
            caip_networks: Vec::new(),
        };
        let duplicated = SessionFile {
            adapters: vec![entry.clone(), entry.clone()],
            universal: None,
        };
        assert!(matches!(
            duplicated.validate(),
            Err(ConfigError::DuplicateNamespace(_))
        ));

        let tagged = SessionFile {
            adapters: vec![AdapterEntry {
                adapter_type: Some(AdapterType::Universal),
                ..entry
            }],
            universal: None,
        };
        assert!(matches!(
            tagged.validate(),
            Err(ConfigError::UniversalAsDedicated(_))
        ));
    }

    #[test]
    fn test_missing_session_file_is_read_error() {
        let err = RuntimeConfig::load_with(lookup(&[(SESSION_CONFIG_ENV, "/nonexistent/s.json")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
