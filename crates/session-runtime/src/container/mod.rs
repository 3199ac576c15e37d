//! # Session Container
//!
//! Holds the coordinator together with the store, controllers and mirror
//! it was wired to.

pub mod config;
pub mod session;

pub use config::{
    AdapterEntry, ConfigError, NetworkEntry, RuntimeConfig, SessionFile, StorageConfig,
    DEFAULT_STORAGE_PATH,
};
pub use session::SessionContainer;
