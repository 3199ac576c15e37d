//! # Session Storage (ms-02)
//!
//! Persistent key-value storage for wallet session state: the active
//! network, the wallet and connector used for the current session, social
//! login details, the chosen WalletConnect deep link and recent wallets.
//!
//! ## Failure Model
//!
//! Storage is best-effort. Adapters return `Result<_, StorageError>`;
//! [`SafeStorage`] is the only place those errors are handled, and it maps
//! them to "absent" (reads) or "ignored" (writes) after logging them.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Keys, persisted value shapes, errors
//! - `ports/` - `SessionStorageApi` (inbound), `KeyValueStore` (outbound)
//! - `adapters/` - In-memory and JSON file stores
//! - `service/` - `SafeStorage` and `SessionStorage`
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use ms_02_session_storage::{JsonFileStore, SafeStorage, SessionStorage, SessionStorageApi};
//!
//! let store = Arc::new(JsonFileStore::open("./session-storage.json")?);
//! let session = SessionStorage::new(SafeStorage::new(store));
//! let restored = session.active_caip_network();
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryStore, JsonFileStore};
pub use domain::entities::{DeepLink, RecentWallet, MAX_RECENT_WALLETS};
pub use domain::errors::StorageError;
pub use domain::keys::StorageKey;
pub use ports::inbound::SessionStorageApi;
pub use ports::outbound::{FailingStore, KeyValueStore};
pub use service::{SafeStorage, SessionStorage};
