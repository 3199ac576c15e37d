//! # Adapters
//!
//! - `memory`: process-local store for tests and ephemeral sessions
//! - `file`: JSON file store guarded by an `fs2` lock

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
