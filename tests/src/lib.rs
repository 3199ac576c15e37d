//! # Multichain Session Test Suite
//!
//! Cross-crate flows: the coordinator wired to real storage adapters, the
//! resolution policy against session hints, and restarts over a JSON file.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── support.rs      # Shared wiring for the flows below
//!     ├── bring_up.rs     # Initialization, switching, propagation counts
//!     ├── resolution.rs   # Client resolution against stored hints
//!     └── persistence.rs  # Restarts over the JSON store, storage failures
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ms-tests
//! cargo test -p ms-tests integration::persistence::
//! ```

#![allow(dead_code)]

pub mod integration;
