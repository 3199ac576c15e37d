//! Algorithms
//!
//! Pure decision logic over a coordinator snapshot.

pub mod resolution;

pub use resolution::{
    decide_source, has_dedicated_adapter, hint_matches, resolve_connection_client,
    resolve_network_client, ClientSource,
};
