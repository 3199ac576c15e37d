//! # Error Types
//!
//! Errors shared across crates.

use thiserror::Error;

/// Malformed chain-agnostic identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaipError {
    /// Not a `namespace:reference` pair.
    #[error("Invalid CAIP-2 network id: {0:?}")]
    InvalidNetworkId(String),

    /// Not a `namespace:reference:address` triple.
    #[error("Invalid CAIP-10 account address: {0:?}")]
    InvalidAddress(String),

    /// Unknown connector or adapter tag.
    #[error("Unknown {kind} tag: {value:?}")]
    UnknownTag {
        /// Which tag family was parsed.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}
