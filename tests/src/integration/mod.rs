//! Cross-crate integration flows.

pub mod bring_up;
pub mod persistence;
pub mod resolution;

#[cfg(test)]
pub(crate) mod support;
