//! # Chain Coordinator Service
//!
//! `ChainCoordinator` implements [`crate::ports::ChainCoordinatorApi`] on top
//! of the domain aggregate, delivers propagation effects to the outbound
//! ports and publishes committed changes on the change bus.

// Semantic submodules
mod api;
mod core;
mod mutation;
mod subscriptions;

// Re-export public API
pub use core::{ChainCoordinator, CoordinatorDependencies};
