//! # Runtime Adapters
//!
//! Outbound port implementations for a process without a UI: controllers
//! that keep only the latest published state, and a public-state mirror
//! async observers can await.

pub mod controllers;
pub mod watch;

pub use controllers::LatestState;
pub use watch::{PublicStatus, WatchPublicState};
