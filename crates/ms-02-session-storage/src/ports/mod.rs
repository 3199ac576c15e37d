//! # Ports Layer
//!
//! - `inbound`: what the session runtime asks of this crate
//! - `outbound`: the raw key-value store this crate drives

pub mod inbound;
pub mod outbound;
