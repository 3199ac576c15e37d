//! # Domain Layer
//!
//! Storage keys, persisted value shapes and storage errors.

pub mod entities;
pub mod errors;
pub mod keys;
