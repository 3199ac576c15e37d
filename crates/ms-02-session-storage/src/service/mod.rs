//! # Service Layer
//!
//! - `safe_storage`: the single place where storage errors are absorbed
//! - `session`: typed session values on top of it

mod safe_storage;
mod session;


pub use safe_storage::SafeStorage;
pub use session::SessionStorage;
