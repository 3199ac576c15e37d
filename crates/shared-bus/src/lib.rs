//! # Shared Bus - Change Notification Bus
//!
//! Synchronous, in-process publish/subscribe used by the chain coordinator to
//! tell observers which top-level fields a mutation changed.
//!
//! ```text
//! ┌──────────────┐   publish(changed, &snapshot)   ┌──────────────┐
//! │ Coordinator  │ ──────────────────────────────▶ │  Change Bus  │
//! └──────────────┘                                 └──────┬───────┘
//!                                        keyed / derived  │
//!                                                         ▼
//!                                                   subscribers
//! ```
//!
//! ## Delivery Rules
//!
//! - Delivery happens on the publishing thread, in subscription order.
//! - Keyed listeners fire when their key is in the change set.
//! - Derived listeners compare the newly selected value with the previous
//!   one and stay silent when nothing changed.
//! - Dropping a [`Subscription`] unsubscribes.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::ChangeSet;
pub use publisher::{ChangeBus, ChangePublisher};
pub use subscriber::Subscription;
