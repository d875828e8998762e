//! enchguard core: the enchant catalog, item/binding data model, and error types.
//!
//! This crate defines the vocabulary shared by the enforcement engine and any
//! host adapter: which enchants exist, how items carry enchant bindings, and
//! the error surface of every fallible operation. It intentionally carries no
//! runtime or host dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `EnchGuardError`/`Result` so a host
//! process never crashes on malformed input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod catalog;
pub mod error;
pub mod item;

pub use catalog::Enchant;
pub use error::{EnchGuardError, Result};
pub use item::{ActorId, BindingStore, Item, ItemKind};
