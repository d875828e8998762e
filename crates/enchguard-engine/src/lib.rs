//! enchguard engine library entry.
//!
//! This crate wires the config loader, compiled policy runtime, tier cache,
//! limit resolver, and enforcement interceptor into a cohesive enforcement
//! stack. It is intended to be embedded by a host adapter (the process that
//! owns actors, inventories, and event dispatch) and by integration tests.

pub mod config;
pub mod enforce;
pub mod engine;
pub mod host;
pub mod limits;
pub mod policy;

pub use engine::EnchGuard;
