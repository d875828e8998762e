//! Top-level facade crate for enchguard.
//!
//! Re-exports the core data model and the enforcement engine so hosts can depend on a single crate.

pub mod core {
    pub use enchguard_core::*;
}

pub mod engine {
    pub use enchguard_engine::*;
}
