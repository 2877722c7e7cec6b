//! Developer tooling: registry inspector for headless runs and debugging.
//!
//! # Invariants
//! - Tools never mutate the registry.

mod inspector;

pub use inspector::{BodyInfo, RegistryInspector, RegistrySummary};

pub fn crate_info() -> &'static str {
    "stellar-tools v0.1.0"
}
