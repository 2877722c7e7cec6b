//! Mutations: the upgrade catalog, the application rule and the constrained
//! random selection offered at growth checkpoints.
//!
//! # Invariants
//! - The catalog is append-only while building and read-only afterwards.
//! - A selection never repeats an entry and never offers branch-specific
//!   entries to a body without a branch.

pub mod catalog;
pub mod mutation;
pub mod selector;

pub use catalog::{CatalogBuilder, CatalogError, MutationCatalog, MutationId};
pub use mutation::{Mutation, MutationCategory};
pub use selector::{MutationSelector, Offer};

pub fn crate_info() -> &'static str {
    "stellar-mutation v0.1.0"
}
