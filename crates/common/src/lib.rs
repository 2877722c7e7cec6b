//! Shared leaf types for the stellar workspace: body handles, growth stages,
//! branches and capability sets.

pub mod types;

pub use types::{BodyHandle, Capabilities, EvolutionStage, PlanetBranch};
