//! Population maintenance: the spawn primitive and the two cadence rules that
//! keep the world stocked with bodies.
//!
//! # Invariants
//! - Live ring-spawned bodies never exceed `max_population`.
//! - While fewer than `low_water_mark` bodies are live, every tick spawns
//!   exactly one top-up body, whatever the ring rule did.
//! - Doomed registry slots are reclaimed before either rule runs.

mod config;
mod maintainer;
pub mod placement;
mod spawner;

pub use config::{ConfigError, PopulationConfig};
pub use maintainer::{PopulationMaintainer, RING_SPEED_RANGE, TOP_UP_MASS_RANGE, TickReport};
pub use spawner::Spawner;

pub fn crate_info() -> &'static str {
    "stellar-population v0.1.0"
}
