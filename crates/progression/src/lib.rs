//! Progression: the coordinator that seeds a session, drives population
//! maintenance and answers growth checkpoints.
//!
//! # Invariants
//! - One coordinator owns the catalog, the registry and the random source;
//!   nothing is reached through globals.
//! - Offering mutations never changes a body. Only an accepted offer does.

pub mod config;
pub mod coordinator;
pub mod ui;

pub use config::{ConfigError, GameConfig};
pub use coordinator::{
    OFFER_COUNT, ProgressionCoordinator, ProgressionError, SEED_MASS_RANGE, StartupReport,
};
pub use ui::{ProgressionUi, RecordingUi, UiRequest};

pub fn crate_info() -> &'static str {
    "stellar-progression v0.1.0"
}
