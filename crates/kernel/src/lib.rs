//! Body kernel: the celestial body record and the generational registry that
//! owns every live body.
//!
//! # Invariants
//! - A handle resolves iff its body is alive; destroyed bodies stop resolving
//!   immediately, their slots are reclaimed on the next prune.
//! - Every membership change produces an event record.

pub mod body;
pub mod registry;

pub use body::{
    BodyError, BodyTemplate, CelestialBody, DerivePhysicalProperties, LinearGravity, SpawnOrigin,
};
pub use registry::{BodyRegistry, RegistryEvent};

pub fn crate_info() -> &'static str {
    "stellar-kernel v0.1.0"
}
