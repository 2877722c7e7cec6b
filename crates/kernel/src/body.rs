use glam::Vec2;
use serde::{Deserialize, Serialize};
use stellar_common::{Capabilities, EvolutionStage, PlanetBranch};

/// Which rule or caller brought a body into the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpawnOrigin {
    /// The designated player body.
    Player,
    /// Startup seeding.
    Seed,
    /// Ring top-up around the reference point.
    Ring,
    /// Low-water-mark top-up.
    TopUp,
    /// Direct call to the public spawn primitive.
    Manual,
}

/// Errors from operations on a single body.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BodyError {
    #[error("branch already assigned: {0}")]
    BranchAlreadyAssigned(PlanetBranch),
}

/// Instantiation template for new bodies.
///
/// A body spawned without a template is skipped, so leaving a template unset
/// in configuration disables that kind of spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyTemplate {
    /// Gravity strength before any derived-property pass.
    pub gravity_strength: f32,
    /// Bodies without a rigid body never receive an initial velocity.
    pub has_rigid_body: bool,
}

impl Default for BodyTemplate {
    fn default() -> Self {
        Self {
            gravity_strength: 1.0,
            has_rigid_body: true,
        }
    }
}

/// A celestial body as seen by the progression core.
///
/// Position and velocity are integrated by the host physics; the core sets
/// them only at spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub mass: f32,
    pub gravity_strength: f32,
    pub speed_multiplier: f32,
    pub defense_multiplier: f32,
    pub stage: EvolutionStage,
    pub position: Vec2,
    pub velocity: Vec2,
    pub capabilities: Capabilities,
    pub origin: SpawnOrigin,
    branch: Option<PlanetBranch>,
    applied_mutations: Vec<String>,
}

impl CelestialBody {
    /// A meteorite-stage body at rest.
    pub fn new(position: Vec2, mass: f32, origin: SpawnOrigin) -> Self {
        Self::from_template(&BodyTemplate::default(), position, mass, origin)
    }

    pub fn from_template(
        template: &BodyTemplate,
        position: Vec2,
        mass: f32,
        origin: SpawnOrigin,
    ) -> Self {
        Self {
            mass,
            gravity_strength: template.gravity_strength,
            speed_multiplier: 1.0,
            defense_multiplier: 1.0,
            stage: EvolutionStage::Meteorite,
            position,
            velocity: Vec2::ZERO,
            capabilities: Capabilities::default(),
            origin,
            branch: None,
            applied_mutations: Vec::new(),
        }
    }

    pub fn branch(&self) -> Option<PlanetBranch> {
        self.branch
    }

    pub fn has_branch(&self) -> bool {
        self.branch.is_some()
    }

    /// Commit the body to a branch. A body commits exactly once.
    pub fn assign_branch(&mut self, branch: PlanetBranch) -> Result<(), BodyError> {
        if let Some(existing) = self.branch {
            return Err(BodyError::BranchAlreadyAssigned(existing));
        }
        self.branch = Some(branch);
        Ok(())
    }

    /// Names of mutations applied so far, oldest first.
    pub fn applied_mutations(&self) -> &[String] {
        &self.applied_mutations
    }

    pub fn record_mutation(&mut self, name: impl Into<String>) {
        self.applied_mutations.push(name.into());
    }
}

/// Hook that recomputes derived physical fields after the mass changes.
///
/// Supplied by the host simulation; the core calls it on every body it spawns.
pub trait DerivePhysicalProperties {
    fn derive(&self, body: &mut CelestialBody);
}

/// Gravity proportional to mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGravity {
    pub gravity_per_mass: f32,
}

impl Default for LinearGravity {
    fn default() -> Self {
        Self {
            gravity_per_mass: 1.0,
        }
    }
}

impl DerivePhysicalProperties for LinearGravity {
    fn derive(&self, body: &mut CelestialBody) {
        body.gravity_strength = self.gravity_per_mass * body.mass;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_body_is_meteorite_without_branch() {
        let body = CelestialBody::new(Vec2::new(1.0, 2.0), 3.0, SpawnOrigin::Seed);
        assert_eq!(body.stage, EvolutionStage::Meteorite);
        assert_eq!(body.branch(), None);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.speed_multiplier, 1.0);
        assert!(body.capabilities.is_empty());
    }

    #[test]
    fn branch_assigns_once() {
        let mut body = CelestialBody::new(Vec2::ZERO, 1.0, SpawnOrigin::Player);
        assert_eq!(body.assign_branch(PlanetBranch::Frost), Ok(()));
        assert_eq!(
            body.assign_branch(PlanetBranch::War),
            Err(BodyError::BranchAlreadyAssigned(PlanetBranch::Frost))
        );
        assert_eq!(body.branch(), Some(PlanetBranch::Frost));
    }

    #[test]
    fn template_sets_gravity() {
        let template = BodyTemplate {
            gravity_strength: 4.5,
            has_rigid_body: false,
        };
        let body = CelestialBody::from_template(&template, Vec2::ZERO, 1.0, SpawnOrigin::Ring);
        assert_eq!(body.gravity_strength, 4.5);
    }

    #[test]
    fn linear_gravity_tracks_mass() {
        let mut body = CelestialBody::new(Vec2::ZERO, 2.5, SpawnOrigin::Seed);
        LinearGravity {
            gravity_per_mass: 2.0,
        }
        .derive(&mut body);
        assert_eq!(body.gravity_strength, 5.0);
    }
}
