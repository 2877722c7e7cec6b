use serde::{Deserialize, Serialize};
use std::fmt;
use stellar_common::Capabilities;
use stellar_kernel::CelestialBody;

/// Broad family a mutation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationCategory {
    Physical,
    Ecology,
    Technology,
    /// Only offered to bodies that have committed to a branch.
    BranchSpecific,
}

impl fmt::Display for MutationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Physical => "physical",
            Self::Ecology => "ecology",
            Self::Technology => "technology",
            Self::BranchSpecific => "branch-specific",
        };
        f.write_str(name)
    }
}

/// A permanent upgrade offered at a growth checkpoint.
///
/// Bonuses are fractional: `mass_bonus = 0.2` scales mass by 1.2. A zero bonus
/// leaves its attribute untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub name: String,
    pub description: String,
    pub category: MutationCategory,
    #[serde(default)]
    pub mass_bonus: f32,
    #[serde(default)]
    pub gravity_bonus: f32,
    #[serde(default)]
    pub speed_bonus: f32,
    #[serde(default)]
    pub defense_bonus: f32,
    #[serde(default)]
    pub grants_teleport: bool,
    #[serde(default)]
    pub grants_life_steal: bool,
    #[serde(default)]
    pub grants_dyson_sphere: bool,
}

impl Mutation {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: MutationCategory,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category,
            mass_bonus: 0.0,
            gravity_bonus: 0.0,
            speed_bonus: 0.0,
            defense_bonus: 0.0,
            grants_teleport: false,
            grants_life_steal: false,
            grants_dyson_sphere: false,
        }
    }

    pub fn with_mass_bonus(mut self, bonus: f32) -> Self {
        self.mass_bonus = bonus;
        self
    }

    pub fn with_gravity_bonus(mut self, bonus: f32) -> Self {
        self.gravity_bonus = bonus;
        self
    }

    pub fn with_speed_bonus(mut self, bonus: f32) -> Self {
        self.speed_bonus = bonus;
        self
    }

    pub fn with_defense_bonus(mut self, bonus: f32) -> Self {
        self.defense_bonus = bonus;
        self
    }

    pub fn granting_teleport(mut self) -> Self {
        self.grants_teleport = true;
        self
    }

    pub fn granting_life_steal(mut self) -> Self {
        self.grants_life_steal = true;
        self
    }

    pub fn granting_dyson_sphere(mut self) -> Self {
        self.grants_dyson_sphere = true;
        self
    }

    /// Capabilities this mutation switches on.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            teleport: self.grants_teleport,
            life_steal: self.grants_life_steal,
            dyson_sphere: self.grants_dyson_sphere,
        }
    }

    /// Bonus fields paired with their names, for validation and display.
    pub fn bonuses(&self) -> [(&'static str, f32); 4] {
        [
            ("mass_bonus", self.mass_bonus),
            ("gravity_bonus", self.gravity_bonus),
            ("speed_bonus", self.speed_bonus),
            ("defense_bonus", self.defense_bonus),
        ]
    }

    pub fn is_branch_specific(&self) -> bool {
        self.category == MutationCategory::BranchSpecific
    }

    /// Apply the mutation to a body. Total for any catalog entry.
    pub fn apply_to(&self, body: &mut CelestialBody) {
        if self.mass_bonus != 0.0 {
            body.mass *= 1.0 + self.mass_bonus;
        }
        if self.gravity_bonus != 0.0 {
            body.gravity_strength *= 1.0 + self.gravity_bonus;
        }
        if self.speed_bonus != 0.0 {
            body.speed_multiplier *= 1.0 + self.speed_bonus;
        }
        if self.defense_bonus != 0.0 {
            body.defense_multiplier *= 1.0 + self.defense_bonus;
        }
        body.capabilities.merge(self.capabilities());
        body.record_mutation(self.name.as_str());

        tracing::info!(
            mutation = %self.name,
            mass = body.mass,
            gravity = body.gravity_strength,
            "applied mutation"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use stellar_kernel::SpawnOrigin;

    fn body_with_mass(mass: f32) -> CelestialBody {
        CelestialBody::new(Vec2::ZERO, mass, SpawnOrigin::Player)
    }

    #[test]
    fn mass_bonus_scales_mass() {
        let mut body = body_with_mass(10.0);
        Mutation::new("Dense", "", MutationCategory::Physical)
            .with_mass_bonus(0.2)
            .apply_to(&mut body);
        assert!((body.mass - 12.0).abs() < 1e-5);
    }

    #[test]
    fn gravity_bonus_leaves_mass_alone() {
        let mut body = body_with_mass(10.0);
        body.gravity_strength = 2.0;
        Mutation::new("Sling", "", MutationCategory::Physical)
            .with_gravity_bonus(0.5)
            .apply_to(&mut body);
        assert!((body.gravity_strength - 3.0).abs() < 1e-5);
        assert_eq!(body.mass, 10.0);
    }

    #[test]
    fn zero_bonus_mutation_changes_no_numbers() {
        let mut body = body_with_mass(4.0);
        let before = body.clone();
        Mutation::new("Plain", "", MutationCategory::BranchSpecific).apply_to(&mut body);
        assert_eq!(body.mass, before.mass);
        assert_eq!(body.gravity_strength, before.gravity_strength);
        assert_eq!(body.speed_multiplier, before.speed_multiplier);
        assert_eq!(body.defense_multiplier, before.defense_multiplier);
        assert_eq!(body.applied_mutations(), ["Plain".to_string()]);
    }

    #[test]
    fn speed_and_defense_scale_multipliers() {
        let mut body = body_with_mass(1.0);
        Mutation::new("Swift", "", MutationCategory::Technology)
            .with_speed_bonus(0.25)
            .with_defense_bonus(-0.5)
            .apply_to(&mut body);
        assert!((body.speed_multiplier - 1.25).abs() < 1e-6);
        assert!((body.defense_multiplier - 0.5).abs() < 1e-6);
    }

    #[test]
    fn capability_flags_switch_on_and_stay_on() {
        let mut body = body_with_mass(1.0);
        Mutation::new("Spores", "", MutationCategory::Ecology)
            .granting_life_steal()
            .apply_to(&mut body);
        Mutation::new("Engine", "", MutationCategory::Technology)
            .granting_teleport()
            .apply_to(&mut body);
        assert!(body.capabilities.life_steal);
        assert!(body.capabilities.teleport);
        assert!(!body.capabilities.dyson_sphere);
    }

    #[test]
    fn repeated_application_compounds() {
        let mut body = body_with_mass(10.0);
        let m = Mutation::new("Dense", "", MutationCategory::Physical).with_mass_bonus(0.2);
        m.apply_to(&mut body);
        m.apply_to(&mut body);
        assert!((body.mass - 14.4).abs() < 1e-4);
        assert_eq!(body.applied_mutations().len(), 2);
    }

    #[test]
    fn deserializes_with_defaults() {
        let m: Mutation = serde_json::from_str(
            r#"{"name":"Dense","description":"d","category":"Physical","mass_bonus":0.2}"#,
        )
        .unwrap();
        assert_eq!(m.mass_bonus, 0.2);
        assert_eq!(m.gravity_bonus, 0.0);
        assert!(!m.grants_teleport);
    }
}
