use serde::{Deserialize, Serialize};
use std::fmt;

/// Generational handle to a body slot in the registry.
///
/// The index names a slot; the generation distinguishes successive occupants
/// of the same slot, so a handle kept past its body's destruction never
/// aliases the body that later reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle {
    pub index: u32,
    pub generation: u32,
}

impl BodyHandle {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Ordered growth stages of a celestial body.
///
/// Only the initial stage is assigned here; transitions between stages are
/// driven by the host simulation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum EvolutionStage {
    #[default]
    Meteorite,
    Planetoid,
    Planet,
    Star,
}

/// Specialization path a body commits to once, at its branch checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetBranch {
    Frost,
    War,
}

impl fmt::Display for PlanetBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Frost => "frost",
            Self::War => "war",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for PlanetBranch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "frost" => Ok(Self::Frost),
            "war" => Ok(Self::War),
            other => Err(format!("unknown branch: {other}")),
        }
    }
}

/// Special abilities a body has been granted by mutations.
///
/// Flags only ever switch on. What each capability does at runtime is up to
/// the systems that read this set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub teleport: bool,
    pub life_steal: bool,
    pub dyson_sphere: bool,
}

impl Capabilities {
    /// Union of two capability sets.
    pub fn merge(&mut self, other: Capabilities) {
        self.teleport |= other.teleport;
        self.life_steal |= other.life_steal;
        self.dyson_sphere |= other.dyson_sphere;
    }

    pub fn is_empty(&self) -> bool {
        !(self.teleport || self.life_steal || self.dyson_sphere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_ordering_is_index_then_generation() {
        let a = BodyHandle::new(1, 5);
        let b = BodyHandle::new(2, 0);
        assert!(a < b);
        assert_ne!(BodyHandle::new(3, 0), BodyHandle::new(3, 1));
    }

    #[test]
    fn stages_are_ordered() {
        assert!(EvolutionStage::Meteorite < EvolutionStage::Planetoid);
        assert!(EvolutionStage::Planet < EvolutionStage::Star);
        assert_eq!(EvolutionStage::default(), EvolutionStage::Meteorite);
    }

    #[test]
    fn branch_parses_case_insensitively() {
        assert_eq!("Frost".parse::<PlanetBranch>(), Ok(PlanetBranch::Frost));
        assert_eq!("war".parse::<PlanetBranch>(), Ok(PlanetBranch::War));
        assert!("fire".parse::<PlanetBranch>().is_err());
    }

    #[test]
    fn capabilities_merge_only_adds() {
        let mut caps = Capabilities {
            teleport: true,
            ..Capabilities::default()
        };
        caps.merge(Capabilities {
            life_steal: true,
            ..Capabilities::default()
        });
        assert!(caps.teleport);
        assert!(caps.life_steal);
        assert!(!caps.dyson_sphere);
        assert!(Capabilities::default().is_empty());
    }
}
