use std::collections::BTreeMap;
use stellar_common::{BodyHandle, EvolutionStage, PlanetBranch};
use stellar_kernel::{BodyRegistry, SpawnOrigin};

/// Registry inspector for developer tooling.
///
/// Read-only queries against the body registry for debugging and headless
/// runs.
pub struct RegistryInspector;

impl RegistryInspector {
    /// Produce a summary of the registry.
    pub fn summary(registry: &BodyRegistry) -> RegistrySummary {
        let total_mass = registry.iter().map(|(_, b)| b.mass).sum::<f32>();
        RegistrySummary {
            live: registry.len(),
            capacity: registry.capacity(),
            pending_prune: registry.pending_prune(),
            pending_events: registry.events().len(),
            total_mass,
        }
    }

    /// Live bodies per spawn origin, origins with no bodies omitted.
    pub fn census(registry: &BodyRegistry) -> BTreeMap<SpawnOrigin, usize> {
        registry
            .census()
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(o, n)| (*o, *n))
            .collect()
    }

    pub fn inspect_body(registry: &BodyRegistry, handle: BodyHandle) -> Option<BodyInfo> {
        registry.get(handle).map(|b| BodyInfo {
            handle,
            origin: b.origin,
            stage: b.stage,
            branch: b.branch(),
            position: [b.position.x, b.position.y],
            mass: b.mass,
            gravity_strength: b.gravity_strength,
            mutations: b.applied_mutations().to_vec(),
        })
    }

    /// The `n` heaviest live bodies, heaviest first.
    pub fn heaviest(registry: &BodyRegistry, n: usize) -> Vec<BodyHandle> {
        let mut bodies: Vec<(BodyHandle, f32)> =
            registry.iter().map(|(h, b)| (h, b.mass)).collect();
        bodies.sort_by(|a, b| b.1.total_cmp(&a.1));
        bodies.into_iter().take(n).map(|(h, _)| h).collect()
    }
}

/// Summary of registry state for the inspector.
#[derive(Debug, Clone)]
pub struct RegistrySummary {
    pub live: usize,
    pub capacity: usize,
    pub pending_prune: usize,
    pub pending_events: usize,
    pub total_mass: f32,
}

impl std::fmt::Display for RegistrySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Registry: live={} slots={} pending_prune={} pending_events={} mass={:.2}",
            self.live, self.capacity, self.pending_prune, self.pending_events, self.total_mass
        )
    }
}

/// Detailed info about a single body.
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub handle: BodyHandle,
    pub origin: SpawnOrigin,
    pub stage: EvolutionStage,
    pub branch: Option<PlanetBranch>,
    pub position: [f32; 2],
    pub mass: f32,
    pub gravity_strength: f32,
    pub mutations: Vec<String>,
}

impl std::fmt::Display for BodyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Body [{}] {:?} {:?} pos=({:.2}, {:.2}) mass={:.3} gravity={:.3}",
            self.handle,
            self.origin,
            self.stage,
            self.position[0],
            self.position[1],
            self.mass,
            self.gravity_strength,
        )?;
        if let Some(branch) = self.branch {
            write!(f, " branch={branch}")?;
        }
        if !self.mutations.is_empty() {
            write!(f, " mutations=[{}]", self.mutations.join(", "))?;
        }
        Ok(())
    }
}
