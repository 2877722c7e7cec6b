use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::mutation::{Mutation, MutationCategory};

/// Position of a mutation within its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MutationId(pub usize);

/// Errors raised while registering catalog entries.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate mutation name: {0}")]
    DuplicateName(String),
    #[error("mutation {name}: {field} = {value} would not keep stats positive")]
    InvalidBonus {
        name: String,
        field: &'static str,
        value: f32,
    },
    #[error("mutation name must not be empty")]
    EmptyName,
}

/// Append-only builder. The only way to grow a catalog.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<Mutation>,
    names: HashSet<String>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append one entry.
    ///
    /// Bonuses must be finite and greater than -1 so that `1 + bonus` stays
    /// positive.
    pub fn register(&mut self, mutation: Mutation) -> Result<MutationId, CatalogError> {
        if mutation.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        for (field, value) in mutation.bonuses() {
            if !value.is_finite() || value <= -1.0 {
                return Err(CatalogError::InvalidBonus {
                    name: mutation.name.clone(),
                    field,
                    value,
                });
            }
        }
        if !self.names.insert(mutation.name.clone()) {
            return Err(CatalogError::DuplicateName(mutation.name));
        }
        let id = MutationId(self.entries.len());
        tracing::debug!(name = %mutation.name, category = %mutation.category, "registered mutation");
        self.entries.push(mutation);
        Ok(id)
    }

    pub fn extend(
        &mut self,
        mutations: impl IntoIterator<Item = Mutation>,
    ) -> Result<(), CatalogError> {
        for m in mutations {
            self.register(m)?;
        }
        Ok(())
    }

    pub fn build(self) -> MutationCatalog {
        MutationCatalog {
            entries: self.entries,
        }
    }
}

/// Fixed, ordered collection of every mutation the game can offer.
///
/// Read-only once built; share it by reference.
#[derive(Debug, Clone, Default)]
pub struct MutationCatalog {
    entries: Vec<Mutation>,
}

impl MutationCatalog {
    /// An empty catalog. Selection against it always yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Build a catalog from a list of entries, validating each.
    pub fn from_mutations(
        mutations: impl IntoIterator<Item = Mutation>,
    ) -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::new();
        builder.extend(mutations)?;
        Ok(builder.build())
    }

    /// The stock catalog shipped with the game.
    pub fn standard() -> Self {
        Self {
            entries: standard_mutations(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: MutationId) -> Option<&Mutation> {
        self.entries.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<(MutationId, &Mutation)> {
        self.iter().find(|(_, m)| m.name == name)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (MutationId, &Mutation)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, m)| (MutationId(i), m))
    }
}

fn standard_mutations() -> Vec<Mutation> {
    use MutationCategory::*;
    vec![
        Mutation::new("Dense Core", "Mass +20%, denser interior", Physical).with_mass_bonus(0.2),
        Mutation::new("Gravity Slingshot", "Gravity strength +50%", Physical)
            .with_gravity_bonus(0.5),
        Mutation::new(
            "Stellar Spores",
            "Steadily siphons mass from bodies on contact",
            Ecology,
        )
        .granting_life_steal(),
        Mutation::new("Antimatter Engine", "Grants a short-range teleport", Technology)
            .granting_teleport(),
        Mutation::new(
            "Dyson Frame",
            "Star stage: converts energy into shielding",
            Technology,
        )
        .granting_dyson_sphere(),
        Mutation::new(
            "Permafrost",
            "Frost branch: doubles the radius of the slowing field",
            BranchSpecific,
        ),
        Mutation::new(
            "Army Ants",
            "War branch: impact damage grows exponentially with speed",
            BranchSpecific,
        ),
    ]
}
