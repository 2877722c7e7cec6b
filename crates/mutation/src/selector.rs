use rand::Rng;
use stellar_kernel::CelestialBody;

use crate::catalog::{MutationCatalog, MutationId};
use crate::mutation::Mutation;

/// One catalog entry drawn for a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offer<'a> {
    pub id: MutationId,
    pub mutation: &'a Mutation,
}

/// Draws a random, constraint-filtered subset of a catalog.
///
/// Holds no state beyond the catalog reference; the random source is supplied
/// per call so seeded callers get reproducible draws.
#[derive(Debug, Clone, Copy)]
pub struct MutationSelector<'a> {
    catalog: &'a MutationCatalog,
}

impl<'a> MutationSelector<'a> {
    pub fn new(catalog: &'a MutationCatalog) -> Self {
        Self { catalog }
    }

    /// Catalog entries the body may be offered, in catalog order.
    ///
    /// Branch-specific entries require the body to have committed to a branch.
    pub fn eligible(&self, body: &CelestialBody) -> Vec<Offer<'a>> {
        let has_branch = body.has_branch();
        self.catalog
            .iter()
            .filter(|(_, m)| has_branch || !m.is_branch_specific())
            .map(|(id, mutation)| Offer { id, mutation })
            .collect()
    }

    /// Draw up to `count` distinct eligible entries.
    ///
    /// Each draw picks uniformly among the entries not yet drawn. The result
    /// has `min(count, eligible)` entries in draw order.
    pub fn select<R: Rng + ?Sized>(
        &self,
        count: usize,
        body: &CelestialBody,
        rng: &mut R,
    ) -> Vec<Offer<'a>> {
        let mut pool = self.eligible(body);
        let take = count.min(pool.len());
        let mut selected = Vec::with_capacity(take);
        for _ in 0..take {
            let index = rng.gen_range(0..pool.len());
            selected.push(pool.swap_remove(index));
        }
        tracing::debug!(
            requested = count,
            offered = selected.len(),
            "selected mutations"
        );
        selected
    }
}
