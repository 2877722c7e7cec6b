use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use stellar_common::{BodyHandle, PlanetBranch};
use stellar_kernel::{
    BodyError, BodyRegistry, DerivePhysicalProperties, RegistryEvent, SpawnOrigin,
};
use stellar_mutation::{MutationCatalog, MutationId, MutationSelector};
use stellar_population::{PopulationMaintainer, Spawner, TickReport, placement};

use crate::config::{ConfigError, GameConfig};
use crate::ui::ProgressionUi;

/// Mutations offered per checkpoint.
pub const OFFER_COUNT: usize = 3;
/// Mass range for bodies seeded at startup.
pub const SEED_MASS_RANGE: (f32, f32) = (0.5, 3.0);

/// Errors from checkpoint callbacks.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProgressionError {
    #[error("body {0} is not alive")]
    UnknownBody(BodyHandle),
    #[error("no mutation with id {0:?}")]
    UnknownMutation(MutationId),
    #[error(transparent)]
    Body(#[from] BodyError),
}

/// Outcome of the startup sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartupReport {
    pub player: Option<BodyHandle>,
    pub seeded: usize,
}

/// Application-scoped owner of the catalog, the registry and the shared
/// random source.
///
/// The host engine calls [`start`](Self::start) once, then
/// [`tick`](Self::tick) every frame, and routes stage-transition and UI events
/// to the checkpoint entry points.
///
/// The registry logs every spawn, destruction notice and prune. The
/// coordinator never consumes that log, so the host must call
/// [`drain_events`](Self::drain_events) regularly or the log grows for the
/// whole session.
pub struct ProgressionCoordinator {
    config: GameConfig,
    catalog: MutationCatalog,
    registry: BodyRegistry,
    maintainer: PopulationMaintainer,
    rng: StdRng,
    ui: Option<Box<dyn ProgressionUi>>,
    derive: Option<Box<dyn DerivePhysicalProperties>>,
    player: Option<BodyHandle>,
    reference_override: Option<Vec2>,
    started: bool,
}

impl ProgressionCoordinator {
    pub fn new(config: GameConfig, catalog: MutationCatalog) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let maintainer = PopulationMaintainer::new(config.population.clone());
        Self {
            config,
            catalog,
            registry: BodyRegistry::new(),
            maintainer,
            rng,
            ui: None,
            derive: None,
            player: None,
            reference_override: None,
            started: false,
        }
    }

    /// Validate the config and build the catalog it names.
    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = config.catalog()?;
        Ok(Self::new(config, catalog))
    }

    pub fn with_ui(mut self, ui: Box<dyn ProgressionUi>) -> Self {
        self.ui = Some(ui);
        self
    }

    pub fn with_derive_hook(mut self, hook: Box<dyn DerivePhysicalProperties>) -> Self {
        self.derive = Some(hook);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &MutationCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    /// Mutable registry access for the host physics.
    pub fn registry_mut(&mut self) -> &mut BodyRegistry {
        &mut self.registry
    }

    /// Take the registry events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        self.registry.drain_events()
    }

    pub fn maintainer(&self) -> &PopulationMaintainer {
        &self.maintainer
    }

    pub fn player(&self) -> Option<BodyHandle> {
        self.player.filter(|h| self.registry.contains(*h))
    }

    /// Pin the reference point, or clear the pin with `None`.
    pub fn set_reference_point(&mut self, point: Option<Vec2>) {
        self.reference_override = point;
    }

    /// The pinned point, else the live player's position.
    pub fn reference_point(&self) -> Option<Vec2> {
        self.reference_override.or_else(|| {
            self.player
                .and_then(|h| self.registry.get(h))
                .map(|b| b.position)
        })
    }

    /// Spawn the player at the origin, then seed the initial population.
    ///
    /// Runs once; later calls are ignored.
    pub fn start(&mut self) -> StartupReport {
        if self.started {
            tracing::warn!("startup already ran, ignoring");
            return StartupReport::default();
        }
        self.started = true;
        let _span = tracing::info_span!("seed_population").entered();

        match &self.config.player_template {
            Some(template) => {
                let spawner = Spawner::new(Some(template), self.derive.as_deref());
                self.player = spawner.spawn(
                    &mut self.registry,
                    Vec2::ZERO,
                    self.config.player_mass,
                    SpawnOrigin::Player,
                );
            }
            None => tracing::error!("no player template configured, starting without a player"),
        }

        let spawner = Spawner::new(self.config.body_template.as_ref(), self.derive.as_deref());
        let range = &self.config.population;
        let (min_mass, max_mass) = SEED_MASS_RANGE;
        let mut seeded = 0;
        for _ in 0..self.config.initial_population {
            let position = placement::point_in_annulus(
                &mut self.rng,
                Vec2::ZERO,
                range.spawn_range_min,
                range.spawn_range_max,
            );
            let mass = placement::uniform(&mut self.rng, min_mass, max_mass);
            if spawner
                .spawn(&mut self.registry, position, mass, SpawnOrigin::Seed)
                .is_some()
            {
                seeded += 1;
            }
        }

        tracing::info!(
            player = self.player.is_some(),
            seeded,
            catalog = self.catalog.len(),
            "startup complete"
        );
        StartupReport {
            player: self.player,
            seeded,
        }
    }

    /// Run population maintenance for one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let reference = self.reference_point();
        let spawner = Spawner::new(self.config.body_template.as_ref(), self.derive.as_deref());
        self.maintainer
            .tick(dt, &mut self.registry, reference, &spawner, &mut self.rng)
    }

    /// Public spawn primitive: a resting meteorite at `position`.
    pub fn spawn_body(&mut self, position: Vec2, mass: f32) -> Option<BodyHandle> {
        let spawner = Spawner::new(self.config.body_template.as_ref(), self.derive.as_deref());
        spawner.spawn(&mut self.registry, position, mass, SpawnOrigin::Manual)
    }

    /// Destruction notice from the host simulation.
    pub fn notify_destroyed(&mut self, body: BodyHandle) -> bool {
        let removed = self.registry.notify_destroyed(body).is_some();
        if !removed {
            tracing::warn!(%body, "destruction notice for unknown body");
        }
        removed
    }

    /// Branch checkpoint: ask the UI to present branch choices.
    ///
    /// Returns false when the body is gone or no UI is attached.
    pub fn request_branch_selection(&mut self, body: BodyHandle) -> bool {
        if !self.registry.contains(body) {
            tracing::warn!(%body, "branch selection requested for unknown body");
            return false;
        }
        match self.ui.as_mut() {
            Some(ui) => {
                ui.show_branch_selection(body);
                true
            }
            None => {
                tracing::debug!(%body, "no UI attached, dropping branch selection");
                false
            }
        }
    }

    /// Record the branch the player picked.
    pub fn assign_branch(
        &mut self,
        body: BodyHandle,
        branch: PlanetBranch,
    ) -> Result<(), ProgressionError> {
        let target = self
            .registry
            .get_mut(body)
            .ok_or(ProgressionError::UnknownBody(body))?;
        target.assign_branch(branch)?;
        tracing::info!(%body, %branch, "branch assigned");
        Ok(())
    }

    /// Mutation checkpoint: draw offers and hand them to the UI.
    ///
    /// Nothing is applied here. Returns the offered ids in draw order.
    pub fn request_mutation_selection(&mut self, body: BodyHandle) -> Vec<MutationId> {
        let Some(target) = self.registry.get(body) else {
            tracing::warn!(%body, "mutation selection requested for unknown body");
            return Vec::new();
        };
        let offers = MutationSelector::new(&self.catalog).select(OFFER_COUNT, target, &mut self.rng);
        match self.ui.as_mut() {
            Some(ui) => ui.show_mutation_selection(body, &offers),
            None => tracing::debug!(%body, "no UI attached, offers not shown"),
        }
        offers.iter().map(|o| o.id).collect()
    }

    /// UI acceptance callback: apply the chosen mutation to the body.
    pub fn accept_mutation(
        &mut self,
        body: BodyHandle,
        mutation: MutationId,
    ) -> Result<(), ProgressionError> {
        let chosen = self
            .catalog
            .get(mutation)
            .ok_or(ProgressionError::UnknownMutation(mutation))?;
        let target = self
            .registry
            .get_mut(body)
            .ok_or(ProgressionError::UnknownBody(body))?;
        chosen.apply_to(target);
        Ok(())
    }
}

impl std::fmt::Debug for ProgressionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressionCoordinator")
            .field("bodies", &self.registry.len())
            .field("catalog", &self.catalog.len())
            .field("player", &self.player)
            .field("ui", &self.ui.is_some())
            .field("derive", &self.derive.is_some())
            .finish()
    }
}
