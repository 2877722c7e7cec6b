use glam::Vec2;
use rand::Rng;
use stellar_common::BodyHandle;
use stellar_kernel::{BodyRegistry, SpawnOrigin};

use crate::config::PopulationConfig;
use crate::placement;
use crate::spawner::Spawner;

/// Speed range for a ring body's initial drift.
pub const RING_SPEED_RANGE: (f32, f32) = (0.5, 2.0);
/// Mass range for low-water-mark top-up bodies.
pub const TOP_UP_MASS_RANGE: (f32, f32) = (0.5, 2.0);

/// What one maintenance tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Doomed registry slots reclaimed before the rules ran.
    pub pruned: usize,
    /// Body spawned by the ring rule, if it fired and a template was set.
    pub ring_spawned: Option<BodyHandle>,
    /// Body spawned by the low-water-mark rule.
    pub top_up_spawned: Option<BodyHandle>,
}

impl TickReport {
    pub fn spawned(&self) -> usize {
        usize::from(self.ring_spawned.is_some()) + usize::from(self.top_up_spawned.is_some())
    }
}

/// Keeps the body population topped up around a reference point.
///
/// Two rules run every tick, ring top-up first, then the low-water mark. Both
/// read the population as it stood after pruning, so a ring spawn never
/// suppresses a top-up in the same tick.
#[derive(Debug, Clone)]
pub struct PopulationMaintainer {
    pub config: PopulationConfig,
    elapsed: f64,
    last_ring_spawn: f64,
    last_report: TickReport,
}

impl PopulationMaintainer {
    /// The ring timer starts now, so the first ring spawn waits one interval.
    pub fn new(config: PopulationConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            last_ring_spawn: 0.0,
            last_report: TickReport::default(),
        }
    }

    /// Seconds of simulated time seen by this maintainer.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Seconds since the ring rule last fired.
    pub fn since_ring_spawn(&self) -> f64 {
        self.elapsed - self.last_ring_spawn
    }

    /// Live ring-spawned bodies.
    pub fn active_count(&self, registry: &BodyRegistry) -> usize {
        registry.count_by_origin(SpawnOrigin::Ring)
    }

    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    /// Advance the timer by `dt` seconds and apply both rules.
    ///
    /// Ring bodies appear around `reference`, or around the origin when there
    /// is none.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        registry: &mut BodyRegistry,
        reference: Option<Vec2>,
        spawner: &Spawner<'_>,
        rng: &mut R,
    ) -> TickReport {
        let _span = tracing::info_span!("population_tick").entered();
        self.elapsed += f64::from(dt.max(0.0));

        let mut report = TickReport {
            pruned: registry.prune(),
            ..TickReport::default()
        };
        let live_at_start = registry.len();

        if self.active_count(registry) < self.config.max_population
            && self.since_ring_spawn() > f64::from(self.config.spawn_interval_seconds)
        {
            report.ring_spawned = self.spawn_on_ring(registry, reference, spawner, rng);
            self.last_ring_spawn = self.elapsed;
        }

        if live_at_start < self.config.low_water_mark {
            report.top_up_spawned = self.spawn_top_up(registry, spawner, rng);
        }

        tracing::trace!(
            pruned = report.pruned,
            spawned = report.spawned(),
            live = registry.len(),
            ring = self.active_count(registry),
            "population tick complete"
        );
        self.last_report = report;
        report
    }

    fn spawn_on_ring<R: Rng + ?Sized>(
        &self,
        registry: &mut BodyRegistry,
        reference: Option<Vec2>,
        spawner: &Spawner<'_>,
        rng: &mut R,
    ) -> Option<BodyHandle> {
        let center = reference.unwrap_or(Vec2::ZERO);
        let position = placement::point_on_ring(rng, center, self.config.spawn_ring_radius);
        let mass = placement::uniform(rng, self.config.min_mass, self.config.max_mass);
        let (min_speed, max_speed) = RING_SPEED_RANGE;
        let velocity = placement::random_velocity(rng, min_speed, max_speed);
        spawner.spawn_moving(registry, position, mass, velocity, SpawnOrigin::Ring)
    }

    fn spawn_top_up<R: Rng + ?Sized>(
        &self,
        registry: &mut BodyRegistry,
        spawner: &Spawner<'_>,
        rng: &mut R,
    ) -> Option<BodyHandle> {
        let position = placement::point_in_annulus(
            rng,
            Vec2::ZERO,
            self.config.spawn_range_min,
            self.config.spawn_range_max,
        );
        let (min_mass, max_mass) = TOP_UP_MASS_RANGE;
        let mass = placement::uniform(rng, min_mass, max_mass);
        spawner.spawn(registry, position, mass, SpawnOrigin::TopUp)
    }
}
