use glam::Vec2;
use stellar_common::BodyHandle;
use stellar_kernel::{
    BodyRegistry, BodyTemplate, CelestialBody, DerivePhysicalProperties, SpawnOrigin,
};

/// The spawn primitive shared by seeding, the top-up rules and manual spawns.
///
/// Borrows its optional collaborators for the duration of one call site. With
/// no template every spawn is skipped; with no derive hook bodies keep their
/// template gravity.
#[derive(Clone, Copy)]
pub struct Spawner<'a> {
    template: Option<&'a BodyTemplate>,
    derive: Option<&'a dyn DerivePhysicalProperties>,
}

impl<'a> Spawner<'a> {
    pub fn new(
        template: Option<&'a BodyTemplate>,
        derive: Option<&'a dyn DerivePhysicalProperties>,
    ) -> Self {
        Self { template, derive }
    }

    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    /// Spawn a resting meteorite-stage body.
    pub fn spawn(
        &self,
        registry: &mut BodyRegistry,
        position: Vec2,
        mass: f32,
        origin: SpawnOrigin,
    ) -> Option<BodyHandle> {
        self.spawn_moving(registry, position, mass, Vec2::ZERO, origin)
    }

    /// Spawn a meteorite-stage body with an initial velocity.
    ///
    /// The velocity is dropped when the template has no rigid body.
    pub fn spawn_moving(
        &self,
        registry: &mut BodyRegistry,
        position: Vec2,
        mass: f32,
        velocity: Vec2,
        origin: SpawnOrigin,
    ) -> Option<BodyHandle> {
        let Some(template) = self.template else {
            tracing::debug!(?origin, "no body template configured, skipping spawn");
            return None;
        };

        let mut body = CelestialBody::from_template(template, position, mass, origin);
        if template.has_rigid_body {
            body.velocity = velocity;
        }
        match self.derive {
            Some(hook) => hook.derive(&mut body),
            None => tracing::debug!(?origin, "no derive hook, keeping template gravity"),
        }

        let handle = registry.insert(body);
        tracing::debug!(%handle, ?origin, x = position.x, y = position.y, mass, "spawned body");
        Some(handle)
    }
}

impl std::fmt::Debug for Spawner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spawner")
            .field("template", &self.template)
            .field("derive", &self.derive.is_some())
            .finish()
    }
}
