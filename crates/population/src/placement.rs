//! Random placement in the plane.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Uniform draw from `[min, max)`; a degenerate range yields `min`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Unit vector with a uniformly random heading.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}

/// Uniformly random point on the circle of `radius` around `center`.
pub fn point_on_ring<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    center + random_direction(rng) * radius
}

/// Random point between `min_radius` and `max_radius` from `center`.
///
/// Heading and distance are drawn independently and uniformly, so points
/// cluster slightly toward the inner edge.
pub fn point_in_annulus<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vec2,
    min_radius: f32,
    max_radius: f32,
) -> Vec2 {
    center + random_direction(rng) * uniform(rng, min_radius, max_radius)
}

/// Velocity with a uniformly random heading and speed in `[min_speed, max_speed)`.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, min_speed: f32, max_speed: f32) -> Vec2 {
    random_direction(rng) * uniform(rng, min_speed, max_speed)
}
