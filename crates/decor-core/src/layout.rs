//! One-time randomized placement of decorative elements.
//!
//! The random source is always supplied by the caller so a fixed seed gives
//! an exact, repeatable layout.

use crate::config::{FieldConfig, SpatialBounds};
use crate::element::{DecorativeElement, ElementStore};
use crate::error::FieldResult;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

pub fn generate_layout<R: Rng + ?Sized>(
    config: &FieldConfig,
    rng: &mut R,
) -> FieldResult<ElementStore> {
    config.validate()?;
    let mut elements = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let base_position = sample_position(&config.bounds, rng);
        let base_scale = config.size_factor * config.base_scale * config.scale_jitter.sample(rng);
        let opacity = config.opacity.sample(rng);
        let random_phase = sample_phase(rng);
        let amplitude = config.amplitude.sample(rng);
        elements.push(DecorativeElement {
            base_position,
            random_phase,
            amplitude,
            base_scale,
            opacity,
        });
    }
    log::debug!("[layout] generated {} elements", elements.len());
    Ok(ElementStore::from_elements(elements))
}

pub fn sample_position<R: Rng + ?Sized>(bounds: &SpatialBounds, rng: &mut R) -> Vec3 {
    match *bounds {
        SpatialBounds::Box { half_extents } => sample_box(half_extents, rng),
        SpatialBounds::Sphere { radius } => sample_sphere_volume(radius, rng),
    }
}

#[inline]
pub fn sample_box<R: Rng + ?Sized>(half_extents: Vec3, rng: &mut R) -> Vec3 {
    let mut axis = |h: f32| (rng.gen::<f32>() * 2.0 - 1.0) * h;
    Vec3::new(
        axis(half_extents.x),
        axis(half_extents.y),
        axis(half_extents.z),
    )
}

/// Uniform point inside a ball of `radius`.
///
/// The cube root keeps density constant with distance from the centre.
pub fn sample_sphere_volume<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec3 {
    let r = radius * rng.gen::<f32>().cbrt();
    unit_direction(rng) * r
}

/// Uniform direction on the unit sphere (inverse-cosine polar angle).
pub fn unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}

#[inline]
pub fn sample_phase<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // rounding of u * TAU can land exactly on TAU; keep [0, TAU)
    (rng.gen::<f32>() * TAU).min(TAU - f32::EPSILON * TAU)
}
