use crate::constants::{STAR_LIGHTNESS, STAR_SATURATION};
use crate::layout::unit_direction;
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Inner radius of the star shell.
    pub radius: f32,
    /// Shell thickness; stars lie in `[radius, radius + depth]`.
    pub depth: f32,
    /// Size multiplier for every star.
    pub factor: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub color: [f32; 3],
    pub size: f32,
}

/// Shell of stars whose radius creeps inward from `radius + depth`.
///
/// Colours sweep the hue wheel once across the whole set.
pub fn generate_starfield<R: Rng + ?Sized>(config: &StarfieldConfig, rng: &mut R) -> Vec<Star> {
    let count = config.count;
    let depth = config.depth.max(0.0);
    let increment = if count > 0 { depth / count as f32 } else { 0.0 };
    let mut r = config.radius + depth;
    let mut stars = Vec::with_capacity(count);
    for i in 0..count {
        r -= increment * rng.gen::<f32>();
        let position = unit_direction(rng) * r;
        let color = hsl_to_rgb(i as f32 / count as f32, STAR_SATURATION, STAR_LIGHTNESS);
        let size = (0.5 + 0.5 * rng.gen::<f32>()) * config.factor;
        stars.push(Star {
            position,
            color,
            size,
        });
    }
    stars
}

/// HSL with all channels in [0, 1] to linear-ish RGB in [0, 1].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [
        channel(h + 1.0 / 3.0),
        channel(h),
        channel(h - 1.0 / 3.0),
    ]
}
