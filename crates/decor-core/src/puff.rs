use crate::constants::{PUFF_INNER_RADIUS, PUFF_OUTER_RADIUS};
use smallvec::{smallvec, SmallVec};

/// Square RGBA8 texture, row-major, 4 bytes per texel.
#[derive(Clone, Debug)]
pub struct PuffTexture {
    pub size: u32,
    pub rgba: Vec<u8>,
}

impl PuffTexture {
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        let i = ((y * self.size + x) * 4 + 3) as usize;
        self.rgba.get(i).copied().unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug)]
struct GradientStop {
    offset: f32,
    alpha: f32,
}

fn puff_stops() -> SmallVec<[GradientStop; 4]> {
    smallvec![
        GradientStop { offset: 0.0, alpha: 0.95 },
        GradientStop { offset: 0.4, alpha: 0.7 },
        GradientStop { offset: 0.7, alpha: 0.35 },
        GradientStop { offset: 1.0, alpha: 0.0 },
    ]
}

fn sample_stops(stops: &[GradientStop], t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            return a.alpha + (b.alpha - a.alpha) * ((t - a.offset) / span);
        }
    }
    stops.last().map(|s| s.alpha).unwrap_or(0.0)
}

/// Soft white disc used as the sprite-cloud material.
///
/// Alpha follows a radial gradient between `PUFF_INNER_RADIUS` and
/// `PUFF_OUTER_RADIUS` (fractions of `size`); colour is always white.
pub fn puff_texture(size: u32) -> PuffTexture {
    let size = size.max(1);
    let stops = puff_stops();
    let centre = size as f32 / 2.0;
    let inner = size as f32 * PUFF_INNER_RADIUS;
    let outer = size as f32 * PUFF_OUTER_RADIUS;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - centre;
            let dy = y as f32 + 0.5 - centre;
            let d = (dx * dx + dy * dy).sqrt();
            let t = (d - inner) / (outer - inner).max(f32::EPSILON);
            let alpha = sample_stops(&stops, t);
            rgba.extend_from_slice(&[255, 255, 255, (alpha * 255.0).round() as u8]);
        }
    }
    PuffTexture { size, rgba }
}
