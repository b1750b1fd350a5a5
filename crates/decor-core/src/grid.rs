use crate::constants::{GRID_SEGMENTS, GRID_SIZE, GRID_Y};
use crate::motion::{grid_float, grid_scroll};
use glam::{Mat4, Vec3};

/// Flat wireframe plane under the ambient field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub size: f32,
    pub segments: u32,
    pub y: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            segments: GRID_SEGMENTS,
            y: GRID_Y,
        }
    }
}

impl GridConfig {
    #[inline]
    pub fn line_count(&self) -> usize {
        2 * (self.segments.max(1) as usize + 1)
    }

    /// Line-list vertices on the XZ plane centred at the origin.
    pub fn line_vertices(&self) -> Vec<[f32; 3]> {
        let segments = self.segments.max(1);
        let half = self.size * 0.5;
        let step = self.size / segments as f32;
        let mut out = Vec::with_capacity(self.line_count() * 2);
        for i in 0..=segments {
            let k = -half + step * i as f32;
            // parallel to x
            out.push([-half, 0.0, k]);
            out.push([half, 0.0, k]);
            // parallel to z
            out.push([k, 0.0, -half]);
            out.push([k, 0.0, half]);
        }
        out
    }

    pub fn model_matrix(&self, clock_sec: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(
            0.0,
            self.y + grid_float(clock_sec),
            grid_scroll(clock_sec),
        ))
    }
}
