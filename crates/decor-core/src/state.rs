//! Camera description shared by both fields.
//!
//! Platform-free so it can be evaluated in host tests; the web renderer turns
//! it into uniform matrices every frame.

use crate::config::Viewport;
use glam::{Mat4, Vec3};

/// Projection parameters that stay fixed for a field's lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lens {
    pub fov_deg: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Lens {
    pub fn camera(&self, eye: Vec3, viewport: Viewport) -> Camera {
        Camera::looking_at_origin(eye, self.fov_deg, viewport, self.znear, self.zfar)
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn looking_at_origin(eye: Vec3, fov_deg: f32, viewport: Viewport, znear: f32, zfar: f32) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy_radians: fov_deg.to_radians(),
            znear,
            zfar,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect.max(1e-4), self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space right and up axes of the view, for camera-facing sprites.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}
