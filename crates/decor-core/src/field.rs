//! The two decorative field variants and the per-frame snapshots they emit.

use crate::config::{AmbientConfig, FieldConfig};
use crate::constants::*;
use crate::element::{ElementId, ElementStore};
use crate::error::FieldResult;
use crate::layout::generate_layout;
use crate::motion::{cloud_group_rotation, orbit_eye, particle_rotation, transform};
use crate::starfield::{generate_starfield, Star};
use crate::state::Lens;
use glam::{Mat4, Quat, Vec3};
use rand::Rng;

/// A field that can be animated by the render loop.
///
/// `write_frame` must be a pure function of the field and the clock; the
/// frame buffer is reused across ticks to avoid per-frame allocation.
pub trait DecorativeField {
    type Frame: Default;

    fn element_count(&self) -> usize;

    fn write_frame(&self, clock_sec: f32, frame: &mut Self::Frame);
}

// ===================== Sprite cloud =====================

pub const CLOUD_LENS: Lens = Lens {
    fov_deg: CLOUD_FOV_DEG,
    znear: CLOUD_ZNEAR,
    zfar: CLOUD_ZFAR,
};

pub struct SpriteCloud {
    config: FieldConfig,
    store: ElementStore,
}

/// Render-side view of one sprite. Holds the element key, never the element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteNode {
    pub element: ElementId,
    pub position: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, Default)]
pub struct SpriteCloudFrame {
    pub nodes: Vec<SpriteNode>,
    pub group_rotation: Quat,
    pub eye: Vec3,
}

impl SpriteCloud {
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, rng: &mut R) -> FieldResult<Self> {
        let store = generate_layout(&config, rng)?;
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn elements(&self) -> &ElementStore {
        &self.store
    }
}

impl DecorativeField for SpriteCloud {
    type Frame = SpriteCloudFrame;

    fn element_count(&self) -> usize {
        self.store.len()
    }

    fn write_frame(&self, clock_sec: f32, frame: &mut SpriteCloudFrame) {
        let speed = self.config.speed_factor;
        frame.nodes.clear();
        frame.nodes.extend(self.store.iter().map(|(id, el)| {
            let xf = transform(el, clock_sec, speed, &self.config.motion);
            SpriteNode {
                element: id,
                position: xf.position,
                scale: xf.scale,
                opacity: el.opacity,
            }
        }));
        frame.group_rotation = cloud_group_rotation(clock_sec, speed);
        frame.eye = Vec3::new(0.0, 0.0, CLOUD_CAMERA_Z);
    }
}

// ===================== Ambient particle field =====================

pub const AMBIENT_LENS: Lens = Lens {
    fov_deg: AMBIENT_FOV_DEG,
    znear: AMBIENT_ZNEAR,
    zfar: AMBIENT_ZFAR,
};

pub struct AmbientField {
    config: AmbientConfig,
    particles: ElementStore,
    particle_config: FieldConfig,
    stars: Vec<Star>,
}

#[derive(Clone, Debug, Default)]
pub struct AmbientFrame {
    /// Particle centres in the sphere's local space.
    pub points: Vec<Vec3>,
    pub point_size: f32,
    pub particle_rotation: Quat,
    pub grid_model: Mat4,
    pub star_time: f32,
    pub eye: Vec3,
}

impl AmbientField {
    pub fn new<R: Rng + ?Sized>(config: AmbientConfig, rng: &mut R) -> FieldResult<Self> {
        let particle_config = config.particle_config();
        let particles = generate_layout(&particle_config, rng)?;
        let stars = generate_starfield(&config.starfield_config(), rng);
        Ok(Self {
            config,
            particles,
            particle_config,
            stars,
        })
    }

    pub fn config(&self) -> &AmbientConfig {
        &self.config
    }

    pub fn particles(&self) -> &ElementStore {
        &self.particles
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

impl DecorativeField for AmbientField {
    type Frame = AmbientFrame;

    fn element_count(&self) -> usize {
        self.particles.len()
    }

    fn write_frame(&self, clock_sec: f32, frame: &mut AmbientFrame) {
        let cfg = &self.particle_config;
        frame.points.clear();
        frame.points.extend(
            self.particles
                .iter()
                .map(|(_, el)| transform(el, clock_sec, cfg.speed_factor, &cfg.motion).position),
        );
        frame.point_size = cfg.size_factor * cfg.base_scale;
        frame.particle_rotation = particle_rotation(clock_sec);
        frame.grid_model = self.config.grid.model_matrix(clock_sec);
        frame.star_time = clock_sec * STAR_TWINKLE_SPEED;
        frame.eye = orbit_eye(
            clock_sec,
            self.config.camera_distance,
            self.config.auto_rotate_speed,
        );
    }
}
