//! Construction-time configuration for decorative fields.
//!
//! Everything here is plain data resolved by the caller before a field is
//! built. A field never mutates its config; changing any value means building
//! a new field and remounting it.

use crate::constants::*;
use crate::error::{FieldError, FieldResult};
use crate::grid::GridConfig;
use crate::starfield::StarfieldConfig;
use glam::Vec3;
use rand::Rng;

/// Closed interval sampled uniformly. `min == max` always yields `min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformRange {
    pub min: f32,
    pub max: f32,
}

impl UniformRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            self.min + rng.gen::<f32>() * (self.max - self.min)
        } else {
            self.min
        }
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Region that element base positions are drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpatialBounds {
    /// Axis-aligned box centred on the origin.
    Box { half_extents: Vec3 },
    /// Solid ball centred on the origin, sampled uniformly by volume.
    Sphere { radius: f32 },
}

impl SpatialBounds {
    pub fn contains(&self, p: Vec3) -> bool {
        match *self {
            SpatialBounds::Box { half_extents } => {
                p.x.abs() <= half_extents.x
                    && p.y.abs() <= half_extents.y
                    && p.z.abs() <= half_extents.z
            }
            // small slack for float rounding in the spherical conversion
            SpatialBounds::Sphere { radius } => p.length() <= radius * (1.0 + 1e-5),
        }
    }

    fn is_valid(&self) -> bool {
        match *self {
            SpatialBounds::Box { half_extents } => {
                half_extents.is_finite() && half_extents.cmpge(Vec3::ZERO).all()
            }
            SpatialBounds::Sphere { radius } => radius.is_finite() && radius >= 0.0,
        }
    }
}

/// Shape of the per-element drift and pulse evaluated every frame.
///
/// Offsets are `sin`, `sin`, `cos` on x, y, z respectively, each at
/// `speed * frequency` and scaled by `element.amplitude * amplitude`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionProfile {
    pub frequency: Vec3,
    pub amplitude: Vec3,
    /// Multiplier applied to the element phase on the y axis only.
    pub phase_y: f32,
    pub pulse_frequency: f32,
    pub pulse_depth: f32,
}

impl MotionProfile {
    pub const CLOUD: MotionProfile = MotionProfile {
        frequency: Vec3::new(CLOUD_FREQ_X, CLOUD_FREQ_Y, CLOUD_FREQ_Z),
        amplitude: Vec3::new(CLOUD_AMP_X, 1.0, 1.0),
        phase_y: CLOUD_PHASE_Y,
        pulse_frequency: CLOUD_PULSE_FREQ,
        pulse_depth: CLOUD_PULSE_DEPTH,
    };

    /// Elements stay at their base transform; only the group moves.
    pub const STATIC: MotionProfile = MotionProfile {
        frequency: Vec3::ZERO,
        amplitude: Vec3::ZERO,
        phase_y: 0.0,
        pulse_frequency: 0.0,
        pulse_depth: 0.0,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub bounds: SpatialBounds,
    pub speed_factor: f32,
    pub base_scale: f32,
    /// World-space size of an element at scale 1.0.
    pub size_factor: f32,
    pub scale_jitter: UniformRange,
    pub amplitude: UniformRange,
    pub opacity: UniformRange,
    pub motion: MotionProfile,
}

impl FieldConfig {
    pub fn sprite_cloud(count: usize, base_scale: f32, speed_factor: f32) -> Self {
        Self {
            count,
            bounds: SpatialBounds::Box {
                half_extents: cloud_half_extents(),
            },
            speed_factor,
            base_scale,
            size_factor: CLOUD_SPRITE_SIZE,
            scale_jitter: UniformRange::new(
                CLOUD_SCALE_JITTER_MIN,
                CLOUD_SCALE_JITTER_MIN + CLOUD_SCALE_JITTER_SPAN,
            ),
            amplitude: UniformRange::new(CLOUD_AMPLITUDE_MIN, CLOUD_AMPLITUDE_MAX),
            opacity: UniformRange::new(CLOUD_OPACITY_MIN, CLOUD_OPACITY_MAX),
            motion: MotionProfile::CLOUD,
        }
    }

    pub fn particle_field(count: usize, radius: f32, point_size: f32) -> Self {
        Self {
            count,
            bounds: SpatialBounds::Sphere { radius },
            speed_factor: 1.0,
            base_scale: 1.0,
            size_factor: point_size,
            scale_jitter: UniformRange::fixed(1.0),
            amplitude: UniformRange::fixed(0.0),
            opacity: UniformRange::fixed(1.0),
            motion: MotionProfile::STATIC,
        }
    }

    pub fn validate(&self) -> FieldResult<()> {
        if !self.speed_factor.is_finite() {
            return Err(FieldError::InvalidConfig("speed factor must be finite"));
        }
        if !self.base_scale.is_finite() || self.base_scale < 0.0 {
            return Err(FieldError::InvalidConfig(
                "base scale must be finite and non-negative",
            ));
        }
        if !self.size_factor.is_finite() || self.size_factor < 0.0 {
            return Err(FieldError::InvalidConfig(
                "size factor must be finite and non-negative",
            ));
        }
        if !self.bounds.is_valid() {
            return Err(FieldError::InvalidConfig(
                "bounds must be finite and non-negative",
            ));
        }
        if !self.scale_jitter.is_valid() || !self.amplitude.is_valid() || !self.opacity.is_valid()
        {
            return Err(FieldError::InvalidConfig("ranges must be finite with min <= max"));
        }
        Ok(())
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::sprite_cloud(
            CLOUD_DEFAULT_DENSITY,
            CLOUD_DEFAULT_BASE_SCALE,
            CLOUD_DEFAULT_SPEED,
        )
    }
}

/// Pixel size of a rendering surface, never smaller than 1x1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Build from CSS pixels and a device pixel ratio, clamping bad input.
    pub fn from_css(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let px = |v: f64| {
            if v.is_finite() && v > 0.0 {
                (v * dpr).round() as u32
            } else {
                1
            }
        };
        Self::new(px(width), px(height))
    }

    /// Shrink uniformly so neither side exceeds `max_side`, keeping the
    /// aspect ratio as close as integer pixels allow.
    pub fn fit_within(self, max_side: u32) -> Self {
        let max_side = max_side.max(1);
        let longest = self.width.max(self.height);
        if longest <= max_side {
            return self;
        }
        let scale = max_side as f64 / longest as f64;
        let side = |v: u32| ((v as f64 * scale).round() as u32).min(max_side);
        Self::new(side(self.width), side(self.height))
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

/// Density knobs for the ambient field on one class of device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientProfile {
    pub particles: usize,
    pub stars: usize,
    pub star_radius: f32,
    pub star_factor: f32,
}

impl AmbientProfile {
    pub const DESKTOP: AmbientProfile = AmbientProfile {
        particles: DESKTOP_PARTICLES,
        stars: DESKTOP_STARS,
        star_radius: DESKTOP_STAR_RADIUS,
        star_factor: DESKTOP_STAR_FACTOR,
    };

    pub const MOBILE: AmbientProfile = AmbientProfile {
        particles: MOBILE_PARTICLES,
        stars: MOBILE_STARS,
        star_radius: MOBILE_STAR_RADIUS,
        star_factor: MOBILE_STAR_FACTOR,
    };
}

/// Device-class heuristic resolved before any field is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponsivePolicy {
    pub breakpoint_px: f32,
    pub desktop: AmbientProfile,
    pub mobile: AmbientProfile,
}

impl Default for ResponsivePolicy {
    fn default() -> Self {
        Self {
            breakpoint_px: MOBILE_BREAKPOINT_PX,
            desktop: AmbientProfile::DESKTOP,
            mobile: AmbientProfile::MOBILE,
        }
    }
}

impl ResponsivePolicy {
    pub fn classify(&self, viewport_width_css: f32, low_power: bool) -> DeviceClass {
        if low_power || viewport_width_css < self.breakpoint_px {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn resolve(&self, viewport_width_css: f32, low_power: bool) -> AmbientProfile {
        self.profile(self.classify(viewport_width_css, low_power))
    }

    pub fn profile(&self, class: DeviceClass) -> AmbientProfile {
        match class {
            DeviceClass::Desktop => self.desktop,
            DeviceClass::Mobile => self.mobile,
        }
    }
}

/// Everything needed to build the ambient field: points, grid and stars.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientConfig {
    pub profile: AmbientProfile,
    pub sphere_radius: f32,
    pub point_size: f32,
    pub star_depth: f32,
    pub grid: GridConfig,
    pub camera_distance: f32,
    pub auto_rotate_speed: f32,
}

impl AmbientConfig {
    pub fn new(profile: AmbientProfile) -> Self {
        Self {
            profile,
            sphere_radius: PARTICLE_SPHERE_RADIUS,
            point_size: PARTICLE_POINT_SIZE,
            star_depth: STAR_DEPTH,
            grid: GridConfig::default(),
            camera_distance: AMBIENT_CAMERA_DISTANCE,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
        }
    }

    pub fn particle_config(&self) -> FieldConfig {
        FieldConfig::particle_field(self.profile.particles, self.sphere_radius, self.point_size)
    }

    pub fn starfield_config(&self) -> StarfieldConfig {
        StarfieldConfig {
            count: self.profile.stars,
            radius: self.profile.star_radius,
            depth: self.star_depth,
            factor: self.profile.star_factor,
        }
    }
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self::new(AmbientProfile::DESKTOP)
    }
}
