use glam::Vec3;

// Shared tuning constants for both decorative fields.

// Sprite cloud layout
pub const CLOUD_HALF_EXTENTS: [f32; 3] = [2.2, 0.6, 0.6]; // sampling box around the origin
pub const CLOUD_SPRITE_SIZE: f32 = 2.2; // world-space sprite size at scale 1.0
pub const CLOUD_SCALE_JITTER_MIN: f32 = 0.9;
pub const CLOUD_SCALE_JITTER_SPAN: f32 = 0.8;
pub const CLOUD_AMPLITUDE_MIN: f32 = 0.06;
pub const CLOUD_AMPLITUDE_MAX: f32 = 0.14;
pub const CLOUD_OPACITY_MIN: f32 = 0.75;
pub const CLOUD_OPACITY_MAX: f32 = 1.0;

// Sprite cloud defaults
pub const CLOUD_DEFAULT_DENSITY: usize = 12;
pub const CLOUD_DEFAULT_SPEED: f32 = 0.12;
pub const CLOUD_DEFAULT_BASE_SCALE: f32 = 1.0;

// Sprite cloud motion
pub const CLOUD_FREQ_X: f32 = 1.0;
pub const CLOUD_FREQ_Y: f32 = 1.3;
pub const CLOUD_FREQ_Z: f32 = 0.9;
pub const CLOUD_AMP_X: f32 = 1.2; // x drifts wider than y/z
pub const CLOUD_PHASE_Y: f32 = 0.7;
pub const CLOUD_PULSE_FREQ: f32 = 2.2;
pub const CLOUD_PULSE_DEPTH: f32 = 0.04;
pub const CLOUD_YAW_FREQ: f32 = 0.5;
pub const CLOUD_YAW_AMPLITUDE: f32 = 0.05; // radians

// Sprite cloud camera and atmosphere
pub const CLOUD_CAMERA_Z: f32 = 8.0;
pub const CLOUD_FOV_DEG: f32 = 35.0;
pub const CLOUD_ZNEAR: f32 = 0.1;
pub const CLOUD_ZFAR: f32 = 50.0;
pub const CLOUD_FOG_DENSITY: f32 = 0.015;

// Ambient particle field
pub const PARTICLE_SPHERE_RADIUS: f32 = 40.0;
pub const PARTICLE_POINT_SIZE: f32 = 0.03;
pub const PARTICLE_PITCH_FREQ: f32 = 0.2;
pub const PARTICLE_PITCH_AMPLITUDE: f32 = 0.15; // radians
pub const PARTICLE_YAW_RATE: f32 = 0.06; // radians per second

// Ambient camera
pub const AMBIENT_CAMERA_DISTANCE: f32 = 10.0;
pub const AMBIENT_FOV_DEG: f32 = 60.0;
pub const AMBIENT_ZNEAR: f32 = 0.1;
pub const AMBIENT_ZFAR: f32 = 1000.0;
pub const AUTO_ROTATE_SPEED: f32 = 0.35; // full orbit every 60 / speed seconds

// Neon grid plane
pub const GRID_SIZE: f32 = 300.0;
pub const GRID_SEGMENTS: u32 = 160;
pub const GRID_Y: f32 = -6.0;
pub const GRID_SCROLL_RATE: f32 = 0.15; // world units per second
pub const GRID_SCROLL_PERIOD: f32 = 10.0;
pub const GRID_FLOAT_SPEED: f32 = 0.5;
pub const GRID_FLOAT_INTENSITY: f32 = 0.3;

// Starfield
pub const STAR_DEPTH: f32 = 20.0;
pub const STAR_SATURATION: f32 = 1.0;
pub const STAR_LIGHTNESS: f32 = 0.9;
pub const STAR_TWINKLE_SPEED: f32 = 0.5;

// Responsive degradation
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;
pub const DESKTOP_PARTICLES: usize = 1200;
pub const MOBILE_PARTICLES: usize = 400;
pub const DESKTOP_STARS: usize = 2000;
pub const MOBILE_STARS: usize = 800;
pub const DESKTOP_STAR_RADIUS: f32 = 120.0;
pub const MOBILE_STAR_RADIUS: f32 = 80.0;
pub const DESKTOP_STAR_FACTOR: f32 = 4.0;
pub const MOBILE_STAR_FACTOR: f32 = 2.0;

// Puff texture
pub const PUFF_TEXTURE_SIZE: u32 = 256;
pub const PUFF_INNER_RADIUS: f32 = 0.1; // fraction of texture size
pub const PUFF_OUTER_RADIUS: f32 = 0.48;

#[inline]
pub fn cloud_half_extents() -> Vec3 {
    Vec3::from_array(CLOUD_HALF_EXTENTS)
}
