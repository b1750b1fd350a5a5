// Web-side tuning: DOM hooks, default mount sizes and layer colours.
// Field geometry and motion constants live in `decor_core::constants`.

// Auto-mount markers
pub const DECOR_ATTR: &str = "data-decor";
pub const DECOR_KIND_CLOUD: &str = "cloud";
pub const DECOR_KIND_AMBIENT: &str = "ambient";
pub const FALLBACK_CLASS: &str = "decor-fallback";

// Cloud option attributes (and JS option keys without the prefix)
pub const ATTR_WIDTH: &str = "data-width";
pub const ATTR_HEIGHT: &str = "data-height";
pub const ATTR_DENSITY: &str = "data-density";
pub const ATTR_BASE_SCALE: &str = "data-base-scale";
pub const ATTR_SPEED: &str = "data-speed";
pub const ATTR_LOW_POWER: &str = "data-low-power";
pub const ATTR_BREAKPOINT: &str = "data-breakpoint";

// Default sprite cloud surface in CSS pixels
pub const CLOUD_DEFAULT_WIDTH: f64 = 360.0;
pub const CLOUD_DEFAULT_HEIGHT: f64 = 220.0;
pub const CLOUD_MAX_DENSITY: usize = 512; // guards against absurd attribute values

// Devices reporting this many logical cores or fewer count as low-power
pub const LOW_POWER_MAX_CORES: f64 = 2.0;

// Layer colours (sRGB, written straight to a non-sRGB canvas)
pub const FOG_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const PARTICLE_COLOR: [f32; 3] = [0.0, 0.667, 1.0]; // #00aaff
pub const GRID_COLOR: [f32; 3] = [0.0, 1.0, 1.0]; // #00ffff
pub const GRID_OPACITY: f32 = 0.15;
pub const PARTICLE_OPACITY: f32 = 1.0;

// Point shader modes
pub const POINT_MODE_PARTICLE: f32 = 0.0;
pub const POINT_MODE_STAR: f32 = 1.0;
