// Host-side tests for the web constants and how they relate to the core tuning.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn colours_and_opacities_are_normalised() {
    for c in FOG_COLOR.iter().chain(&PARTICLE_COLOR).chain(&GRID_COLOR) {
        assert!((0.0..=1.0).contains(c));
    }
    assert!(GRID_OPACITY > 0.0 && GRID_OPACITY <= 1.0);
    assert!(PARTICLE_OPACITY > 0.0 && PARTICLE_OPACITY <= 1.0);
}

#[test]
fn point_modes_are_distinct() {
    assert_ne!(POINT_MODE_PARTICLE, POINT_MODE_STAR);
}

#[test]
fn option_attributes_are_data_attributes() {
    for attr in [
        DECOR_ATTR,
        ATTR_WIDTH,
        ATTR_HEIGHT,
        ATTR_DENSITY,
        ATTR_BASE_SCALE,
        ATTR_SPEED,
        ATTR_LOW_POWER,
        ATTR_BREAKPOINT,
    ] {
        assert!(attr.starts_with("data-"), "{attr}");
        assert_eq!(attr, attr.to_ascii_lowercase());
    }
    assert_ne!(DECOR_KIND_CLOUD, DECOR_KIND_AMBIENT);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn cloud_defaults_fit_the_density_cap() {
    assert!(CLOUD_DEFAULT_WIDTH > 0.0 && CLOUD_DEFAULT_HEIGHT > 0.0);
    assert!(decor_core::CLOUD_DEFAULT_DENSITY <= CLOUD_MAX_DENSITY);
    assert!(LOW_POWER_MAX_CORES >= 1.0);
}
