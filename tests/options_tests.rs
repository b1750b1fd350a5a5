// Host-side tests for mount option parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod options {
    include!("../src/options.rs");
}

use options::*;
use std::collections::HashMap;

fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |attr: &str| map.get(attr).cloned()
}

#[test]
fn missing_options_fall_back_to_defaults() {
    let opts = cloud_options(&source(&[]));
    assert_eq!(opts, CloudOptions::default());
    assert_eq!(opts.density, 12);
    assert!((opts.speed - 0.12).abs() < 1e-6);
    assert_eq!(ambient_options(&source(&[])), AmbientOptions::default());
}

#[test]
fn cloud_attributes_are_parsed() {
    let opts = cloud_options(&source(&[
        ("data-width", "480"),
        ("data-height", " 300 "),
        ("data-density", "24"),
        ("data-base-scale", "1.5"),
        ("data-speed", "0.3"),
    ]));
    assert_eq!(opts.width_css, 480.0);
    assert_eq!(opts.height_css, 300.0);
    assert_eq!(opts.density, 24);
    assert_eq!(opts.base_scale, 1.5);
    assert!((opts.speed - 0.3).abs() < 1e-6);
}

#[test]
fn bad_values_are_ignored() {
    let opts = cloud_options(&source(&[
        ("data-width", "-10"),
        ("data-height", "tall"),
        ("data-density", "-3"),
        ("data-base-scale", "0"),
        ("data-speed", "NaN"),
    ]));
    assert_eq!(opts, CloudOptions::default());
}

#[test]
fn density_zero_is_kept_and_huge_density_is_capped() {
    assert_eq!(cloud_options(&source(&[("data-density", "0")])).density, 0);
    assert_eq!(
        cloud_options(&source(&[("data-density", "100000")])).density,
        constants::CLOUD_MAX_DENSITY
    );
}

#[test]
fn zero_speed_is_allowed() {
    assert_eq!(cloud_options(&source(&[("data-speed", "0")])).speed, 0.0);
}

#[test]
fn low_power_flag_forms() {
    for (raw, expected) in [
        ("", true),
        ("true", true),
        ("1", true),
        ("yes", true),
        ("false", false),
        ("0", false),
        ("OFF", false),
        ("no", false),
    ] {
        let opts = ambient_options(&source(&[("data-low-power", raw)]));
        assert_eq!(opts.low_power, expected, "{raw:?}");
    }
}

#[test]
fn breakpoint_override() {
    let opts = ambient_options(&source(&[("data-breakpoint", "1024")]));
    assert_eq!(opts.breakpoint_px, 1024.0);
    let opts = ambient_options(&source(&[("data-breakpoint", "wide")]));
    assert_eq!(opts.breakpoint_px, decor_core::MOBILE_BREAKPOINT_PX);
}

#[test]
fn option_keys_are_camel_case() {
    assert_eq!(option_key("data-base-scale"), "baseScale");
    assert_eq!(option_key("data-low-power"), "lowPower");
    assert_eq!(option_key("data-density"), "density");
    assert_eq!(option_key("speed"), "speed");
}

#[test]
fn parse_helpers() {
    assert_eq!(parse_positive(Some("2.5")), Some(2.5));
    assert_eq!(parse_positive(Some("0")), None);
    assert_eq!(parse_positive(Some("inf")), None);
    assert_eq!(parse_positive(None), None);
    assert!(!parse_flag(None));
}
