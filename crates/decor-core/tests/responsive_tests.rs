// Device-class heuristic and the profiles it selects.

use decor_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn wide_viewport_gets_the_desktop_profile() {
    let policy = ResponsivePolicy::default();
    assert_eq!(policy.classify(1440.0, false), DeviceClass::Desktop);
    let p = policy.resolve(1440.0, false);
    assert_eq!(p.particles, 1200);
    assert_eq!(p.stars, 2000);
    assert_eq!(p.star_radius, 120.0);
    assert_eq!(p.star_factor, 4.0);
}

#[test]
fn narrow_viewport_gets_the_mobile_profile() {
    let policy = ResponsivePolicy::default();
    let p = policy.resolve(390.0, false);
    assert_eq!(p, AmbientProfile::MOBILE);
    assert_eq!(p.particles, 400);
    assert_eq!(p.stars, 800);
}

#[test]
fn breakpoint_is_exclusive_for_mobile() {
    let policy = ResponsivePolicy::default();
    assert_eq!(policy.classify(767.0, false), DeviceClass::Mobile);
    assert_eq!(policy.classify(767.9, false), DeviceClass::Mobile);
    assert_eq!(policy.classify(768.0, false), DeviceClass::Desktop);
}

#[test]
fn low_power_forces_mobile_at_any_width() {
    let policy = ResponsivePolicy::default();
    assert_eq!(policy.classify(2560.0, true), DeviceClass::Mobile);
    assert_eq!(policy.resolve(2560.0, true), AmbientProfile::MOBILE);
}

#[test]
fn custom_breakpoint_and_profiles_are_honoured() {
    let policy = ResponsivePolicy {
        breakpoint_px: 1024.0,
        desktop: AmbientProfile {
            particles: 900,
            ..AmbientProfile::DESKTOP
        },
        mobile: AmbientProfile {
            particles: 10,
            ..AmbientProfile::MOBILE
        },
    };
    assert_eq!(policy.resolve(1000.0, false).particles, 10);
    assert_eq!(policy.resolve(1024.0, false).particles, 900);
}

#[test]
fn mobile_profile_is_lighter_than_desktop() {
    let d = AmbientProfile::DESKTOP;
    let m = AmbientProfile::MOBILE;
    assert!(m.particles < d.particles);
    assert!(m.stars < d.stars);
    assert!(m.star_radius < d.star_radius);
    assert!(m.star_factor < d.star_factor);
}

#[test]
fn resolved_profile_drives_field_size() {
    let policy = ResponsivePolicy::default();
    for (width, particles, stars) in [(1280.0, 1200, 2000), (600.0, 400, 800)] {
        let config = AmbientConfig::new(policy.resolve(width, false));
        let field = AmbientField::new(config, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(field.element_count(), particles);
        assert_eq!(field.stars().len(), stars);
        assert!(field
            .particles()
            .iter()
            .all(|(_, el)| el.base_position.length() <= PARTICLE_SPHERE_RADIUS * (1.0 + 1e-5)));
    }
}

#[test]
fn viewport_clamps_degenerate_sizes() {
    assert_eq!(Viewport::new(0, 0), Viewport::new(1, 1));
    let vp = Viewport::from_css(360.0, 220.0, 2.0);
    assert_eq!((vp.width, vp.height), (720, 440));
    let vp = Viewport::from_css(f64::NAN, -5.0, 0.0);
    assert_eq!((vp.width, vp.height), (1, 1));
    assert!((Viewport::new(200, 100).aspect() - 2.0).abs() < 1e-6);
}

#[test]
fn oversized_backing_store_fits_the_texture_limit() {
    // a 5000 css px cloud at dpr 2
    let vp = Viewport::from_css(5000.0, 440.0, 2.0).fit_within(8192);
    assert_eq!(vp.width, 8192);
    assert!(vp.height <= 8192);
    assert!((vp.aspect() - 10000.0 / 880.0).abs() < 0.05, "{vp:?}");

    let tall = Viewport::new(300, 9000).fit_within(4096);
    assert_eq!(tall.height, 4096);
    assert!(tall.width >= 1 && tall.width < 300);

    let small = Viewport::new(720, 440);
    assert_eq!(small.fit_within(8192), small);
    assert_eq!(Viewport::new(20000, 1).fit_within(8192), Viewport::new(8192, 1));
}
