// Layout generation: counts, bounds, distributions and seeded determinism.

use decor_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn cloud_layout_has_exact_count() {
    for count in [0usize, 1, 12, 1200] {
        let config = FieldConfig::sprite_cloud(count, 1.0, 0.12);
        let store = generate_layout(&config, &mut rng(7)).unwrap();
        assert_eq!(store.len(), count);
        assert_eq!(store.ids().len(), count);
        assert_eq!(store.is_empty(), count == 0);
    }
}

#[test]
fn zero_count_is_a_valid_empty_field() {
    let cloud = SpriteCloud::new(FieldConfig::sprite_cloud(0, 1.0, 0.12), &mut rng(1)).unwrap();
    assert_eq!(cloud.element_count(), 0);
    let mut frame = SpriteCloudFrame::default();
    cloud.write_frame(3.0, &mut frame);
    assert!(frame.nodes.is_empty());
}

#[test]
fn cloud_positions_stay_inside_the_box() {
    let config = FieldConfig::sprite_cloud(500, 1.0, 0.12);
    let store = generate_layout(&config, &mut rng(11)).unwrap();
    let half = cloud_half_extents();
    for (_, el) in store.iter() {
        let p = el.base_position;
        assert!(p.x.abs() <= half.x && p.y.abs() <= half.y && p.z.abs() <= half.z, "{p:?}");
        assert!(config.bounds.contains(p));
    }
}

#[test]
fn cloud_parameters_respect_their_ranges() {
    let base_scale = 1.5;
    let config = FieldConfig::sprite_cloud(400, base_scale, 0.12);
    let store = generate_layout(&config, &mut rng(3)).unwrap();
    let min_scale = CLOUD_SPRITE_SIZE * base_scale * CLOUD_SCALE_JITTER_MIN;
    let max_scale =
        CLOUD_SPRITE_SIZE * base_scale * (CLOUD_SCALE_JITTER_MIN + CLOUD_SCALE_JITTER_SPAN);
    for (_, el) in store.iter() {
        assert!(el.random_phase >= 0.0 && el.random_phase < TAU);
        assert!(el.amplitude >= CLOUD_AMPLITUDE_MIN - 1e-6);
        assert!(el.amplitude <= CLOUD_AMPLITUDE_MAX + 1e-6);
        assert!(el.opacity >= CLOUD_OPACITY_MIN - 1e-6 && el.opacity <= CLOUD_OPACITY_MAX + 1e-6);
        assert!(el.base_scale >= min_scale - 1e-4 && el.base_scale <= max_scale + 1e-4);
    }
}

#[test]
fn sphere_points_lie_within_radius() {
    let config = FieldConfig::particle_field(1200, PARTICLE_SPHERE_RADIUS, PARTICLE_POINT_SIZE);
    let store = generate_layout(&config, &mut rng(5)).unwrap();
    assert_eq!(store.len(), 1200);
    for (_, el) in store.iter() {
        assert!(el.base_position.length() <= PARTICLE_SPHERE_RADIUS * (1.0 + 1e-5));
    }
}

#[test]
fn sphere_sampling_is_uniform_by_volume() {
    // Uniform by volume: fraction within r/2 is 1/8, and polar bands of
    // equal height on cos(phi) hold equal counts.
    let n = 20_000;
    let radius = 10.0;
    let mut r = rng(99);
    let mut inner = 0usize;
    let mut bands = [0usize; 4];
    for _ in 0..n {
        let p = layout::sample_sphere_volume(radius, &mut r);
        if p.length() <= radius * 0.5 {
            inner += 1;
        }
        let cos_phi = (p.z / p.length().max(1e-9)).clamp(-1.0, 1.0);
        let band = (((cos_phi + 1.0) / 2.0) * 4.0).floor().min(3.0) as usize;
        bands[band] += 1;
    }
    let inner_frac = inner as f32 / n as f32;
    assert!((inner_frac - 0.125).abs() < 0.015, "inner fraction {inner_frac}");
    let expected = n as f32 / 4.0;
    for (i, &b) in bands.iter().enumerate() {
        let dev = (b as f32 - expected).abs() / expected;
        assert!(dev < 0.06, "band {i} holds {b}, expected about {expected}");
    }
}

#[test]
fn same_seed_gives_identical_layout() {
    let config = FieldConfig::sprite_cloud(64, 1.0, 0.12);
    let a = generate_layout(&config, &mut rng(42)).unwrap();
    let b = generate_layout(&config, &mut rng(42)).unwrap();
    let c = generate_layout(&config, &mut rng(43)).unwrap();
    let collect = |s: &ElementStore| s.iter().map(|(_, e)| *e).collect::<Vec<_>>();
    assert_eq!(collect(&a), collect(&b));
    assert_ne!(collect(&a), collect(&c));
}

#[test]
fn ids_resolve_back_to_their_elements() {
    let store = generate_layout(&FieldConfig::sprite_cloud(20, 1.0, 0.12), &mut rng(8)).unwrap();
    for (id, el) in store.iter() {
        assert_eq!(store.get(id), Some(el));
    }
    assert_eq!(store.get(ElementId(20)), None);
}

#[test]
fn invalid_configs_are_rejected() {
    let mut config = FieldConfig::sprite_cloud(4, 1.0, 0.12);
    config.speed_factor = f32::NAN;
    assert!(matches!(
        generate_layout(&config, &mut rng(1)),
        Err(FieldError::InvalidConfig(_))
    ));

    let mut config = FieldConfig::sprite_cloud(4, -1.0, 0.12);
    assert!(config.validate().is_err());
    config.base_scale = 1.0;
    config.opacity = UniformRange::new(1.0, 0.5);
    assert!(config.validate().is_err());

    let config = FieldConfig::particle_field(4, -3.0, 0.03);
    assert!(config.validate().is_err());
}

#[test]
fn fixed_range_always_samples_its_value() {
    let range = UniformRange::fixed(0.25);
    let mut r = rng(2);
    for _ in 0..50 {
        assert_eq!(range.sample(&mut r), 0.25);
    }
    assert!(range.contains(0.25));
    assert!(!range.contains(0.3));
}
