// Puff material, starfield shell and grid geometry.

use decor_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn puff_is_opaque_in_the_middle_and_clear_at_the_corners() {
    let puff = puff_texture(64);
    assert_eq!(puff.rgba.len(), 64 * 64 * 4);
    let centre = puff.alpha_at(32, 32);
    assert!(centre >= 230, "centre alpha {centre}");
    assert_eq!(puff.alpha_at(0, 0), 0);
    assert_eq!(puff.alpha_at(63, 63), 0);
    // colour channels are white everywhere
    assert!(puff.rgba.chunks(4).all(|px| px[0] == 255 && px[1] == 255 && px[2] == 255));
}

#[test]
fn puff_alpha_falls_off_with_distance() {
    let puff = puff_texture(PUFF_TEXTURE_SIZE);
    let c = PUFF_TEXTURE_SIZE / 2;
    let mut prev = u8::MAX;
    for dx in (0..c).step_by(8) {
        let a = puff.alpha_at(c + dx, c);
        assert!(a <= prev, "alpha rose at dx={dx}");
        prev = a;
    }
}

#[test]
fn puff_out_of_range_reads_zero() {
    let puff = puff_texture(8);
    assert_eq!(puff.alpha_at(8, 8), 0);
}

#[test]
fn stars_sit_in_their_shell() {
    let config = StarfieldConfig {
        count: 2000,
        radius: 120.0,
        depth: 20.0,
        factor: 4.0,
    };
    let stars = generate_starfield(&config, &mut StdRng::seed_from_u64(6));
    assert_eq!(stars.len(), 2000);
    for s in &stars {
        let r = s.position.length();
        assert!(r >= 120.0 - 1e-2 && r <= 140.0 + 1e-2, "radius {r}");
        assert!(s.size >= 2.0 - 1e-4 && s.size <= 4.0 + 1e-4);
        assert!(s.color.iter().all(|c| (0.0..=1.0).contains(c)));
    }
}

#[test]
fn empty_starfield_is_fine() {
    let config = StarfieldConfig {
        count: 0,
        radius: 80.0,
        depth: 20.0,
        factor: 2.0,
    };
    assert!(generate_starfield(&config, &mut StdRng::seed_from_u64(6)).is_empty());
}

#[test]
fn hsl_primaries() {
    let close = |a: [f32; 3], b: [f32; 3]| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5);
    assert!(close(starfield::hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
    assert!(close(starfield::hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
    assert!(close(starfield::hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    assert!(close(starfield::hsl_to_rgb(0.3, 0.0, 0.9), [0.9, 0.9, 0.9]));
}

#[test]
fn grid_vertices_cover_the_plane() {
    let grid = GridConfig::default();
    let verts = grid.line_vertices();
    assert_eq!(verts.len(), grid.line_count() * 2);
    assert_eq!(grid.line_count(), 2 * (GRID_SEGMENTS as usize + 1));
    let half = GRID_SIZE / 2.0;
    for v in &verts {
        assert_eq!(v[1], 0.0);
        assert!(v[0].abs() <= half + 1e-3 && v[2].abs() <= half + 1e-3);
    }
}

#[test]
fn grid_model_scrolls_and_floats_near_its_height() {
    let grid = GridConfig::default();
    for i in 0..200 {
        let m = grid.model_matrix(i as f32 * 0.7);
        let t = m.w_axis;
        assert!((t.y - GRID_Y).abs() <= 0.03 + 1e-6);
        assert!(t.z >= 0.0 && t.z < GRID_SCROLL_PERIOD);
        assert_eq!(t.x, 0.0);
    }
}

#[test]
fn camera_projects_origin_to_screen_centre() {
    let camera = CLOUD_LENS.camera(glam::Vec3::new(0.0, 0.0, CLOUD_CAMERA_Z), Viewport::new(720, 440));
    let clip = camera.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}
