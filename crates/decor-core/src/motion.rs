//! Pure per-frame transforms.
//!
//! Nothing here keeps state: every function maps (fixed parameters, clock)
//! to a transform, so evaluating twice with the same inputs gives bit-equal
//! results.

use crate::config::MotionProfile;
use crate::constants::*;
use crate::element::DecorativeElement;
use glam::{EulerRot, Quat, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementTransform {
    pub position: Vec3,
    pub scale: f32,
}

#[inline]
pub fn transform(
    element: &DecorativeElement,
    clock_sec: f32,
    speed_factor: f32,
    profile: &MotionProfile,
) -> ElementTransform {
    let t = clock_sec * speed_factor;
    let phase = element.random_phase;
    let amp = profile.amplitude * element.amplitude;
    let offset = Vec3::new(
        (t * profile.frequency.x + phase).sin() * amp.x,
        (t * profile.frequency.y + phase * profile.phase_y).sin() * amp.y,
        (t * profile.frequency.z + phase).cos() * amp.z,
    );
    let pulse = 1.0 + (t * profile.pulse_frequency + phase).sin() * profile.pulse_depth;
    ElementTransform {
        position: element.base_position + offset,
        scale: element.base_scale * pulse,
    }
}

/// Whole-cloud sway around the vertical axis, in radians.
#[inline]
pub fn cloud_group_yaw(clock_sec: f32, speed_factor: f32) -> f32 {
    (clock_sec * speed_factor * CLOUD_YAW_FREQ).sin() * CLOUD_YAW_AMPLITUDE
}

pub fn cloud_group_rotation(clock_sec: f32, speed_factor: f32) -> Quat {
    Quat::from_rotation_y(cloud_group_yaw(clock_sec, speed_factor))
}

/// Slow tumble of the particle sphere: bounded pitch plus steady yaw.
pub fn particle_rotation(clock_sec: f32) -> Quat {
    let pitch = (clock_sec * PARTICLE_PITCH_FREQ).sin() * PARTICLE_PITCH_AMPLITUDE;
    let yaw = clock_sec * PARTICLE_YAW_RATE;
    Quat::from_euler(EulerRot::XYZ, pitch, yaw, 0.0)
}

/// Grid plane z offset, wrapping every `GRID_SCROLL_PERIOD` units.
#[inline]
pub fn grid_scroll(clock_sec: f32) -> f32 {
    (clock_sec * GRID_SCROLL_RATE).rem_euclid(GRID_SCROLL_PERIOD)
}

/// Gentle vertical bob of the grid plane.
#[inline]
pub fn grid_float(clock_sec: f32) -> f32 {
    ((clock_sec / 4.0) * GRID_FLOAT_SPEED).sin() / 10.0 * GRID_FLOAT_INTENSITY
}

/// Camera eye orbiting the origin in the XZ plane.
///
/// `speed` 1.0 is one revolution per minute.
pub fn orbit_eye(clock_sec: f32, distance: f32, speed: f32) -> Vec3 {
    let theta = -(clock_sec * TAU / 60.0 * speed);
    Vec3::new(distance * theta.sin(), 0.0, distance * theta.cos())
}
