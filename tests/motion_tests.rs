// Host-side tests for the pure motion rules.
// The main crate is wasm-only, so we include the pure module directly.

#![allow(dead_code)]
#[path = "../src/core/motion.rs"]
mod motion;

use glam::Vec3;
use motion::*;

#[test]
fn exp_approach_converges_on_a_constant_target() {
    let mut v = 0.0_f32;
    for _ in 0..60 {
        v = exp_approach(v, 1.0, 0.1);
        assert!(v <= 1.0, "never overshoots a monotonic step");
    }
    assert!(v > 0.99);
}

#[test]
fn exp_approach_is_identity_at_the_target() {
    assert_eq!(exp_approach(0.7, 0.7, 0.15), 0.7);
}

#[test]
fn orbit_preserves_horizontal_radius() {
    let mut orbit = OrbitState {
        angle: 0.3,
        radius: 12.0,
        vertical_offset: 1.5,
    };
    for _ in 0..500 {
        orbit.step(0.0005);
        let p = orbit.position(2.0, 0.5);
        let horizontal = (p.x * p.x + p.z * p.z).sqrt();
        assert!((horizontal - 12.0).abs() < 1e-3);
    }
}

#[test]
fn orbit_bob_stays_within_amplitude() {
    let orbit = OrbitState {
        angle: 1.0,
        radius: 12.0,
        vertical_offset: 2.0,
    };
    for i in 0..100 {
        let p = orbit.position(i as f32 * 0.1, 0.5);
        assert!((p.y - 2.0).abs() <= 0.5 + 1e-6);
    }
}

#[test]
fn breathe_scale_stays_within_amplitude() {
    for i in 0..100 {
        let s = breathe_scale(i as f32 * 0.07, 1.3, 0.05);
        assert!(s >= 0.95 - 1e-6 && s <= 1.05 + 1e-6);
    }
}

#[test]
fn corner_orbit_circles_its_anchor() {
    let anchor = Vec3::new(-1.8, 2.3, 0.3);
    for i in 0..50 {
        let p = corner_orbit(anchor, i as f32 * 10.0, 0.002, 0.1);
        let d = ((p.x - anchor.x).powi(2) + (p.z - anchor.z).powi(2)).sqrt();
        assert!((d - 0.1).abs() < 1e-4);
        assert_eq!(p.y, anchor.y);
    }
}

#[test]
fn particles_wrap_by_sign_flip_at_the_bound() {
    let mut positions = vec![49.9, 0.0, -49.9];
    let velocities = vec![2.0, 0.0, -2.0];
    drift_particles(&mut positions, &velocities, 0.1, 50.0);
    assert!((positions[0] - (-50.1)).abs() < 1e-4);
    assert_eq!(positions[1], 0.0);
    assert!((positions[2] - 50.1).abs() < 1e-4);
}

#[test]
fn particles_inside_the_bound_drift_freely() {
    let mut positions = vec![1.0, -2.0, 3.0];
    let velocities = vec![0.5, 0.5, -0.5];
    drift_particles(&mut positions, &velocities, 0.1, 50.0);
    assert!((positions[0] - 1.05).abs() < 1e-6);
    assert!((positions[1] - (-1.95)).abs() < 1e-6);
    assert!((positions[2] - 2.95).abs() < 1e-6);
}
