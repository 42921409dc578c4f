//! Per-item motion rules, kept pure so the scene pass is a thin applier.
//!
//! Each item owns its motion; the interaction subsystem only ever reads the
//! resulting positions.

use glam::Vec3;

/// One step of exponential smoothing toward a target.
#[inline]
pub fn exp_approach(value: f32, target: f32, alpha: f32) -> f32 {
    value + (target - value) * alpha
}

/// Orbit on a horizontal circle with a sinusoidal vertical bob.
#[derive(Clone, Copy, Debug)]
pub struct OrbitState {
    pub angle: f32,
    pub radius: f32,
    pub vertical_offset: f32,
}

impl OrbitState {
    #[inline]
    pub fn step(&mut self, speed: f32) {
        self.angle += speed;
    }

    #[inline]
    pub fn position(&self, time: f32, bob_amplitude: f32) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.radius,
            self.vertical_offset + (time + self.angle).sin() * bob_amplitude,
            self.angle.sin() * self.radius,
        )
    }
}

/// Breathing scale applied to orbiting panels.
#[inline]
pub fn breathe_scale(time: f32, angle: f32, amplitude: f32) -> f32 {
    1.0 + (time * 2.0 + angle).sin() * amplitude
}

/// Vertical float for skill badges around their anchor height.
#[inline]
pub fn float_offset(time: f32, speed: f32, range: f32) -> f32 {
    (time * speed * 100.0).sin() * range
}

/// Small circular orbit of a corner orb around its anchor point.
#[inline]
pub fn corner_orbit(anchor: Vec3, time: f32, speed: f32, radius: f32) -> Vec3 {
    Vec3::new(
        anchor.x + (time * speed).cos() * radius,
        anchor.y,
        anchor.z + (time * speed).sin() * radius,
    )
}

/// Vertical bob for the concentric card rings.
#[inline]
pub fn ring_bob(time: f32, index: f32) -> f32 {
    (time * 2.0 + index).sin() * 0.15
}

/// Advance a packed xyz particle buffer by its velocities.
///
/// A coordinate drifting past `bound` flips sign, re-entering from the
/// opposite side of the field.
pub fn drift_particles(positions: &mut [f32], velocities: &[f32], gain: f32, bound: f32) {
    let n = positions.len().min(velocities.len());
    for i in 0..n {
        positions[i] += velocities[i] * gain;
        if positions[i].abs() > bound {
            positions[i] = -positions[i];
        }
    }
}
