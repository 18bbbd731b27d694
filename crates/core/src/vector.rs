//! Kinematic vector helpers.
//!
//! Position, velocity and acceleration are all plain `glam::Vec2`; the
//! aliases only say which one a signature expects. Time is whatever unit the
//! host samples elapsed time in (milliseconds in the browser host).

use glam::Vec2;

pub type Position = Vec2;
pub type Velocity = Vec2;
pub type Acceleration = Vec2;

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

/// Turns a rate into the delta it produces over `dt`.
#[inline]
pub fn scale_by_duration(v: Vec2, dt: f32) -> Vec2 {
    Vec2::new(v.x * dt, v.y * dt)
}

#[inline]
pub fn integrate_acceleration(velocity: Velocity, acceleration: Acceleration, dt: f32) -> Velocity {
    add(velocity, scale_by_duration(acceleration, dt))
}

#[inline]
pub fn integrate_velocity(position: Position, velocity: Velocity, dt: f32) -> Position {
    add(position, scale_by_duration(velocity, dt))
}

#[inline]
fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

/// Componentwise clamp into `[-|max|, |max|]`.
///
/// The sign of `max` is ignored. A zero component pins that axis to zero.
pub fn clamp_symmetric(v: Vec2, max: Vec2) -> Vec2 {
    let m = max.abs();
    Vec2::new(clamp(v.x, -m.x, m.x), clamp(v.y, -m.y, m.y))
}
