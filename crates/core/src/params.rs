use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

/// Tunables for one simulation. Time is in milliseconds, lengths in world
/// units, so accelerations are per ms².
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Horizontal input
    pub horizontal_acceleration: f32,
    pub air_control: f32,
    pub ground_friction: f32,

    // Vertical input
    pub jump_acceleration: f32,
    pub down_acceleration: f32,

    // Gravity / resting contact
    pub gravity: f32,
    pub landing_buffer: f32,
    pub landing_velocity_threshold: f32,

    // Impact response, fraction of speed kept
    pub vertical_restitution: f32,
    pub horizontal_restitution: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            horizontal_acceleration: 0.0005,
            air_control: 0.05,
            ground_friction: 0.02,

            jump_acceleration: 0.015,
            down_acceleration: 0.0005,

            gravity: 0.001,
            landing_buffer: 0.01,
            landing_velocity_threshold: 0.01,

            vertical_restitution: 0.125,
            horizontal_restitution: 0.5,
        }
    }
}

/// Fraction of speed kept (and reversed) on each axis after an impact.
///
/// A rebound off a top face no faster than `settle` is dropped so the body
/// comes to rest instead of hopping out of the landing band.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Restitution {
    pub vertical: f32,
    pub horizontal: f32,
    pub settle: f32,
}

impl Params {
    pub fn restitution(&self) -> Restitution {
        Restitution {
            vertical: self.vertical_restitution,
            horizontal: self.horizontal_restitution,
            settle: self.landing_velocity_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        let non_negative = [
            ("horizontal_acceleration", self.horizontal_acceleration),
            ("air_control", self.air_control),
            ("ground_friction", self.ground_friction),
            ("jump_acceleration", self.jump_acceleration),
            ("down_acceleration", self.down_acceleration),
            ("gravity", self.gravity),
            ("landing_buffer", self.landing_buffer),
            ("landing_velocity_threshold", self.landing_velocity_threshold),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidParam { name, value });
            }
        }

        let fractions = [
            ("vertical_restitution", self.vertical_restitution),
            ("horizontal_restitution", self.horizontal_restitution),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(PhysicsError::InvalidParam { name, value });
            }
        }

        Ok(())
    }
}
