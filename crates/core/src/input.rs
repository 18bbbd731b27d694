//! Held-key snapshot and the mapping from keys to acceleration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::vector::{Acceleration, Velocity};

bitflags::bitflags! {
    /// Keys held at the moment the host sampled input.
    #[repr(transparent)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Keys: u8 {
        const UP    = 1 << 0;
        const DOWN  = 1 << 1;
        const LEFT  = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyType {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyState {
    Pressed,
    NotPressed,
}

impl KeyType {
    pub const ALL: [KeyType; 4] = [KeyType::Up, KeyType::Down, KeyType::Left, KeyType::Right];

    /// Browser `keyCode` of the arrow keys. Anything else is ignored.
    pub fn from_key_code(code: u32) -> Option<KeyType> {
        match code {
            37 => Some(KeyType::Left),
            38 => Some(KeyType::Up),
            39 => Some(KeyType::Right),
            40 => Some(KeyType::Down),
            _ => None,
        }
    }

    pub fn flag(self) -> Keys {
        match self {
            KeyType::Up => Keys::UP,
            KeyType::Down => Keys::DOWN,
            KeyType::Left => Keys::LEFT,
            KeyType::Right => Keys::RIGHT,
        }
    }
}

impl Keys {
    pub fn state(self, key: KeyType) -> KeyState {
        if self.contains(key.flag()) {
            KeyState::Pressed
        } else {
            KeyState::NotPressed
        }
    }

    #[must_use]
    pub fn with(self, key: KeyType, state: KeyState) -> Keys {
        match state {
            KeyState::Pressed => self | key.flag(),
            KeyState::NotPressed => self - key.flag(),
        }
    }

    /// Same as [`Keys::with`] for a raw key code; unknown codes change nothing.
    #[must_use]
    pub fn apply_key_code(self, code: u32, state: KeyState) -> Keys {
        match KeyType::from_key_code(code) {
            Some(key) => self.with(key, state),
            None => self,
        }
    }
}

/// Acceleration the player asks for this tick. Only the held keys matter,
/// there is no memory of earlier ticks.
pub fn input_acceleration(
    grounded: bool,
    velocity: Velocity,
    keys: Keys,
    params: &Params,
) -> Acceleration {
    Vec2::new(
        horizontal(grounded, velocity.x, keys, params),
        vertical(grounded, keys, params),
    )
}

/// Grounded without exactly one of left/right held: the horizontal input is
/// friction, which may slow the body down but never reverse it.
pub fn applies_friction(grounded: bool, keys: Keys) -> bool {
    grounded && keys.contains(Keys::LEFT) == keys.contains(Keys::RIGHT)
}

fn horizontal(grounded: bool, vx: f32, keys: Keys, params: &Params) -> f32 {
    if applies_friction(grounded, keys) {
        // Proportional decay toward zero.
        return -vx * params.ground_friction;
    }

    let control = if grounded { 1.0 } else { params.air_control };
    match (keys.contains(Keys::LEFT), keys.contains(Keys::RIGHT)) {
        (false, true) => params.horizontal_acceleration * control,
        (true, false) => -params.horizontal_acceleration * control,
        _ => 0.0,
    }
}

fn vertical(grounded: bool, keys: Keys, params: &Params) -> f32 {
    let up = keys.contains(Keys::UP);
    let down = keys.contains(Keys::DOWN);

    match (up, down) {
        (true, false) if grounded => params.jump_acceleration,
        (false, true) => -params.down_acceleration,
        _ => 0.0,
    }
}
