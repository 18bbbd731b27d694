//! Frame-rate-scaled 2D platformer physics.
//!
//! The host samples held keys and elapsed time, calls [`step`] once per tick
//! and draws whatever comes back. The step is pure: it reads the previous
//! character and the static blocks and returns a new character.

pub mod aabb;
pub mod body;
pub mod character;
pub mod error;
pub mod gravity;
pub mod input;
pub mod params;
pub mod scene;
pub mod vector;

pub use aabb::Aabb;
pub use body::{Block, Body, Contacts, Dimensions, Face, Physical};
pub use character::{Character, CharacterKind};
pub use error::{PhysicsError, SceneError};
pub use gravity::{GravityBody, Grounded};
pub use input::{KeyState, KeyType, Keys};
pub use params::{Params, Restitution};
pub use scene::Scene;

use body::resolve_collisions;
use gravity::{add_gravity_if_not_landing, reflect_is_landing};
use input::{applies_friction, input_acceleration};

/// What happened during one tick, for hosts that want to play sounds or
/// animations. Not fed back into the simulation.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Events {
    pub landed: u8,
    pub took_off: u8,
    pub contacts: Contacts,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tick {
    pub character: Character,
    pub events: Events,
}

fn check_elapsed(elapsed: f32) -> Result<(), PhysicsError> {
    if elapsed.is_nan() || elapsed <= 0.0 {
        return Err(PhysicsError::NonPositiveDuration(elapsed));
    }
    if !elapsed.is_finite() {
        return Err(PhysicsError::NonFiniteDuration(elapsed));
    }
    Ok(())
}

/// Friction integrated over a long tick can carry `vx` past zero; it stops
/// there instead.
fn stop_friction_overshoot(body: Body, prev_vx: f32) -> Body {
    if body.velocity.x * prev_vx < 0.0 {
        body.with_velocity(glam::Vec2::new(0.0, body.velocity.y))
    } else {
        body
    }
}

/// Advances `character` by `elapsed` against `blocks`.
///
/// Order: reset acceleration, add input, add gravity when airborne,
/// integrate velocity (clamped, friction never reversing it) then position,
/// resolve each block in list order, recompute the grounded flag from the
/// resolved state.
pub fn step(
    params: &Params,
    character: &Character,
    blocks: &[Body],
    keys: Keys,
    elapsed: f32,
) -> Result<Tick, PhysicsError> {
    check_elapsed(elapsed)?;

    let was_landing = character.is_landing();
    let input = input_acceleration(was_landing, character.body().velocity, keys, params);

    let next = character.map_body(|b| b.reset_acceleration().add_acceleration(input));
    let next = add_gravity_if_not_landing(next, params);
    let next = next.map_body(|b| b.integrate_acceleration(elapsed));
    let next = if applies_friction(was_landing, keys) {
        let vx = character.body().velocity.x;
        next.map_body(|b| stop_friction_overshoot(b, vx))
    } else {
        next
    };
    let next = next.map_body(|b| b.integrate_velocity(elapsed));
    let (next, contacts) = resolve_collisions(character, next, blocks, params.restitution());
    let next = reflect_is_landing(next, blocks, params);

    let now_landing = next.is_landing();
    let events = Events {
        landed: (now_landing && !was_landing) as u8,
        took_off: (was_landing && !now_landing) as u8,
        contacts,
    };

    if events.landed != 0 {
        log::debug!("landed at {:?}", next.body().position);
    } else if events.took_off != 0 {
        log::debug!("left ground at {:?}", next.body().position);
    }
    log::trace!(
        "tick dt={elapsed} keys={keys:?} pos={:?} vel={:?}",
        next.body().position,
        next.body().velocity
    );

    Ok(Tick {
        character: next,
        events,
    })
}
