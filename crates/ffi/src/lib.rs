use glam::Vec2;
use platstep_core::{Body, Character, Dimensions, Events, Keys, Params, PhysicsError};

pub const CORE_OK: i32 = 0;
pub const CORE_NULL_POINTER: i32 = -1;
pub const CORE_INVALID_DIMENSIONS: i32 = -2;
pub const CORE_INVALID_ELAPSED: i32 = -3;
pub const CORE_INVALID_PARAM: i32 = -4;

fn status(err: PhysicsError) -> i32 {
    match err {
        PhysicsError::InvalidDimensions { .. } => CORE_INVALID_DIMENSIONS,
        PhysicsError::InvalidParam { .. } => CORE_INVALID_PARAM,
        PhysicsError::NonPositiveDuration(_) | PhysicsError::NonFiniteDuration(_) => {
            CORE_INVALID_ELAPSED
        }
    }
}

#[no_mangle]
pub extern "C" fn core_default_params(out: *mut Params) -> i32 {
    if out.is_null() {
        return CORE_NULL_POINTER;
    }
    unsafe { *out = Params::default(); }
    CORE_OK
}

/// Static block centered at `(x, y)`.
#[no_mangle]
pub extern "C" fn core_init_block(out: *mut Body, x: f32, y: f32, w: f32, h: f32) -> i32 {
    if out.is_null() {
        return CORE_NULL_POINTER;
    }
    match Body::block(Vec2::new(x, y), w, h) {
        Ok(b) => {
            unsafe { *out = b; }
            CORE_OK
        }
        Err(err) => status(err),
    }
}

#[no_mangle]
pub extern "C" fn core_init_character(
    out: *mut Character,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    max_vx: f32,
    max_vy: f32,
) -> i32 {
    if out.is_null() {
        return CORE_NULL_POINTER;
    }
    let dims = match Dimensions::new(w, h) {
        Ok(d) => d,
        Err(err) => return status(err),
    };
    let body = Body::new(Vec2::new(x, y), dims).with_max_velocity(Vec2::new(max_vx, max_vy));
    unsafe { *out = Character::new(body); }
    CORE_OK
}

/// Steps `*character` in place. On failure the character and `*events_out`
/// are left untouched.
#[no_mangle]
pub extern "C" fn core_step(
    params: *const Params,
    blocks: *const Body,
    blocks_len: usize,
    character: *mut Character,
    key_bits: u8,
    elapsed: f32,
    events_out: *mut Events,
) -> i32 {
    if params.is_null() || character.is_null() || events_out.is_null() {
        return CORE_NULL_POINTER;
    }
    if blocks.is_null() && blocks_len != 0 {
        return CORE_NULL_POINTER;
    }

    let p = unsafe { &*params };
    if let Err(err) = p.validate() {
        return status(err);
    }
    let c = unsafe { &mut *character };
    let world: &[Body] = if blocks_len == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(blocks, blocks_len) }
    };
    let keys = Keys::from_bits_truncate(key_bits);

    match platstep_core::step(p, c, world, keys, elapsed) {
        Ok(tick) => {
            *c = tick.character;
            unsafe { *events_out = tick.events; }
            CORE_OK
        }
        Err(err) => status(err),
    }
}
