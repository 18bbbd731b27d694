//! Gravity and the resting-contact ("landing") test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::{Body, Physical};
use crate::params::Params;

/// A body that falls unless it rests on a block.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GravityBody {
    #[serde(flatten)]
    pub body: Body,
    #[serde(default)]
    pub is_landing: bool,
}

impl GravityBody {
    pub fn new(body: Body) -> Self {
        Self {
            body,
            is_landing: false,
        }
    }
}

pub trait Grounded: Physical {
    fn is_landing(&self) -> bool;

    fn with_landing(self, is_landing: bool) -> Self;
}

impl Physical for GravityBody {
    fn body(&self) -> &Body {
        &self.body
    }

    fn with_body(self, body: Body) -> Self {
        Self { body, ..self }
    }
}

impl Grounded for GravityBody {
    fn is_landing(&self) -> bool {
        self.is_landing
    }

    fn with_landing(self, is_landing: bool) -> Self {
        Self { is_landing, ..self }
    }
}

/// True when `obj` rests on top of `block`: not rising faster than the
/// threshold, bottom edge within the tolerance band around the block's top
/// edge, and horizontally overlapping.
pub fn is_landing(obj: &Body, block: &Body, params: &Params) -> bool {
    let o = obj.aabb();
    let b = block.aabb();
    let buffer = params.landing_buffer;

    !(obj.velocity.y > params.landing_velocity_threshold)
        && o.bottom() <= b.top() + buffer
        && b.top() - buffer <= o.bottom()
        && o.overlaps_x(&b)
}

pub fn reflect_is_landing<G: Grounded>(obj: G, blocks: &[Body], params: &Params) -> G {
    let landing = blocks.iter().any(|b| is_landing(obj.body(), b, params));
    obj.with_landing(landing)
}

pub fn add_gravity_if_not_landing<G: Grounded>(obj: G, params: &Params) -> G {
    if obj.is_landing() {
        return obj;
    }
    obj.map_body(|b| b.add_acceleration(Vec2::new(0.0, -params.gravity)))
}
