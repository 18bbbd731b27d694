//! Rigid axis-aligned rectangles: integration, clamping and the single-axis
//! collision response.
//!
//! Every operation takes its input by value and returns a new value; nothing
//! here mutates state the caller can still see.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::aabb::Aabb;
use crate::error::PhysicsError;
use crate::params::Restitution;
use crate::vector::{self, Acceleration, Position, Velocity};

/// Full extents of a body. Always positive and finite.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    width: f32,
    height: f32,
}

#[derive(Deserialize)]
struct RawDimensions {
    width: f32,
    height: f32,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = PhysicsError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Dimensions::new(raw.width, raw.height)
    }
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Result<Self, PhysicsError> {
        Self::checked(width, height).ok_or(PhysicsError::InvalidDimensions { width, height })
    }

    /// `const` form of [`Dimensions::new`], usable for literal extents in
    /// `const` items where a bad value fails the build.
    pub const fn checked(width: f32, height: f32) -> Option<Self> {
        // NaN fails both comparisons.
        let valid_w = width > 0.0 && width < f32::INFINITY;
        let valid_h = height > 0.0 && height < f32::INFINITY;
        if valid_w && valid_h {
            Some(Self { width, height })
        } else {
            None
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A rectangle with linear kinematics. `position` is the center.
///
/// Blocks use the same type with zero velocity and max velocity.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Position,
    #[serde(default)]
    pub velocity: Velocity,
    #[serde(default)]
    pub max_velocity: Velocity,
    #[serde(default)]
    pub acceleration: Acceleration,
    pub dimensions: Dimensions,
}

pub type Block = Body;

impl Body {
    pub fn new(position: Position, dimensions: Dimensions) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            max_velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            dimensions,
        }
    }

    /// A static obstacle centered at `position`.
    pub fn block(position: Position, width: f32, height: f32) -> Result<Self, PhysicsError> {
        Ok(Self::new(position, Dimensions::new(width, height)?))
    }

    pub fn with_velocity(self, velocity: Velocity) -> Self {
        Self { velocity, ..self }
    }

    pub fn with_max_velocity(self, max_velocity: Velocity) -> Self {
        Self {
            max_velocity,
            ..self
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.dimensions.half_extents())
    }

    pub fn reset_acceleration(self) -> Self {
        Self {
            acceleration: Vec2::ZERO,
            ..self
        }
    }

    pub fn add_acceleration(self, acceleration: Acceleration) -> Self {
        Self {
            acceleration: vector::add(self.acceleration, acceleration),
            ..self
        }
    }

    /// Applies acceleration to velocity, then clamps to `±max_velocity`.
    pub fn integrate_acceleration(self, dt: f32) -> Self {
        let velocity = vector::integrate_acceleration(self.velocity, self.acceleration, dt);
        Self {
            velocity: vector::clamp_symmetric(velocity, self.max_velocity),
            ..self
        }
    }

    pub fn integrate_velocity(self, dt: f32) -> Self {
        Self {
            position: vector::integrate_velocity(self.position, self.velocity, dt),
            ..self
        }
    }

    /// Plain AABB overlap on both axes, no response.
    pub fn is_overlapping(&self, other: &Body) -> bool {
        self.aabb().intersects(&other.aabb())
    }
}

/// Anything that embeds a [`Body`].
pub trait Physical: Sized {
    fn body(&self) -> &Body;

    fn with_body(self, body: Body) -> Self;

    fn map_body(self, f: impl FnOnce(Body) -> Body) -> Self {
        let body = f(*self.body());
        self.with_body(body)
    }
}

impl Physical for Body {
    fn body(&self) -> &Body {
        self
    }

    fn with_body(self, body: Body) -> Self {
        body
    }
}

/// Face of the obstacle that was struck.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    /// Landed on it from above.
    Top,
    /// Hit it from below.
    Bottom,
    /// Ran into it moving right.
    Left,
    /// Ran into it moving left.
    Right,
}

bitflags::bitflags! {
    /// Set of faces struck during one tick.
    #[repr(transparent)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Contacts: u8 {
        const TOP    = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT   = 1 << 2;
        const RIGHT  = 1 << 3;
    }
}

impl Default for Contacts {
    fn default() -> Self {
        Contacts::empty()
    }
}

impl From<Face> for Contacts {
    fn from(face: Face) -> Self {
        match face {
            Face::Top => Contacts::TOP,
            Face::Bottom => Contacts::BOTTOM,
            Face::Left => Contacts::LEFT,
            Face::Right => Contacts::RIGHT,
        }
    }
}

/// Decides which face of `obstacle`, if any, the move `prev -> next` pushed
/// into. Faces are tried Top, Bottom, Left, Right and only the first match is
/// reported, so at most one axis is resolved per obstacle per tick.
///
/// A direction counts as moving if either the old or the new velocity points
/// that way. The cross axis must overlap before or after the move.
pub fn detect_collision(prev: &Body, next: &Body, obstacle: &Body) -> Option<Face> {
    let ob = obstacle.aabb();
    let p = prev.aabb();
    let n = next.aabb();

    let x_overlap = p.overlaps_x(&ob) || n.overlaps_x(&ob);
    let y_overlap = p.overlaps_y(&ob) || n.overlaps_y(&ob);

    let falling = prev.velocity.y < 0.0 || next.velocity.y < 0.0;
    let rising = prev.velocity.y > 0.0 || next.velocity.y > 0.0;
    let moving_right = prev.velocity.x > 0.0 || next.velocity.x > 0.0;
    let moving_left = prev.velocity.x < 0.0 || next.velocity.x < 0.0;

    if falling && p.bottom() >= ob.top() && n.bottom() <= ob.top() && x_overlap {
        return Some(Face::Top);
    }
    if rising && p.top() <= ob.bottom() && n.top() >= ob.bottom() && x_overlap {
        return Some(Face::Bottom);
    }
    if moving_right && p.right() <= ob.left() && n.right() >= ob.left() && y_overlap {
        return Some(Face::Left);
    }
    if moving_left && p.left() >= ob.right() && n.left() <= ob.right() && y_overlap {
        return Some(Face::Right);
    }
    None
}

/// Puts `next` flush against `face` of `obstacle`, reverses and damps the
/// velocity on that axis and drops the acceleration on that axis. A top-face
/// rebound at or below `restitution.settle` becomes zero.
pub fn respond(next: Body, obstacle: &Body, face: Face, restitution: Restitution) -> Body {
    let ob = obstacle.aabb();
    let half = next.dimensions.half_extents();
    let mut position = next.position;
    let mut velocity = next.velocity;
    let mut acceleration = next.acceleration;

    match face {
        Face::Top => {
            position.y = ob.top() + half.y;
            let rebound = -velocity.y * restitution.vertical;
            velocity.y = if rebound <= restitution.settle { 0.0 } else { rebound };
            acceleration.y = 0.0;
        }
        Face::Bottom => {
            position.y = ob.bottom() - half.y;
            velocity.y = -velocity.y * restitution.vertical;
            acceleration.y = 0.0;
        }
        Face::Left | Face::Right => {
            position.x = if face == Face::Left {
                ob.left() - half.x
            } else {
                ob.right() + half.x
            };
            velocity.x = -velocity.x * restitution.horizontal;
            acceleration.x = 0.0;
        }
    }

    Body {
        position,
        velocity,
        acceleration,
        ..next
    }
}

pub fn resolve_collision<P: Physical>(
    prev: &P,
    next: P,
    obstacle: &Body,
    restitution: Restitution,
) -> P {
    match detect_collision(prev.body(), next.body(), obstacle) {
        Some(face) => next.map_body(|b| respond(b, obstacle, face, restitution)),
        None => next,
    }
}

/// Resolves against each block in list order. Each block sees the result of
/// the previous one, so the first block listed wins ties.
pub fn resolve_collisions<P: Physical>(
    prev: &P,
    next: P,
    blocks: &[Body],
    restitution: Restitution,
) -> (P, Contacts) {
    let mut contacts = Contacts::empty();
    let resolved = blocks.iter().enumerate().fold(next, |cur, (i, block)| {
        match detect_collision(prev.body(), cur.body(), block) {
            Some(face) => {
                log::trace!("contact with block {i} on {face:?} face");
                contacts |= Contacts::from(face);
                cur.map_body(|b| respond(b, block, face, restitution))
            }
            None => cur,
        }
    });
    (resolved, contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;

    fn approx_eq(a: f32, b: f32) {
        let eps = 1e-5;
        assert!(
            (a - b).abs() <= eps,
            "expected {b}, got {a} (diff {})",
            (a - b).abs()
        );
    }

    fn unit_box(x: f32, y: f32) -> Body {
        Body::block(Vec2::new(x, y), 10.0, 10.0)
            .unwrap()
            .with_max_velocity(Vec2::new(1.0, 1.0))
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert_eq!(
            Dimensions::new(0.0, 5.0),
            Err(PhysicsError::InvalidDimensions {
                width: 0.0,
                height: 5.0
            })
        );
        assert!(Dimensions::new(3.0, -1.0).is_err());
        assert!(Dimensions::new(f32::INFINITY, 1.0).is_err());
        assert!(Dimensions::checked(f32::NAN, 1.0).is_none());
        assert_eq!(Dimensions::checked(2.0, 3.0).map(|d| d.half_extents()), Some(Vec2::new(1.0, 1.5)));
    }

    #[test]
    fn deserialize_checks_dimensions() {
        let err = serde_json::from_str::<Dimensions>(r#"{ "width": 10, "height": 0 }"#);
        assert!(err.is_err());
        let ok: Dimensions = serde_json::from_str(r#"{ "width": 10, "height": 4 }"#).unwrap();
        assert_eq!(ok.half_extents(), Vec2::new(5.0, 2.0));
    }

    #[test]
    fn acceleration_is_reset_then_accumulated() {
        let b = unit_box(0.0, 0.0)
            .add_acceleration(Vec2::new(1.0, 1.0))
            .reset_acceleration()
            .add_acceleration(Vec2::new(0.25, 0.0))
            .add_acceleration(Vec2::new(0.0, -0.5));
        assert_eq!(b.acceleration, Vec2::new(0.25, -0.5));
    }

    #[test]
    fn integration_clamps_velocity() {
        let b = unit_box(0.0, 0.0)
            .add_acceleration(Vec2::new(0.5, -0.5))
            .integrate_acceleration(10.0);
        assert_eq!(b.velocity, Vec2::new(1.0, -1.0));

        let moved = b.integrate_velocity(3.0);
        assert_eq!(moved.position, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn lands_on_top_face() {
        let floor = Body::block(Vec2::new(0.0, 0.0), 100.0, 20.0).unwrap();
        let prev = unit_box(0.0, 16.0).with_velocity(Vec2::new(0.0, -0.4));
        let next = prev.integrate_velocity(10.0);
        assert_eq!(detect_collision(&prev, &next, &floor), Some(Face::Top));

        let r = Params::default().restitution();
        let out = resolve_collision(&prev, next, &floor, r);
        approx_eq(out.aabb().bottom(), floor.aabb().top());
        approx_eq(out.velocity.y, 0.4 * r.vertical);
        assert_eq!(out.acceleration.y, 0.0);
    }

    #[test]
    fn slow_landing_settles() {
        let floor = Body::block(Vec2::new(0.0, 0.0), 100.0, 20.0).unwrap();
        let prev = unit_box(0.0, 15.5).with_velocity(Vec2::new(0.0, -0.05));
        let next = prev.integrate_velocity(20.0);
        let out = resolve_collision(&prev, next, &floor, Params::default().restitution());
        assert_eq!(out.aabb().bottom(), 10.0);
        assert_eq!(out.velocity.y, 0.0);
    }

    #[test]
    fn bumps_bottom_face() {
        let ceiling = Body::block(Vec2::new(0.0, 30.0), 100.0, 20.0).unwrap();
        let prev = unit_box(0.0, 14.0).with_velocity(Vec2::new(0.0, 0.3));
        let next = prev.integrate_velocity(10.0);
        assert_eq!(detect_collision(&prev, &next, &ceiling), Some(Face::Bottom));

        let out = resolve_collision(&prev, next, &ceiling, Params::default().restitution());
        approx_eq(out.aabb().top(), 20.0);
        assert!(out.velocity.y < 0.0);
    }

    #[test]
    fn walls_use_horizontal_restitution() {
        let wall = Body::block(Vec2::new(20.0, 0.0), 10.0, 100.0).unwrap();
        let prev = unit_box(8.0, 0.0).with_velocity(Vec2::new(0.5, 0.0));
        let next = prev.integrate_velocity(6.0);
        assert_eq!(detect_collision(&prev, &next, &wall), Some(Face::Left));

        let r = Restitution {
            vertical: 0.125,
            horizontal: 0.5,
            settle: 0.01,
        };
        let out = resolve_collision(&prev, next, &wall, r);
        approx_eq(out.aabb().right(), 15.0);
        approx_eq(out.velocity.x, -0.25);

        let prev = unit_box(32.0, 0.0).with_velocity(Vec2::new(-0.5, 0.0));
        let next = prev.integrate_velocity(6.0);
        assert_eq!(detect_collision(&prev, &next, &wall), Some(Face::Right));
        let out = resolve_collision(&prev, next, &wall, r);
        approx_eq(out.aabb().left(), 25.0);
        approx_eq(out.velocity.x, 0.25);
    }

    #[test]
    fn vertical_face_wins_over_horizontal() {
        // Diagonal move that crosses both the top and the left face.
        let block = Body::block(Vec2::new(20.0, 0.0), 10.0, 10.0).unwrap();
        let prev = unit_box(8.0, 12.0).with_velocity(Vec2::new(0.5, -0.5));
        let next = prev.integrate_velocity(4.0);
        assert_eq!(detect_collision(&prev, &next, &block), Some(Face::Top));
    }

    #[test]
    fn miss_leaves_next_untouched() {
        let far = Body::block(Vec2::new(500.0, 500.0), 10.0, 10.0).unwrap();
        let prev = unit_box(0.0, 0.0).with_velocity(Vec2::new(0.5, 0.5));
        let next = prev.integrate_velocity(1.0);
        let out = resolve_collision(&prev, next, &far, Params::default().restitution());
        assert_eq!(out, next);
    }

    #[test]
    fn collects_contacts_across_blocks() {
        let floor = Body::block(Vec2::new(0.0, -10.0), 200.0, 20.0).unwrap();
        let wall = Body::block(Vec2::new(25.0, 50.0), 10.0, 100.0).unwrap();
        let prev = unit_box(14.0, 6.0).with_velocity(Vec2::new(0.2, -0.2));
        let next = prev.integrate_velocity(25.0);
        let (_, contacts) =
            resolve_collisions(&prev, next, &[floor, wall], Params::default().restitution());
        assert_eq!(contacts, Contacts::TOP | Contacts::LEFT);
    }

    #[test]
    fn overlap_query_is_inclusive() {
        let a = unit_box(0.0, 0.0);
        assert!(a.is_overlapping(&unit_box(10.0, 0.0)));
        assert!(!a.is_overlapping(&unit_box(10.5, 0.0)));
    }
}
