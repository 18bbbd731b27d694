use glam::Vec2;

/// Inclusive interval test: `[a1, a2]` and `[b1, b2]` overlap unless one ends
/// strictly before the other starts. Touching edges count.
#[inline]
pub fn intervals_overlap(a1: f32, a2: f32, b1: f32, b2: f32) -> bool {
    !(a2 < b1 || b2 < a1)
}

/// Axis-aligned box in simulation space (y-up).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        intervals_overlap(self.min.x, self.max.x, other.min.x, other.max.x)
    }

    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        intervals_overlap(self.min.y, self.max.y, other.min.y, other.max.y)
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}
