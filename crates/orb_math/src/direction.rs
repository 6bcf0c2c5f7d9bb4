use crate::DVec3;

/// A point on the unit sphere.
///
/// The wrapped vector always has length 1 (within floating-point rounding).
/// The only way to build one is [`Direction::new`], which refuses vectors
/// that cannot be normalized.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Direction(DVec3);

impl Direction {
    /// Normalize `v` onto the unit sphere.
    ///
    /// Returns `None` for a zero-length or non-finite vector.
    pub fn new(v: DVec3) -> Option<Self> {
        let length = v.length();
        if length > 0.0 && length.is_finite() {
            Some(Self(v / length))
        } else {
            None
        }
    }

    /// Positive x axis.
    pub const X: Direction = Direction(DVec3::X);
    /// Positive y axis.
    pub const Y: Direction = Direction(DVec3::Y);
    /// Positive z axis.
    pub const Z: Direction = Direction(DVec3::Z);

    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Cosine of the angle between two directions.
    #[inline]
    pub fn dot(&self, other: Direction) -> f64 {
        self.0.dot(other.0)
    }
}

impl From<Direction> for DVec3 {
    fn from(direction: Direction) -> Self {
        direction.0
    }
}
