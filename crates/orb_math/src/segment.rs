use crate::{DVec3, Direction};

/// A straight chord between two consecutive path points.
///
/// Points along the chord stand in for points on the arc between them,
/// which is close enough while the endpoints are near each other.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub start: DVec3,
    pub end: DVec3,
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self { start, end }
    }

    /// Create a segment between two points on the sphere.
    pub fn between(start: Direction, end: Direction) -> Self {
        Self::new(start.as_dvec3(), end.as_dvec3())
    }

    /// Get the point at parameter t.
    ///
    /// Returns: (1 - t) * start + t * end
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        (1.0 - t) * self.start + t * self.end
    }

    /// Chord length.
    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }
}
