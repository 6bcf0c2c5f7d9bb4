// Re-export glam for convenience
pub use glam::*;

// Orb math types
mod direction;
mod interval;
mod rotation;
mod segment;

pub use direction::Direction;
pub use interval::Interval;
pub use rotation::{Axis, PlaneRotation};
pub use segment::Segment;
