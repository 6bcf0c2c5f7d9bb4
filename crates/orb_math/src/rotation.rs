// Rigid camera rotations
//
// A rotation by `angle` radians about one coordinate axis, i.e. in the plane
// spanned by the other two axes. Used to orbit the camera around the sphere
// between animation frames.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

/// Coordinate axis a rotation turns about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

/// Rotation about a single coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneRotation {
    #[serde(default)]
    pub axis: Axis,
    /// Angle in radians
    pub angle: f64,
}

impl PlaneRotation {
    /// No rotation.
    pub const IDENTITY: PlaneRotation = PlaneRotation {
        axis: Axis::Y,
        angle: 0.0,
    };

    pub fn new(axis: Axis, angle: f64) -> Self {
        Self { axis, angle }
    }

    /// Rotation matrix for this rotation.
    pub fn matrix(&self) -> DMat3 {
        match self.axis {
            Axis::X => DMat3::from_rotation_x(self.angle),
            Axis::Y => DMat3::from_rotation_y(self.angle),
            Axis::Z => DMat3::from_rotation_z(self.angle),
        }
    }

    /// Rotate a point.
    pub fn apply(&self, point: DVec3) -> DVec3 {
        self.matrix() * point
    }
}
