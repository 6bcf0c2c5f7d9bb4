//! Camera model that maps sample points to pixels.

use orb_core::{random_direction, AccumulationBuffer, BlurModel, CameraParameters, RenderResult};
use orb_math::{DMat3, DVec3, Interval};
use rand::Rng;

/// Projects sample points into the image.
///
/// Built once per pass from [`CameraParameters`]. A sample goes through
/// [`Projector::focus`] (rotation, then depth-of-field jitter) once, and
/// through [`Projector::project`] once per channel.
#[derive(Debug, Clone)]
pub struct Projector {
    rotation: Option<DMat3>,
    focus_depth: f64,
    blur: BlurModel,
    radius: f64,
    center: DVec3,
    columns: Interval,
    rows: Interval,
    factors: Vec<f64>,
    width: u32,
    height: u32,
}

impl Projector {
    /// Build a projector, rejecting invalid camera parameters.
    pub fn new(camera: &CameraParameters) -> RenderResult<Self> {
        camera.validate()?;
        Ok(Self {
            rotation: camera.rotation.map(|r| r.matrix()),
            focus_depth: camera.focus_depth,
            blur: camera.blur,
            radius: camera.radius,
            center: camera.image_center(),
            columns: Interval::new(0.0, camera.width as f64),
            rows: Interval::new(0.0, camera.height as f64),
            factors: camera.channel_factors(),
            width: camera.width,
            height: camera.height,
        })
    }

    /// Number of channels each sample is projected into.
    pub fn channels(&self) -> usize {
        self.factors.len()
    }

    /// Zero-filled buffer matching this projector's image.
    pub fn new_buffer(&self) -> AccumulationBuffer {
        AccumulationBuffer::new(self.width, self.height, self.channels())
    }

    /// Rotate a sample and jitter it by its distance from the focal plane.
    ///
    /// Draws from `rng` only when a blur model is set.
    pub fn focus<R: Rng + ?Sized>(&self, point: DVec3, rng: &mut R) -> RenderResult<DVec3> {
        let point = match self.rotation {
            Some(matrix) => matrix * point,
            None => point,
        };

        if self.blur.is_none() {
            return Ok(point);
        }

        let dz = self.focus_depth - point.z;
        let offset = random_direction(rng)?.as_dvec3();
        Ok(point + self.blur.magnitude(dz) * offset)
    }

    /// Pixel hit by `point` in `channel`, or `None` if it lands outside.
    ///
    /// Camera-space +x maps to increasing columns and +y to increasing rows
    /// (row 0 is the top of the image).
    #[inline]
    pub fn project(&self, point: DVec3, channel: usize) -> Option<(u32, u32)> {
        let scaled = point * self.factors[channel];
        let px = scaled.x * self.radius + self.center.x;
        let py = scaled.y * self.radius + self.center.y;

        if !self.columns.contains_half_open(px) || !self.rows.contains_half_open(py) {
            return None;
        }
        Some((px.floor() as u32, py.floor() as u32))
    }

    /// Count a focused sample in every channel it lands in.
    ///
    /// Returns the number of channels that received a hit.
    pub fn deposit(&self, point: DVec3, buffer: &mut AccumulationBuffer) -> usize {
        let mut hits = 0;
        for channel in 0..self.factors.len() {
            if let Some((x, y)) = self.project(point, channel) {
                buffer.deposit(x, y, channel);
                hits += 1;
            }
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::RenderError;
    use orb_math::{Axis, PlaneRotation};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::FRAC_PI_2;

    fn camera() -> CameraParameters {
        CameraParameters::new().with_resolution(200, 200).with_radius(100.0)
    }

    #[test]
    fn test_project_center() {
        let projector = Projector::new(&camera()).unwrap();
        assert_eq!(projector.project(DVec3::ZERO, 0), Some((100, 100)));
        // Depth has no effect on the projected pixel
        assert_eq!(projector.project(DVec3::Z, 0), Some((100, 100)));
    }

    #[test]
    fn test_project_orientation() {
        let projector = Projector::new(&camera()).unwrap();
        // +y lands below the center, +x to the right
        assert_eq!(projector.project(DVec3::new(0.0, 0.5, 0.0), 0), Some((100, 150)));
        assert_eq!(projector.project(DVec3::new(0.5, 0.0, 0.0), 0), Some((150, 100)));
        assert_eq!(projector.project(DVec3::new(-0.5, -0.5, 0.0), 0), Some((50, 50)));
    }

    #[test]
    fn test_project_discards_out_of_bounds() {
        let projector = Projector::new(&camera()).unwrap();

        // Exactly on the far edge is outside [0, width)
        assert_eq!(projector.project(DVec3::new(1.0, 0.0, 0.0), 0), None);
        assert_eq!(projector.project(DVec3::new(0.0, 1.5, 0.0), 0), None);
        assert_eq!(projector.project(DVec3::new(-1.01, 0.0, 0.0), 0), None);
        // Exactly on the near edge is inside
        assert_eq!(projector.project(DVec3::new(-1.0, -1.0, 0.0), 0), Some((0, 0)));
    }

    #[test]
    fn test_aberration_scales_each_channel() {
        let camera = camera().with_aberration([1.0, 1.5, 0.5]);
        let projector = Projector::new(&camera).unwrap();
        let point = DVec3::new(0.5, 0.0, 0.0);

        assert_eq!(projector.channels(), 3);
        assert_eq!(projector.project(point, 0), Some((150, 100)));
        assert_eq!(projector.project(point, 1), Some((175, 100)));
        assert_eq!(projector.project(point, 2), Some((125, 100)));
    }

    #[test]
    fn test_deposit_counts_in_bounds_channels() {
        let camera = camera().with_aberration([1.0, 2.5]);
        let projector = Projector::new(&camera).unwrap();
        let mut buffer = projector.new_buffer();

        // Channel 1 pushes the sample off the image
        let hits = projector.deposit(DVec3::new(0.5, 0.0, 0.0), &mut buffer);
        assert_eq!(hits, 1);
        assert_eq!(buffer.get(150, 100, 0), 1.0);
        assert_eq!(buffer.total(), 1.0);
    }

    #[test]
    fn test_focus_without_blur_only_rotates() {
        let camera = camera().with_rotation(PlaneRotation::new(Axis::Y, FRAC_PI_2));
        let projector = Projector::new(&camera).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let focused = projector.focus(DVec3::Z, &mut rng).unwrap();
        assert!((focused - DVec3::X).length() < 1e-12);
    }

    #[test]
    fn test_focus_blur_grows_with_depth() {
        let camera = camera().with_focus(0.0, BlurModel::Linear { scaling: 0.5 });
        let projector = Projector::new(&camera).unwrap();

        // On the focal plane nothing moves
        let mut rng = StdRng::seed_from_u64(1);
        let on_plane = DVec3::new(0.3, 0.2, 0.0);
        assert_eq!(projector.focus(on_plane, &mut rng).unwrap(), on_plane);

        // Off the plane the jitter has magnitude scaling * |dz|
        let mut rng = StdRng::seed_from_u64(1);
        let off_plane = DVec3::new(0.3, 0.2, 0.8);
        let moved = projector.focus(off_plane, &mut rng).unwrap();
        assert!(((moved - off_plane).length() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_projector_rejects_invalid_camera() {
        let camera = camera().with_samples(0);
        assert_eq!(
            Projector::new(&camera).unwrap_err(),
            RenderError::InvalidSampleCount
        );
    }
}
