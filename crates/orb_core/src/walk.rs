//! Random walks on the unit sphere.

use orb_math::{DVec3, Direction, Segment};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::error::{RenderError, RenderResult};

/// Ordered points on the unit sphere.
///
/// Consecutive points are joined by [`Segment`]s when rendering. A path is
/// never modified after it is generated.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Direction>,
}

impl Path {
    pub fn new(points: Vec<Direction>) -> Self {
        Self { points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Direction] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<Direction> {
        self.points.get(index).copied()
    }

    /// Number of segments between consecutive points (`len - 1`, or 0).
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Get segment `index`, joining point `index` to point `index + 1`.
    pub fn segment(&self, index: usize) -> Option<Segment> {
        let start = *self.points.get(index)?;
        let end = *self.points.get(index + 1)?;
        Some(Segment::between(start, end))
    }

    /// Iterate over all segments in walk order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .map(|pair| Segment::between(pair[0], pair[1]))
    }
}

/// Draw a direction uniformly distributed over the sphere.
///
/// Three independent standard-normal draws, normalized. Normalizing uniform
/// draws instead would bunch points toward the cube's corners.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> RenderResult<Direction> {
    let v = DVec3::new(
        rng.sample(StandardNormal),
        rng.sample(StandardNormal),
        rng.sample(StandardNormal),
    );
    Direction::new(v).ok_or(RenderError::DegenerateDirection {
        stage: "random direction sampling",
    })
}

/// Generate a random walk of `step_count` steps on the unit sphere.
///
/// Starts from a uniformly random point. Each step moves by `step_size` in
/// a uniformly random direction and projects back onto the sphere. The
/// starting point is not part of the returned path, so the path holds
/// exactly `step_count` points.
pub fn generate_path(step_count: usize, step_size: f64, seed: u64) -> RenderResult<Path> {
    if step_count == 0 {
        return Err(RenderError::InvalidStepCount);
    }
    if !(step_size > 0.0 && step_size.is_finite()) {
        return Err(RenderError::InvalidStepSize(step_size));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut current = random_direction(&mut rng)?;
    let mut points = Vec::with_capacity(step_count);

    for _ in 0..step_count {
        let offset = step_size * random_direction(&mut rng)?.as_dvec3();
        current = Direction::new(current.as_dvec3() + offset)
            .ok_or(RenderError::DegenerateDirection { stage: "path step" })?;
        points.push(current);
    }

    log::debug!(
        "Generated walk of {} steps (step size {}, seed {})",
        step_count,
        step_size,
        seed
    );

    Ok(Path::new(points))
}

/// Scatter `count` independent uniform points over the sphere.
pub fn sample_sphere(count: usize, seed: u64) -> RenderResult<Path> {
    if count == 0 {
        return Err(RenderError::InvalidStepCount);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let points = (0..count)
        .map(|_| random_direction(&mut rng))
        .collect::<RenderResult<Vec<_>>>()?;

    Ok(Path::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_random_direction_unit_length() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let d = random_direction(&mut rng).unwrap();
            assert!((d.as_dvec3().length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_random_direction_is_roughly_uniform() {
        // Mean of uniform sphere samples tends to the origin
        let mut rng = StdRng::seed_from_u64(2);
        let n = 20_000;
        let sum: DVec3 = (0..n)
            .map(|_| random_direction(&mut rng).unwrap().as_dvec3())
            .sum();
        let mean = sum / n as f64;
        assert!(mean.length() < 0.05, "mean = {:?}", mean);
    }

    #[test]
    fn test_path_length() {
        let path = generate_path(100, 0.1, 42).unwrap();
        assert_eq!(path.len(), 100);
        assert_eq!(path.segment_count(), 99);
        assert_eq!(path.segments().count(), 99);
    }

    #[test]
    fn test_path_points_on_sphere() {
        let path = generate_path(5000, 0.3, 9).unwrap();
        for point in path.points() {
            assert!((point.as_dvec3().length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_path_deterministic() {
        let a = generate_path(500, 0.05, 1234).unwrap();
        let b = generate_path(500, 0.05, 1234).unwrap();
        // Bit-identical
        for (p, q) in a.points().iter().zip(b.points()) {
            assert_eq!(p.x().to_bits(), q.x().to_bits());
            assert_eq!(p.y().to_bits(), q.y().to_bits());
            assert_eq!(p.z().to_bits(), q.z().to_bits());
        }

        let c = generate_path(500, 0.05, 1235).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_path_steps_are_bounded() {
        // Reprojection can only stretch a step by a factor of order step_size^2
        let step_size = 0.02;
        let path = generate_path(1000, step_size, 5).unwrap();
        for segment in path.segments() {
            assert!(segment.length() <= step_size * (1.0 + step_size));
        }
    }

    #[test]
    fn test_single_step_path_has_no_segments() {
        let path = generate_path(1, 0.1, 0).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.segment_count(), 0);
        assert!(path.segment(0).is_none());
    }

    #[test]
    fn test_invalid_walk_configuration() {
        assert_eq!(generate_path(0, 0.1, 0), Err(RenderError::InvalidStepCount));
        assert_eq!(generate_path(10, 0.0, 0), Err(RenderError::InvalidStepSize(0.0)));
        assert_eq!(generate_path(10, -1.0, 0), Err(RenderError::InvalidStepSize(-1.0)));
        assert!(matches!(
            generate_path(10, f64::NAN, 0),
            Err(RenderError::InvalidStepSize(_))
        ));
    }

    #[test]
    fn test_sample_sphere() {
        let cloud = sample_sphere(250, 3).unwrap();
        assert_eq!(cloud.len(), 250);
        for point in cloud.points() {
            assert!((point.as_dvec3().length() - 1.0).abs() < EPSILON);
        }
        assert_eq!(cloud, sample_sphere(250, 3).unwrap());
    }

    #[test]
    fn test_segment_lookup() {
        let path = generate_path(3, 0.1, 8).unwrap();
        let segment = path.segment(1).unwrap();
        assert_eq!(segment.start, path.get(1).unwrap().as_dvec3());
        assert_eq!(segment.end, path.get(2).unwrap().as_dvec3());
    }
}
