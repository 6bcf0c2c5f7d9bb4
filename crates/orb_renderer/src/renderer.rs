//! Core accumulation renderer.
//!
//! Renders a walk by:
//! - Chord sampling each segment at uniform random parameters
//! - Rotating, blurring and aberrating every sample through the [`Projector`]
//! - Counting hits per pixel and channel, in parallel over segment chunks
//! - Normalizing the histogram into a [`NormalizedImage`]

use std::time::Instant;

use orb_core::{
    generate_path, stream_rng, AccumulationBuffer, CameraParameters, NormalizedImage, Path,
    RenderError, RenderResult, Seeds,
};
use rayon::prelude::*;

use crate::chunk::{generate_chunks, render_chunk, ChunkResult, DEFAULT_CHUNK_SIZE};
use crate::Projector;

/// Accumulate samples along every segment of `path`.
///
/// The returned buffer has one channel per aberration factor (or one if
/// there are none). It is not yet normalized.
pub fn render(
    path: &Path,
    camera: &CameraParameters,
    seeds: &Seeds,
) -> RenderResult<AccumulationBuffer> {
    render_with_chunk_size(path, camera, seeds, DEFAULT_CHUNK_SIZE)
}

/// [`render`] with an explicit number of segments per parallel chunk.
///
/// The result does not depend on `chunk_size` or on the number of threads.
pub fn render_with_chunk_size(
    path: &Path,
    camera: &CameraParameters,
    seeds: &Seeds,
    chunk_size: usize,
) -> RenderResult<AccumulationBuffer> {
    let projector = Projector::new(camera)?;
    let chunks = generate_chunks(path.segment_count(), chunk_size);
    let samples = camera.samples_per_segment;

    log::debug!(
        "Accumulating {} segments in {} chunks ({} samples each)",
        path.segment_count(),
        chunks.len(),
        samples
    );

    // Every chunk renders into a worker-private buffer; those are summed.
    // Unit hit counts are exact in f64, so the reduction order is irrelevant.
    let (buffer, result) = chunks
        .par_iter()
        .try_fold(
            || (projector.new_buffer(), ChunkResult::default()),
            |(mut buffer, total), chunk| -> RenderResult<(AccumulationBuffer, ChunkResult)> {
                let result = render_chunk(chunk, path, &projector, samples, seeds, &mut buffer)?;
                Ok((buffer, total + result))
            },
        )
        .try_reduce(
            || (projector.new_buffer(), ChunkResult::default()),
            |(mut a, total_a), (b, total_b)| {
                a.merge(&b)?;
                Ok((a, total_a + total_b))
            },
        )?;

    log::debug!(
        "{} of {} channel samples landed in the image",
        result.hits,
        result.samples * projector.channels() as u64
    );

    Ok(buffer)
}

/// Accumulate one sample at each point of `points`, without joining them.
///
/// Rotation, blur and aberration apply as in [`render`]; point `i` draws its
/// jitter from jitter sub-stream `i`.
pub fn render_points(
    points: &Path,
    camera: &CameraParameters,
    seeds: &Seeds,
) -> RenderResult<AccumulationBuffer> {
    let projector = Projector::new(camera)?;
    let mut buffer = projector.new_buffer();

    for (index, point) in points.points().iter().enumerate() {
        let mut jitter = stream_rng(seeds.jitter, index as u64);
        let point = projector.focus(point.as_dvec3(), &mut jitter)?;
        projector.deposit(point, &mut buffer);
    }

    Ok(buffer)
}

/// Generate a walk, render it and normalize the result.
///
/// Configuration is checked before the walk is generated, so an invalid
/// camera fails without any work being done.
pub fn render_scene(
    step_count: usize,
    step_size: f64,
    camera: &CameraParameters,
    seeds: &Seeds,
) -> RenderResult<NormalizedImage> {
    camera.validate()?;
    if step_count == 0 {
        return Err(RenderError::InvalidStepCount);
    }

    let start = Instant::now();
    let path = generate_path(step_count, step_size, seeds.path)?;
    log::debug!("Walk generated in {:?}", start.elapsed());

    let start = Instant::now();
    let buffer = render(&path, camera, seeds)?;
    log::info!(
        "Rendered {}x{} ({} channel{}) in {:?}",
        camera.width,
        camera.height,
        buffer.channels(),
        if buffer.channels() == 1 { "" } else { "s" },
        start.elapsed()
    );

    buffer.normalize(camera.normalization)
}
