//! Segment chunks for parallel accumulation.
//!
//! The walk's segments are split into contiguous chunks that rayon renders
//! independently, each into a private buffer. Random streams are keyed by
//! segment index, never by chunk, so chunking only affects scheduling.

use std::ops::{Add, Range};

use orb_core::{stream_rng, AccumulationBuffer, Path, RenderResult, Seeds};
use rand::Rng;

use crate::Projector;

/// A contiguous run of segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentChunk {
    /// Index of the first segment
    pub start: usize,
    /// Number of segments
    pub len: usize,
}

impl SegmentChunk {
    /// Create a new chunk.
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Segment indices covered by this chunk.
    pub fn segments(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Default chunk size in segments.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Split `segment_count` segments into chunks of at most `chunk_size`.
pub fn generate_chunks(segment_count: usize, chunk_size: usize) -> Vec<SegmentChunk> {
    let chunk_size = chunk_size.max(1);
    (0..segment_count)
        .step_by(chunk_size)
        .map(|start| SegmentChunk::new(start, chunk_size.min(segment_count - start)))
        .collect()
}

/// Sample counts from rendering one or more chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkResult {
    /// Samples drawn
    pub samples: u64,
    /// Channel hits that landed inside the image
    pub hits: u64,
}

impl Add for ChunkResult {
    type Output = ChunkResult;

    fn add(self, other: ChunkResult) -> ChunkResult {
        ChunkResult {
            samples: self.samples + other.samples,
            hits: self.hits + other.hits,
        }
    }
}

/// Accumulate every sample of `chunk` into `buffer`.
///
/// Segment `i` draws its interpolation parameters from interpolation
/// sub-stream `i` and its jitter from jitter sub-stream `i`.
pub fn render_chunk(
    chunk: &SegmentChunk,
    path: &Path,
    projector: &Projector,
    samples_per_segment: u32,
    seeds: &Seeds,
    buffer: &mut AccumulationBuffer,
) -> RenderResult<ChunkResult> {
    let mut result = ChunkResult::default();

    for index in chunk.segments() {
        let Some(segment) = path.segment(index) else {
            break;
        };
        let mut interpolation = stream_rng(seeds.interpolation, index as u64);
        let mut jitter = stream_rng(seeds.jitter, index as u64);

        for _ in 0..samples_per_segment {
            let d: f64 = interpolation.gen();
            let point = projector.focus(segment.at(d), &mut jitter)?;
            result.hits += projector.deposit(point, buffer) as u64;
            result.samples += 1;
        }
    }

    Ok(result)
}
