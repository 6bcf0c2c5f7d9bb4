//! Orb Renderer - stochastic projection of sphere walks.
//!
//! Draws random samples along every segment of a walk, pushes them through
//! a simple camera (rotation, depth-of-field jitter, per-channel chromatic
//! aberration, scale and offset) and counts where they land.

mod chunk;
mod projector;
mod renderer;

pub use chunk::{generate_chunks, render_chunk, ChunkResult, SegmentChunk, DEFAULT_CHUNK_SIZE};
pub use projector::Projector;
pub use renderer::{render, render_points, render_scene, render_with_chunk_size};

/// Re-export the core types a caller needs to drive a render
pub use orb_core::{
    AccumulationBuffer, BlurModel, CameraParameters, NormalizationPolicy, NormalizedImage, Path,
    RenderError, RenderResult, Seeds,
};
