//! Orb Core - random walks on the sphere and the image buffers they render into.
//!
//! This crate provides:
//!
//! - **Path generation**: seeded random walks and point clouds on the unit sphere
//! - **Camera parameters**: resolution, blur, aberration and normalization settings
//! - **Buffers**: the accumulation histogram and the normalized image it becomes
//!
//! # Example
//!
//! ```ignore
//! use orb_core::{generate_path, AccumulationBuffer, NormalizationPolicy};
//!
//! let path = generate_path(8000, 0.01, 42)?;
//! println!("Walked {} steps over {} segments", path.len(), path.segment_count());
//! ```

pub mod buffer;
pub mod camera;
pub mod error;
pub mod seeds;
pub mod walk;

// Re-export commonly used types
pub use buffer::{AccumulationBuffer, NormalizationPolicy, NormalizedImage};
pub use camera::{BlurModel, CameraParameters};
pub use error::{RenderError, RenderResult};
pub use seeds::{stream_rng, Seeds};
pub use walk::{generate_path, random_direction, sample_sphere, Path};
