//! Error taxonomy shared by path generation, rendering and normalization.

use thiserror::Error;

/// Errors that can abort a rendering pass.
///
/// Configuration faults are raised before anything is allocated. Degenerate
/// math faults name the stage that hit them. Samples that project outside
/// the image are not errors and never show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Step count must be positive")]
    InvalidStepCount,

    #[error("Step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),

    #[error("Samples per segment must be positive")]
    InvalidSampleCount,

    #[error("Image resolution must be positive, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Projection radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("Focus depth must be finite, got {0}")]
    InvalidFocus(f64),

    #[error("Invalid blur model: {0}")]
    InvalidBlur(String),

    #[error("Aberration factor for channel {channel} must be positive and finite, got {factor}")]
    InvalidAberration { channel: usize, factor: f64 },

    #[error("Rotation angle must be finite, got {0}")]
    InvalidRotation(f64),

    #[error("Cannot normalize a zero-length vector during {stage}")]
    DegenerateDirection { stage: &'static str },

    #[error("Nothing accumulated in channel {channel}; cannot normalize an all-zero buffer")]
    EmptyAccumulation { channel: usize },

    #[error("Buffer dimensions differ: {expected:?} vs {found:?}")]
    BufferMismatch {
        expected: (u32, u32, usize),
        found: (u32, u32, usize),
    },
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
