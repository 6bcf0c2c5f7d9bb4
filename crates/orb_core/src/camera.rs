//! Camera parameters for projecting a walk onto the image plane.

use orb_math::{DVec3, PlaneRotation};
use serde::{Deserialize, Serialize};

use crate::buffer::NormalizationPolicy;
use crate::error::{RenderError, RenderResult};

/// Depth-of-field blur model.
///
/// The jitter applied to a sample has magnitude `scaling * f(dz)`, where
/// `dz = focus_depth - z` is the sample's signed distance from the focal
/// plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum BlurModel {
    /// Everything in focus
    #[default]
    None,
    /// f(dz) = dz
    Linear { scaling: f64 },
    /// f(dz) = dz^exponent, exponent >= 1
    Power { scaling: f64, exponent: i32 },
}

impl BlurModel {
    /// Signed jitter magnitude for a sample at depth offset `dz`.
    #[inline]
    pub fn magnitude(&self, dz: f64) -> f64 {
        match *self {
            BlurModel::None => 0.0,
            BlurModel::Linear { scaling } => scaling * dz,
            BlurModel::Power { scaling, exponent } => scaling * dz.powi(exponent),
        }
    }

    /// True if this model never moves a sample.
    pub fn is_none(&self) -> bool {
        matches!(self, BlurModel::None)
    }

    fn scaling(&self) -> f64 {
        match *self {
            BlurModel::None => 0.0,
            BlurModel::Linear { scaling } | BlurModel::Power { scaling, .. } => scaling,
        }
    }
}

/// Camera configuration for one rendering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParameters {
    // Image settings
    pub width: u32,
    pub height: u32,
    /// Pixels per unit of sphere radius
    pub radius: f64,
    pub samples_per_segment: u32,

    // Placement
    pub rotation: Option<PlaneRotation>,

    // Lens settings
    /// Depth of the plane of perfect focus
    pub focus_depth: f64,
    pub blur: BlurModel,
    /// Per-channel scale factors; empty means a single unscaled channel
    pub aberration: Vec<f64>,

    pub normalization: NormalizationPolicy,
}

impl CameraParameters {
    /// Create camera parameters with default settings.
    pub fn new() -> Self {
        Self {
            width: 500,
            height: 500,
            radius: 200.0,
            samples_per_segment: 10,
            rotation: None,
            focus_depth: 0.0,
            blur: BlurModel::None,
            aberration: Vec::new(),
            normalization: NormalizationPolicy::PerChannel,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the projection radius in pixels.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set samples drawn along each segment.
    pub fn with_samples(mut self, samples_per_segment: u32) -> Self {
        self.samples_per_segment = samples_per_segment;
        self
    }

    /// Set camera rotation.
    pub fn with_rotation(mut self, rotation: PlaneRotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Set lens settings.
    pub fn with_focus(mut self, focus_depth: f64, blur: BlurModel) -> Self {
        self.focus_depth = focus_depth;
        self.blur = blur;
        self
    }

    /// Set blur model, keeping the focus depth.
    pub fn with_blur(mut self, blur: BlurModel) -> Self {
        self.blur = blur;
        self
    }

    /// Set per-channel aberration factors.
    pub fn with_aberration(mut self, factors: impl Into<Vec<f64>>) -> Self {
        self.aberration = factors.into();
        self
    }

    /// Set the normalization policy.
    pub fn with_normalization(mut self, policy: NormalizationPolicy) -> Self {
        self.normalization = policy;
        self
    }

    /// Reject configurations that cannot render.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(RenderError::InvalidRadius(self.radius));
        }
        if self.samples_per_segment == 0 {
            return Err(RenderError::InvalidSampleCount);
        }
        if !self.focus_depth.is_finite() {
            return Err(RenderError::InvalidFocus(self.focus_depth));
        }
        let scaling = self.blur.scaling();
        if !(scaling >= 0.0 && scaling.is_finite()) {
            return Err(RenderError::InvalidBlur(format!(
                "scaling must be non-negative and finite, got {}",
                scaling
            )));
        }
        if let BlurModel::Power { exponent, .. } = self.blur {
            if exponent < 1 {
                return Err(RenderError::InvalidBlur(format!(
                    "exponent must be at least 1 so blur grows away from the focal plane, got {}",
                    exponent
                )));
            }
        }
        if let Some(rotation) = self.rotation {
            if !rotation.angle.is_finite() {
                return Err(RenderError::InvalidRotation(rotation.angle));
            }
        }
        for (channel, &factor) in self.aberration.iter().enumerate() {
            if !(factor > 0.0 && factor.is_finite()) {
                return Err(RenderError::InvalidAberration { channel, factor });
            }
        }
        Ok(())
    }

    /// Number of color channels the image will have.
    pub fn channel_count(&self) -> usize {
        self.aberration.len().max(1)
    }

    /// Scale factor applied to samples for each channel.
    pub fn channel_factors(&self) -> Vec<f64> {
        if self.aberration.is_empty() {
            vec![1.0]
        } else {
            self.aberration.clone()
        }
    }

    /// Pixel position of the sphere's center.
    pub fn image_center(&self) -> DVec3 {
        DVec3::new(self.width as f64 / 2.0, self.height as f64 / 2.0, 0.0)
    }
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self::new()
    }
}
