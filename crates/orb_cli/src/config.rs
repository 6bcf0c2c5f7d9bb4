//! Scene configuration loaded from JSON.
//!
//! Every field has a default, so `{}` is a valid scene and a file only
//! needs to name what it changes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use orb_core::{CameraParameters, Seeds};
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::sweep::SweepConfig;

/// Random walk settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Number of steps (points in the path)
    pub steps: usize,
    /// Length of each linear step before reprojection
    pub step_size: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            steps: 8000,
            step_size: 0.01,
        }
    }
}

/// What gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Samples along the segments of a random walk
    #[default]
    Walk,
    /// One sample per independent point on the sphere
    Points,
}

/// Where and how images are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// File name stem; sweeps append a per-pass suffix
    pub prefix: String,
    pub format: OutputFormat,
    pub gamma: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            prefix: "walk".to_string(),
            format: OutputFormat::Ppm,
            gamma: 2.2,
        }
    }
}

/// A complete scene: walk, camera, sweep and output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub walk: WalkConfig,
    /// Master seed, used when `seeds` is absent
    pub seed: u64,
    /// Explicit per-stream seeds
    pub seeds: Option<Seeds>,
    pub mode: RenderMode,
    pub camera: CameraParameters,
    pub sweep: SweepConfig,
    pub output: OutputConfig,
}

impl SceneConfig {
    /// Load a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid scene file {}", path.display()))
    }

    /// Parse a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(text)?;
        if !(config.output.gamma > 0.0 && config.output.gamma.is_finite()) {
            anyhow::bail!("Output gamma must be positive, got {}", config.output.gamma);
        }
        Ok(config)
    }

    /// Seeds for every random stream.
    pub fn seeds(&self) -> Seeds {
        self.seeds.unwrap_or_else(|| Seeds::from_master(self.seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::BlurModel;

    #[test]
    fn test_empty_scene_uses_defaults() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.walk.steps, 8000);
        assert_eq!(config.camera.width, 500);
        assert_eq!(config.output.format, OutputFormat::Ppm);
        assert_eq!(config.sweep, SweepConfig::Single);
    }

    #[test]
    fn test_full_scene() {
        let config = SceneConfig::from_json(
            r#"{
                "walk": { "steps": 100, "step_size": 0.1 },
                "seed": 7,
                "mode": "walk",
                "camera": {
                    "width": 200,
                    "height": 200,
                    "samples_per_segment": 100,
                    "focus_depth": 0.5,
                    "blur": { "model": "linear", "scaling": 0.02 },
                    "aberration": [1.0, 1.01, 1.02]
                },
                "sweep": { "kind": "animation", "frames": 24, "axis": "y" },
                "output": { "directory": "frames", "prefix": "orbit", "format": "png" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.walk.steps, 100);
        assert_eq!(config.camera.blur, BlurModel::Linear { scaling: 0.02 });
        assert_eq!(config.camera.channel_count(), 3);
        assert_eq!(config.output.format, OutputFormat::Png);
        assert_eq!(config.output.gamma, 2.2);
        assert_eq!(config.seeds(), Seeds::from_master(7));
    }

    #[test]
    fn test_explicit_seeds_override_master() {
        let config = SceneConfig::from_json(
            r#"{ "seed": 7, "seeds": { "path": 1, "interpolation": 2, "jitter": 3 } }"#,
        )
        .unwrap();
        assert_eq!(config.seeds(), Seeds::new(1, 2, 3));
    }

    #[test]
    fn test_points_mode() {
        let config = SceneConfig::from_json(r#"{ "mode": "points" }"#).unwrap();
        assert_eq!(config.mode, RenderMode::Points);
    }

    #[test]
    fn test_rejects_bad_gamma() {
        assert!(SceneConfig::from_json(r#"{ "output": { "gamma": 0.0 } }"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(SceneConfig::from_json(r#"{ "walk": { "steps": -3 } }"#).is_err());
        assert!(SceneConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_bundled_scenes_parse() {
        let scenes = [
            include_str!("../../../scenes/chromatic.json"),
            include_str!("../../../scenes/orbit.json"),
            include_str!("../../../scenes/blur_grid.json"),
            include_str!("../../../scenes/points.json"),
        ];
        for text in scenes {
            let config = SceneConfig::from_json(text).unwrap();
            assert!(config.camera.validate().is_ok());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneConfig::load("/nonexistent/scene.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read scene file"));
    }
}
