//! Sweeps: rendering the same walk under several cameras.
//!
//! The path is generated once and shared by every pass. A pass that fails
//! is logged and skipped; the others still write their images.

use std::f64::consts::TAU;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use orb_core::{
    generate_path, sample_sphere, AccumulationBuffer, BlurModel, CameraParameters, Path, RenderResult,
    Seeds,
};
use orb_math::{Axis, PlaneRotation};
use orb_renderer::{render, render_points};
use serde::{Deserialize, Serialize};

use crate::config::{RenderMode, SceneConfig};
use crate::output::write_image;

/// How many images to render and how their cameras differ.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SweepConfig {
    /// One image with the configured camera
    #[default]
    Single,
    /// A full turn around `axis`, split into `frames` images
    Animation {
        frames: u32,
        #[serde(default)]
        axis: Axis,
    },
    /// Every combination of power-law blur scaling and exponent
    BlurGrid {
        scalings: Vec<f64>,
        exponents: Vec<i32>,
    },
}

/// One camera to render, with the name its image is saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub name: String,
    /// Human-readable parameter values, for logging
    pub detail: String,
    pub camera: CameraParameters,
}

/// Outcome of a sweep.
#[derive(Debug, Default)]
pub struct SweepSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<String>,
}

/// Expand the sweep into individual passes.
///
/// Pass names are unique within a sweep. Animation frames replace any
/// rotation on the base camera, so frame `i` is turned by exactly
/// `2π·i/frames` about the sweep axis. Blur grid passes are named by grid
/// position rather than by value.
pub fn plan_passes(config: &SceneConfig) -> Vec<Pass> {
    let prefix = &config.output.prefix;
    let base = &config.camera;

    match &config.sweep {
        SweepConfig::Single => vec![Pass {
            name: prefix.clone(),
            detail: "configured camera".to_string(),
            camera: base.clone(),
        }],
        SweepConfig::Animation { frames, axis } => (0..*frames)
            .map(|frame| {
                let angle = TAU * frame as f64 / *frames as f64;
                Pass {
                    name: format!("{}_{:04}", prefix, frame),
                    detail: format!("rotation {:.4} rad about {:?}", angle, axis),
                    camera: base.clone().with_rotation(PlaneRotation::new(*axis, angle)),
                }
            })
            .collect(),
        SweepConfig::BlurGrid { scalings, exponents } => scalings
            .iter()
            .enumerate()
            .flat_map(|(i, &scaling)| {
                exponents.iter().enumerate().map(move |(j, &exponent)| Pass {
                    name: format!("{}_{:02}_{:02}", prefix, i, j),
                    detail: format!("blur scaling {}, exponent {}", scaling, exponent),
                    camera: base.clone().with_blur(BlurModel::Power { scaling, exponent }),
                })
            })
            .collect(),
    }
}

/// Render every pass and write the images.
///
/// Fails only if the walk cannot be generated, the output directory cannot
/// be created, or no pass succeeds.
pub fn run(config: &SceneConfig) -> Result<SweepSummary> {
    let passes = plan_passes(config);
    if passes.is_empty() {
        bail!("Sweep produced no passes");
    }

    let seeds = config.seeds();
    let start = Instant::now();
    let path = match config.mode {
        RenderMode::Walk => generate_path(config.walk.steps, config.walk.step_size, seeds.path),
        RenderMode::Points => sample_sphere(config.walk.steps, seeds.path),
    }
    .context("Failed to generate path")?;
    log::info!("Generated {} points in {:?}", path.len(), start.elapsed());

    fs::create_dir_all(&config.output.directory).with_context(|| {
        format!("Failed to create output directory {}", config.output.directory.display())
    })?;

    let mut summary = SweepSummary::default();
    for (index, pass) in passes.iter().enumerate() {
        log::info!(
            "Pass {}/{}: {} ({})",
            index + 1,
            passes.len(),
            pass.name,
            pass.detail
        );
        match run_pass(config, &path, &seeds, pass) {
            Ok(file) => summary.written.push(file),
            Err(err) => {
                log::warn!("Skipping {}: {:#}", pass.name, err);
                summary.failed.push(pass.name.clone());
            }
        }
    }

    if summary.written.is_empty() {
        bail!("All {} passes failed", passes.len());
    }
    Ok(summary)
}

fn run_pass(config: &SceneConfig, path: &Path, seeds: &Seeds, pass: &Pass) -> Result<PathBuf> {
    let start = Instant::now();
    let image = accumulate(config.mode, path, &pass.camera, seeds)?
        .normalize(pass.camera.normalization)?;
    log::info!("Rendered {} in {:?}", pass.name, start.elapsed());

    let file = config
        .output
        .directory
        .join(format!("{}.{}", pass.name, config.output.format.extension()));
    write_image(&image, &file, config.output.format, config.output.gamma)?;
    Ok(file)
}

fn accumulate(
    mode: RenderMode,
    path: &Path,
    camera: &CameraParameters,
    seeds: &Seeds,
) -> RenderResult<AccumulationBuffer> {
    match mode {
        RenderMode::Walk => render(path, camera, seeds),
        RenderMode::Points => render_points(path, camera, seeds),
    }
}
