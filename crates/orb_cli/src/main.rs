//! `orb` - render random walks on the sphere to image files.
//!
//! Usage: `orb [scene.json]`, or `orb --print-config` to dump the default
//! scene as a starting point.

mod config;
mod output;
mod sweep;

use anyhow::Result;
use std::env;
use std::time::Instant;

use crate::config::SceneConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1).map(String::as_str) {
        Some("--print-config") => {
            println!("{}", serde_json::to_string_pretty(&SceneConfig::default())?);
            return Ok(());
        }
        Some("-h") | Some("--help") => {
            eprintln!("Usage: {} [scene.json | --print-config]", args[0]);
            return Ok(());
        }
        Some(path) => {
            log::info!("Loading scene from {}", path);
            SceneConfig::load(path)?
        }
        None => {
            log::info!("No scene given, using defaults");
            SceneConfig::default()
        }
    };

    log::info!(
        "Walk: {} steps of {} | camera {}x{} @ {} samples per segment",
        config.walk.steps,
        config.walk.step_size,
        config.camera.width,
        config.camera.height,
        config.camera.samples_per_segment
    );

    let start = Instant::now();
    let summary = sweep::run(&config)?;

    log::info!(
        "Wrote {} image(s) in {:?}",
        summary.written.len(),
        start.elapsed()
    );
    if !summary.failed.is_empty() {
        log::warn!("{} pass(es) failed: {}", summary.failed.len(), summary.failed.join(", "));
    }

    Ok(())
}
