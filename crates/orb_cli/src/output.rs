//! Image output: gamma mapping and PPM/PNG writers.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use orb_core::NormalizedImage;
use serde::{Deserialize, Serialize};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain-text portable pixmap (P3)
    #[default]
    Ppm,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Ppm => "ppm",
            OutputFormat::Png => "png",
        }
    }
}

/// Map a [0, 1] value to an 8-bit level with gamma correction.
#[inline]
pub fn screen_color(value: f64, gamma: f64) -> u8 {
    let corrected = value.clamp(0.0, 1.0).powf(1.0 / gamma);
    (255.0 * corrected).min(255.0) as u8
}

/// Convert to interleaved RGB bytes.
///
/// Single-channel images become grey; three-channel images map to RGB.
pub fn to_rgb8(image: &NormalizedImage, gamma: f64) -> Result<Vec<u8>> {
    let channels = image.channels();
    if channels != 1 && channels != 3 {
        bail!("Cannot write a {}-channel image as RGB", channels);
    }

    let mut bytes = Vec::with_capacity(image.values().len() / channels * 3);
    for pixel in image.values().chunks_exact(channels) {
        match pixel {
            [grey] => {
                let level = screen_color(*grey, gamma);
                bytes.extend_from_slice(&[level, level, level]);
            }
            rgb => bytes.extend(rgb.iter().map(|&c| screen_color(c, gamma))),
        }
    }
    Ok(bytes)
}

/// Write a plain-text P3 pixmap.
pub fn write_ppm<W: Write>(image: &NormalizedImage, gamma: f64, writer: &mut W) -> Result<()> {
    let bytes = to_rgb8(image, gamma)?;

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for rgb in bytes.chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}

/// Write `image` to `path`.
///
/// The file is written under a temporary name and renamed into place once
/// complete, so an interrupted run never leaves a truncated image behind.
pub fn write_image(image: &NormalizedImage, path: &Path, format: OutputFormat, gamma: f64) -> Result<()> {
    let temp = temp_path(path);

    match format {
        OutputFormat::Ppm => {
            let file = File::create(&temp)
                .with_context(|| format!("Failed to create {}", temp.display()))?;
            let mut writer = BufWriter::new(file);
            write_ppm(image, gamma, &mut writer)?;
            writer.flush()?;
        }
        OutputFormat::Png => {
            let bytes = to_rgb8(image, gamma)?;
            let buffer = image::RgbImage::from_raw(image.width(), image.height(), bytes)
                .ok_or_else(|| anyhow!("Pixel data does not match {}x{}", image.width(), image.height()))?;
            buffer
                .save_with_format(&temp, image::ImageFormat::Png)
                .with_context(|| format!("Failed to encode {}", temp.display()))?;
        }
    }

    fs::rename(&temp, path)
        .with_context(|| format!("Failed to move {} to {}", temp.display(), path.display()))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
