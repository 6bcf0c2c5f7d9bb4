//! Accumulation histogram and normalized image.
//!
//! A buffer starts zero-filled, only ever grows while samples are deposited,
//! and is consumed by [`AccumulationBuffer::normalize`]. The resulting
//! [`NormalizedImage`] is read-only.
//!
//! Both store values row-major with row 0 at the top and rows increasing
//! downward. Channels are interleaved per pixel.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// How channel maxima are combined when normalizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// Each channel divided by its own maximum
    #[default]
    PerChannel,
    /// All channels divided by the largest value in any channel
    Global,
}

/// Per-pixel, per-channel hit histogram.
///
/// Cells are `f64`. Unit deposits stay exact integers (up to 2^53), so the
/// order in which hits arrive cannot change the result.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    channels: usize,
    cells: Vec<f64>,
}

impl AccumulationBuffer {
    /// Create a zero-filled buffer.
    ///
    /// A buffer always has at least one channel; `channels == 0` is
    /// treated as 1.
    pub fn new(width: u32, height: u32, channels: usize) -> Self {
        let channels = channels.max(1);
        Self {
            width,
            height,
            channels,
            cells: vec![0.0; width as usize * height as usize * channels],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn index(&self, x: u32, y: u32, channel: usize) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels + channel
    }

    /// Count one hit at (x, y) in `channel`.
    #[inline]
    pub fn deposit(&mut self, x: u32, y: u32, channel: usize) {
        let index = self.index(x, y, channel);
        self.cells[index] += 1.0;
    }

    /// Add a non-negative weight at (x, y) in `channel`.
    #[inline]
    pub fn deposit_weighted(&mut self, x: u32, y: u32, channel: usize, weight: f64) {
        debug_assert!(weight >= 0.0, "negative weight {}", weight);
        let index = self.index(x, y, channel);
        self.cells[index] += weight;
    }

    /// Get the accumulated value at (x, y) in `channel`.
    pub fn get(&self, x: u32, y: u32, channel: usize) -> f64 {
        self.cells[self.index(x, y, channel)]
    }

    /// Add another buffer of the same shape into this one.
    pub fn merge(&mut self, other: &AccumulationBuffer) -> RenderResult<()> {
        if self.shape() != other.shape() {
            return Err(RenderError::BufferMismatch {
                expected: self.shape(),
                found: other.shape(),
            });
        }
        for (cell, value) in self.cells.iter_mut().zip(&other.cells) {
            *cell += value;
        }
        Ok(())
    }

    /// Largest value in `channel`.
    pub fn channel_max(&self, channel: usize) -> f64 {
        channel_values(&self.cells, self.channels, channel).fold(0.0, f64::max)
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    fn shape(&self) -> (u32, u32, usize) {
        (self.width, self.height, self.channels)
    }

    /// Scale every cell into [0, 1].
    ///
    /// Fails if a maximum used as a divisor is zero: under `PerChannel`
    /// that is any empty channel, under `Global` an entirely empty buffer.
    pub fn normalize(self, policy: NormalizationPolicy) -> RenderResult<NormalizedImage> {
        let maxima: Vec<f64> = match policy {
            NormalizationPolicy::PerChannel => {
                (0..self.channels).map(|c| self.channel_max(c)).collect()
            }
            NormalizationPolicy::Global => {
                let max = self.cells.iter().copied().fold(0.0, f64::max);
                vec![max; self.channels]
            }
        };

        if let Some(channel) = maxima.iter().position(|&max| max <= 0.0) {
            return Err(RenderError::EmptyAccumulation { channel });
        }

        let AccumulationBuffer {
            width,
            height,
            channels,
            mut cells,
        } = self;

        // Divide rather than multiply by the reciprocal so the maximum maps
        // to exactly 1.0
        for pixel in cells.chunks_exact_mut(channels) {
            for (value, max) in pixel.iter_mut().zip(&maxima) {
                *value /= max;
            }
        }

        Ok(NormalizedImage {
            width,
            height,
            channels,
            values: cells,
        })
    }
}

/// Image with every value in [0, 1], ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    width: u32,
    height: u32,
    channels: usize,
    values: Vec<f64>,
}

impl NormalizedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Get the value at (x, y) in `channel`.
    pub fn get(&self, x: u32, y: u32, channel: usize) -> f64 {
        self.pixel(x, y)[channel]
    }

    /// All channel values of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> &[f64] {
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        &self.values[start..start + self.channels]
    }

    /// Row-major values, channels interleaved.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest value in `channel`.
    pub fn channel_max(&self, channel: usize) -> f64 {
        channel_values(&self.values, self.channels, channel).fold(0.0, f64::max)
    }

    /// Smallest value in any channel.
    pub fn min_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Reuse the image as a fresh accumulation.
    pub fn into_accumulation(self) -> AccumulationBuffer {
        AccumulationBuffer {
            width: self.width,
            height: self.height,
            channels: self.channels,
            cells: self.values,
        }
    }
}

fn channel_values(cells: &[f64], channels: usize, channel: usize) -> impl Iterator<Item = f64> + '_ {
    cells.iter().skip(channel).step_by(channels).copied()
}
