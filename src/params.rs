//! Animation parameters with documented defaults.
//!
//! Defaults reproduce a 256x256 pixel view drawn with 4 pixel cells, sampled
//! at 1/50 noise units per pixel.

use anyhow::{ensure, Result};

use crate::field::{DepthMode, GridSpec, DEFAULT_STEP};
use crate::palette::Palette;
use crate::snapshot::image_extent;

/// Largest snapshot edge, in pixels.
pub const MAX_IMAGE_EDGE: u32 = 1 << 16;

/// Everything the front-end needs to build a sampler and draw it.
#[derive(Debug, Clone)]
pub struct Params {
    /// Grid columns (cells)
    pub width: usize,

    /// Grid rows (cells)
    pub height: usize,

    /// Cell edge length (pixels), used by the PNG snapshot
    pub cell_size: u32,

    /// Noise units per cell.
    /// 0.08 = 4 pixel cells at 1/50 per pixel
    pub frequency: f64,

    /// Depth increment per frame (noise units)
    pub step: f64,

    pub depth_mode: DepthMode,

    pub palette: Palette,

    /// Target frame rate for the interactive loop
    pub fps: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            cell_size: 4,
            frequency: 4.0 / 50.0,
            step: DEFAULT_STEP,
            depth_mode: DepthMode::Accumulate,
            palette: Palette::default(),
            fps: 30,
        }
    }
}

impl Params {
    pub fn grid(&self) -> GridSpec {
        GridSpec::new(self.width, self.height, self.cell_size, self.frequency)
    }

    /// Rejects values the noise kernel must never see (non-finite
    /// coordinates) and sizes the renderers cannot draw.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "grid must have at least one cell, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.cell_size > 0, "cell size must be positive");
        let fits = |cells: usize| image_extent(cells, self.cell_size).is_some_and(|px| px <= MAX_IMAGE_EDGE);
        ensure!(
            fits(self.width) && fits(self.height),
            "{}x{} cells of {} px exceed the {MAX_IMAGE_EDGE} px image limit",
            self.width,
            self.height,
            self.cell_size
        );
        ensure!(self.frequency.is_finite(), "frequency must be finite, got {}", self.frequency);
        ensure!(self.step.is_finite(), "depth step must be finite, got {}", self.step);
        ensure!(
            self.palette.saturation.is_finite() && self.palette.saturation >= 0.0,
            "saturation must be a non-negative number, got {}",
            self.palette.saturation
        );
        ensure!(self.fps > 0, "fps must be positive");
        Ok(())
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_nanos(1_000_000_000 / self.fps.max(1) as u64)
    }
}
