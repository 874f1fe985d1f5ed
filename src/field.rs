//! Grid sampling of the noise field across an advancing depth coordinate.
//!
//! A [`FieldSampler`] walks a fixed grid in raster order (row by row
//! with columns left to right inside each row) and evaluates its noise source at
//! every cell for the current depth. Each frame pushes the depth forward by
//! one step before sampling.

use glam::DVec2;
use noise::NoiseFn;

use crate::perlin::NoiseGenerator;

/// Depth increment applied on every frame.
pub const DEFAULT_STEP: f64 = 0.02;

/// Grid dimensions and spatial scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Pixel size of one cell; only the renderers read it.
    pub cell_size: u32,
    /// Scale from cell index to noise space.
    pub frequency: f64,
}

impl GridSpec {
    pub fn new(width: usize, height: usize, cell_size: u32, frequency: f64) -> Self {
        Self {
            width,
            height,
            cell_size,
            frequency,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Noise-space coordinates for every cell, `y` outer and `x` inner.
    pub fn coords(&self) -> Vec<DVec2> {
        let mut coords = Vec::with_capacity(self.cell_count());
        for y in 0..self.height {
            for x in 0..self.width {
                coords.push(DVec2::new(
                    x as f64 * self.frequency,
                    y as f64 * self.frequency,
                ));
            }
        }
        coords
    }
}

/// How the depth coordinate moves from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthMode {
    /// `z += step` each frame. Accumulates floating-point drift over long runs.
    #[default]
    Accumulate,
    /// `z = frames * step`. Drift-free, but not bit-identical to accumulation.
    FrameCount,
}

/// Samples a 3D noise source over a 2D grid, one depth slice per frame.
///
/// The source defaults to [`NoiseGenerator`]; pass `&NoiseGenerator` to share
/// one generator between several samplers, or any other
/// [`NoiseFn<f64, 3>`] such as a test stub.
pub struct FieldSampler<N = NoiseGenerator> {
    grid: GridSpec,
    noise: N,
    coords: Vec<DVec2>,
    z: f64,
    step: f64,
    frames: u64,
    mode: DepthMode,
}

impl<N: NoiseFn<f64, 3>> FieldSampler<N> {
    pub fn new(grid: GridSpec, noise: N, step: f64) -> Self {
        let coords = grid.coords();
        log::debug!(
            "field sampler: {}x{} cells, frequency {}, step {}",
            grid.width,
            grid.height,
            grid.frequency,
            step
        );
        Self {
            grid,
            noise,
            coords,
            z: 0.0,
            step,
            frames: 0,
            mode: DepthMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: DepthMode) -> Self {
        self.mode = mode;
        self
    }

    /// Moves to the next frame and samples every cell at the new depth.
    ///
    /// The depth is advanced first, so the first frame is sampled at
    /// `z = step`, not at zero.
    pub fn advance(&mut self) -> Vec<f64> {
        self.frames += 1;
        self.z = match self.mode {
            DepthMode::Accumulate => self.z + self.step,
            DepthMode::FrameCount => self.frames as f64 * self.step,
        };
        self.sample(self.z)
    }

    /// Samples every cell at an explicit depth without touching sampler state.
    pub fn sample(&self, z: f64) -> Vec<f64> {
        self.coords
            .iter()
            .map(|c| self.noise.get([c.x, c.y, z]))
            .collect()
    }

    pub fn depth(&self) -> f64 {
        self.z
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn mode(&self) -> DepthMode {
        self.mode
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn coords(&self) -> &[DVec2] {
        &self.coords
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }
}
