//! Animated 3D Perlin noise.
//!
//! [`perlin::NoiseGenerator`] evaluates classic gradient noise over the
//! reference permutation table. [`field::FieldSampler`] samples it over a 2D
//! grid while a depth coordinate advances once per frame. The remaining
//! modules turn sampled values into colors and draw them in a terminal or a
//! PNG file.

pub mod cli;
pub mod field;
pub mod frame;
pub mod palette;
pub mod params;
pub mod perlin;
pub mod snapshot;
pub mod terminal;

pub use field::{DepthMode, FieldSampler, GridSpec};
pub use perlin::{NoiseGenerator, PermutationTable};
