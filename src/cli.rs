//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::field::DepthMode;
use crate::palette::Palette;
use crate::params::Params;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "noisetty")]
#[command(about = "Animated 3D Perlin noise in the terminal", long_about = None)]
pub struct Args {
    /// Grid columns [default: terminal width when animating, else 64]
    #[arg(long, value_name = "CELLS")]
    pub width: Option<usize>,

    /// Grid rows [default: twice the terminal height when animating, else 64]
    #[arg(long, value_name = "CELLS")]
    pub height: Option<usize>,

    /// Size the grid to the terminal even when taking a snapshot
    #[arg(long)]
    pub fit: bool,

    /// Cell edge length in pixels for PNG snapshots
    #[arg(long, value_name = "PIXELS", default_value = "4")]
    pub cell_size: u32,

    /// Noise units per cell
    #[arg(long, value_name = "F", default_value = "0.08")]
    pub frequency: f64,

    /// Depth increment per frame
    #[arg(long, value_name = "DZ", default_value = "0.02")]
    pub step: f64,

    /// Compute depth as frames * step instead of accumulating
    #[arg(long)]
    pub drift_free: bool,

    /// Brightness gain applied to |noise|
    #[arg(long, value_name = "S", default_value = "200")]
    pub saturation: f64,

    /// Base color the brightness is added to
    #[arg(long, value_name = "R,G,B", default_value = "0,70,100", value_parser = parse_rgb)]
    pub base: [u8; 3],

    /// Target frames per second
    #[arg(long, value_name = "N", default_value = "30")]
    pub fps: u32,

    /// Write a PNG of the last sampled frame instead of animating
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Frames to advance before taking the snapshot
    #[arg(long, value_name = "N", default_value = "1", requires = "snapshot")]
    pub frames: u32,
}

impl Args {
    pub fn interactive(&self) -> bool {
        self.snapshot.is_none()
    }

    /// Build parameters; `terminal` is the (columns, rows) size.
    ///
    /// Explicit `--width`/`--height` always win. Otherwise the grid fills the
    /// terminal when animating (or with `--fit`), and falls back to the
    /// defaults when there is no terminal.
    pub fn to_params(&self, terminal: Option<(u16, u16)>) -> Params {
        let defaults = Params::default();
        let fitted = match terminal {
            Some((cols, rows)) if self.fit || self.interactive() => {
                Some((cols as usize, rows as usize * 2))
            }
            _ => None,
        };
        let width = self
            .width
            .or(fitted.map(|(w, _)| w))
            .unwrap_or(defaults.width);
        let height = self
            .height
            .or(fitted.map(|(_, h)| h))
            .unwrap_or(defaults.height);
        let depth_mode = if self.drift_free {
            DepthMode::FrameCount
        } else {
            DepthMode::Accumulate
        };
        Params {
            width,
            height,
            cell_size: self.cell_size,
            frequency: self.frequency,
            step: self.step,
            depth_mode,
            palette: Palette::new(self.base, self.saturation),
            fps: self.fps,
        }
    }
}

fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B, got '{s}'"));
    }
    let mut rgb = [0u8; 3];
    for (channel, part) in rgb.iter_mut().zip(&parts) {
        *channel = part
            .parse()
            .map_err(|e| format!("invalid channel '{part}': {e}"))?;
    }
    Ok(rgb)
}
