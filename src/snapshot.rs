//! PNG export of a single frame, one filled square per cell.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::{Rgb, RgbImage};

use crate::frame::Frame;

/// Pixel size of a `cells` x `cell_size` edge, if it fits in a `u32`.
pub fn image_extent(cells: usize, cell_size: u32) -> Option<u32> {
    u32::try_from(cells).ok()?.checked_mul(cell_size)
}

pub fn render_image(frame: &Frame, cell_size: u32) -> Result<RgbImage> {
    let width = image_extent(frame.width, cell_size)
        .ok_or_else(|| anyhow!("snapshot width overflows: {} cells of {cell_size} px", frame.width))?;
    let height = image_extent(frame.height, cell_size)
        .ok_or_else(|| anyhow!("snapshot height overflows: {} cells of {cell_size} px", frame.height))?;
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let col = (x / cell_size) as usize;
        let row = (y / cell_size) as usize;
        Rgb(frame.screen_pixel(col, row).unwrap_or([0, 0, 0]))
    }))
}

pub fn save_png(frame: &Frame, cell_size: u32, path: &Path) -> Result<()> {
    let image = render_image(frame, cell_size)?;
    image
        .save(path)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    log::info!(
        "wrote {}x{} snapshot to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
