use crate::palette::Palette;

/// One frame of cell colors in sampler raster order.
///
/// Cell row 0 is the bottom of the picture, so screen row 0 reads the last
/// cell row.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub colors: Vec<[u8; 3]>,
}

impl Frame {
    pub fn from_values(width: usize, height: usize, values: &[f64], palette: &Palette) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            colors: palette.colors(values),
        }
    }

    /// Color at a screen position (row 0 at the top), if inside the frame.
    pub fn screen_pixel(&self, col: usize, row: usize) -> Option<[u8; 3]> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let cell_row = self.height - 1 - row;
        self.colors.get(cell_row * self.width + col).copied()
    }
}
