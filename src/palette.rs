//! Noise value to display color mapping.

/// Additive tint: `|value| * saturation` is truncated, clamped to
/// `[min, max]`, and added to each channel of `base`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub base: [u8; 3],
    pub saturation: f64,
    pub min: u8,
    pub max: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base: [0, 70, 100],
            saturation: 200.0,
            min: 0,
            max: 255,
        }
    }
}

impl Palette {
    pub fn new(base: [u8; 3], saturation: f64) -> Self {
        Self {
            base,
            saturation,
            ..Self::default()
        }
    }

    /// Brightness offset for one value, before it is added to the base.
    pub fn intensity(&self, value: f64) -> u8 {
        // Float to int casts saturate, and NaN maps to 0.
        let raw = (value.abs() * self.saturation) as i64;
        raw.clamp(self.min as i64, self.max as i64) as u8
    }

    /// Channels saturate at 255 instead of wrapping.
    pub fn color(&self, value: f64) -> [u8; 3] {
        let offset = self.intensity(value);
        let [r, g, b] = self.base;
        [
            r.saturating_add(offset),
            g.saturating_add(offset),
            b.saturating_add(offset),
        ]
    }

    pub fn colors(&self, values: &[f64]) -> Vec<[u8; 3]> {
        values.iter().map(|&v| self.color(v)).collect()
    }
}
