// Perlin noise implementation
// Based on Ken Perlin's improved noise reference: https://mrl.nyu.edu/~perlin/noise/

use glam::DVec3;
use noise::NoiseFn;

pub const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91,  90,  15,  131, 13,  201, 95,  96,  53,  194, 233, 7,   225,
    140, 36,  103, 30,  69,  142, 8,   99,  37,  240, 21,  10,  23,  190, 6,   148,
    247, 120, 234, 75,  0,   26,  197, 62,  94,  252, 219, 203, 117, 35,  11,  32,
    57,  177, 33,  88,  237, 149, 56,  87,  174, 20,  125, 136, 171, 168, 68,  175,
    74,  165, 71,  134, 139, 48,  27,  166, 77,  146, 158, 231, 83,  111, 229, 122,
    60,  211, 133, 230, 220, 105, 92,  41,  55,  46,  245, 40,  244, 102, 143, 54,
    65,  25,  63,  161, 1,   216, 80,  73,  209, 76,  132, 187, 208, 89,  18,  169,
    200, 196, 135, 130, 116, 188, 159, 86,  164, 100, 109, 198, 173, 186, 3,   64,
    52,  217, 226, 250, 124, 123, 5,   202, 38,  147, 118, 126, 255, 82,  85,  212,
    207, 206, 59,  227, 47,  16,  58,  17,  182, 189, 28,  42,  223, 183, 170, 213,
    119, 248, 152, 2,   44,  154, 163, 70,  221, 153, 101, 155, 167, 43,  172, 9,
    129, 22,  39,  253, 19,  98,  108, 110, 79,  113, 224, 232, 178, 185, 112, 104,
    218, 246, 97,  228, 251, 34,  242, 193, 238, 210, 144, 12,  191, 179, 162, 241,
    81,  51,  145, 235, 249, 14,  239, 107, 49,  192, 214, 31,  181, 199, 106, 157,
    184, 84,  204, 176, 115, 121, 50,  45,  127, 4,   150, 254, 138, 236, 205, 93,
    222, 114, 67,  29,  24,  72,  243, 141, 128, 195, 78,  66,  215, 61,  156, 180,
];

/// Gradient directions indexed by the low 4 bits of a corner hash.
///
/// Each entry is the (x, y, z) coefficient triple of one of the 12 cube edge
/// directions; entries 12..15 repeat (1,1,0), (0,-1,1), (-1,1,0), (0,-1,-1).
const GRADIENTS: [[f64; 3]; 16] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
    [1.0, 1.0, 0.0],
    [0.0, -1.0, 1.0],
    [-1.0, 1.0, 0.0],
    [0.0, -1.0, -1.0],
];

/// The 256-entry permutation doubled to 512 so `p[i + 1]` never needs wrapping.
#[derive(Clone)]
pub struct PermutationTable {
    p: [u8; 512],
}

impl PermutationTable {
    pub fn new(permutation: &[u8; 256]) -> Self {
        let mut p = [0u8; 512];
        p[..256].copy_from_slice(permutation);
        p[256..].copy_from_slice(permutation);
        Self { p }
    }

    #[inline]
    fn at(&self, index: usize) -> usize {
        self.p[index] as usize
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.p
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::new(&PERMUTATION)
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("len", &self.p.len())
            .field("head", &&self.p[..8])
            .finish()
    }
}

/// Classic 3D gradient noise over a fixed permutation table.
///
/// Evaluation only reads the table, so one generator can be shared by
/// reference between samplers and threads.
#[derive(Debug, Clone, Default)]
pub struct NoiseGenerator {
    table: PermutationTable,
}

impl NoiseGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a generator over an arbitrary permutation, mostly for tests.
    pub fn with_table(table: PermutationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    /// Noise value at (x, y, z), roughly in [-1, 1] and not clamped.
    ///
    /// Inputs must be finite; NaN or infinite coordinates give an
    /// unspecified (but non-panicking) result.
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();
        let z_floor = z.floor();

        // Unit cube containing the point. `as i64` saturates, and the mask
        // keeps negative cells wrapping the same way as positive ones.
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;
        let zi = (z_floor as i64 & 255) as usize;

        let x_frac = x - x_floor;
        let y_frac = y - y_floor;
        let z_frac = z - z_floor;

        let u = fade(x_frac);
        let v = fade(y_frac);
        let w = fade(z_frac);

        // Hash coordinates of the 8 cube corners
        let p = &self.table;
        let a = p.at(xi) + yi;
        let aa = p.at(a) + zi;
        let ab = p.at(a + 1) + zi;
        let b = p.at(xi + 1) + yi;
        let ba = p.at(b) + zi;
        let bb = p.at(b + 1) + zi;

        // Add blended results from all 8 corners of the cube
        lerp(w,
            lerp(v,
                lerp(u, grad(p.at(aa), x_frac, y_frac, z_frac),
                        grad(p.at(ba), x_frac - 1.0, y_frac, z_frac)),
                lerp(u, grad(p.at(ab), x_frac, y_frac - 1.0, z_frac),
                        grad(p.at(bb), x_frac - 1.0, y_frac - 1.0, z_frac))),
            lerp(v,
                lerp(u, grad(p.at(aa + 1), x_frac, y_frac, z_frac - 1.0),
                        grad(p.at(ba + 1), x_frac - 1.0, y_frac, z_frac - 1.0)),
                lerp(u, grad(p.at(ab + 1), x_frac, y_frac - 1.0, z_frac - 1.0),
                        grad(p.at(bb + 1), x_frac - 1.0, y_frac - 1.0, z_frac - 1.0))))
    }

    pub fn evaluate_point(&self, point: DVec3) -> f64 {
        self.evaluate(point.x, point.y, point.z)
    }
}

impl NoiseFn<f64, 3> for NoiseGenerator {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.evaluate(point[0], point[1], point[2])
    }
}

/// Quintic ease curve `6t^5 - 15t^4 + 10t^3`; flat first and second
/// derivatives at both ends.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of the hashed gradient direction with the corner offset.
#[inline]
pub fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let [gx, gy, gz] = GRADIENTS[hash & 15];
    gx * x + gy * y + gz * z
}
