//! Property-based invariant tests for the noise kernel and the field sampler.
//!
//! **Noise:**
//! 1. evaluate is deterministic, bit for bit.
//! 2. Output stays within [-1.2, 1.2].
//! 3. Period 256 along every axis.
//! 4. No jumps across integer cell boundaries.
//! 5. Lattice points evaluate to zero.
//! 6. NoiseFn::get agrees with evaluate.
//! 7. evaluate equals a branchy port of the reference kernel exactly.
//!
//! **Sampler:**
//! 8. advance returns width * height values.
//! 9. Frame n equals sample(z) at the depth reached after n advances.
//! 10. Sampler values equal direct evaluation at the cell coordinates.

use noise::NoiseFn;
use noisetty::perlin::PERMUTATION;
use noisetty::{FieldSampler, GridSpec, NoiseGenerator};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn coord() -> impl Strategy<Value = f64> {
    -1000.0f64..1000.0
}

fn point() -> impl Strategy<Value = (f64, f64, f64)> {
    (coord(), coord(), coord())
}

fn small_grid() -> impl Strategy<Value = GridSpec> {
    (1usize..12, 1usize..12, 0.001f64..2.0).prop_map(|(w, h, f)| GridSpec::new(w, h, 4, f))
}

// ── Reference kernel ──────────────────────────────────────────────────────

// Direct bit-test gradient selection, kept independent of the crate's table.
fn reference_grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

fn reference_noise(x: f64, y: f64, z: f64) -> f64 {
    let p: Vec<usize> = PERMUTATION.iter().chain(PERMUTATION.iter()).map(|&v| v as usize).collect();
    let fade = |t: f64| t * t * t * (t * (t * 6.0 - 15.0) + 10.0);
    let lerp = |t: f64, a: f64, b: f64| a + t * (b - a);

    let xi = (x.floor() as i64 & 255) as usize;
    let yi = (y.floor() as i64 & 255) as usize;
    let zi = (z.floor() as i64 & 255) as usize;
    let (x, y, z) = (x - x.floor(), y - y.floor(), z - z.floor());
    let (u, v, w) = (fade(x), fade(y), fade(z));

    let a = p[xi] + yi;
    let aa = p[a] + zi;
    let ab = p[a + 1] + zi;
    let b = p[xi + 1] + yi;
    let ba = p[b] + zi;
    let bb = p[b + 1] + zi;

    lerp(
        w,
        lerp(
            v,
            lerp(u, reference_grad(p[aa], x, y, z), reference_grad(p[ba], x - 1.0, y, z)),
            lerp(u, reference_grad(p[ab], x, y - 1.0, z), reference_grad(p[bb], x - 1.0, y - 1.0, z)),
        ),
        lerp(
            v,
            lerp(u, reference_grad(p[aa + 1], x, y, z - 1.0), reference_grad(p[ba + 1], x - 1.0, y, z - 1.0)),
            lerp(
                u,
                reference_grad(p[ab + 1], x, y - 1.0, z - 1.0),
                reference_grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
            ),
        ),
    )
}

// ── Noise ─────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn evaluate_is_deterministic((x, y, z) in point()) {
        let noise = NoiseGenerator::new();
        let a = noise.evaluate(x, y, z);
        let b = NoiseGenerator::new().evaluate(x, y, z);
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn evaluate_is_bounded((x, y, z) in point()) {
        let v = NoiseGenerator::new().evaluate(x, y, z);
        prop_assert!(v.is_finite());
        prop_assert!((-1.2..=1.2).contains(&v), "noise({x}, {y}, {z}) = {v}");
    }

    #[test]
    fn period_is_256((x, y, z) in point()) {
        let noise = NoiseGenerator::new();
        let v = noise.evaluate(x, y, z);
        // Shifting by 256 perturbs the fractional part by rounding only.
        prop_assert!((v - noise.evaluate(x + 256.0, y, z)).abs() < 1e-9);
        prop_assert!((v - noise.evaluate(x, y + 256.0, z)).abs() < 1e-9);
        prop_assert!((v - noise.evaluate(x, y, z - 256.0)).abs() < 1e-9);
    }

    #[test]
    fn lattice_points_are_zero(x in -300i32..300, y in -300i32..300, z in -300i32..300) {
        let v = NoiseGenerator::new().evaluate(x as f64, y as f64, z as f64);
        prop_assert_eq!(v, 0.0);
    }

    #[test]
    fn noise_fn_agrees((x, y, z) in point()) {
        let noise = NoiseGenerator::new();
        prop_assert_eq!(noise.get([x, y, z]).to_bits(), noise.evaluate(x, y, z).to_bits());
    }

    // `==` rather than to_bits: the two kernels may disagree on the sign of
    // an exact zero, nothing else.
    #[test]
    fn evaluate_matches_reference_dispatch((x, y, z) in point()) {
        let got = NoiseGenerator::new().evaluate(x, y, z);
        let expected = reference_noise(x, y, z);
        prop_assert!(got == expected, "noise({x}, {y}, {z}) = {got}, reference {expected}");
    }

    #[test]
    fn evaluate_matches_reference_near_lattice(
        cell in (-40i32..40, -40i32..40, -40i32..40),
        offset in (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0),
    ) {
        let x = cell.0 as f64 + offset.0;
        let y = cell.1 as f64 + offset.1;
        let z = cell.2 as f64 + offset.2;
        let got = NoiseGenerator::new().evaluate(x, y, z);
        prop_assert!(got == reference_noise(x, y, z));
    }

    #[test]
    fn continuous_across_cell_boundary(n in -50i32..50, y in -20.0f64..20.0, z in -20.0f64..20.0) {
        let noise = NoiseGenerator::new();
        let max_step_diff = |h: f64| {
            let start = n as f64 - 0.01;
            let steps = (0.02 / h) as usize;
            (0..steps)
                .map(|i| {
                    let x = start + i as f64 * h;
                    (noise.evaluate(x + h, y, z) - noise.evaluate(x, y, z)).abs()
                })
                .fold(0.0f64, f64::max)
        };
        let coarse = max_step_diff(1e-3);
        let fine = max_step_diff(1e-4);
        prop_assert!(coarse < 20.0 * 1e-3, "coarse diff {coarse}");
        prop_assert!(fine < 20.0 * 1e-4, "fine diff {fine}");
        prop_assert!(fine <= coarse);
    }
}

// ── Sampler ───────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn advance_covers_every_cell(grid in small_grid(), frames in 1usize..5) {
        let mut sampler = FieldSampler::new(grid, NoiseGenerator::new(), 0.02);
        for _ in 0..frames {
            prop_assert_eq!(sampler.advance().len(), grid.width * grid.height);
        }
    }

    #[test]
    fn advance_matches_sample_at_depth(grid in small_grid(), frames in 1usize..10, step in 0.001f64..1.0) {
        let mut sampler = FieldSampler::new(grid, NoiseGenerator::new(), step);
        let mut last = Vec::new();
        for _ in 0..frames {
            last = sampler.advance();
        }
        prop_assert_eq!(last, sampler.sample(sampler.depth()));
    }

    #[test]
    fn sampler_matches_direct_evaluation(grid in small_grid()) {
        let noise = NoiseGenerator::new();
        let mut sampler = FieldSampler::new(grid, &noise, 0.02);
        let values = sampler.advance();
        let z = sampler.depth();
        let mut i = 0;
        for cy in 0..grid.height {
            for cx in 0..grid.width {
                let expected = noise.evaluate(cx as f64 * grid.frequency, cy as f64 * grid.frequency, z);
                prop_assert_eq!(values[i].to_bits(), expected.to_bits());
                i += 1;
            }
        }
    }
}
