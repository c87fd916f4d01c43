// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequential color schemes.

use peniko::Color;

/// The nine-step ColorBrewer Blues scheme, light to dark.
const BLUES: [[u8; 3]; 9] = [
    [0xf7, 0xfb, 0xff],
    [0xde, 0xeb, 0xf7],
    [0xc6, 0xdb, 0xef],
    [0x9e, 0xca, 0xe1],
    [0x6b, 0xae, 0xd6],
    [0x42, 0x92, 0xc6],
    [0x21, 0x71, 0xb5],
    [0x08, 0x51, 0x9c],
    [0x08, 0x30, 0x6b],
];

/// Uniform cubic B-spline through `values` at `t` in `[0, 1]`.
fn basis(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (i, t) = if t <= 0.0 {
        (0, 0.0)
    } else if t >= 1.0 {
        (n - 1, 1.0)
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "t is in (0, 1), so t * n is below n"
        )]
        let i = (t * n as f64).floor() as usize;
        (i, t)
    };
    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i + 2 <= n { values[i + 2] } else { 2.0 * v2 - v1 };

    let t1 = (t - i as f64 / n as f64) * n as f64;
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

/// Interpolates `scheme` per RGB channel with a B-spline, like d3's `interpolateRgbBasis`.
pub fn interpolate_rgb_basis(scheme: &[[u8; 3]], t: f64) -> Color {
    match scheme {
        [] => Color::TRANSPARENT,
        [only] => Color::from_rgb8(only[0], only[1], only[2]),
        _ => {
            let mut rgb = [0_u8; 3];
            for (c, out) in rgb.iter_mut().enumerate() {
                let channel: Vec<f64> = scheme.iter().map(|s| f64::from(s[c])).collect();
                let v = basis(&channel, if t.is_nan() { 0.0 } else { t });
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "clamped to the u8 range before the cast"
                )]
                {
                    *out = v.round().clamp(0.0, 255.0) as u8;
                }
            }
            Color::from_rgb8(rgb[0], rgb[1], rgb[2])
        }
    }
}

/// The Blues scheme at `t` in `[0, 1]` (0 is near white).
pub fn interpolate_blues(t: f64) -> Color {
    interpolate_rgb_basis(&BLUES, t)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn rgb(c: Color) -> [u8; 3] {
        let c = c.to_rgba8();
        [c.r, c.g, c.b]
    }

    #[test]
    fn blues_hits_the_scheme_ends() {
        assert_eq!(rgb(interpolate_blues(0.0)), [0xf7, 0xfb, 0xff], "lightest");
        assert_eq!(rgb(interpolate_blues(1.0)), [0x08, 0x30, 0x6b], "darkest");
        assert_eq!(rgb(interpolate_blues(-3.0)), [0xf7, 0xfb, 0xff], "clamped below");
    }

    #[test]
    fn blues_darkens_monotonically() {
        let mut prev = 255 * 3;
        for i in 0..=10 {
            let [r, g, b] = rgb(interpolate_blues(f64::from(i) / 10.0));
            let sum = u32::from(r) + u32::from(g) + u32::from(b);
            assert!(sum <= prev, "step {i} is not lighter than the previous one");
            prev = sum;
        }
    }
}
