// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick generation and "nice" domain rounding.
//!
//! Ticks are multiples of 1, 2 or 5 times a power of ten, chosen so that roughly `count` ticks
//! cover the domain. These match d3's `ticks`/`tickIncrement`/`nice`, so histogram thresholds and
//! axis ticks line up exactly.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = core::f64::consts::SQRT_2;

/// Hard cap on generated ticks.
const MAX_TICKS: f64 = 10_000.0;

/// `(i1, i2, inc)`: ticks are `i * inc` for `i` in `i1..=i2` when `inc > 0`, and `i / -inc`
/// when `inc < 0`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    if !(step.is_finite() && step > 0.0) {
        return (1.0, 0.0, 0.0);
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10_f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        inc = 10_f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Returns approximately `count` round tick values covering `[start, stop]`.
///
/// Ticks are returned in the direction of the domain (descending if `stop < start`).
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if i1.is_nan() || i2.is_nan() || i2 < i1 || inc == 0.0 {
        return Vec::new();
    }
    let n = (i2 - i1 + 1.0).min(MAX_TICKS);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "n is a positive integer capped at MAX_TICKS"
    )]
    let n = n as usize;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    (0..n)
        .map(|k| {
            let k = k as f64;
            if reverse { value(i2 - k) } else { value(i1 + k) }
        })
        .collect()
}

/// The signed tick increment for `[start, stop]`.
///
/// Positive values are the step itself; negative values `-k` mean a step of `1 / k`. Returns `0`
/// for degenerate input.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// The (unsigned, direction-aware) distance between adjacent ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Extends `[start, stop]` outwards to round tick bounds.
///
/// Iterates until the tick increment stabilizes, as d3's `linear.nice` does. Degenerate domains
/// are returned unchanged.
pub fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut prestep = f64::NAN;
    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if step == prestep {
            break;
        } else if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        prestep = step;
    }
    if reverse { (hi, lo) } else { (lo, hi) }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn unit_interval_ticks_by_tenths() {
        let t = ticks(0.0, 1.0, 10);
        assert_eq!(t.len(), 11, "0.0..=1.0 by 0.1: {t:?}");
        assert_eq!(t[3], 0.3, "tenths are computed as i / 10, not i * 0.1");
    }

    #[test]
    fn ticks_use_1_2_5_steps() {
        assert_eq!(ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0], "step 20");
        assert_eq!(ticks(-1.0, 1.0, 4), vec![-1.0, -0.5, 0.0, 0.5, 1.0], "step 0.5");
        assert_eq!(ticks(3.0, 3.0, 10), vec![3.0], "degenerate domain");
        assert!(ticks(0.0, 1.0, 0).is_empty(), "no ticks requested");
    }

    #[test]
    fn reversed_domains_tick_downwards() {
        assert_eq!(ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0], "descending ticks");
        assert_eq!(tick_step(10.0, 0.0, 2), -5.0, "negative step");
    }

    #[test]
    fn nice_rounds_outwards() {
        assert_eq!(nice(0.13, 0.87, 10), (0.1, 0.9), "tenths");
        assert_eq!(nice(-1.0, 1.0, 10), (-1.0, 1.0), "already nice");
        assert_eq!(nice(3.0, 97.0, 10), (0.0, 100.0), "to tens");
        assert_eq!(nice(97.0, 3.0, 10), (100.0, 0.0), "reversed");
        assert_eq!(nice(2.0, 2.0, 10), (2.0, 2.0), "degenerate stays");
    }
}
