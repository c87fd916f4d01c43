// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Summaries over numeric sequences.

use crate::error::EmptyInputError;

/// Returns `(min, max)` over the finite values, or `None` if there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    (min <= max).then_some((min, max))
}

/// Returns the global `(min, max)` across several sub-sequences.
///
/// Used when multiple series (e.g. one per mixture) share an axis.
pub fn nested_extent<I>(groups: I) -> Option<(f64, f64)>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = f64>,
{
    groups
        .into_iter()
        .filter_map(extent)
        .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Result<f64, EmptyInputError> {
    if values.is_empty() {
        return Err(EmptyInputError::new("mean"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (normalized by `n - 1`).
///
/// A single value has a standard deviation of `0`.
pub fn stddev(values: &[f64]) -> Result<f64, EmptyInputError> {
    let m = mean(values).map_err(|_| EmptyInputError::new("stddev"))?;
    if values.len() == 1 {
        return Ok(0.0);
    }
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Ok((ss / (values.len() - 1) as f64).sqrt())
}

/// Quantile of an ascending sequence by linear interpolation between order statistics
/// (the R-7 method): `q1 = 0.25`, `median = 0.5`, `q3 = 0.75`.
///
/// `p` is clamped to `[0, 1]`; a `NaN` probability is treated as `0`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Result<f64, EmptyInputError> {
    let n = sorted.len();
    if n == 0 {
        return Err(EmptyInputError::new("quantile"));
    }
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    if n == 1 || p == 0.0 {
        return Ok(sorted[0]);
    }
    if p == 1.0 {
        return Ok(sorted[n - 1]);
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "h lies in [0, n - 1], so its floor is a valid index"
    )]
    let i = lo as usize;
    let a = sorted[i];
    let b = sorted[(i + 1).min(n - 1)];
    Ok(a + (b - a) * (h - lo))
}

/// Quantile of an unsorted sequence; non-finite values are ignored.
pub fn quantile(values: &[f64], p: f64) -> Result<f64, EmptyInputError> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, p)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn median_matches_sorted_middle() {
        let odd = [5.0, 1.0, 3.0, 9.0, 7.0];
        assert_eq!(quantile(&odd, 0.5), Ok(5.0), "odd-length median");
        let even = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(quantile(&even, 0.5), Ok(2.5), "even-length median averages");
    }

    #[test]
    fn quartiles_are_ordered() {
        let values = [3.2, -1.0, 8.5, 0.0, 4.4, 4.4, 12.0, -7.5, 2.0];
        let q1 = quantile(&values, 0.25).unwrap();
        let q2 = quantile(&values, 0.5).unwrap();
        let q3 = quantile(&values, 0.75).unwrap();
        assert!(q1 <= q2 && q2 <= q3, "q1={q1} median={q2} q3={q3}");
    }

    #[test]
    fn r7_interpolates_between_order_statistics() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.25), Ok(1.75), "q1 of 1..4");
        assert_eq!(quantile_sorted(&sorted, 0.75), Ok(3.25), "q3 of 1..4");
        assert_eq!(quantile_sorted(&sorted, 2.0), Ok(4.0), "p is clamped");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(mean(&[]).is_err(), "mean of nothing");
        assert!(stddev(&[]).is_err(), "stddev of nothing");
        assert!(quantile(&[f64::NAN], 0.5).is_err(), "no finite values");
    }

    #[test]
    fn stddev_uses_sample_normalization() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let s = stddev(&values).unwrap();
        assert!((s - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12, "stddev was {s}");
        assert_eq!(stddev(&[3.0]), Ok(0.0), "single value");
    }

    #[test]
    fn nested_extent_spans_all_groups() {
        let a = [1.0, 5.0];
        let b = [-2.0, 3.0];
        let empty: [f64; 0] = [];
        let groups = [&a[..], &b[..], &empty[..]];
        assert_eq!(
            nested_extent(groups.iter().map(|g| g.iter().copied())),
            Some((-2.0, 5.0)),
            "global extent"
        );
        assert_eq!(extent([f64::NAN]), None, "no finite values");
    }
}
