// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box-plot statistics.

use crate::error::EmptyInputError;
use crate::summary::quantile_sorted;

/// Quartiles and whiskers of one group.
///
/// `min`/`max` are the whisker ends: the extreme values within `1.5 * iqr` of the box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxStats {
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Interquartile range `q3 - q1`.
    pub iqr: f64,
    /// Lower whisker.
    pub min: f64,
    /// Upper whisker.
    pub max: f64,
    /// Values outside the whiskers.
    pub outliers: usize,
}

impl BoxStats {
    /// Computes box statistics; non-finite values are ignored.
    pub fn from_values(values: &[f64]) -> Result<Self, EmptyInputError> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return Err(EmptyInputError::new("box stats"));
        }
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes box statistics over an ascending, finite sequence.
    pub fn from_sorted(sorted: &[f64]) -> Result<Self, EmptyInputError> {
        let q1 = quantile_sorted(sorted, 0.25)?;
        let median = quantile_sorted(sorted, 0.5)?;
        let q3 = quantile_sorted(sorted, 0.75)?;
        let iqr = q3 - q1;
        let lo = q1 - 1.5 * iqr;
        let hi = q3 + 1.5 * iqr;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut outliers = 0;
        for &v in sorted {
            if v < lo || v > hi {
                outliers += 1;
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        Ok(Self {
            q1,
            median,
            q3,
            iqr,
            min,
            max,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn whiskers_exclude_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0];
        let s = BoxStats::from_values(&values).unwrap();
        assert_eq!((s.q1, s.median, s.q3), (3.0, 5.0, 7.0), "quartiles");
        assert_eq!(s.iqr, 4.0, "iqr");
        assert_eq!((s.min, s.max), (1.0, 8.0), "100 is beyond q3 + 6");
        assert_eq!(s.outliers, 1, "one outlier");
    }

    #[test]
    fn whiskers_stay_within_fences_and_data() {
        let values = [-40.0, -3.5, -1.0, 0.0, 0.2, 0.8, 1.1, 2.4, 2.9, 35.0];
        let s = BoxStats::from_values(&values).unwrap();
        let lo = s.q1 - 1.5 * s.iqr;
        let hi = s.q3 + 1.5 * s.iqr;
        assert!(s.min >= lo && s.max <= hi, "whiskers {s:?} within fences");
        assert!(s.min >= -40.0 && s.max <= 35.0, "whiskers within data extent");
        assert!(s.q1 <= s.median && s.median <= s.q3, "ordered quartiles");
    }

    #[test]
    fn single_value_collapses() {
        let s = BoxStats::from_values(&[2.5]).unwrap();
        assert_eq!((s.min, s.q1, s.median, s.q3, s.max), (2.5, 2.5, 2.5, 2.5, 2.5), "all equal");
        assert!(BoxStats::from_values(&[]).is_err(), "empty group");
    }
}
