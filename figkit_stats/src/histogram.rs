// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Histogram binning.

use crate::ticks::ticks;

/// One histogram bucket covering `[x0, x1)` (the last bucket is closed).
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    /// Lower bound (inclusive).
    pub x0: f64,
    /// Upper bound (exclusive, except for the last bin).
    pub x1: f64,
    /// The values that fell into this bucket, in input order.
    pub values: Vec<f64>,
}

impl Bin {
    /// Number of values in the bucket.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}

/// Histogram configuration: a domain plus threshold policy.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// Inclusive value domain `(x0, x1)`.
    pub domain: (f64, f64),
    thresholds: Thresholds,
}

#[derive(Clone, Debug, PartialEq)]
enum Thresholds {
    Count(usize),
    Explicit(Vec<f64>),
}

impl Histogram {
    /// Creates a histogram over `domain` with thresholds at the domain's ~10 nice ticks.
    pub fn new(domain: (f64, f64)) -> Self {
        let (a, b) = domain;
        Self {
            domain: (a.min(b), a.max(b)),
            thresholds: Thresholds::Count(10),
        }
    }

    /// Places thresholds at approximately `count` nice ticks of the domain.
    ///
    /// With the same count as the value axis, bucket edges coincide with tick positions.
    pub fn with_threshold_count(mut self, count: usize) -> Self {
        self.thresholds = Thresholds::Count(count);
        self
    }

    /// Uses explicit thresholds.
    pub fn with_thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.thresholds = Thresholds::Explicit(thresholds);
        self
    }

    /// The effective thresholds: sorted, finite, strictly inside the domain.
    pub fn thresholds(&self) -> Vec<f64> {
        let (x0, x1) = self.domain;
        let mut tz = match &self.thresholds {
            Thresholds::Count(n) => ticks(x0, x1, *n),
            Thresholds::Explicit(v) => v.clone(),
        };
        tz.retain(|t| t.is_finite() && *t > x0 && *t < x1);
        tz.sort_by(f64::total_cmp);
        tz.dedup();
        tz
    }

    /// Partitions `values` into buckets.
    ///
    /// Missing and non-finite values are skipped, and so are values outside the domain. Every
    /// other value lands in exactly one bucket, so the counts sum to the number of in-domain
    /// values. A non-finite domain yields no bins.
    pub fn bin(&self, values: impl IntoIterator<Item = Option<f64>>) -> Vec<Bin> {
        let (x0, x1) = self.domain;
        if !x0.is_finite() || !x1.is_finite() {
            return Vec::new();
        }
        let tz = self.thresholds();
        let mut bins: Vec<Bin> = Vec::with_capacity(tz.len() + 1);
        let mut lo = x0;
        for &t in &tz {
            bins.push(Bin {
                x0: lo,
                x1: t,
                values: Vec::new(),
            });
            lo = t;
        }
        bins.push(Bin {
            x0: lo,
            x1,
            values: Vec::new(),
        });

        for v in values.into_iter().flatten() {
            if !v.is_finite() || v < x0 || v > x1 {
                continue;
            }
            // Index of the first threshold greater than `v`.
            let i = tz.partition_point(|t| *t <= v);
            bins[i].values.push(v);
        }
        bins
    }
}
