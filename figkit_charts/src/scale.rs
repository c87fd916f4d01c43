// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: domain values to pixel coordinates (or colors).
//!
//! Each scale comes as a *spec* (domain + options, no range yet) and an instantiated scale
//! bound to a pixel range. Vertical axes pass an inverted range `(plot.y1, plot.y0)` so larger
//! values sit higher on screen.

use figkit_stats::{EmptyInputError, extent, nice, tick_step, ticks};
use peniko::Color;

use crate::color::interpolate_blues;

/// A linear mapping from a continuous domain to a continuous range.
///
/// A degenerate domain (both ends equal, or non-finite) maps every value to the middle of the
/// range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    fn is_degenerate(&self) -> bool {
        let (d0, d1) = self.domain;
        !(d1 - d0).is_finite() || d1 == d0
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return (r0 + r1) * 0.5;
        }
        let t = (x - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into the domain.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() || r1 == r0 {
            return d0;
        }
        let t = (y - r0) / (r1 - r0);
        d0 + t * (d1 - d0)
    }

    /// The domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Approximately `count` nice tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// The spacing of [`ScaleLinear::ticks`] for `count`, used to pick label precision.
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain.0, self.domain.1, count)
    }
}

/// Specification for a linear scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to extend the domain to round tick bounds.
    pub nice: bool,
    /// Tick count used by `nice`.
    pub tick_count: usize,
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
            tick_count: 10,
        }
    }

    /// Creates a spec whose domain is `[min, max]` of the finite `values`.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Result<Self, EmptyInputError> {
        extent(values)
            .map(Self::new)
            .ok_or(EmptyInputError { statistic: "extent" })
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Sets the tick count used when rounding the domain.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// The effective domain after applying `nice`.
    pub fn resolved_domain(&self) -> (f64, f64) {
        if self.nice {
            nice(self.domain.0, self.domain.1, self.tick_count)
        } else {
            self.domain
        }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(), range)
    }
}

/// Specification for a band scale: categories plus padding, no range yet.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBandSpec {
    /// Categories in domain order.
    pub categories: Vec<String>,
    /// Inner padding as a fraction of the step, clamped to `[0, 1]`.
    pub padding_inner: f64,
    /// Outer padding as a fraction of the step.
    pub padding_outer: f64,
    /// Where the outer space goes: 0 at the start, 0.5 centered, 1 at the end.
    pub align: f64,
}

impl ScaleBandSpec {
    /// Creates a band scale spec with no padding and centered alignment.
    pub fn new<S: Into<String>>(categories: impl IntoIterator<Item = S>) -> Self {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Sets inner and outer padding to the same value.
    pub fn with_padding(self, padding: f64) -> Self {
        self.with_padding_inner(padding).with_padding_outer(padding)
    }

    /// Sets the inner padding.
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    /// Sets the outer padding.
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Sets the alignment of the outer space.
    pub fn with_align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleBand {
        let (r0, r1) = range;
        let reverse = r1 < r0;
        let (mut start, stop) = if reverse { (r1, r0) } else { (r0, r1) };
        let n = self.categories.len() as f64;
        let step = (stop - start) / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        start += (stop - start - step * (n - self.padding_inner)) * self.align;
        let bandwidth = step * (1.0 - self.padding_inner);
        let mut positions: Vec<f64> = (0..self.categories.len())
            .map(|i| start + step * i as f64)
            .collect();
        if reverse {
            positions.reverse();
        }
        ScaleBand {
            categories: self.categories.clone(),
            positions,
            step,
            bandwidth,
            range,
        }
    }
}

/// A categorical scale assigning each category an equal-width band.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    categories: Vec<String>,
    positions: Vec<f64>,
    step: f64,
    bandwidth: f64,
    range: (f64, f64),
}

impl ScaleBand {
    /// Index of `category` in the domain.
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Start of the band for `category`.
    pub fn position(&self, category: &str) -> Option<f64> {
        self.index_of(category).map(|i| self.positions[i])
    }

    /// Middle of the band for `category`.
    pub fn center(&self, category: &str) -> Option<f64> {
        self.position(category).map(|p| p + self.bandwidth * 0.5)
    }

    /// Width of every band.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Categories in domain order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Specification for a point scale: a band scale whose bands have zero width.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalePointSpec {
    band: ScaleBandSpec,
}

impl ScalePointSpec {
    /// Creates a point scale spec with no outer padding.
    pub fn new<S: Into<String>>(categories: impl IntoIterator<Item = S>) -> Self {
        Self {
            band: ScaleBandSpec::new(categories).with_padding_inner(1.0),
        }
    }

    /// Sets the outer padding in steps.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.band = self.band.with_padding_outer(padding);
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScalePoint {
        ScalePoint {
            band: self.band.instantiate(range),
        }
    }
}

/// A categorical scale mapping each category to a single coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalePoint {
    band: ScaleBand,
}

impl ScalePoint {
    /// Coordinate of `category`.
    pub fn position(&self, category: &str) -> Option<f64> {
        self.band.position(category)
    }

    /// Distance between adjacent points.
    pub fn step(&self) -> f64 {
        self.band.step()
    }

    /// Categories in domain order.
    pub fn categories(&self) -> &[String] {
        self.band.categories()
    }

    /// The range.
    pub fn range(&self) -> (f64, f64) {
        self.band.range()
    }
}

/// Category to value lookup with a fallback for unknown categories.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOrdinal<T> {
    entries: Vec<(String, T)>,
    unknown: T,
}

impl<T: Clone> ScaleOrdinal<T> {
    /// Creates an ordinal scale; categories not in `entries` map to `unknown`.
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, T)>, unknown: T) -> Self {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            unknown,
        }
    }

    /// The value for `category`.
    pub fn get(&self, category: &str) -> T {
        self.entries
            .iter()
            .find(|(k, _)| k == category)
            .map_or_else(|| self.unknown.clone(), |(_, v)| v.clone())
    }
}

/// Continuous domain to color through an interpolator.
#[derive(Clone, Copy, Debug)]
pub struct ScaleSequential {
    domain: (f64, f64),
    interpolator: fn(f64) -> Color,
}

impl ScaleSequential {
    /// Creates a sequential scale over `domain`.
    pub fn new(domain: (f64, f64), interpolator: fn(f64) -> Color) -> Self {
        Self {
            domain,
            interpolator,
        }
    }

    /// A `[0, 1]` scale through the Blues scheme.
    pub fn blues() -> Self {
        Self::new((0.0, 1.0), interpolate_blues)
    }

    /// The color for `v`; values outside the domain clamp to its ends.
    pub fn map(&self, v: f64) -> Color {
        let (d0, d1) = self.domain;
        let t = if d1 == d0 || !(d1 - d0).is_finite() {
            0.5
        } else {
            ((v - d0) / (d1 - d0)).clamp(0.0, 1.0)
        };
        (self.interpolator)(t)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn linear_round_trip_stays_in_range() {
        let s = ScaleLinearSpec::new((-0.3, 0.85))
            .with_nice(true)
            .instantiate((270.0, 0.0));
        assert_eq!(s.domain(), (-0.3, 0.9), "nice domain");
        for i in 0..=20 {
            let v = -0.3 + 1.15 * f64::from(i) / 20.0;
            let y = s.map(v);
            assert!((0.0..=270.0).contains(&y), "{v} maps to {y} inside the range");
            assert!((s.invert(y) - v).abs() < 1e-9, "invert undoes map for {v}");
        }
        assert!(s.map(0.9) < s.map(-0.4), "inverted range puts larger values higher");
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let s = ScaleLinearSpec::from_values([2.0, 2.0])
            .unwrap()
            .instantiate((0.0, 100.0));
        assert_eq!(s.map(2.0), 50.0, "single value domain");
        assert_eq!(s.map(7.0), 50.0, "any value");
        assert!(
            ScaleLinearSpec::from_values([f64::NAN]).is_err(),
            "no finite values"
        );
    }

    #[test]
    fn distribution_domain_before_and_after_nice() {
        let spec = ScaleLinearSpec::from_values([1.0, -1.0, 0.5]).unwrap();
        assert_eq!(spec.domain, (-1.0, 1.0), "raw extent");
        assert_eq!(spec.with_nice(true).resolved_domain(), (-1.0, 1.0), "already nice");
    }

    #[test]
    fn band_positions_increase_without_overlap() {
        let s = ScaleBandSpec::new(["a", "b", "c", "d"])
            .with_padding(0.2)
            .instantiate((0.0, 100.0));
        let starts: Vec<f64> = ["a", "b", "c", "d"]
            .iter()
            .map(|c| s.position(c).unwrap())
            .collect();
        for pair in starts.windows(2) {
            assert!(pair[0] + s.bandwidth() < pair[1], "bands {pair:?} do not overlap");
        }
        assert!((s.bandwidth() - s.step() * 0.8).abs() < 1e-9, "bandwidth");
    }

    #[test]
    fn single_band_with_padding() {
        let s = ScaleBandSpec::new(["pseudo"])
            .with_padding(0.05)
            .instantiate((0.0, 260.0));
        assert!((s.step() - 260.0 / 1.05).abs() < 1e-9, "step");
        assert!((s.bandwidth() - 0.95 * 260.0 / 1.05).abs() < 1e-9, "bandwidth");
        let start = s.position("pseudo").unwrap();
        assert!((start * 2.0 + s.bandwidth() - 260.0).abs() < 1e-9, "centered band");
    }

    #[test]
    fn full_padding_behaves_like_points() {
        let lanes = ScaleBandSpec::new(["xtandem", "msgf", "comet"])
            .with_padding(1.0)
            .instantiate((260.0, 0.0));
        assert_eq!(lanes.bandwidth(), 0.0, "zero-width bands");
        assert_eq!(lanes.center("xtandem"), Some(195.0), "first lane at bottom");
        assert_eq!(lanes.position("msgf"), Some(130.0), "middle lane");
        assert_eq!(lanes.position("comet"), Some(65.0), "last lane at top");
        assert_eq!(lanes.position("mascot"), None, "unknown category");

        let points = ScalePointSpec::new(["xtandem", "msgf", "comet"])
            .with_padding(1.0)
            .instantiate((260.0, 0.0));
        assert_eq!(points.position("msgf"), Some(130.0), "point scale agrees");
    }

    #[test]
    fn box_plot_bands_with_separate_padding() {
        let s = ScaleBandSpec::new(["Incorrect", "Correct"])
            .with_padding_inner(1.0)
            .with_padding_outer(0.5)
            .instantiate((0.0, 220.0));
        assert_eq!(s.position("Incorrect"), Some(55.0), "quarter");
        assert_eq!(s.position("Correct"), Some(165.0), "three quarters");
    }

    #[test]
    fn ordinal_falls_back() {
        let colors = ScaleOrdinal::new([("IDPEP", 1), ("Percolator", 2)], 0);
        assert_eq!(colors.get("IDPEP"), 1, "known");
        assert_eq!(colors.get("other"), 0, "fallback");
    }
}
