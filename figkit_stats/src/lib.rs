// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Descriptive statistics needed to draw figkit plots.
//!
//! This crate provides:
//! - summaries over numeric sequences (extent, mean, sample standard deviation, R-7 quantiles),
//! - d3-compatible tick generation and "nice" domain rounding,
//! - histogram binning aligned to axis ticks,
//! - box-plot statistics with 1.5 IQR whiskers, and
//! - a lazily populated per-group cache for derived aggregates.
//!
//! Statistics over zero elements return [`EmptyInputError`] instead of `NaN`.

mod box_stats;
mod cache;
mod error;
mod histogram;
mod summary;
mod ticks;

pub use box_stats::BoxStats;
pub use cache::StatsCache;
pub use error::EmptyInputError;
pub use histogram::{Bin, Histogram};
pub use summary::{extent, mean, nested_extent, quantile, quantile_sorted, stddev};
pub use ticks::{nice, tick_increment, tick_step, ticks};
