// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The thesis figures.

mod correlations;
mod distribution_view;
mod engine_identifications;
mod feature_differences;
mod identifications;
mod ks_distances;
mod percolator_scores;
mod repetitions;
mod swarm_view;

pub use correlations::Correlations;
pub use engine_identifications::EngineIdentifications;
pub use feature_differences::FeatureDifferences;
pub use ks_distances::KsDistances;
pub use percolator_scores::PercolatorScores;
pub use repetitions::Repetitions;

use figkit_data::{DataSource, Dataset, LoadError, RowMapper, load};

use crate::config::RenderConfig;
use crate::error::FigureError;
use crate::figure::Figure;

/// Every figure of the page, in page order.
pub fn thesis_figures(config: &RenderConfig) -> Vec<Box<dyn Figure>> {
    vec![
        Box::new(KsDistances::new(config)),
        Box::new(EngineIdentifications::new(config)),
        Box::new(PercolatorScores::new(config)),
        Box::new(Repetitions::new(config)),
        Box::new(FeatureDifferences::new(config)),
        Box::new(Correlations::new()),
    ]
}

/// Fetches and parses `path`, attaching the path to load errors.
pub(crate) fn fetch(
    source: &dyn DataSource,
    path: &str,
    mapper: &RowMapper,
) -> Result<Dataset, FigureError> {
    load(source, path, Some(mapper)).map_err(|e: LoadError| FigureError::load(path, e))
}
