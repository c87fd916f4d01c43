// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Figure-level errors.

use figkit_data::LoadError;
use figkit_stats::EmptyInputError;
use thiserror::Error;

/// Errors raised while loading or updating one figure.
///
/// Every variant is recoverable at figure granularity: the page logs it and the other figures
/// keep rendering.
#[derive(Error, Debug)]
pub enum FigureError {
    /// A data file could not be fetched or parsed.
    #[error("failed to load {path}: {source}")]
    Load {
        /// The requested data file.
        path: String,
        /// What went wrong.
        #[source]
        source: LoadError,
    },

    /// A statistic or scale was requested over an empty slice.
    #[error(transparent)]
    Stats(#[from] EmptyInputError),

    /// The page has no figure with this id.
    #[error("unknown figure `{0}`")]
    UnknownFigure(String),

    /// An event names a region or mark the figure does not have.
    #[error("figure `{figure}` has no target `{target}`")]
    UnknownTarget {
        /// The figure id.
        figure: String,
        /// The region or mark that did not resolve.
        target: String,
    },

    /// A selection names a control or option the figure does not offer.
    #[error("control `{control}` has no option `{option}`")]
    UnknownOption {
        /// The control id.
        control: String,
        /// The requested option.
        option: String,
    },

    /// The figure was asked to update before its data was loaded.
    #[error("figure `{0}` is not loaded")]
    NotLoaded(String),
}

impl FigureError {
    /// Wraps a load error together with the path that failed.
    pub fn load(path: impl Into<String>, source: LoadError) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }
}
