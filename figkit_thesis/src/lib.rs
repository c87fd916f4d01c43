// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interactive figures of the rescoring thesis.
//!
//! Every figure is a [`Figure`] controller: it loads its data files from a
//! [`DataSource`](figkit_data::DataSource), draws into one retained scene per panel and
//! reacts to hover, pointer and dropdown events. A [`Page`] owns all figures, isolates load
//! failures per figure and routes events; [`render_page`] and [`panel_svg`] serialize the
//! result.
//!
//! ```no_run
//! use figkit_data::FsSource;
//! use figkit_thesis::{Page, RenderConfig, render_page, thesis_figures};
//!
//! let config = RenderConfig::default();
//! let mut page = Page::new(thesis_figures(&config));
//! page.load_all(&FsSource::new(&config.data_dir), 0.0);
//! page.settle();
//! let html = render_page("Rescoring", &page);
//! # let _ = html;
//! ```

pub mod catalog;
mod config;
mod error;
mod event;
mod figure;
mod figures;
mod html;
mod page;
mod svg;

pub use config::RenderConfig;
pub use error::FigureError;
pub use event::{EventParseError, FigureEvent, ScriptedAction, ScriptedEvent};
pub use figure::{Control, Figure, Panel};
pub use figures::{
    Correlations, EngineIdentifications, FeatureDifferences, KsDistances, PercolatorScores,
    Repetitions, thesis_figures,
};
pub use html::render_page;
pub use page::{FigureStatus, Page};
pub use svg::panel_svg;
