// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `figkit_core`.
//!
//! This crate sits between the data and the scene:
//! - **Scales** map data values into screen coordinates, following d3's conventions for nice
//!   domains, ticks and band layout.
//! - **Mark specs** and **axes** generate stable-identity `figkit_core::Mark`s.
//! - **Plot builders** combine both into [`Layer`]s for the thesis figures: mirrored score
//!   distributions, beeswarms, line plots with spread bands, box plots and a correlation
//!   matrix.
//!
//! Text shaping is out of scope; text marks store unshaped strings and extents are estimated by
//! a [`TextMeasurer`].

mod area_mark;
mod axis;
mod circle_mark;
mod color;
mod curve;
mod format;
mod frame;
mod layer;
mod line_mark;
mod measure;
mod plot;
mod rect_mark;
mod rule_mark;
mod scale;
mod text_mark;
pub mod z_order;

pub use area_mark::AreaMarkSpec;
pub use axis::{AxisOrient, AxisScale, AxisSpec, Tick};
pub use circle_mark::CircleMarkSpec;
pub use color::{interpolate_blues, interpolate_rgb_basis};
pub use curve::Curve;
pub use format::{format_fixed, format_tick, precision_fixed};
pub use frame::{Frame, Margin};
pub use layer::{Layer, apply_layers};
pub use line_mark::{LineMarkSpec, StrokeStyle};
pub use measure::{HeuristicTextMeasurer, TextMeasurer, TextMetrics};
pub use plot::{
    BoxGroup, BoxPlot, Correlation, CorrelationPlot, DistributionPlot, DistributionRender,
    Highlight, LABEL_FONT_SIZE, Scored, Series, SeriesPlot, SeriesPoint, SwarmPlot, SwarmPoint,
    SwarmRender,
};
pub use rect_mark::RectMarkSpec;
pub use rule_mark::RuleMarkSpec;
pub use scale::{
    ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec, ScaleOrdinal, ScalePoint,
    ScalePointSpec, ScaleSequential,
};
pub use text_mark::TextMarkSpec;
