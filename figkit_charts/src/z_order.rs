// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint order of plot-generated marks.
//!
//! Renderers sort by `(z_index, MarkId)`, so marks sharing a layer paint in id order.

/// Invisible hover cells and highlight backgrounds.
pub const HIT_AREAS: i32 = -100;
/// Highlight boxes behind the data.
pub const HIGHLIGHTS: i32 = -50;

/// Filled data marks (histogram bins, boxes, confidence bands).
pub const SERIES_FILL: i32 = 0;
/// Stroked data marks (lines, whiskers, connectors).
pub const SERIES_STROKE: i32 = 10;
/// Point marks drawn above lines.
pub const SERIES_POINTS: i32 = 20;
/// Selection indicators drawn above the data.
pub const INDICATORS: i32 = 25;

/// Axis domain paths and tick lines.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis and panel titles.
pub const AXIS_TITLES: i32 = 50;

/// Background boxes of annotation labels.
pub const LABEL_BOXES: i32 = 55;
/// Legend shapes.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend and annotation text.
pub const LEGEND_LABELS: i32 = 70;
/// Tooltips and captions.
pub const ANNOTATIONS: i32 = 80;
