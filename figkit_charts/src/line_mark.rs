// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line mark generation.

use figkit_core::{GroupId, Mark, MarkId, PathPayload};
use kurbo::Point;
use peniko::{Brush, Color};
use peniko::color::palette::css;

use crate::curve::Curve;

/// A paint and width pair for stroked paths.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// A solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// A line through a sequence of points; generates a single path mark.
///
/// Lines that should animate between data slices must keep the same number of points, since
/// paths of different structure snap instead of interpolating.
#[derive(Clone, Debug)]
pub struct LineMarkSpec {
    /// Group of the generated mark.
    pub group: GroupId,
    /// Stable mark id.
    pub id: MarkId,
    /// Points in scene coordinates, in drawing order.
    pub points: Vec<Point>,
    /// Interpolation between points.
    pub curve: Curve,
    /// Stroke style.
    pub stroke: StrokeStyle,
    /// Points the line starts from when it first enters.
    pub enter: Option<Vec<Point>>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl LineMarkSpec {
    /// Creates a line keyed by `key` inside `group`.
    pub fn new(group: GroupId, key: &str, points: Vec<Point>) -> Self {
        Self {
            group,
            id: MarkId::keyed(group, key),
            points,
            curve: Curve::Linear,
            stroke: StrokeStyle::default(),
            enter: None,
            z_index: crate::z_order::SERIES_STROKE,
        }
    }

    /// Sets the curve.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the points the line starts from on entry.
    pub fn with_enter(mut self, points: Vec<Point>) -> Self {
        self.enter = Some(points);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    fn payload(&self, points: &[Point]) -> PathPayload {
        PathPayload {
            path: self.curve.path(points),
            fill: Brush::Solid(Color::TRANSPARENT),
            stroke: self.stroke.brush.clone(),
            stroke_width: self.stroke.stroke_width,
            dash: None,
        }
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mark = Mark::with_id(self.id, self.group, self.payload(&self.points))
            .with_z_index(self.z_index);
        match &self.enter {
            Some(points) => mark.with_enter(self.payload(points)),
            None => mark,
        }
    }
}
