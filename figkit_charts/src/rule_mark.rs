// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule mark generation.
//!
//! A rule is an unfilled stroked path: straight segments for ticks, whiskers, indicator lines
//! and dashed legend leaders, or a polyline such as an axis domain.

use figkit_core::{GroupId, Mark, MarkId, PathPayload};
use kurbo::{BezPath, Point};
use peniko::{Brush, Color};
use peniko::color::palette::css;

use crate::z_order;

/// A stroked, unfilled path spec.
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Group of the generated mark.
    pub group: GroupId,
    /// Stable mark id.
    pub id: MarkId,
    /// Path geometry in scene coordinates.
    pub path: BezPath,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width.
    pub stroke_width: f64,
    /// Dash length, if dashed.
    pub dash: Option<f64>,
    /// Path the rule starts from when it first enters.
    pub enter: Option<BezPath>,
    /// Rendering order hint.
    pub z_index: i32,
}

fn segment(start: Point, end: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(start);
    p.line_to(end);
    p
}

impl RuleMarkSpec {
    /// A segment from `start` to `end`.
    pub fn new(group: GroupId, key: &str, start: Point, end: Point) -> Self {
        Self::from_path(group, key, segment(start, end))
    }

    /// A horizontal segment at `y`.
    pub fn horizontal(group: GroupId, key: &str, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(group, key, Point::new(x0, y), Point::new(x1, y))
    }

    /// A vertical segment at `x`.
    pub fn vertical(group: GroupId, key: &str, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(group, key, Point::new(x, y0), Point::new(x, y1))
    }

    /// An arbitrary open path.
    pub fn from_path(group: GroupId, key: &str, path: BezPath) -> Self {
        Self {
            group,
            id: MarkId::keyed(group, key),
            path,
            stroke: Brush::Solid(css::BLACK),
            stroke_width: 1.0,
            dash: None,
            enter: None,
            z_index: z_order::SERIES_STROKE,
        }
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Dashes the stroke.
    pub fn with_dash(mut self, dash: f64) -> Self {
        self.dash = Some(dash);
        self
    }

    /// Sets the segment the rule starts from on entry.
    pub fn with_enter(mut self, start: Point, end: Point) -> Self {
        self.enter = Some(segment(start, end));
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    fn payload(&self, path: BezPath) -> PathPayload {
        PathPayload {
            path,
            fill: Brush::Solid(Color::TRANSPARENT),
            stroke: self.stroke.clone(),
            stroke_width: self.stroke_width,
            dash: self.dash,
        }
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mark = Mark::with_id(self.id, self.group, self.payload(self.path.clone()))
            .with_z_index(self.z_index);
        match &self.enter {
            Some(path) => mark.with_enter(self.payload(path.clone())),
            None => mark,
        }
    }
}
