// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circle mark generation.

use figkit_core::{CirclePayload, GroupId, Mark, MarkId};
use kurbo::Point;
use peniko::{Brush, Color};

use crate::z_order;

/// A circle mark spec (swarm points, series dots, correlation bubbles).
#[derive(Clone, Debug)]
pub struct CircleMarkSpec {
    /// Group of the generated mark.
    pub group: GroupId,
    /// Stable mark id.
    pub id: MarkId,
    /// Center in scene coordinates.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
    /// Center and radius the circle starts from when it first enters.
    pub enter: Option<(Point, f64)>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl CircleMarkSpec {
    /// Creates a circle keyed by `key` inside `group`.
    pub fn new(group: GroupId, key: &str, center: Point, radius: f64) -> Self {
        Self {
            group,
            id: MarkId::keyed(group, key),
            center,
            radius,
            fill: Brush::default(),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
            enter: None,
            z_index: z_order::SERIES_POINTS,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the geometry the circle starts from on entry.
    pub fn with_enter(mut self, center: Point, radius: f64) -> Self {
        self.enter = Some((center, radius));
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    fn payload(&self, center: Point, radius: f64) -> CirclePayload {
        CirclePayload {
            center,
            radius,
            fill: self.fill.clone(),
            stroke: self.stroke.clone(),
            stroke_width: self.stroke_width,
        }
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mark = Mark::with_id(self.id, self.group, self.payload(self.center, self.radius))
            .with_z_index(self.z_index);
        match self.enter {
            Some((c, r)) => mark.with_enter(self.payload(c, r)),
            None => mark,
        }
    }
}
