// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area mark generation.

use figkit_core::{GroupId, Mark, MarkId, PathPayload};
use kurbo::Point;
use peniko::{Brush, Color};

use crate::curve::Curve;

/// A filled band between an upper and a lower edge (confidence bands).
#[derive(Clone, Debug)]
pub struct AreaMarkSpec {
    /// Group of the generated mark.
    pub group: GroupId,
    /// Stable mark id.
    pub id: MarkId,
    /// Upper edge, in x order.
    pub top: Vec<Point>,
    /// Lower edge, in the same x order as `top`.
    pub bottom: Vec<Point>,
    /// Interpolation along both edges.
    pub curve: Curve,
    /// Fill paint.
    pub fill: Brush,
    /// Edges the area starts from when it first enters.
    pub enter: Option<(Vec<Point>, Vec<Point>)>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl AreaMarkSpec {
    /// Creates an area keyed by `key` inside `group`.
    pub fn new(group: GroupId, key: &str, top: Vec<Point>, bottom: Vec<Point>) -> Self {
        Self {
            group,
            id: MarkId::keyed(group, key),
            top,
            bottom,
            curve: Curve::Linear,
            fill: Brush::default(),
            enter: None,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the curve.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the edges the area starts from on entry.
    pub fn with_enter(mut self, top: Vec<Point>, bottom: Vec<Point>) -> Self {
        self.enter = Some((top, bottom));
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    fn payload(&self, top: &[Point], bottom: &[Point]) -> PathPayload {
        PathPayload {
            path: self.curve.area(top, bottom),
            fill: self.fill.clone(),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
            dash: None,
        }
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mark = Mark::with_id(self.id, self.group, self.payload(&self.top, &self.bottom))
            .with_z_index(self.z_index);
        match &self.enter {
            Some((top, bottom)) => mark.with_enter(self.payload(top, bottom)),
            None => mark,
        }
    }
}
