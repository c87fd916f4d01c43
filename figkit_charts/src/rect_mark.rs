// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle mark generation.

use figkit_core::{GroupId, Mark, MarkId, RectPayload};
use kurbo::Rect;
use peniko::{Brush, Color};

/// A rectangle mark spec (histogram bins, boxes, highlight frames).
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Group of the generated mark.
    pub group: GroupId,
    /// Stable mark id.
    pub id: MarkId,
    /// Rectangle geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
    /// Geometry the rectangle grows from when it first enters.
    pub enter: Option<Rect>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl RectMarkSpec {
    /// Creates a rectangle keyed by `key` inside `group`.
    pub fn new(group: GroupId, key: &str, rect: Rect) -> Self {
        Self {
            group,
            id: MarkId::keyed(group, key),
            rect,
            fill: Brush::default(),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
            enter: None,
            z_index: crate::z_order::SERIES_FILL,
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

    /// Sets the rectangle the mark starts from on entry.
    pub fn with_enter(mut self, rect: Rect) -> Self {
        self.enter = Some(rect);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    fn payload(&self, rect: Rect) -> RectPayload {
        RectPayload {
            rect,
            fill: self.fill.clone(),
            stroke: self.stroke.clone(),
            stroke_width: self.stroke_width,
        }
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mark =
            Mark::with_id(self.id, self.group, self.payload(self.rect)).with_z_index(self.z_index);
        match self.enter {
            Some(rect) => mark.with_enter(self.payload(rect)),
            None => mark,
        }
    }
}
