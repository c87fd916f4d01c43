// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text mark generation.

use figkit_core::{GroupId, Mark, MarkId, TextAnchor, TextBaseline, TextPayload};
use kurbo::Point;
use peniko::Brush;
use peniko::color::palette::css;

/// A label, title or tick text.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Group of the generated mark.
    pub group: GroupId,
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor point in panel coordinates.
    pub pos: Point,
    /// The string to draw; shaping is left to the SVG viewer.
    pub text: String,
    /// Font size in panel units.
    pub font_size: f64,
    /// Rotation around `pos` in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl TextMarkSpec {
    /// Creates an empty, 10px, start-anchored text keyed by `key` inside `group`.
    pub fn new(group: GroupId, key: &str, pos: Point) -> Self {
        Self {
            group,
            id: MarkId::keyed(group, key),
            pos,
            text: String::new(),
            font_size: 10.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            fill: Brush::Solid(css::BLACK),
            z_index: crate::z_order::AXIS_TITLES,
        }
    }

    /// Sets the string.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the text anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the rotation angle (degrees).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Builds the text mark.
    pub fn mark(&self) -> Mark {
        Mark::with_id(
            self.id,
            self.group,
            TextPayload {
                pos: self.pos,
                text: self.text.clone(),
                font_size: self.font_size,
                anchor: self.anchor,
                baseline: self.baseline,
                angle: self.angle,
                fill: self.fill.clone(),
            },
        )
        .with_z_index(self.z_index)
    }
}
