// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text extents for label backgrounds and legend placement.
//!
//! Shaping happens downstream of the scene. Plot builders only need rough extents, so they take
//! a measurer and default to [`HeuristicTextMeasurer`].

use figkit_core::{TextAnchor, TextBaseline};
use kurbo::{Point, Rect};

/// Width and height of a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f64,
    /// Line height.
    pub height: f64,
}

/// Estimates text extents in scene units.
pub trait TextMeasurer {
    /// Measures `text` set at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics;

    /// The unrotated box covered by `text` anchored at `pos`.
    fn bounds(
        &self,
        text: &str,
        font_size: f64,
        pos: Point,
        anchor: TextAnchor,
        baseline: TextBaseline,
    ) -> Rect {
        let m = self.measure(text, font_size);
        let x0 = match anchor {
            TextAnchor::Start => pos.x,
            TextAnchor::Middle => pos.x - m.width * 0.5,
            TextAnchor::End => pos.x - m.width,
        };
        let y0 = match baseline {
            TextBaseline::Hanging => pos.y,
            TextBaseline::Middle => pos.y - m.height * 0.5,
            // Roughly 80% of the line box sits above the baseline.
            TextBaseline::Alphabetic => pos.y - m.height * 0.8,
        };
        Rect::new(x0, y0, x0 + m.width, y0 + m.height)
    }
}

/// Assumes an average glyph width of 0.6em and a line height of 1.2em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics {
        TextMetrics {
            width: 0.6 * font_size * text.chars().count() as f64,
            height: 1.2 * font_size,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn bounds_follow_the_anchor() {
        let m = HeuristicTextMeasurer;
        let r = m.bounds(
            "Sibling Ions",
            10.0,
            Point::new(100.0, 50.0),
            TextAnchor::End,
            TextBaseline::Middle,
        );
        assert!((r.width() - 72.0).abs() < 1e-9, "12 glyphs at 6px, got {}", r.width());
        assert!((r.x1 - 100.0).abs() < 1e-9, "end anchor ends at the position");
        assert!((r.center().y - 50.0).abs() < 1e-9, "middle baseline centers vertically");
    }
}
