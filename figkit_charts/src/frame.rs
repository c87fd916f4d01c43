// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-size figure viewports.
//!
//! Every figure region is a fixed outer size with margins on each side. Marks are generated in
//! viewport coordinates: the plot area is the outer rectangle inset by the margins, and guides
//! live in the margins.

use kurbo::{Point, Rect};

/// Margins around the plot area, in the CSS order `top, right, bottom, left`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot.
    pub bottom: f64,
    /// Space left of the plot.
    pub left: f64,
}

impl Margin {
    /// Creates margins.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same margin on all sides.
    pub const fn uniform(m: f64) -> Self {
        Self::new(m, m, m, m)
    }
}

/// Outer viewport size plus margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Outer width, margins included.
    pub width: f64,
    /// Outer height, margins included.
    pub height: f64,
    /// Margins.
    pub margin: Margin,
}

impl Frame {
    /// Creates a frame of the given outer size.
    pub const fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// The viewport rectangle.
    pub fn outer(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The plot area. Collapses to a zero-size rectangle if the margins do not fit.
    pub fn plot(&self) -> Rect {
        let x0 = self.margin.left;
        let y0 = self.margin.top;
        let x1 = (self.width - self.margin.right).max(x0);
        let y1 = (self.height - self.margin.bottom).max(y0);
        Rect::new(x0, y0, x1, y1)
    }

    /// Plot width.
    pub fn inner_width(&self) -> f64 {
        self.plot().width()
    }

    /// Plot height.
    pub fn inner_height(&self) -> f64 {
        self.plot().height()
    }

    /// Converts a point relative to the plot origin into viewport coordinates.
    pub fn at(&self, x: f64, y: f64) -> Point {
        Point::new(self.margin.left + x, self.margin.top + y)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn plot_is_inset_by_margins() {
        let f = Frame::new(600.0, 350.0, Margin::new(30.0, 10.0, 60.0, 60.0));
        assert_eq!(f.plot(), Rect::new(60.0, 30.0, 590.0, 290.0), "plot rect");
        assert_eq!(f.inner_width(), 530.0, "width");
        assert_eq!(f.inner_height(), 260.0, "height");
        assert_eq!(f.at(0.0, 0.0), Point::new(60.0, 30.0), "plot origin");
    }

    #[test]
    fn oversized_margins_collapse() {
        let f = Frame::new(20.0, 20.0, Margin::uniform(15.0));
        assert_eq!(f.inner_width(), 0.0, "no negative width");
    }
}
