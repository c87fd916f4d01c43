// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve interpolation for line and area marks.

use kurbo::{BezPath, Point};

/// How consecutive points of a line are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Straight segments.
    #[default]
    Linear,
    /// Cubic segments that preserve monotonicity in y, assuming monotone x (Steffen's method,
    /// as in d3's `curveMonotoneX`).
    MonotoneX,
}

impl Curve {
    /// An open path through `points`. Non-finite points are skipped.
    pub fn path(self, points: &[Point]) -> BezPath {
        let mut path = BezPath::new();
        self.trace(&mut path, points.iter().copied(), false);
        path
    }

    /// A closed area between `top` (traced left to right) and `bottom` (traced right to left).
    ///
    /// `top` and `bottom` are given in the same x order; the bottom edge is reversed internally.
    pub fn area(self, top: &[Point], bottom: &[Point]) -> BezPath {
        let mut path = BezPath::new();
        self.trace(&mut path, top.iter().copied(), false);
        self.trace(&mut path, bottom.iter().rev().copied(), true);
        if !path.elements().is_empty() {
            path.close_path();
        }
        path
    }

    /// Appends a segment through `points`. With `connect`, the first point is joined to the
    /// current end of `path` instead of starting a new subpath.
    fn trace(self, path: &mut BezPath, points: impl Iterator<Item = Point>, connect: bool) {
        let points = points.filter(|p| p.is_finite());
        match self {
            Self::Linear => {
                for (i, p) in points.enumerate() {
                    if i == 0 && !(connect && !path.elements().is_empty()) {
                        path.move_to(p);
                    } else {
                        path.line_to(p);
                    }
                }
            }
            Self::MonotoneX => {
                let mut m = Monotone::new(connect && !path.elements().is_empty());
                for p in points {
                    m.point(path, p);
                }
                m.end(path);
            }
        }
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

/// Divisor that keeps the sign of a zero interval consistent with its neighbor.
fn interval(h: f64, other: f64) -> f64 {
    if h != 0.0 {
        h
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}

struct Monotone {
    connect: bool,
    count: u8,
    p0: Point,
    p1: Point,
    t0: f64,
}

impl Monotone {
    fn new(connect: bool) -> Self {
        Self {
            connect,
            count: 0,
            p0: Point::new(f64::NAN, f64::NAN),
            p1: Point::new(f64::NAN, f64::NAN),
            t0: f64::NAN,
        }
    }

    /// Tangent at `p1` given the next point.
    fn slope3(&self, p2: Point) -> f64 {
        let h0 = self.p1.x - self.p0.x;
        let h1 = p2.x - self.p1.x;
        let s0 = (self.p1.y - self.p0.y) / interval(h0, h1);
        let s1 = (p2.y - self.p1.y) / interval(h1, h0);
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let (a, b, c) = (s0.abs(), s1.abs(), 0.5 * p.abs());
        if a.is_nan() || b.is_nan() || c.is_nan() {
            return 0.0;
        }
        let t = (sign(s0) + sign(s1)) * a.min(b).min(c);
        if t.is_nan() { 0.0 } else { t }
    }

    /// One-sided tangent at an end point.
    fn slope2(&self, t: f64) -> f64 {
        let h = self.p1.x - self.p0.x;
        if h != 0.0 && !h.is_nan() {
            (3.0 * (self.p1.y - self.p0.y) / h - t) / 2.0
        } else {
            t
        }
    }

    fn segment(&self, path: &mut BezPath, t0: f64, t1: f64) {
        let (p0, p1) = (self.p0, self.p1);
        let dx = (p1.x - p0.x) / 3.0;
        path.curve_to(
            Point::new(p0.x + dx, p0.y + dx * t0),
            Point::new(p1.x - dx, p1.y - dx * t1),
            p1,
        );
    }

    fn point(&mut self, path: &mut BezPath, p: Point) {
        if p == self.p1 {
            return;
        }
        let mut t1 = f64::NAN;
        match self.count {
            0 => {
                self.count = 1;
                if self.connect {
                    path.line_to(p);
                } else {
                    path.move_to(p);
                }
            }
            1 => self.count = 2,
            2 => {
                self.count = 3;
                t1 = self.slope3(p);
                self.segment(path, self.slope2(t1), t1);
            }
            _ => {
                t1 = self.slope3(p);
                self.segment(path, self.t0, t1);
            }
        }
        self.p0 = self.p1;
        self.p1 = p;
        self.t0 = t1;
    }

    fn end(&self, path: &mut BezPath) {
        match self.count {
            2 => path.line_to(self.p1),
            3 => self.segment(path, self.t0, self.slope2(self.t0)),
            _ => {}
        }
    }
}
