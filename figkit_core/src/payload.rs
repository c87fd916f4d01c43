// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concrete mark geometry and paint, plus interpolation between two states of the same mark.

use kurbo::{BezPath, PathEl, Point, Rect, Shape};
use peniko::{Brush, Color};

/// Horizontal anchoring of a text mark relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The position is the start of the text run.
    #[default]
    Start,
    /// The position is the horizontal center of the text run.
    Middle,
    /// The position is the end of the text run.
    End,
}

/// Vertical anchoring of a text mark relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The position lies on the alphabetic baseline.
    #[default]
    Alphabetic,
    /// The position is the vertical middle of the line box.
    Middle,
    /// The position is the top of the line box.
    Hanging,
}

/// A filled (and optionally stroked) rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Rectangle geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// A filled (and optionally stroked) circle.
#[derive(Clone, Debug, PartialEq)]
pub struct CirclePayload {
    /// Circle center in scene coordinates.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// An arbitrary path (lines, curves, areas).
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// The path geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
    /// Dash length, if the stroke is dashed.
    pub dash: Option<f64>,
}

/// A single line of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// The text content.
    pub text: String,
    /// Font size in scene units.
    pub font_size: f64,
    /// Horizontal anchoring.
    pub anchor: TextAnchor,
    /// Vertical anchoring.
    pub baseline: TextBaseline,
    /// Rotation around `pos`, in degrees.
    pub angle: f64,
    /// Fill paint.
    pub fill: Brush,
}

/// Geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A rectangle.
    Rect(RectPayload),
    /// A circle.
    Circle(CirclePayload),
    /// A path.
    Path(PathPayload),
    /// A text run.
    Text(TextPayload),
}

impl From<RectPayload> for MarkPayload {
    fn from(value: RectPayload) -> Self {
        Self::Rect(value)
    }
}

impl From<CirclePayload> for MarkPayload {
    fn from(value: CirclePayload) -> Self {
        Self::Circle(value)
    }
}

impl From<PathPayload> for MarkPayload {
    fn from(value: PathPayload) -> Self {
        Self::Path(value)
    }
}

impl From<TextPayload> for MarkPayload {
    fn from(value: TextPayload) -> Self {
        Self::Text(value)
    }
}

impl MarkPayload {
    /// Returns the geometric bounds of this payload.
    ///
    /// Text has no intrinsic bounds without shaping and returns `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Circle(c) => Some(Rect::new(
                c.center.x - c.radius,
                c.center.y - c.radius,
                c.center.x + c.radius,
                c.center.y + c.radius,
            )),
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Text(_) => None,
        }
    }

    /// Interpolates from `self` towards `to` at `t` in `[0, 1]`.
    ///
    /// Payloads of different kinds, and paths whose element structure differs, cannot be
    /// interpolated and jump to `to`. Text content always takes the target string.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        if t >= 1.0 {
            return to.clone();
        }
        match (self, to) {
            (Self::Rect(a), Self::Rect(b)) => Self::Rect(RectPayload {
                rect: lerp_rect(a.rect, b.rect, t),
                fill: lerp_brush(&a.fill, &b.fill, t),
                stroke: lerp_brush(&a.stroke, &b.stroke, t),
                stroke_width: lerp(a.stroke_width, b.stroke_width, t),
            }),
            (Self::Circle(a), Self::Circle(b)) => Self::Circle(CirclePayload {
                center: a.center.lerp(b.center, t),
                radius: lerp(a.radius, b.radius, t),
                fill: lerp_brush(&a.fill, &b.fill, t),
                stroke: lerp_brush(&a.stroke, &b.stroke, t),
                stroke_width: lerp(a.stroke_width, b.stroke_width, t),
            }),
            (Self::Path(a), Self::Path(b)) => match lerp_path(&a.path, &b.path, t) {
                Some(path) => Self::Path(PathPayload {
                    path,
                    fill: lerp_brush(&a.fill, &b.fill, t),
                    stroke: lerp_brush(&a.stroke, &b.stroke, t),
                    stroke_width: lerp(a.stroke_width, b.stroke_width, t),
                    dash: b.dash,
                }),
                None => to.clone(),
            },
            (Self::Text(a), Self::Text(b)) => Self::Text(TextPayload {
                pos: a.pos.lerp(b.pos, t),
                text: b.text.clone(),
                font_size: lerp(a.font_size, b.font_size, t),
                anchor: b.anchor,
                baseline: b.baseline,
                angle: lerp(a.angle, b.angle, t),
                fill: lerp_brush(&a.fill, &b.fill, t),
            }),
            _ => to.clone(),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_rect(a: Rect, b: Rect, t: f64) -> Rect {
    Rect::new(
        lerp(a.x0, b.x0, t),
        lerp(a.y0, b.y0, t),
        lerp(a.x1, b.x1, t),
        lerp(a.y1, b.y1, t),
    )
}

fn lerp_brush(a: &Brush, b: &Brush, t: f64) -> Brush {
    match (a, b) {
        (Brush::Solid(ca), Brush::Solid(cb)) => Brush::Solid(lerp_color(*ca, *cb, t)),
        _ => b.clone(),
    }
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "color components are f32; t is only a blend factor"
    )]
    let t = t as f32;
    let mut out = [0.0_f32; 4];
    for (i, c) in out.iter_mut().enumerate() {
        *c = a.components[i] + (b.components[i] - a.components[i]) * t;
    }
    Color::new(out)
}

fn lerp_path(a: &BezPath, b: &BezPath, t: f64) -> Option<BezPath> {
    let (ea, eb) = (a.elements(), b.elements());
    if ea.len() != eb.len() {
        return None;
    }
    let mut out = Vec::with_capacity(eb.len());
    for (x, y) in ea.iter().zip(eb) {
        let el = match (*x, *y) {
            (PathEl::MoveTo(p0), PathEl::MoveTo(p1)) => PathEl::MoveTo(p0.lerp(p1, t)),
            (PathEl::LineTo(p0), PathEl::LineTo(p1)) => PathEl::LineTo(p0.lerp(p1, t)),
            (PathEl::QuadTo(a0, a1), PathEl::QuadTo(b0, b1)) => {
                PathEl::QuadTo(a0.lerp(b0, t), a1.lerp(b1, t))
            }
            (PathEl::CurveTo(a0, a1, a2), PathEl::CurveTo(b0, b1, b2)) => {
                PathEl::CurveTo(a0.lerp(b0, t), a1.lerp(b1, t), a2.lerp(b2, t))
            }
            (PathEl::ClosePath, PathEl::ClosePath) => PathEl::ClosePath,
            _ => return None,
        };
        out.push(el);
    }
    Some(BezPath::from_vec(out))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    fn rect_payload(rect: Rect, fill: Color) -> MarkPayload {
        MarkPayload::Rect(RectPayload {
            rect,
            fill: Brush::Solid(fill),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
        })
    }

    #[test]
    fn rect_lerp_is_componentwise() {
        let a = rect_payload(Rect::new(0.0, 0.0, 0.0, 10.0), css::BLACK);
        let b = rect_payload(Rect::new(0.0, 0.0, 20.0, 10.0), css::BLACK);
        let MarkPayload::Rect(mid) = a.lerp(&b, 0.25) else {
            panic!("rect lerp must stay a rect");
        };
        assert!((mid.rect.x1 - 5.0).abs() < 1e-9, "x1 was {}", mid.rect.x1);
        assert_eq!(a.lerp(&b, 1.0), b, "t = 1 must land exactly on the target");
    }

    #[test]
    fn mismatched_paths_jump_to_target() {
        let mut short = BezPath::new();
        short.move_to((0.0, 0.0));
        short.line_to((1.0, 1.0));
        let mut long = short.clone();
        long.line_to((2.0, 0.0));
        let stroke = |path: BezPath| {
            MarkPayload::Path(PathPayload {
                path,
                fill: Brush::Solid(Color::TRANSPARENT),
                stroke: Brush::Solid(css::BLACK),
                stroke_width: 1.0,
                dash: None,
            })
        };
        let a = stroke(short);
        let b = stroke(long);
        assert_eq!(a.lerp(&b, 0.1), b, "structural mismatch snaps to target");
    }

    #[test]
    fn circle_bounds_cover_radius() {
        let c = MarkPayload::Circle(CirclePayload {
            center: Point::new(10.0, 10.0),
            radius: 3.0,
            fill: Brush::Solid(css::STEEL_BLUE),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
        });
        assert_eq!(c.bounds(), Some(Rect::new(7.0, 7.0, 13.0, 13.0)), "circle bounds");
    }
}
