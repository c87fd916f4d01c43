// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] is one type with an `orient` of top, bottom, left or right, laid out the way
//! d3's axis component does it: a domain path with outer ticks, inner tick lines, and labels
//! offset by `tick_size_inner + tick_padding`. Tick and label marks are keyed by tick value (or
//! category) so an axis redrawn over a new domain keeps the ticks that survive.

use std::sync::Arc;

use figkit_core::{GroupId, Mark, TextAnchor, TextBaseline};
use kurbo::{BezPath, Point, Vec2};
use peniko::Brush;
use peniko::color::palette::css;

use crate::format::format_tick;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBand, ScaleLinear, ScalePoint};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Horizontal axis with ticks pointing up.
    Top,
    /// Horizontal axis with ticks pointing down.
    Bottom,
    /// Vertical axis with ticks pointing left.
    Left,
    /// Vertical axis with ticks pointing right.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `+1` when ticks point down or right, `-1` otherwise.
    fn k(self) -> f64 {
        match self {
            Self::Bottom | Self::Right => 1.0,
            Self::Top | Self::Left => -1.0,
        }
    }
}

/// The instantiated scale an axis draws.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    /// Numeric ticks.
    Linear(ScaleLinear),
    /// One tick per band, at the band center.
    Band(ScaleBand),
    /// One tick per point.
    Point(ScalePoint),
}

impl From<ScaleLinear> for AxisScale {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleBand> for AxisScale {
    fn from(value: ScaleBand) -> Self {
        Self::Band(value)
    }
}

impl From<ScalePoint> for AxisScale {
    fn from(value: ScalePoint) -> Self {
        Self::Point(value)
    }
}

type TickFormatter = Arc<dyn Fn(f64, f64) -> String>;
type CategoryFormatter = Arc<dyn Fn(&str) -> String>;

/// One resolved tick: identity key, position along the axis and label text.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Stable key (tick value or category).
    pub key: String,
    /// Position along the axis in scene coordinates.
    pub pos: f64,
    /// Label text.
    pub label: String,
}

/// An axis specification: scale, orientation and d3-like tick geometry.
#[derive(Clone)]
pub struct AxisSpec {
    /// Group the generated marks belong to.
    pub group: GroupId,
    /// Axis placement.
    pub orient: AxisOrient,
    /// The scale to draw.
    pub scale: AxisScale,
    /// Cross-axis position of the domain line (y for horizontal axes, x for vertical ones).
    pub offset: f64,
    /// Approximate number of numeric ticks.
    pub tick_count: usize,
    /// Length of the inner tick lines.
    pub tick_size_inner: f64,
    /// Length of the domain path end ticks; `0` draws a straight line.
    pub tick_size_outer: f64,
    /// Gap between a tick line and its label.
    pub tick_padding: f64,
    /// When set, every other tick gets no label and a tick of length `minor_tick_size`.
    pub alternate_labels: bool,
    /// Tick length of unlabeled ticks when `alternate_labels` is set.
    pub minor_tick_size: f64,
    /// Label rotation in degrees, around the tick origin.
    pub label_angle: f64,
    /// Overrides the orient-derived label anchor.
    pub label_anchor: Option<TextAnchor>,
    /// Whether to draw the domain path.
    pub show_domain: bool,
    /// Label font size.
    pub font_size: f64,
    /// Stroke for the domain and ticks, fill for the labels.
    pub color: Brush,
    tick_formatter: Option<TickFormatter>,
    category_formatter: Option<CategoryFormatter>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("group", &self.group)
            .field("orient", &self.orient)
            .field("scale", &self.scale)
            .field("offset", &self.offset)
            .field("tick_count", &self.tick_count)
            .field("tick_size_inner", &self.tick_size_inner)
            .field("tick_size_outer", &self.tick_size_outer)
            .field("tick_padding", &self.tick_padding)
            .field("alternate_labels", &self.alternate_labels)
            .field("minor_tick_size", &self.minor_tick_size)
            .field("label_angle", &self.label_angle)
            .field("label_anchor", &self.label_anchor)
            .field("show_domain", &self.show_domain)
            .field("font_size", &self.font_size)
            .field("color", &self.color)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .field("category_formatter", &self.category_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates an axis with d3's defaults: 10 ticks, tick sizes 6, padding 3, 10px labels.
    pub fn new(
        group: GroupId,
        orient: AxisOrient,
        scale: impl Into<AxisScale>,
        offset: f64,
    ) -> Self {
        Self {
            group,
            orient,
            scale: scale.into(),
            offset,
            tick_count: 10,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            alternate_labels: false,
            minor_tick_size: 3.5,
            label_angle: 0.0,
            label_anchor: None,
            show_domain: true,
            font_size: 10.0,
            color: Brush::Solid(css::BLACK),
            tick_formatter: None,
            category_formatter: None,
        }
    }

    /// A bottom axis whose domain line sits at `y`.
    pub fn bottom(group: GroupId, scale: impl Into<AxisScale>, y: f64) -> Self {
        Self::new(group, AxisOrient::Bottom, scale, y)
    }

    /// A top axis whose domain line sits at `y`.
    pub fn top(group: GroupId, scale: impl Into<AxisScale>, y: f64) -> Self {
        Self::new(group, AxisOrient::Top, scale, y)
    }

    /// A left axis whose domain line sits at `x`.
    pub fn left(group: GroupId, scale: impl Into<AxisScale>, x: f64) -> Self {
        Self::new(group, AxisOrient::Left, scale, x)
    }

    /// A right axis whose domain line sits at `x`.
    pub fn right(group: GroupId, scale: impl Into<AxisScale>, x: f64) -> Self {
        Self::new(group, AxisOrient::Right, scale, x)
    }

    /// Sets the approximate numeric tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the outer tick size.
    pub fn with_tick_size_outer(mut self, size: f64) -> Self {
        self.tick_size_outer = size;
        self
    }

    /// Sets the inner tick size.
    pub fn with_tick_size_inner(mut self, size: f64) -> Self {
        self.tick_size_inner = size;
        self
    }

    /// Labels only every other tick; unlabeled ticks get length `minor_tick_size`.
    pub fn with_alternate_labels(mut self, alternate: bool) -> Self {
        self.alternate_labels = alternate;
        self
    }

    /// Rotates labels by `angle` degrees around their tick.
    pub fn with_label_angle(mut self, angle: f64) -> Self {
        self.label_angle = angle;
        self
    }

    /// Overrides the label anchor.
    pub fn with_label_anchor(mut self, anchor: TextAnchor) -> Self {
        self.label_anchor = Some(anchor);
        self
    }

    /// Enables or disables the domain path.
    pub fn with_domain(mut self, show: bool) -> Self {
        self.show_domain = show;
        self
    }

    /// Formats numeric labels with `f(value, step)`.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Formats categorical labels with `f(category)`.
    pub fn with_category_formatter(mut self, f: impl Fn(&str) -> String + 'static) -> Self {
        self.category_formatter = Some(Arc::new(f));
        self
    }

    fn category_label(&self, category: &str) -> String {
        match &self.category_formatter {
            Some(f) => f(category),
            None => category.to_owned(),
        }
    }

    /// The ticks this axis draws, in domain order.
    pub fn ticks(&self) -> Vec<Tick> {
        match &self.scale {
            AxisScale::Linear(s) => {
                let step = s.tick_step(self.tick_count);
                s.ticks(self.tick_count)
                    .into_iter()
                    .map(|v| Tick {
                        key: format!("{v}"),
                        pos: s.map(v),
                        label: match &self.tick_formatter {
                            Some(f) => f(v, step),
                            None => format_tick(v, step),
                        },
                    })
                    .collect()
            }
            AxisScale::Band(s) => s
                .categories()
                .iter()
                .filter_map(|c| {
                    s.center(c).map(|pos| Tick {
                        key: c.clone(),
                        pos,
                        label: self.category_label(c),
                    })
                })
                .collect(),
            AxisScale::Point(s) => s
                .categories()
                .iter()
                .filter_map(|c| {
                    s.position(c).map(|pos| Tick {
                        key: c.clone(),
                        pos,
                        label: self.category_label(c),
                    })
                })
                .collect(),
        }
    }

    fn range(&self) -> (f64, f64) {
        match &self.scale {
            AxisScale::Linear(s) => s.range(),
            AxisScale::Band(s) => s.range(),
            AxisScale::Point(s) => s.range(),
        }
    }

    /// Converts (along, across) axis coordinates to a scene point.
    fn point(&self, along: f64, across: f64) -> Point {
        if self.orient.is_horizontal() {
            Point::new(along, self.offset + across)
        } else {
            Point::new(self.offset + across, along)
        }
    }

    fn label_style(&self) -> (TextAnchor, TextBaseline) {
        let (anchor, baseline) = match self.orient {
            AxisOrient::Top => (TextAnchor::Middle, TextBaseline::Alphabetic),
            AxisOrient::Bottom => (TextAnchor::Middle, TextBaseline::Hanging),
            AxisOrient::Left => (TextAnchor::End, TextBaseline::Middle),
            AxisOrient::Right => (TextAnchor::Start, TextBaseline::Middle),
        };
        (self.label_anchor.unwrap_or(anchor), baseline)
    }

    fn domain_path(&self) -> BezPath {
        let (r0, r1) = self.range();
        let outer = self.orient.k() * self.tick_size_outer;
        let mut path = BezPath::new();
        if outer == 0.0 {
            path.move_to(self.point(r0, 0.0));
        } else {
            path.move_to(self.point(r0, outer));
            path.line_to(self.point(r0, 0.0));
        }
        path.line_to(self.point(r1, 0.0));
        if outer != 0.0 {
            path.line_to(self.point(r1, outer));
        }
        path
    }

    /// Generates the domain, tick and label marks.
    pub fn marks(&self) -> Vec<Mark> {
        let k = self.orient.k();
        let (anchor, baseline) = self.label_style();
        let mut out = Vec::new();

        if self.show_domain {
            out.push(
                RuleMarkSpec::from_path(self.group, "domain", self.domain_path())
                    .with_stroke(self.color.clone(), 1.0)
                    .with_z_index(z_order::AXIS_RULES)
                    .mark(),
            );
        }

        for (i, tick) in self.ticks().into_iter().enumerate() {
            let minor = self.alternate_labels && i % 2 == 1;
            let size = if minor {
                self.minor_tick_size
            } else {
                self.tick_size_inner
            };
            let start = self.point(tick.pos, 0.0);
            let end = self.point(tick.pos, k * size);
            out.push(
                RuleMarkSpec::new(self.group, &format!("tick:{}", tick.key), start, end)
                    .with_stroke(self.color.clone(), 1.0)
                    .with_z_index(z_order::AXIS_RULES)
                    .mark(),
            );
            if minor {
                continue;
            }

            let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;
            let mut offset = self.point(0.0, k * spacing) - self.point(0.0, 0.0);
            if self.label_angle != 0.0 {
                offset = rotate(offset, self.label_angle);
            }
            out.push(
                TextMarkSpec::new(self.group, &format!("label:{}", tick.key), start + offset)
                    .with_text(tick.label)
                    .with_font_size(self.font_size)
                    .with_anchor(anchor)
                    .with_baseline(baseline)
                    .with_angle(self.label_angle)
                    .with_fill(self.color.clone())
                    .with_z_index(z_order::AXIS_LABELS)
                    .mark(),
            );
        }
        out
    }
}

fn rotate(v: Vec2, degrees: f64) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
