// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Beeswarm plots: one lane per category, points pulled toward their value and kept apart.

use figkit_core::{GroupId, Mark, Transition};
use figkit_layout::{HitIndex, SwarmLayout, SwarmTarget, Voronoi};
use figkit_stats::EmptyInputError;
use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::axis::AxisSpec;
use crate::circle_mark::CircleMarkSpec;
use crate::frame::Frame;
use crate::layer::Layer;
use crate::plot::{LABEL_FONT_SIZE, label};
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec};
use crate::z_order;

/// One point of a swarm plot.
#[derive(Clone, Debug, PartialEq)]
pub struct SwarmPoint {
    /// Stable key of the bound record, e.g. `"B1-comet"`.
    pub key: String,
    /// Lane category.
    pub lane: String,
    /// Value along the x axis.
    pub value: f64,
}

impl SwarmPoint {
    /// Creates a point.
    pub fn new(key: impl Into<String>, lane: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            lane: lane.into(),
            value,
        }
    }
}

/// Scales, positions and hover structures of a laid-out swarm.
#[derive(Debug)]
pub struct SwarmRender {
    /// Value scale.
    pub x: ScaleLinear,
    /// Lane scale (zero-width bands).
    pub lanes: ScaleBand,
    /// Laid-out centers, one per input point.
    pub positions: Vec<Point>,
    /// Hover cells around the positions.
    pub voronoi: Voronoi,
    /// Pointer resolution over the same sites as `voronoi`.
    pub hit: HitIndex,
}

impl SwarmRender {
    /// Index of the point whose hover cell contains `p`.
    pub fn hit(&self, p: Point) -> Option<usize> {
        self.hit.nearest(p)
    }

    /// The hover cells as outlined paths, keyed like the points.
    pub fn cell_layer(&self, group: GroupId, points: &[SwarmPoint]) -> Layer {
        let mut layer = Layer::new(group, Transition::NONE);
        for (i, point) in points.iter().enumerate() {
            if let Some(path) = self.voronoi.to_path(i) {
                layer.push(
                    RuleMarkSpec::from_path(group, &point.key, path)
                        .with_stroke(css::LIGHT_GRAY, 0.5)
                        .with_z_index(z_order::HIT_AREAS)
                        .mark(),
                );
            }
        }
        layer
    }
}

/// A beeswarm over categorical lanes.
#[derive(Clone, Debug)]
pub struct SwarmPlot {
    /// Root group; points, axes and labels use child groups.
    pub group: GroupId,
    /// Viewport.
    pub frame: Frame,
    /// Lanes bottom to top as `(category, display name)`.
    pub lanes: Vec<(String, String)>,
    /// Relaxation settings; `layout.radius` is also the drawn radius.
    pub layout: SwarmLayout,
    /// Lines of the x axis title.
    pub x_label: Vec<String>,
}

impl SwarmPlot {
    /// Creates a swarm plot with the default layout.
    pub fn new(group: GroupId, frame: Frame, lanes: Vec<(String, String)>) -> Self {
        Self {
            group,
            frame,
            lanes,
            layout: SwarmLayout::default(),
            x_label: Vec::new(),
        }
    }

    /// Sets the relaxation settings.
    pub fn with_layout(mut self, layout: SwarmLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the x axis title lines.
    pub fn with_x_label<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.x_label = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Group of the point circles.
    pub fn point_group(&self) -> GroupId {
        self.group.child("points")
    }

    /// Group of the axes.
    pub fn axis_group(&self) -> GroupId {
        self.group.child("axes")
    }

    /// Group of the axis titles.
    pub fn label_group(&self) -> GroupId {
        self.group.child("labels")
    }

    /// Group of the outlined hover cells.
    pub fn cell_group(&self) -> GroupId {
        self.group.child("cells")
    }

    /// The area that resolves pointer positions: the full width, down to `margin.top` below
    /// the plot.
    pub fn hit_extent(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.frame.width,
            self.frame.plot().y1 + self.frame.margin.top,
        )
    }

    /// Lays out `points`.
    pub fn layout(&self, points: &[SwarmPoint]) -> Result<SwarmRender, EmptyInputError> {
        let plot = self.frame.plot();
        let x = ScaleLinearSpec::from_values(points.iter().map(|p| p.value))?
            .with_nice(true)
            .instantiate((plot.x0, plot.x1));
        let lanes = ScaleBandSpec::new(self.lanes.iter().map(|(k, _)| k.clone()))
            .with_padding(1.0)
            .instantiate((plot.y1, plot.y0));

        let targets: Vec<SwarmTarget> = points
            .iter()
            .map(|p| {
                let lane = lanes.center(&p.lane).unwrap_or(plot.center().y);
                SwarmTarget::new(x.map(p.value), lane)
            })
            .collect();
        let positions = self.layout.run(&targets);
        let extent = self.hit_extent();
        Ok(SwarmRender {
            voronoi: Voronoi::new(extent, &positions),
            hit: HitIndex::new(extent, &positions),
            x,
            lanes,
            positions,
        })
    }

    /// Circles at the laid-out positions, painted by `paint(index, point) -> (fill, stroke)`.
    pub fn point_layer(
        &self,
        points: &[SwarmPoint],
        render: &SwarmRender,
        transition: Transition,
        paint: impl Fn(usize, &SwarmPoint) -> (Color, Color),
    ) -> Layer {
        let group = self.point_group();
        let marks: Vec<Mark> = points
            .iter()
            .zip(&render.positions)
            .enumerate()
            .map(|(i, (point, pos))| {
                let (fill, stroke) = paint(i, point);
                CircleMarkSpec::new(group, &point.key, *pos, self.layout.radius)
                    .with_fill(fill)
                    .with_stroke(stroke, 1.0)
                    .mark()
            })
            .collect();
        Layer::with_marks(group, marks, transition)
    }

    /// Value axes above and below the plot and the lane axis on the left.
    pub fn axis_layer(&self, render: &SwarmRender) -> Layer {
        let group = self.axis_group();
        let plot = self.frame.plot();
        let names = self.lanes.clone();
        let mut layer = Layer::new(group, Transition::NONE);
        layer.extend(
            AxisSpec::bottom(group.child("bottom"), render.x.clone(), plot.y1)
                .with_tick_size_outer(0.0)
                .marks(),
        );
        layer.extend(
            AxisSpec::top(group.child("top"), render.x.clone(), plot.y0)
                .with_tick_size_outer(0.0)
                .marks(),
        );
        layer.extend(
            AxisSpec::left(group.child("left"), render.lanes.clone(), plot.x0)
                .with_category_formatter(move |c| {
                    names
                        .iter()
                        .find(|(k, _)| k == c)
                        .map_or_else(|| c.to_owned(), |(_, name)| name.clone())
                })
                .marks(),
        );
        // Child groups keep tick ids distinct; the layer owns them all.
        for m in &mut layer.marks {
            m.group = group;
        }
        layer
    }

    /// The x axis title, centered below the plot.
    pub fn label_layer(&self) -> Layer {
        let group = self.label_group();
        let plot = self.frame.plot();
        let y = plot.y1 + self.frame.margin.top + 5.0;
        let marks = self
            .x_label
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let pos = Point::new(plot.center().x, y + i as f64 * 1.1 * LABEL_FONT_SIZE);
                label(group, &format!("x:{i}"), pos, line).mark()
            })
            .collect();
        Layer::with_marks(group, marks, Transition::NONE)
    }
}
