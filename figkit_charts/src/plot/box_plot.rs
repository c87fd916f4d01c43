// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side-by-side box plots of one value per category.

use figkit_core::{GroupId, RenderPass, Transition};
use figkit_stats::{BoxStats, EmptyInputError};
use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::axis::AxisSpec;
use crate::frame::Frame;
use crate::layer::Layer;
use crate::plot::{guide_transition, label};
use crate::rect_mark::RectMarkSpec;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBandSpec, ScaleLinear, ScaleLinearSpec};
use crate::z_order;

/// Box statistics of one category.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxGroup {
    /// Category, e.g. `"Correct"`.
    pub key: String,
    /// Quartiles and whiskers.
    pub stats: BoxStats,
}

impl BoxGroup {
    /// Creates a group.
    pub fn new(key: impl Into<String>, stats: BoxStats) -> Self {
        Self {
            key: key.into(),
            stats,
        }
    }
}

/// Box plots over a fixed category axis.
///
/// Every category gets a box from `q1` to `q3`, a median line, whisker lines out to `min` and
/// `max`, and half-width caps at the whisker ends. Outliers are not drawn.
#[derive(Clone, Debug)]
pub struct BoxPlot {
    /// Root group; boxes, axes and titles use child groups.
    pub group: GroupId,
    /// Viewport.
    pub frame: Frame,
    /// Categories left to right.
    pub categories: Vec<String>,
    /// Box width in pixels.
    pub box_width: f64,
    /// Box fill.
    pub fill: Color,
    /// Categories drawn at half opacity.
    pub faded: Vec<String>,
    /// Timing of rebinds.
    pub transition: Transition,
}

impl BoxPlot {
    /// Creates a box plot with 75px boxes and 800ms rebinds.
    pub fn new<S: Into<String>>(
        group: GroupId,
        frame: Frame,
        categories: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            group,
            frame,
            categories: categories.into_iter().map(Into::into).collect(),
            box_width: 75.0,
            fill: Color::from_rgb8(0xf2, 0xcc, 0x37),
            faded: Vec::new(),
            transition: Transition::millis(800.0),
        }
    }

    /// Draws `category` at half opacity.
    pub fn with_faded(mut self, category: impl Into<String>) -> Self {
        self.faded.push(category.into());
        self
    }

    /// Group of the boxes and whiskers.
    pub fn box_group(&self) -> GroupId {
        self.group.child("boxes")
    }

    /// Group of the axes.
    pub fn axis_group(&self) -> GroupId {
        self.group.child("axes")
    }

    /// Group of the titles.
    pub fn label_group(&self) -> GroupId {
        self.group.child("labels")
    }

    /// The value scale spanning every whisker, rounded to nice bounds.
    pub fn y_scale(&self, groups: &[BoxGroup]) -> Result<ScaleLinear, EmptyInputError> {
        let plot = self.frame.plot();
        let bounds = groups.iter().flat_map(|g| [g.stats.min, g.stats.max]);
        Ok(ScaleLinearSpec::from_values(bounds)?
            .with_nice(true)
            .instantiate((plot.y1, plot.y0)))
    }

    /// Builds the box, axis and title layers.
    ///
    /// `title` is centered above the plot, `y_label` runs along the left edge.
    pub fn render(
        &self,
        groups: &[BoxGroup],
        pass: RenderPass,
        title: &str,
        y_label: &str,
    ) -> Result<Vec<Layer>, EmptyInputError> {
        let plot = self.frame.plot();
        let y = self.y_scale(groups)?;
        let x = ScaleBandSpec::new(self.categories.iter().cloned())
            .with_padding_inner(1.0)
            .with_padding_outer(0.5)
            .instantiate((plot.x0, plot.x1));
        let transition = guide_transition(pass, self.transition);

        let group = self.box_group();
        let half = self.box_width / 2.0;
        let cap = self.box_width / 4.0;
        let mut boxes = Layer::new(group, transition);
        for g in groups {
            let Some(cx) = x.position(&g.key) else {
                continue;
            };
            let s = &g.stats;
            let k = &g.key;
            let fill = if self.faded.contains(k) {
                self.fill.with_alpha(0.5)
            } else {
                self.fill
            };
            let rule = |part: &str, (x0, y0): (f64, f64), (x1, y1): (f64, f64)| {
                RuleMarkSpec::new(
                    group,
                    &format!("{part}:{k}"),
                    Point::new(x0, y0),
                    Point::new(x1, y1),
                )
                .with_stroke(css::BLACK, 1.0)
                .with_z_index(z_order::SERIES_STROKE)
                .mark()
            };
            boxes.push(rule("upper", (cx, y.map(s.q3)), (cx, y.map(s.max))));
            boxes.push(rule("lower", (cx, y.map(s.min)), (cx, y.map(s.q1))));
            boxes.push(
                RectMarkSpec::new(
                    group,
                    &format!("box:{k}"),
                    Rect::new(cx - half, y.map(s.q3), cx + half, y.map(s.q1)),
                )
                .with_fill(fill)
                .with_stroke(css::BLACK, 1.0)
                .mark(),
            );
            let median = y.map(s.median);
            boxes.push(rule("median", (cx - half, median), (cx + half, median)));
            boxes.push(rule("min", (cx - cap, y.map(s.min)), (cx + cap, y.map(s.min))));
            boxes.push(rule("max", (cx - cap, y.map(s.max)), (cx + cap, y.map(s.max))));
        }

        let axes = self.axis_group();
        let mut axis = Layer::new(axes, transition);
        axis.extend(AxisSpec::bottom(axes.child("x"), x, plot.y1).marks());
        axis.extend(AxisSpec::left(axes.child("y"), y, plot.x0).marks());
        for m in &mut axis.marks {
            m.group = axes;
        }

        let labels = self.label_group();
        let mut titles = Layer::new(labels, transition);
        let top = self.frame.at(plot.width() / 2.0, -20.0);
        titles.push(label(labels, "title", top, title).mark());
        titles.push(
            label(labels, "y", self.frame.at(-40.0, plot.height() / 2.0), y_label)
                .with_angle(-90.0)
                .mark(),
        );

        Ok(vec![boxes, axis, titles])
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use figkit_core::{MarkId, MarkPayload, Scene};

    use super::*;
    use crate::frame::Margin;
    use crate::layer::apply_layers;

    fn plot() -> BoxPlot {
        BoxPlot::new(
            GroupId::named("box"),
            Frame::new(300.0, 350.0, Margin::new(50.0, 30.0, 50.0, 50.0)),
            ["Incorrect", "Correct"],
        )
        .with_faded("Incorrect")
    }

    fn groups() -> Vec<BoxGroup> {
        vec![
            BoxGroup::new(
                "Correct",
                BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).expect("non-empty"),
            ),
            BoxGroup::new(
                "Incorrect",
                BoxStats::from_values(&[-2.0, -1.0, 0.0, 1.0]).expect("non-empty"),
            ),
        ]
    }

    fn rect(scene: &Scene, id: MarkId) -> Rect {
        match scene.get(id) {
            Some(MarkPayload::Rect(r)) => r.rect,
            other => panic!("expected a box, got {other:?}"),
        }
    }

    #[test]
    fn boxes_sit_on_their_categories() {
        let p = plot();
        let mut scene = Scene::new();
        let layers = p
            .render(&groups(), RenderPass::First, "Comet", "Sibling Scores")
            .expect("non-empty");
        apply_layers(&mut scene, layers, 0.0);
        let correct = rect(&scene, MarkId::keyed(p.box_group(), "box:Correct"));
        let incorrect = rect(&scene, MarkId::keyed(p.box_group(), "box:Incorrect"));
        assert_eq!(incorrect.center().x, 50.0 + 55.0, "first category");
        assert_eq!(correct.center().x, 50.0 + 165.0, "second category");
        assert_eq!(correct.width(), 75.0, "box width");
        assert!(incorrect.y0 > correct.y0, "higher q3 draws higher");
    }

    #[test]
    fn rebinds_animate_toward_the_new_stats() {
        let p = plot();
        let mut scene = Scene::new();
        let first = p
            .render(&groups(), RenderPass::First, "Comet", "Sibling Scores")
            .expect("non-empty");
        apply_layers(&mut scene, first, 0.0);
        let id = MarkId::keyed(p.box_group(), "box:Correct");
        let before = rect(&scene, id);

        let mut other = groups();
        other[0].stats = BoxStats::from_values(&[0.0, 0.5, 1.0]).expect("non-empty");
        let next = p
            .render(&other, RenderPass::Rebind, "Comet", "Sibling Ions")
            .expect("non-empty");
        apply_layers(&mut scene, next, 100.0);
        assert_eq!(rect(&scene, id), before, "transitions start from the old box");
        assert!(scene.is_animating(), "800ms rebind");
        scene.settle();
        assert_ne!(rect(&scene, id), before, "settles on the new box");
    }

    #[test]
    fn empty_input_has_no_scale() {
        assert!(
            plot().render(&[], RenderPass::First, "", "").is_err(),
            "no whiskers to span"
        );
    }
}
