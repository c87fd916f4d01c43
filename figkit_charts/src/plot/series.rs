// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small-multiple line plots: one curve per method, optionally with a spread band and dots.

use figkit_core::{GroupId, RenderPass, Transition};
use kurbo::Point;
use peniko::Color;

use crate::area_mark::AreaMarkSpec;
use crate::axis::AxisSpec;
use crate::circle_mark::CircleMarkSpec;
use crate::curve::Curve;
use crate::frame::Frame;
use crate::layer::Layer;
use crate::line_mark::{LineMarkSpec, StrokeStyle};
use crate::plot::{LABEL_FONT_SIZE, guide_transition, label};
use crate::scale::{ScaleLinear, ScaleLinearSpec};

/// One sample of a series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoint {
    /// Stable key of the sample within its series, e.g. the threshold.
    pub key: String,
    /// Position along x.
    pub x: f64,
    /// Central value.
    pub y: f64,
    /// Half-width of the band around `y`, if any.
    pub spread: Option<f64>,
}

impl SeriesPoint {
    /// A sample without spread, keyed by its x value.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            key: format!("{x}"),
            x,
            y,
            spread: None,
        }
    }

    /// Sets the band half-width.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = Some(spread);
        self
    }
}

/// One curve.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Stable key, e.g. the method name.
    pub key: String,
    /// Stroke and fill color.
    pub color: Color,
    /// Samples in x order.
    pub points: Vec<SeriesPoint>,
}

/// A line plot with fixed domains, so switching slices moves the curves but not the axes.
#[derive(Clone, Debug)]
pub struct SeriesPlot {
    /// Root group; bands, lines, dots, axes and titles use child groups.
    pub group: GroupId,
    /// Viewport.
    pub frame: Frame,
    /// x domain.
    pub x: ScaleLinearSpec,
    /// y domain.
    pub y: ScaleLinearSpec,
    /// x axis title.
    pub x_label: String,
    /// y axis title.
    pub y_label: String,
    /// Curve interpolation.
    pub curve: Curve,
    /// Line width.
    pub stroke_width: f64,
    /// Radius of the sample dots; `None` draws no dots.
    pub dot_radius: Option<f64>,
    /// Opacity of the spread band.
    pub band_opacity: f32,
    /// Timing of rebinds.
    pub transition: Transition,
}

impl SeriesPlot {
    /// Creates a plot over the given domains with monotone curves and 1000ms rebinds.
    pub fn new(group: GroupId, frame: Frame, x: ScaleLinearSpec, y: ScaleLinearSpec) -> Self {
        Self {
            group,
            frame,
            x,
            y,
            x_label: String::new(),
            y_label: String::new(),
            curve: Curve::MonotoneX,
            stroke_width: 1.5,
            dot_radius: None,
            band_opacity: 0.25,
            transition: Transition::millis(1000.0),
        }
    }

    /// Sets both axis titles.
    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    /// Draws a dot of `radius` at every sample.
    pub fn with_dots(mut self, radius: f64) -> Self {
        self.dot_radius = Some(radius);
        self
    }

    /// Sets the rebind transition.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    /// Group of the spread bands.
    pub fn band_group(&self) -> GroupId {
        self.group.child("bands")
    }

    /// Group of the curves.
    pub fn line_group(&self) -> GroupId {
        self.group.child("lines")
    }

    /// Group of the dots.
    pub fn dot_group(&self) -> GroupId {
        self.group.child("dots")
    }

    /// Group of axes and titles.
    pub fn axis_group(&self) -> GroupId {
        self.group.child("axes")
    }

    /// The instantiated `(x, y)` scales.
    pub fn scales(&self) -> (ScaleLinear, ScaleLinear) {
        let plot = self.frame.plot();
        (
            self.x.instantiate((plot.x0, plot.x1)),
            self.y.instantiate((plot.y1, plot.y0)),
        )
    }

    /// Axes with alternating labels plus both titles.
    pub fn axis_layer(&self) -> Layer {
        let group = self.axis_group();
        let plot = self.frame.plot();
        let (x, y) = self.scales();
        let mut layer = Layer::new(group, Transition::NONE);
        layer.extend(
            AxisSpec::bottom(group.child("x"), x, plot.y1)
                .with_alternate_labels(true)
                .marks(),
        );
        layer.extend(
            AxisSpec::left(group.child("y"), y, plot.x0)
                .with_alternate_labels(true)
                .marks(),
        );
        let bottom = plot.y1 + self.frame.margin.top + 5.0;
        let x_title = Point::new(plot.center().x, bottom);
        layer.push(label(group, "title:x", x_title, &self.x_label).mark());
        // Rotated titles read bottom to top; shift by one em so the glyphs stay in the viewport.
        layer.push(
            label(
                group,
                "title:y",
                Point::new(LABEL_FONT_SIZE, plot.center().y),
                &self.y_label,
            )
            .with_angle(-90.0)
            .mark(),
        );
        for m in &mut layer.marks {
            m.group = group;
        }
        layer
    }

    /// Band, curve and dot layers for `series`.
    ///
    /// Series without spread get no band. A series that is missing from a later slice, or has
    /// no samples in it, exits.
    pub fn series_layers(&self, series: &[Series], pass: RenderPass) -> Vec<Layer> {
        let transition = guide_transition(pass, self.transition);
        let (x, y) = self.scales();
        let at = |p: &SeriesPoint, v: f64| Point::new(x.map(p.x), y.map(v));

        let mut bands = Layer::new(self.band_group(), transition);
        let mut lines = Layer::new(self.line_group(), transition);
        let mut dots = Layer::new(self.dot_group(), transition);
        for s in series.iter().filter(|s| !s.points.is_empty()) {
            let spread: Option<Vec<f64>> = s.points.iter().map(|p| p.spread).collect();
            if let Some(spread) = spread {
                let top: Vec<Point> = s
                    .points
                    .iter()
                    .zip(&spread)
                    .map(|(p, d)| at(p, p.y + d))
                    .collect();
                let bottom: Vec<Point> = s
                    .points
                    .iter()
                    .zip(&spread)
                    .map(|(p, d)| at(p, p.y - d))
                    .collect();
                bands.push(
                    AreaMarkSpec::new(self.band_group(), &s.key, top, bottom)
                        .with_curve(self.curve)
                        .with_fill(s.color.with_alpha(self.band_opacity))
                        .mark(),
                );
            }

            let points: Vec<Point> = s.points.iter().map(|p| at(p, p.y)).collect();
            lines.push(
                LineMarkSpec::new(self.line_group(), &s.key, points.clone())
                    .with_curve(self.curve)
                    .with_stroke(StrokeStyle::solid(s.color, self.stroke_width))
                    .mark(),
            );

            if let Some(radius) = self.dot_radius {
                for (p, center) in s.points.iter().zip(points) {
                    dots.push(
                        CircleMarkSpec::new(
                            self.dot_group(),
                            &format!("{}:{}", s.key, p.key),
                            center,
                            radius,
                        )
                        .with_fill(s.color)
                        .mark(),
                    );
                }
            }
        }
        vec![bands, lines, dots]
    }

    /// Every layer, axes first.
    pub fn render(&self, series: &[Series], pass: RenderPass) -> Vec<Layer> {
        let mut layers = vec![self.axis_layer()];
        layers.extend(self.series_layers(series, pass));
        layers
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use figkit_core::{MarkId, MarkPayload, Scene};
    use peniko::color::palette::css;

    use super::*;
    use crate::frame::Margin;
    use crate::layer::apply_layers;

    fn plot() -> SeriesPlot {
        SeriesPlot::new(
            GroupId::named("n-correct"),
            Frame::new(300.0, 200.0, Margin::new(30.0, 30.0, 30.0, 40.0)),
            ScaleLinearSpec::new((0.0, 1.0)).with_nice(true),
            ScaleLinearSpec::new((0.0, 2000.0)).with_nice(true),
        )
        .with_labels("PEP Threshold", "Number of Correct Identifications")
        .with_dots(3.0)
    }

    fn series(scale: f64) -> Vec<Series> {
        let points = |key: &str, color| Series {
            key: key.into(),
            color,
            points: (0..5)
                .map(|i| {
                    let t = f64::from(i) / 4.0;
                    SeriesPoint::new(t, scale * 1500.0 * t).with_spread(50.0)
                })
                .collect(),
        };
        vec![points("IDPEP", css::ORANGE), points("Percolator", css::STEEL_BLUE)]
    }

    #[test]
    fn each_method_gets_band_line_and_dots() {
        let p = plot();
        let layers = p.series_layers(&series(1.0), RenderPass::First);
        assert_eq!(layers[0].len(), 2, "one band per method");
        assert_eq!(layers[1].len(), 2, "one line per method");
        assert_eq!(layers[2].len(), 10, "one dot per sample");
        let MarkPayload::Circle(dot) = &layers[2].marks[4].payload else {
            panic!("dots are circles");
        };
        assert_eq!(dot.center, Point::new(270.0, 170.0 - 140.0 * 0.75), "last IDPEP sample");
    }

    #[test]
    fn switching_slices_keeps_the_axes() {
        let p = plot();
        let mut scene = Scene::new();
        apply_layers(&mut scene, p.render(&series(1.0), RenderPass::First), 0.0);
        let tick = MarkId::keyed(p.axis_group().child("y"), "tick:1000");
        let before = scene.get(tick).cloned();
        assert!(before.is_some(), "y tick at 1000");

        let diffs = apply_layers(&mut scene, p.render(&series(0.5), RenderPass::Rebind), 10.0);
        assert!(
            diffs.iter().all(|d| d.id() != tick),
            "axis marks are unchanged"
        );
        let line = MarkId::keyed(p.line_group(), "IDPEP");
        assert!(scene.is_animating(), "curves move");
        scene.settle();
        assert_ne!(scene.get(line), None, "line survives the rebind");
    }
}
