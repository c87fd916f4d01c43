// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Correlation matrix drawn as sized, shaded circles.

use figkit_core::{GroupId, TextAnchor, TextBaseline, Transition};
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use peniko::color::palette::css;

use crate::axis::AxisSpec;
use crate::circle_mark::CircleMarkSpec;
use crate::color::interpolate_blues;
use crate::format::format_fixed;
use crate::frame::Frame;
use crate::layer::Layer;
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::rect_mark::RectMarkSpec;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBand, ScaleBandSpec};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Correlation of two features.
#[derive(Clone, Debug, PartialEq)]
pub struct Correlation {
    /// Feature on the x axis.
    pub a: String,
    /// Feature on the y axis.
    pub b: String,
    /// Pearson correlation coefficient in `[0, 1]`.
    pub value: f64,
}

impl Correlation {
    /// Creates a matrix cell.
    pub fn new(a: impl Into<String>, b: impl Into<String>, value: f64) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            value,
        }
    }

    /// Stable key of the cell.
    pub fn key(&self) -> String {
        format!("{}-{}", self.a, self.b)
    }
}

/// A square outlined around the block from feature `from` to feature `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlight {
    /// Feature at one corner.
    pub from: String,
    /// Feature at the opposite corner.
    pub to: String,
}

impl Highlight {
    /// Creates a highlight.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A feature-by-feature correlation matrix with a size legend.
#[derive(Clone, Debug)]
pub struct CorrelationPlot {
    /// Root group.
    pub group: GroupId,
    /// Viewport.
    pub frame: Frame,
    /// Features in axis order as `(key, display name)`; the first sits at the bottom.
    pub features: Vec<(String, String)>,
    /// Radius of a circle with correlation 1.
    pub radius: f64,
    /// Highlighted blocks.
    pub highlights: Vec<Highlight>,
    /// Space between a highlight and the circles it encloses.
    pub highlight_padding: f64,
    /// Highlight stroke and fill color.
    pub highlight_color: Color,
    /// Correlations shown in the legend, largest first.
    pub legend_steps: Vec<f64>,
    /// Distance of the legend center from the plot's right edge.
    pub legend_offset: f64,
}

impl CorrelationPlot {
    /// Creates a matrix with 30px circles and a five-step legend.
    pub fn new(group: GroupId, frame: Frame, features: Vec<(String, String)>) -> Self {
        Self {
            group,
            frame,
            features,
            radius: 30.0,
            highlights: Vec::new(),
            highlight_padding: 10.0,
            highlight_color: Color::from_rgb8(0xfc, 0xba, 0x03),
            legend_steps: vec![1.0, 0.8, 0.6, 0.4, 0.2],
            legend_offset: 135.0,
        }
    }

    /// Outlines the block spanned by `from` and `to`.
    pub fn with_highlight(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.highlights.push(Highlight::new(from, to));
        self
    }

    /// Group of the matrix circles.
    pub fn cell_group(&self) -> GroupId {
        self.group.child("cells")
    }

    /// Group of the axes.
    pub fn axis_group(&self) -> GroupId {
        self.group.child("axes")
    }

    /// Group of the highlight boxes.
    pub fn highlight_group(&self) -> GroupId {
        self.group.child("highlights")
    }

    /// Group of the legend.
    pub fn legend_group(&self) -> GroupId {
        self.group.child("legend")
    }

    /// Group of the hover ring and tooltip.
    pub fn hover_group(&self) -> GroupId {
        self.group.child("hover")
    }

    /// The feature scale in plot-local coordinates, bottom to top.
    ///
    /// Both axes share it, so the matrix is square whatever the plot's aspect.
    pub fn scale(&self) -> ScaleBand {
        self.feature_scale(0.0)
    }

    fn feature_scale(&self, origin: f64) -> ScaleBand {
        ScaleBandSpec::new(self.features.iter().map(|(k, _)| k.clone()))
            .with_padding(1.0)
            .instantiate((origin + self.frame.inner_height(), origin))
    }

    fn pretty(&self, feature: &str) -> String {
        display_name(&self.features, feature)
    }

    /// Center of the cell for `cell`, in viewport coordinates.
    pub fn center(&self, cell: &Correlation) -> Option<Point> {
        let s = self.scale();
        Some(self.frame.at(s.position(&cell.a)?, s.position(&cell.b)?))
    }

    /// Index of the circle under `p`.
    pub fn hit(&self, data: &[Correlation], p: Point) -> Option<usize> {
        data.iter()
            .enumerate()
            .filter_map(|(i, c)| {
                let d = self.center(c)?.distance(p);
                (d <= c.value * self.radius).then_some((i, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Axes, highlights, circles and legend.
    pub fn render(&self, data: &[Correlation]) -> Vec<Layer> {
        vec![
            self.axis_layer(),
            self.highlight_layer(),
            self.cell_layer(data),
            self.legend_layer(),
        ]
    }

    fn axis_layer(&self) -> Layer {
        let group = self.axis_group();
        let plot = self.frame.plot();
        let (left, top) = (self.features.clone(), self.features.clone());
        let mut layer = Layer::new(group, Transition::NONE);
        layer.extend(
            AxisSpec::left(group.child("y"), self.feature_scale(plot.y0), plot.x0)
                .with_category_formatter(move |c| display_name(&left, c))
                .marks(),
        );
        layer.extend(
            AxisSpec::top(group.child("x"), self.feature_scale(plot.x0), plot.y0)
                .with_category_formatter(move |c| display_name(&top, c))
                .with_label_angle(-45.0)
                .with_label_anchor(TextAnchor::Start)
                .marks(),
        );
        for m in &mut layer.marks {
            m.group = group;
        }
        layer
    }

    fn highlight_layer(&self) -> Layer {
        let group = self.highlight_group();
        let s = self.scale();
        let pad = self.radius + self.highlight_padding;
        let mut layer = Layer::new(group, Transition::NONE);
        for h in &self.highlights {
            let (Some(from), Some(to)) = (s.position(&h.from), s.position(&h.to)) else {
                continue;
            };
            let (lo, hi) = (from.min(to) - pad, from.max(to) + pad);
            layer.push(
                RectMarkSpec::new(
                    group,
                    &format!("{}-{}", h.from, h.to),
                    Rect::from_points(self.frame.at(lo, lo), self.frame.at(hi, hi)),
                )
                .with_fill(self.highlight_color.with_alpha(0.1))
                .with_stroke(self.highlight_color, 3.0)
                .with_z_index(z_order::HIGHLIGHTS)
                .mark(),
            );
        }
        layer
    }

    fn cell_layer(&self, data: &[Correlation]) -> Layer {
        let group = self.cell_group();
        let mut layer = Layer::new(group, Transition::NONE);
        for cell in data {
            let Some(center) = self.center(cell) else {
                continue;
            };
            layer.push(
                CircleMarkSpec::new(group, &cell.key(), center, cell.value.max(0.0) * self.radius)
                    .with_fill(interpolate_blues(cell.value))
                    .mark(),
            );
        }
        layer
    }

    fn legend_layer(&self) -> Layer {
        let group = self.legend_group();
        let r = self.radius;
        let h = self.frame.inner_height();
        let x = self.frame.inner_width() + self.legend_offset;
        let mut layer = Layer::new(group, Transition::NONE);

        for (i, line) in ["Pearson's", "Correlation", "Coefficient"].iter().enumerate() {
            let pos = self.frame.at(x, h / 4.0 - r - 40.0 + 12.0 * i as f64);
            layer.push(
                TextMarkSpec::new(group, &format!("title:{i}"), pos)
                    .with_text(*line)
                    .with_anchor(TextAnchor::Middle)
                    .with_z_index(z_order::LEGEND_LABELS)
                    .mark(),
            );
        }

        for &corr in &self.legend_steps {
            let key = format_fixed(corr, 1);
            layer.push(
                CircleMarkSpec::new(
                    group,
                    &format!("swatch:{key}"),
                    self.frame.at(x, h / 4.0 + r - corr * r),
                    corr * r,
                )
                .with_fill(interpolate_blues(corr))
                .with_z_index(z_order::LEGEND_SWATCHES)
                .mark(),
            );
            let y = h / 4.0 + r - 2.0 * corr * r;
            let end = x + 5.0 + r;
            layer.push(
                TextMarkSpec::new(group, &format!("label:{key}"), self.frame.at(end, y))
                    .with_text(key.clone())
                    .with_z_index(z_order::LEGEND_LABELS)
                    .mark(),
            );
            layer.push(
                RuleMarkSpec::new(
                    group,
                    &format!("rule:{key}"),
                    self.frame.at(x, y),
                    self.frame.at(end, y),
                )
                .with_stroke(css::BLACK, 1.0)
                .with_dash(4.0)
                .with_z_index(z_order::LEGEND_LABELS)
                .mark(),
            );
        }
        layer
    }

    /// The hover ring and tooltip for `cell`, or an empty layer that clears them.
    pub fn hover_layer(&self, cell: Option<&Correlation>) -> Layer {
        let group = self.hover_group();
        let mut layer = Layer::new(group, Transition::NONE);
        let Some((cell, center)) = cell.and_then(|c| Some((c, self.center(c)?))) else {
            return layer;
        };
        let color = interpolate_blues(cell.value);
        let r = cell.value.max(0.0) * self.radius;
        layer.push(
            CircleMarkSpec::new(group, "ring", center, r + 3.0)
                .with_fill(Color::TRANSPARENT)
                .with_stroke(color, 2.0)
                .with_z_index(z_order::INDICATORS)
                .mark(),
        );

        let text = format!(
            "Correlation between {} and {}: {}",
            self.pretty(&cell.b),
            self.pretty(&cell.a),
            format_fixed(cell.value, 2),
        );
        let font_size = 10.0;
        let pos = Point::new(center.x, center.y - r - 12.0);
        let bounds = HeuristicTextMeasurer
            .bounds(&text, font_size, pos, TextAnchor::Middle, TextBaseline::Alphabetic)
            .inflate(4.0, 3.0);
        // Keep the tooltip inside the viewport.
        let outer = self.frame.outer();
        let dx = (outer.x0 - bounds.x0).max(0.0) + (outer.x1 - bounds.x1).min(0.0);
        let dy = (outer.y0 - bounds.y0).max(0.0);
        let shift = Vec2::new(dx, dy);
        layer.push(
            RectMarkSpec::new(group, "tooltip:box", bounds + shift)
                .with_fill(css::WHITE)
                .with_stroke(css::GRAY, 1.0)
                .with_z_index(z_order::ANNOTATIONS)
                .mark(),
        );
        layer.push(
            TextMarkSpec::new(group, "tooltip", pos + shift)
                .with_text(text)
                .with_font_size(font_size)
                .with_anchor(TextAnchor::Middle)
                .with_z_index(z_order::ANNOTATIONS + 1)
                .mark(),
        );
        layer
    }
}

fn display_name(features: &[(String, String)], key: &str) -> String {
    features
        .iter()
        .find(|(k, _)| k == key)
        .map_or_else(|| key.to_owned(), |(_, name)| name.clone())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use figkit_core::{MarkId, MarkPayload, Scene};

    use super::*;
    use crate::frame::Margin;
    use crate::layer::apply_layers;

    fn features() -> Vec<(String, String)> {
        [
            ("replicate-spectra", "Replicate Spectra"),
            ("precursor-scores", "Precursor Scores"),
            ("sibling-ions", "Sibling Ions"),
            ("sibling-modifications", "Sibling Modifications"),
            ("sibling-scores", "Sibling Scores"),
        ]
        .into_iter()
        .map(|(k, n)| (k.to_owned(), n.to_owned()))
        .collect()
    }

    fn plot() -> CorrelationPlot {
        CorrelationPlot::new(
            GroupId::named("corr"),
            Frame::new(740.0, 600.0, Margin::new(90.0, 200.0, 30.0, 120.0)),
            features(),
        )
        .with_highlight("sibling-scores", "sibling-ions")
        .with_highlight("precursor-scores", "replicate-spectra")
    }

    #[test]
    fn circles_scale_with_the_coefficient() {
        let p = plot();
        let data = vec![
            Correlation::new("sibling-ions", "sibling-scores", 0.5),
            Correlation::new("replicate-spectra", "replicate-spectra", 1.0),
        ];
        let mut scene = Scene::new();
        apply_layers(&mut scene, p.render(&data), 0.0);
        let id = MarkId::keyed(p.cell_group(), "sibling-ions-sibling-scores");
        let Some(MarkPayload::Circle(c)) = scene.get(id) else {
            panic!("cells are circles");
        };
        assert_eq!(c.radius, 15.0, "half correlation, half radius");
        // Five features with padding 1 on a 480px range have a 80px step.
        assert_eq!(c.center, Point::new(120.0 + 240.0, 90.0 + 80.0), "x ions, y scores");
        assert_eq!(
            scene.group_ids(p.highlight_group()).len(),
            2,
            "two highlight blocks"
        );
    }

    #[test]
    fn hover_shows_ring_and_tooltip() {
        let p = plot();
        let cell = Correlation::new("sibling-ions", "sibling-scores", 0.876);
        let layer = p.hover_layer(Some(&cell));
        let text = layer
            .marks
            .iter()
            .find_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .expect("tooltip");
        assert_eq!(
            text, "Correlation between Sibling Scores and Sibling Ions: 0.88",
            "prettified names and two decimals"
        );
        assert!(p.hover_layer(None).is_empty(), "leaving clears the hover");
    }

    #[test]
    fn hits_need_to_land_inside_a_circle() {
        let p = plot();
        let data = vec![Correlation::new("sibling-ions", "sibling-scores", 0.5)];
        let center = p.center(&data[0]).expect("known features");
        assert_eq!(p.hit(&data, center + Vec2::new(10.0, 0.0)), Some(0), "inside");
        assert_eq!(p.hit(&data, center + Vec2::new(20.0, 0.0)), None, "outside");
    }

    #[test]
    fn legend_fits_the_viewport() {
        let p = plot();
        let layer = p.legend_layer();
        let right = layer
            .marks
            .iter()
            .filter_map(|m| m.payload.bounds())
            .map(|b| b.x1)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(right < p.frame.width, "legend ends at {right}");
    }
}
