// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mirrored score histograms ("violins") of correct and incorrect identifications.
//!
//! Both histograms share one vertical score axis and one set of bucket thresholds. Correct bins
//! grow to the right of the center line, incorrect bins to the left; each side is scaled by its
//! own largest bucket.

use figkit_core::{GroupId, RenderPass, Transition};
use figkit_stats::{Bin, EmptyInputError, Histogram};
use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::axis::AxisSpec;
use crate::frame::Frame;
use crate::layer::Layer;
use crate::plot::{LABEL_FONT_SIZE, guide_transition, label};
use crate::rect_mark::RectMarkSpec;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBandSpec, ScaleLinear, ScaleLinearSpec};
use crate::z_order;

/// One scored identification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scored {
    /// Search-engine or rescoring score.
    pub score: f64,
    /// Whether the identification is correct.
    pub correct: bool,
}

impl Scored {
    /// Creates a scored identification.
    pub const fn new(score: f64, correct: bool) -> Self {
        Self { score, correct }
    }
}

/// Layers produced by one [`DistributionPlot::render`] call.
#[derive(Clone, Debug)]
pub struct DistributionRender {
    /// Raw `[min, max]` of the scores, before rounding.
    pub extent: (f64, f64),
    /// The rounded domain of the score axis.
    pub domain: (f64, f64),
    /// Correct buckets.
    pub correct: Vec<Bin>,
    /// Incorrect buckets.
    pub incorrect: Vec<Bin>,
    /// Bin layers (correct, then incorrect).
    pub bins: Vec<Layer>,
    /// The score axis.
    pub axis: Layer,
    /// Titles, captions and the optional zero line.
    pub guides: Layer,
}

/// A mirrored score distribution.
#[derive(Clone, Debug)]
pub struct DistributionPlot {
    /// Root group; bins, axis and guides use child groups.
    pub group: GroupId,
    /// Viewport.
    pub frame: Frame,
    /// Bin fill. Incorrect bins use it at half opacity.
    pub fill: Color,
    /// Padding of the single band that holds both histograms.
    pub band_padding: f64,
    /// Approximate number of bucket thresholds.
    pub threshold_count: usize,
    /// Timing of the first render; bins grow one after another.
    pub enter: Transition,
    /// Timing of rebinds.
    pub update: Transition,
    /// Draws a horizontal guide at score 0.
    pub zero_line: bool,
    /// Vertical distance of the first caption line below the plot.
    pub caption_offset: f64,
}

impl DistributionPlot {
    /// Creates a plot with the thesis defaults: 50 thresholds, 300ms transitions.
    pub fn new(group: GroupId, frame: Frame) -> Self {
        Self {
            group,
            frame,
            fill: Color::from_rgb8(0xf2, 0xcc, 0x37),
            band_padding: 0.05,
            threshold_count: 50,
            enter: Transition::millis(300.0).with_stagger(100.0),
            update: Transition::millis(300.0),
            zero_line: false,
            caption_offset: 20.0,
        }
    }

    /// Sets the rebind transition.
    pub fn with_update(mut self, update: Transition) -> Self {
        self.update = update;
        self
    }

    /// Enables the zero-score guide.
    pub fn with_zero_line(mut self, zero_line: bool) -> Self {
        self.zero_line = zero_line;
        self
    }

    /// Sets the caption offset below the plot.
    pub fn with_caption_offset(mut self, offset: f64) -> Self {
        self.caption_offset = offset;
        self
    }

    /// Group of the correct bins.
    pub fn correct_group(&self) -> GroupId {
        self.group.child("correct")
    }

    /// Group of the incorrect bins.
    pub fn incorrect_group(&self) -> GroupId {
        self.group.child("incorrect")
    }

    /// Group of the score axis.
    pub fn axis_group(&self) -> GroupId {
        self.group.child("axis")
    }

    /// Group of titles and captions.
    pub fn guide_group(&self) -> GroupId {
        self.group.child("guides")
    }

    /// The score scale for `data`, rounded to nice bounds.
    pub fn y_scale(&self, data: &[Scored]) -> Result<ScaleLinear, EmptyInputError> {
        let plot = self.frame.plot();
        Ok(ScaleLinearSpec::from_values(data.iter().map(|d| d.score))?
            .with_nice(true)
            .instantiate((plot.y1, plot.y0)))
    }

    /// Buckets the correct and incorrect scores of `data` over the domain of `y`.
    pub fn bins(&self, data: &[Scored], y: &ScaleLinear) -> (Vec<Bin>, Vec<Bin>) {
        let histogram = Histogram::new(y.domain()).with_threshold_count(self.threshold_count);
        let correct = histogram.bin(data.iter().map(|d| d.correct.then_some(d.score)));
        let incorrect = histogram.bin(data.iter().map(|d| (!d.correct).then_some(d.score)));
        (correct, incorrect)
    }

    /// Builds every layer for `data`.
    ///
    /// `caption` lines are stacked below the plot, 1.1em apart.
    pub fn render(
        &self,
        data: &[Scored],
        pass: RenderPass,
        caption: &[String],
    ) -> Result<DistributionRender, EmptyInputError> {
        let extent = figkit_stats::extent(data.iter().map(|d| d.score))
            .ok_or(EmptyInputError { statistic: "extent" })?;
        let y = self.y_scale(data)?;
        let (correct, incorrect) = self.bins(data, &y);

        let plot = self.frame.plot();
        let band = ScaleBandSpec::new(["pseudo"])
            .with_padding(self.band_padding)
            .instantiate((0.0, plot.width()));
        let bandwidth = band.bandwidth();
        let offset = 0.05 * bandwidth;
        let half = bandwidth / 2.0 + offset;
        let center = plot.x0 + half;

        let bin_transition = match pass {
            RenderPass::First => self.enter,
            RenderPass::Rebind | RenderPass::Same => self.update,
        };
        let violin = |bins: &[Bin]| {
            let max = bins.iter().map(Bin::count).max().unwrap_or(0) as f64;
            ScaleLinear::new((-max, max), (0.0, bandwidth))
        };

        let correct_scale = violin(&correct);
        let mut correct_layer = Layer::new(self.correct_group(), bin_transition);
        for bin in &correct {
            let (y0, y1) = (y.map(bin.x1), y.map(bin.x0));
            let width = correct_scale.map(bin.count() as f64) - half + offset;
            correct_layer.push(
                RectMarkSpec::new(
                    self.correct_group(),
                    &format!("{}", bin.x0),
                    Rect::new(center, y0, center + width.max(0.0), y1),
                )
                .with_fill(self.fill)
                .with_enter(Rect::new(center, y0, center, y1))
                .mark(),
            );
        }

        let incorrect_scale = violin(&incorrect);
        let mut incorrect_layer = Layer::new(self.incorrect_group(), bin_transition);
        for bin in &incorrect {
            let (y0, y1) = (y.map(bin.x1), y.map(bin.x0));
            let x = plot.x0 + incorrect_scale.map(-(bin.count() as f64)) + offset;
            incorrect_layer.push(
                RectMarkSpec::new(
                    self.incorrect_group(),
                    &format!("{}", bin.x0),
                    Rect::new(x.min(center), y0, center, y1),
                )
                .with_fill(self.fill.with_alpha(0.5))
                .with_enter(Rect::new(center, y0, center, y1))
                .mark(),
            );
        }

        let axis = Layer::with_marks(
            self.axis_group(),
            AxisSpec::right(self.axis_group(), y.clone(), plot.x1).marks(),
            guide_transition(pass, self.update),
        );

        let guides = self.guides(&y, pass, caption);

        Ok(DistributionRender {
            extent,
            domain: y.domain(),
            correct,
            incorrect,
            bins: vec![correct_layer, incorrect_layer],
            axis,
            guides,
        })
    }

    fn guides(&self, y: &ScaleLinear, pass: RenderPass, caption: &[String]) -> Layer {
        let plot = self.frame.plot();
        let group = self.guide_group();
        let mut layer = Layer::new(group, guide_transition(pass, self.update));

        let top = plot.y0 - 5.0;
        layer.push(
            label(group, "incorrect", Point::new(plot.x0 + plot.width() / 4.0, top), "Incorrect")
                .mark(),
        );
        layer.push(
            label(group, "correct", Point::new(plot.x0 + plot.width() * 0.75, top), "Correct")
                .mark(),
        );
        layer.push(
            label(
                group,
                "score",
                Point::new(self.frame.width - 8.0, plot.center().y),
                "Score",
            )
            .with_angle(90.0)
            .mark(),
        );

        for (i, line) in caption.iter().enumerate() {
            let pos = Point::new(
                plot.center().x,
                plot.y1 + self.caption_offset + i as f64 * 1.1 * LABEL_FONT_SIZE,
            );
            layer.push(
                label(group, &format!("caption:{i}"), pos, line)
                    .with_z_index(z_order::ANNOTATIONS)
                    .mark(),
            );
        }

        if self.zero_line {
            let (d0, d1) = y.domain();
            if d0 <= 0.0 && 0.0 <= d1 {
                layer.push(
                    RuleMarkSpec::horizontal(group, "zero", y.map(0.0), plot.x0, plot.x1)
                        .with_stroke(css::GRAY, 1.0)
                        .with_dash(4.0)
                        .with_z_index(z_order::INDICATORS)
                        .mark(),
                );
            }
        }
        layer
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use figkit_core::{MarkId, MarkPayload, Scene};

    use super::*;
    use crate::frame::Margin;
    use crate::layer::apply_layers;

    fn plot() -> DistributionPlot {
        DistributionPlot::new(
            GroupId::named("dist"),
            Frame::new(300.0, 350.0, Margin::new(50.0, 30.0, 50.0, 10.0)),
        )
    }

    fn three() -> Vec<Scored> {
        vec![
            Scored::new(1.0, true),
            Scored::new(-1.0, false),
            Scored::new(0.5, true),
        ]
    }

    #[test]
    fn three_records_fill_both_sides() {
        let render = plot()
            .render(&three(), RenderPass::First, &[])
            .expect("non-empty input");
        assert_eq!(render.extent, (-1.0, 1.0), "raw extent before rounding");
        let correct: usize = render.correct.iter().map(Bin::count).sum();
        let incorrect: usize = render.incorrect.iter().map(Bin::count).sum();
        assert_eq!(correct, 2, "two correct scores");
        assert_eq!(incorrect, 1, "one incorrect score");
        assert_eq!(correct + incorrect, 3, "every score lands in a bucket");
    }

    #[test]
    fn bins_enter_from_the_center_line() {
        let p = plot();
        let render = p.render(&three(), RenderPass::First, &[]).expect("non-empty input");
        let mut scene = Scene::new();
        apply_layers(&mut scene, render.bins.clone(), 0.0);

        let top = render.correct.last().expect("bins").x0;
        let id = MarkId::keyed(p.correct_group(), &format!("{top}"));
        let Some(MarkPayload::Rect(start)) = scene.get(id) else {
            panic!("bin must be a rect");
        };
        assert_eq!(start.rect.width(), 0.0, "entering bins start collapsed");
        let start = start.clone();

        scene.settle();
        let Some(MarkPayload::Rect(end)) = scene.get(id) else {
            panic!("bin must be a rect");
        };
        assert!(end.rect.width() > 0.0, "populated bin grows");
        assert_eq!(end.rect.x0, start.rect.x0, "correct bins grow to the right");
    }

    #[test]
    fn incorrect_bins_mirror_to_the_left() {
        let p = plot();
        let render = p.render(&three(), RenderPass::Rebind, &[]).expect("non-empty input");
        let bottom = render.incorrect.first().expect("bins");
        let mut scene = Scene::new();
        apply_layers(&mut scene, render.bins, 0.0);
        scene.settle();
        let id = MarkId::keyed(p.incorrect_group(), &format!("{}", bottom.x0));
        let Some(MarkPayload::Rect(r)) = scene.get(id) else {
            panic!("bin must be a rect");
        };
        let plot = p.frame.plot();
        assert!(r.rect.x1 > plot.x0 + plot.width() / 3.0, "ends at the center line");
        assert!(r.rect.width() > 0.0, "the fullest incorrect bin spans half the band");
    }

    #[test]
    fn empty_slices_are_rejected() {
        assert!(plot().render(&[], RenderPass::First, &[]).is_err(), "no extent");
    }
}
