// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Average feature differences between correct and incorrect identifications.
//!
//! The swarm shows one point per engine and feature, connected across engines. Hovering a point
//! shows the box plots of that feature's values next to the swarm.

use figkit_charts::{
    BoxGroup, BoxPlot, Frame, HeuristicTextMeasurer, LABEL_FONT_SIZE, Layer, LineMarkSpec,
    Margin, RectMarkSpec, RuleMarkSpec, StrokeStyle, SwarmPlot, SwarmPoint, TextMarkSpec,
    TextMeasurer, z_order,
};
use figkit_core::{GroupId, MarkId, TextAnchor, TextBaseline, Transition};
use figkit_data::{DataSource, Dataset, RowMapper};
use figkit_stats::{BoxStats, EmptyInputError, StatsCache};
use kurbo::Point;
use peniko::Color;

use super::fetch;
use super::swarm_view::SwarmView;
use crate::catalog::{
    engine_lanes, feature_color, feature_label_padding, pretty_engine, pretty_feature,
};
use crate::config::RenderConfig;
use crate::error::FigureError;
use crate::event::FigureEvent;
use crate::figure::{Figure, Panel};

const ID: &str = "fig07";
const DIFF_FILE: &str = "fig07/differences.csv";
const FIRST_ENGINE: &str = "comet";
const FIRST_FEATURE: &str = "sibling-scores";
const LABEL_ENGINE: &str = "comet";

/// Figure 7.
#[derive(Debug)]
pub struct FeatureDifferences {
    config: RenderConfig,
    swarm: Option<SwarmView>,
    /// Feature of every swarm point, by index.
    features: Vec<String>,
    box_panel: Panel,
    box_plot: BoxPlot,
    stats: StatsCache<String, Vec<BoxGroup>>,
    shown: Option<(String, String)>,
}

/// Box statistics per identification status, `"Incorrect"` first.
fn box_groups(data: &Dataset) -> Result<Vec<BoxGroup>, EmptyInputError> {
    let mut groups = data
        .group_by(&["status"])
        .iter()
        .map(|(status, rows)| {
            let scores: Vec<f64> = rows.numbers("score").into_iter().flatten().collect();
            Ok(BoxGroup::new(status, BoxStats::from_values(&scores)?))
        })
        .collect::<Result<Vec<_>, EmptyInputError>>()?;
    groups.sort_by(|a, b| b.key.cmp(&a.key));
    Ok(groups)
}

impl FeatureDifferences {
    /// Creates the figure; nothing is loaded yet.
    pub fn new(config: &RenderConfig) -> Self {
        let frame = Frame::new(300.0, 350.0, Margin::new(50.0, 30.0, 50.0, 50.0));
        let box_plot = BoxPlot::new(GroupId::named("fig07/box"), frame, ["Incorrect", "Correct"])
            .with_faded("Incorrect");
        let box_plot = BoxPlot {
            transition: config.scaled(box_plot.transition),
            ..box_plot
        };
        Self {
            config: config.clone(),
            swarm: None,
            features: Vec::new(),
            box_panel: Panel::new("box", frame),
            box_plot,
            stats: StatsCache::new(),
            shown: None,
        }
    }

    fn paint(features: &[String]) -> impl Fn(usize, &SwarmPoint) -> (Color, Color) + '_ {
        move |i, _| {
            let feature = features.get(i).map_or("", String::as_str);
            (feature_color(feature, true), feature_color(feature, false))
        }
    }

    /// One line per feature through its points, in data order.
    fn connections(swarm: &SwarmView, features: &[String]) -> Layer {
        let group = swarm.plot.group.child("connections");
        let mut layer = Layer::new(group, Transition::NONE);
        let mut seen: Vec<&str> = Vec::new();
        for feature in features {
            if seen.contains(&feature.as_str()) {
                continue;
            }
            seen.push(feature);
            let points: Vec<Point> = features
                .iter()
                .zip(&swarm.render.positions)
                .filter(|(f, _)| *f == feature)
                .map(|(_, p)| *p)
                .collect();
            layer.push(
                LineMarkSpec::new(group, feature, points)
                    .with_stroke(StrokeStyle::solid(feature_color(feature, false), 1.0))
                    .with_z_index(z_order::SERIES_FILL)
                    .mark(),
            );
        }
        layer
    }

    /// Feature names above the plot, each on a light box tied to its point in the label lane.
    fn feature_labels(swarm: &SwarmView, features: &[String]) -> Layer {
        let group = swarm.plot.group.child("feature-labels");
        let plot = swarm.panel.frame.plot();
        let lane = swarm.render.lanes.center(LABEL_ENGINE).unwrap_or(plot.center().y);
        let mut layer = Layer::new(group, Transition::NONE);
        for (point, feature) in swarm.points.iter().zip(features) {
            if point.lane != LABEL_ENGINE {
                continue;
            }
            let text = pretty_feature(feature);
            let pos = Point::new(
                swarm.render.x.map(point.value),
                plot.y0 + feature_label_padding(feature),
            );
            let bbox = HeuristicTextMeasurer
                .bounds(text, LABEL_FONT_SIZE, pos, TextAnchor::Start, TextBaseline::Alphabetic)
                .inflate(1.0, 1.0);
            let light = feature_color(feature, true);
            layer.push(
                TextMarkSpec::new(group, &format!("label:{feature}"), pos)
                    .with_text(text)
                    .with_font_size(LABEL_FONT_SIZE)
                    .mark(),
            );
            layer.push(
                RectMarkSpec::new(group, &format!("background:{feature}"), bbox)
                    .with_fill(light)
                    .with_z_index(z_order::AXIS_LABELS)
                    .mark(),
            );
            layer.push(
                RuleMarkSpec::vertical(group, &format!("connect:{feature}"), bbox.x0, bbox.y0, lane)
                    .with_stroke(light, 1.0)
                    .with_z_index(z_order::SERIES_FILL - 1)
                    .mark(),
            );
        }
        layer
    }

    /// Shows the box plots of `engine`/`feature`, computing their statistics on first use.
    fn show_box(
        &mut self,
        source: &dyn DataSource,
        engine: &str,
        feature: &str,
        now: f64,
    ) -> Result<(), FigureError> {
        if self
            .shown
            .as_ref()
            .is_some_and(|(e, f)| e == engine && f == feature)
        {
            return Ok(());
        }
        let key = format!("{engine}-{feature}");
        let groups = self.stats.get_or_try_insert_with(key.clone(), || {
            let mapper = RowMapper::new().text("status").number("score");
            let data = fetch(source, &format!("fig07/{key}.json"), &mapper)?;
            tracing::debug!(figure = ID, key = %key, "computing box statistics");
            box_groups(&data).map_err(FigureError::from)
        })?;
        let pass = self.box_panel.begin(key.as_str());
        let layers =
            self.box_plot
                .render(groups, pass, pretty_engine(engine), pretty_feature(feature))?;
        self.box_panel.apply(layers, now);
        self.shown = Some((engine.to_owned(), feature.to_owned()));
        Ok(())
    }

    fn select(
        &mut self,
        index: usize,
        source: &dyn DataSource,
        now: f64,
    ) -> Result<(), FigureError> {
        let swarm = self.swarm.as_ref().ok_or_else(|| FigureError::NotLoaded(ID.into()))?;
        let engine = swarm.points[index].lane.clone();
        let feature = self.features[index].clone();
        self.show_box(source, &engine, &feature, now)
    }
}

impl Figure for FeatureDifferences {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "Feature differences between correct and incorrect identifications"
    }

    fn load(&mut self, source: &dyn DataSource, now: f64) -> Result<(), FigureError> {
        let mapper = RowMapper::new()
            .text("engine")
            .text("feature")
            .number("difference");
        let data = fetch(source, DIFF_FILE, &mapper)?;
        let mut points = Vec::with_capacity(data.len());
        let mut features = Vec::with_capacity(data.len());
        for r in &data {
            let (Some(engine), Some(feature), Some(value)) =
                (r.text("engine"), r.text("feature"), r.number("difference"))
            else {
                continue;
            };
            points.push(SwarmPoint::new(r.key(&["engine", "feature"]), engine, value));
            features.push(feature.to_owned());
        }

        let frame = Frame::new(600.0, 350.0, Margin::new(30.0, 10.0, 60.0, 60.0));
        let plot = SwarmPlot::new(GroupId::named("fig07/swarm"), frame, engine_lanes())
            .with_layout(self.config.swarm_layout())
            .with_x_label([
                "Average difference between feature values",
                "of correct and incorrect peptide identifications",
            ]);
        let mut swarm =
            SwarmView::new(Panel::new("swarm", frame), plot, points, self.config.show_hit_cells)?;
        let extra = vec![
            Self::connections(&swarm, &features),
            Self::feature_labels(&swarm, &features),
        ];
        swarm.draw("differences", Self::paint(&features), extra, now);
        self.swarm = Some(swarm);
        self.features = features;
        self.show_box(source, FIRST_ENGINE, FIRST_FEATURE, now)
    }

    fn handle(
        &mut self,
        event: &FigureEvent,
        source: &dyn DataSource,
        now: f64,
    ) -> Result<(), FigureError> {
        let swarm = self.swarm.as_ref().ok_or_else(|| FigureError::NotLoaded(ID.into()))?;
        match swarm.resolve(ID, event)? {
            Some(index) => self.select(index, source, now),
            None => Ok(()),
        }
    }

    fn panels(&self) -> Vec<&Panel> {
        let mut panels: Vec<&Panel> = self.swarm.iter().map(|s| &s.panel).collect();
        panels.push(&self.box_panel);
        panels
    }

    fn panels_mut(&mut self) -> Vec<&mut Panel> {
        let mut panels: Vec<&mut Panel> = self.swarm.iter_mut().map(|s| &mut s.panel).collect();
        panels.push(&mut self.box_panel);
        panels
    }

    fn target(&self, region: &str, key: &str) -> Option<MarkId> {
        let swarm = self.swarm.as_ref()?;
        (swarm.panel.name == region).then(|| swarm.target(key)).flatten()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use figkit_core::MarkPayload;
    use figkit_data::MemorySource;

    use super::*;

    fn source() -> MemorySource {
        let mut source = MemorySource::new().with_file(
            DIFF_FILE,
            "engine,feature,difference\n\
             xtandem,sibling-scores,0.4\n\
             msgf,sibling-scores,0.6\n\
             comet,sibling-scores,0.8\n\
             xtandem,sibling-ions,0.1\n\
             msgf,sibling-ions,0.2\n\
             comet,sibling-ions,0.3\n",
        );
        for (key, k) in [
            ("comet-sibling-scores", 1.0),
            ("msgf-sibling-ions", 2.0),
            ("comet-sibling-ions", 3.0),
        ] {
            let rows: Vec<String> = [(1.0, "Correct"), (2.0, "Correct"), (3.0, "Correct")]
                .into_iter()
                .chain([(-1.0, "Incorrect"), (0.0, "Incorrect")])
                .map(|(v, status)| {
                    let score = v * k;
                    format!(r#"{{"status": "{status}", "score": {score}}}"#)
                })
                .collect();
            source.insert(format!("fig07/{key}.json"), format!("[{}]", rows.join(",")));
        }
        source
    }

    fn loaded(source: &MemorySource) -> FeatureDifferences {
        let mut fig = FeatureDifferences::new(&RenderConfig::default());
        fig.load(source, 0.0).expect("loads");
        fig
    }

    #[test]
    fn every_feature_gets_a_connecting_line_and_a_label() {
        let fig = loaded(&source());
        let swarm = fig.swarm.as_ref().expect("loaded");
        let group = swarm.plot.group.child("connections");
        let Some(MarkPayload::Path(line)) =
            swarm.panel.scene.get(MarkId::keyed(group, "sibling-scores"))
        else {
            panic!("connection is a path");
        };
        assert_eq!(line.path.elements().len(), 3, "one vertex per engine");
        let labels = swarm.plot.group.child("feature-labels");
        assert_eq!(swarm.panel.scene.group_ids(labels).len(), 6, "text, box and tie each");
    }

    #[test]
    fn hovering_a_point_loads_its_box_plot_once() {
        let source = source();
        let mut fig = loaded(&source);
        assert_eq!(fig.stats.misses(), 1, "initial box plot");
        let swarm = fig.swarm.as_ref().expect("loaded");
        let target = swarm.target("msgf-sibling-ions").expect("drawn");
        let hover = FigureEvent::Hover {
            region: "swarm".into(),
            target,
        };
        fig.handle(&hover, &source, 10.0).expect("known point");
        assert_eq!(fig.stats.misses(), 2, "new key");
        assert!(fig.box_panel.scene.is_animating(), "800ms rebind");

        let back = FigureEvent::Hover {
            region: "swarm".into(),
            target: swarm_target(&fig, "comet-sibling-scores"),
        };
        fig.handle(&back, &source, 20.0).expect("known point");
        assert_eq!(fig.stats.misses(), 2, "cached statistics are reused");
    }

    fn swarm_target(fig: &FeatureDifferences, key: &str) -> MarkId {
        fig.swarm
            .as_ref()
            .and_then(|s| s.target(key))
            .expect("drawn")
    }

    #[test]
    fn missing_box_data_fails_without_caching() {
        let source = source();
        let mut fig = loaded(&source);
        let hover = FigureEvent::Hover {
            region: "swarm".into(),
            target: swarm_target(&fig, "xtandem-sibling-ions"),
        };
        assert!(
            matches!(
                fig.handle(&hover, &source, 10.0),
                Err(FigureError::Load { .. })
            ),
            "file is absent"
        );
        assert!(!fig.stats.contains(&"xtandem-sibling-ions".to_owned()), "errors are retried");
        assert_eq!(
            fig.shown,
            Some(("comet".into(), "sibling-scores".into())),
            "the previous box plot stays"
        );
    }
}
