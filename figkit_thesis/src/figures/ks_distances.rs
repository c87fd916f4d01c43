// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! KS distances between correct and incorrect score distributions, with the hovered
//! distribution drawn next to the swarm.

use figkit_charts::{
    DistributionPlot, Frame, Layer, Margin, RuleMarkSpec, SwarmPlot, SwarmPoint, z_order,
};
use figkit_core::{GroupId, MarkId, Transition};
use figkit_data::{DataSource, RowMapper};
use figkit_stats::EmptyInputError;
use peniko::Color;
use peniko::color::palette::css;

use super::distribution_view::{DistributionView, score_mapper, scored};
use super::fetch;
use super::swarm_view::SwarmView;
use crate::catalog::{engine_lanes, mixture_label, ordinal_suffix, pretty_engine};
use crate::config::RenderConfig;
use crate::error::FigureError;
use crate::event::FigureEvent;
use crate::figure::{Figure, Panel};

const ID: &str = "fig03";
const KS_FILE: &str = "fig03/ks-distances.csv";
const FIRST: &str = "B1-xtandem";
const UNSELECTED: Color = Color::from_rgb8(0xb6, 0xce, 0xe2);

/// Two-line caption for a distribution file named `<mixture><replicate>-<engine>`.
fn caption(key: &str) -> Vec<String> {
    let (dataset, engine) = key.split_once('-').unwrap_or((key, ""));
    let mut chars = dataset.chars();
    let mixture: String = chars.next().map(String::from).unwrap_or_default();
    let replicate = chars.as_str();
    let suffix = replicate.parse().map(ordinal_suffix).unwrap_or("");
    vec![
        format!("{} applied to mixture {}", pretty_engine(engine), mixture_label(&mixture)),
        format!("({replicate}{suffix} replicate)"),
    ]
}

/// Figure 3.
#[derive(Debug)]
pub struct KsDistances {
    config: RenderConfig,
    swarm: Option<SwarmView>,
    distribution: DistributionView,
    selected: usize,
}

impl KsDistances {
    /// Creates the figure; nothing is loaded yet.
    pub fn new(config: &RenderConfig) -> Self {
        let frame = Frame::new(300.0, 350.0, Margin::new(50.0, 30.0, 50.0, 10.0));
        let plot = DistributionPlot::new(GroupId::named("fig03/distribution"), frame);
        let plot = DistributionPlot {
            enter: config.scaled(plot.enter),
            ..plot
        }
        .with_update(config.millis(300.0));
        Self {
            config: config.clone(),
            swarm: None,
            distribution: DistributionView::new(Panel::new("distribution", frame), plot),
            selected: 0,
        }
    }

    fn indicator_group() -> GroupId {
        GroupId::named("fig03/swarm").child("indicator")
    }

    fn indicator(swarm: &SwarmView, index: usize, transition: Transition) -> Layer {
        let plot = swarm.panel.frame.plot();
        let x = swarm.render.x.map(swarm.points[index].value);
        let group = Self::indicator_group();
        Layer::with_marks(
            group,
            vec![
                RuleMarkSpec::vertical(group, "indicator", x, plot.y0, plot.y1)
                    .with_stroke(css::STEEL_BLUE, 1.0)
                    .with_z_index(z_order::INDICATORS)
                    .mark(),
            ],
            transition,
        )
    }

    fn paint(selected: usize) -> impl Fn(usize, &SwarmPoint) -> (Color, Color) {
        move |i, _| {
            let fill = if i == selected { css::STEEL_BLUE } else { UNSELECTED };
            (fill, css::STEEL_BLUE)
        }
    }

    fn show_distribution(
        &mut self,
        source: &dyn DataSource,
        key: &str,
        now: f64,
    ) -> Result<(), FigureError> {
        let path = format!("fig03/{key}.json");
        let data = fetch(source, &path, &score_mapper())?;
        self.distribution.draw(key, &scored(&data), &caption(key), now)
    }

    /// Shows the distribution of point `index`; the highlight moves only once it is drawn.
    fn select(
        &mut self,
        index: usize,
        source: &dyn DataSource,
        now: f64,
    ) -> Result<(), FigureError> {
        let swarm = self.swarm.as_ref().ok_or_else(|| FigureError::NotLoaded(ID.into()))?;
        if index == self.selected {
            return Ok(());
        }
        let key = swarm.points[index].key.clone();
        self.show_distribution(source, &key, now)?;

        self.selected = index;
        let swarm = self.swarm.as_mut().ok_or_else(|| FigureError::NotLoaded(ID.into()))?;
        let layers = vec![
            swarm.points_layer(Transition::NONE, Self::paint(index)),
            Self::indicator(swarm, index, self.config.millis(800.0)),
        ];
        swarm.panel.apply(layers, now);
        tracing::debug!(figure = ID, key = %key, "selected distribution");
        Ok(())
    }
}

impl Figure for KsDistances {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "KS distances between correct and incorrect score distributions"
    }

    fn load(&mut self, source: &dyn DataSource, now: f64) -> Result<(), FigureError> {
        let mapper = RowMapper::new()
            .text("dataset")
            .text("engine")
            .number("ks_distance");
        let data = fetch(source, KS_FILE, &mapper)?;
        let points: Vec<SwarmPoint> = data
            .iter()
            .filter_map(|r| {
                Some(SwarmPoint::new(
                    r.key(&["dataset", "engine"]),
                    r.text("engine")?,
                    r.number("ks_distance")?,
                ))
            })
            .collect();

        let frame = Frame::new(600.0, 350.0, Margin::new(30.0, 10.0, 60.0, 60.0));
        let plot = SwarmPlot::new(GroupId::named("fig03/swarm"), frame, engine_lanes())
            .with_layout(self.config.swarm_layout())
            .with_x_label([
                "KS distance between score distributions",
                "of correct and incorrect peptide identifications",
            ]);
        let mut swarm =
            SwarmView::new(Panel::new("swarm", frame), plot, points, self.config.show_hit_cells)?;
        self.selected = swarm.index_of(FIRST).unwrap_or(0);
        let first = swarm
            .points
            .get(self.selected)
            .map(|p| p.key.clone())
            .ok_or(EmptyInputError { statistic: "extent" })?;
        let indicator = Self::indicator(&swarm, self.selected, Transition::NONE);
        swarm.draw("ks-distances", Self::paint(self.selected), vec![indicator], now);
        self.swarm = Some(swarm);
        self.show_distribution(source, &first, now)
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
        panels.push(&self.distribution.panel);
        panels
    }

    fn panels_mut(&mut self) -> Vec<&mut Panel> {
        let mut panels: Vec<&mut Panel> = self.swarm.iter_mut().map(|s| &mut s.panel).collect();
        panels.push(&mut self.distribution.panel);
        panels
    }

    fn target(&self, region: &str, key: &str) -> Option<MarkId> {
        let swarm = self.swarm.as_ref()?;
        (swarm.panel.name == region).then(|| swarm.target(key)).flatten()
    }
}
