// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Percolator score distributions of Comet and MS-GF+ for one mixture at a time.

use figkit_charts::{DistributionPlot, Frame, Margin};
use figkit_core::GroupId;
use figkit_data::{DataSource, Dataset, RowMapper};
use figkit_stats::EmptyInputError;

use super::distribution_view::{DistributionView, scored};
use super::fetch;
use crate::catalog::pretty_engine;
use crate::config::RenderConfig;
use crate::error::FigureError;
use crate::event::FigureEvent;
use crate::figure::{Control, Figure, Panel, unknown_target};

const ID: &str = "fig05";
const FILE: &str = "fig05/percolator-scores.json";
const ENGINES: [&str; 2] = ["comet", "msgf"];
const CONTROL: &str = "mixture";

/// Figure 5.
#[derive(Debug)]
pub struct PercolatorScores {
    data: Option<Dataset>,
    views: Vec<(&'static str, DistributionView)>,
    control: Control,
}

impl PercolatorScores {
    /// Creates the figure; nothing is loaded yet.
    pub fn new(config: &RenderConfig) -> Self {
        let frame = Frame::new(300.0, 300.0, Margin::new(30.0, 30.0, 30.0, 40.0));
        let views = ENGINES
            .iter()
            .map(|&engine| {
                let plot = DistributionPlot::new(GroupId::named("fig05").child(engine), frame);
                let plot = DistributionPlot {
                    enter: config.scaled(plot.enter),
                    ..plot
                }
                .with_update(config.millis(600.0))
                .with_zero_line(true)
                .with_caption_offset(0.0);
                (engine, DistributionView::new(Panel::new(engine, frame), plot))
            })
            .collect();
        Self {
            data: None,
            views,
            control: Control::mixture(CONTROL),
        }
    }

    /// Rebinds every panel to its engine's slice of `mixture`.
    ///
    /// All slices are checked before any panel changes, so a mixture without scores for some
    /// engine leaves the figure as it was.
    fn draw(&mut self, mixture: &str, now: f64) -> Result<(), FigureError> {
        let data = self.data.as_ref().ok_or_else(|| FigureError::NotLoaded(ID.into()))?;
        let slices: Vec<_> = self
            .views
            .iter()
            .map(|(engine, _)| {
                scored(&data.where_text("engine", engine).where_text("mixture", mixture))
            })
            .collect();
        if slices.iter().any(Vec::is_empty) {
            return Err(EmptyInputError { statistic: "extent" }.into());
        }
        for ((engine, view), slice) in self.views.iter_mut().zip(&slices) {
            let caption = [pretty_engine(engine).to_owned()];
            view.draw(mixture, slice, &caption, now)?;
        }
        Ok(())
    }
}

impl Figure for PercolatorScores {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "Percolator score distributions of correct and incorrect identifications"
    }

    fn load(&mut self, source: &dyn DataSource, now: f64) -> Result<(), FigureError> {
        let mapper = RowMapper::new()
            .text("engine")
            .text("mixture")
            .number("score")
            .boolean("correct");
        self.data = Some(fetch(source, FILE, &mapper)?);
        let mixture = self.control.selected.clone();
        self.draw(&mixture, now)
    }

    fn handle(
        &mut self,
        event: &FigureEvent,
        _source: &dyn DataSource,
        now: f64,
    ) -> Result<(), FigureError> {
        match event {
            FigureEvent::Select { control, option } if control == CONTROL => {
                if self.control.selected == *option {
                    return Ok(());
                }
                self.control.offers(option)?;
                self.draw(option, now)?;
                self.control.select(option)
            }
            FigureEvent::Select { control, .. } => Err(unknown_target(ID, control.clone())),
            FigureEvent::Hover { region, .. }
            | FigureEvent::Pointer { region, .. }
            | FigureEvent::Leave { region } => Err(unknown_target(ID, region.clone())),
        }
    }

    fn panels(&self) -> Vec<&Panel> {
        self.views.iter().map(|(_, v)| &v.panel).collect()
    }

    fn panels_mut(&mut self) -> Vec<&mut Panel> {
        self.views.iter_mut().map(|(_, v)| &mut v.panel).collect()
    }

    fn controls(&self) -> Vec<&Control> {
        vec![&self.control]
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use figkit_data::MemorySource;

    use super::*;

    fn source() -> MemorySource {
        source_of(&[
            ("comet", "A", 0.0),
            ("msgf", "A", 10.0),
            ("comet", "B", 20.0),
            ("msgf", "B", 30.0),
        ])
    }

    fn source_of(slices: &[(&str, &str, f64)]) -> MemorySource {
        let mut rows = Vec::new();
        for &(e, m, offset) in slices {
            for i in 0..8 {
                let s = offset + f64::from(i) - 4.0;
                let c = i % 2 == 0;
                rows.push(format!(
                    r#"{{"engine": "{e}", "mixture": "{m}", "score": {s}, "correct": {c}}}"#
                ));
            }
        }
        MemorySource::new().with_file(FILE, format!("[{}]", rows.join(",")))
    }

    #[test]
    fn each_panel_bins_only_its_engine() {
        let mut fig = PercolatorScores::new(&RenderConfig::default());
        fig.load(&source(), 0.0).expect("loads");
        let comet = fig.views[0].1.axis_domain().expect("drawn");
        let msgf = fig.views[1].1.axis_domain().expect("drawn");
        assert!(comet.1 <= 4.0, "comet A scores stay near zero, got {comet:?}");
        assert!(msgf.0 >= 5.0, "msgf A scores are offset, got {msgf:?}");
    }

    #[test]
    fn one_dropdown_rebinds_both_panels() {
        let mut fig = PercolatorScores::new(&RenderConfig::default());
        let source = source();
        fig.load(&source, 0.0).expect("loads");
        fig.settle();
        let select = FigureEvent::Select {
            control: CONTROL.into(),
            option: "B".into(),
        };
        fig.handle(&select, &source, 10.0).expect("known control");
        assert!(
            fig.panels().iter().all(|p| p.scene.is_animating()),
            "both engines animate toward mixture B"
        );
        assert!(
            fig.views[1].1.axis_domain().is_some_and(|d| d.0 >= 25.0),
            "msgf axis follows the new domain"
        );
        let other = FigureEvent::Select {
            control: "mixture-comet".into(),
            option: "B".into(),
        };
        assert!(fig.handle(&other, &source, 20.0).is_err(), "control of another figure");
    }

    #[test]
    fn a_mixture_without_scores_keeps_the_current_one() {
        let mut fig = PercolatorScores::new(&RenderConfig::default());
        let source = source_of(&[("comet", "A", 0.0), ("msgf", "A", 10.0), ("comet", "B", 20.0)]);
        fig.load(&source, 0.0).expect("loads");
        fig.settle();
        let select = FigureEvent::Select {
            control: CONTROL.into(),
            option: "B".into(),
        };
        assert!(fig.handle(&select, &source, 10.0).is_err(), "no msgf scores for mixture B");
        assert_eq!(fig.control.selected, "A", "the dropdown keeps mixture A");
        assert!(
            fig.panels().iter().all(|p| p.region.key().map(String::as_str) == Some("A")),
            "both panels stay bound to mixture A"
        );
        assert!(
            fig.panels().iter().all(|p| !p.scene.is_animating()),
            "nothing was redrawn"
        );
    }
}
