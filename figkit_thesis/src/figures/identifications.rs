// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Correct identifications per PEP threshold next to ROC curves, one pair per dropdown.

use figkit_charts::{Frame, Margin, ScaleLinearSpec, Series, SeriesPlot, SeriesPoint};
use figkit_core::GroupId;
use figkit_data::{DataSource, Dataset, RowMapper};
use figkit_stats::{EmptyInputError, mean, nested_extent, stddev};
use hashbrown::HashMap;

use super::fetch;
use crate::catalog::{METHODS, method_color};
use crate::config::RenderConfig;
use crate::error::FigureError;
use crate::event::FigureEvent;
use crate::figure::{Control, Panel, unknown_target};

const FRAME: Frame = Frame::new(300.0, 200.0, Margin::new(30.0, 30.0, 30.0, 40.0));

/// The two files behind one dropdown option.
#[derive(Clone, Debug)]
pub(crate) struct PairFiles {
    pub(crate) n_correct: String,
    pub(crate) roc: String,
}

/// How a pair is named, grouped and drawn.
#[derive(Clone, Debug)]
pub(crate) struct PairSpec {
    /// Panel suffix, e.g. the engine or the repetition.
    pub(crate) name: String,
    pub(crate) group: GroupId,
    pub(crate) control: Control,
    /// Draws a band of one standard deviation around the mean; `n_correct` holds one count
    /// per replicate.
    pub(crate) banded: bool,
}

#[derive(Debug)]
struct Slice {
    n_correct: Vec<Series>,
    roc: Vec<Series>,
}

/// Two panels that rebind together when the dropdown changes.
#[derive(Debug)]
pub(crate) struct IdentificationPair {
    pub(crate) control: Control,
    pub(crate) n_correct: Panel,
    pub(crate) roc: Panel,
    n_plot: SeriesPlot,
    roc_plot: SeriesPlot,
    slices: HashMap<String, Slice>,
}

fn n_correct_mapper() -> RowMapper {
    RowMapper::new()
        .text("method")
        .number("thresh")
        .numbers("n_correct")
}

fn roc_mapper() -> RowMapper {
    RowMapper::new()
        .text("method")
        .number("fp_rate")
        .number("tp_rate")
}

/// One series per method of mean correct identifications over the threshold.
fn n_correct_series(data: &Dataset, banded: bool) -> Result<Vec<Series>, EmptyInputError> {
    METHODS
        .iter()
        .map(|method| {
            let mut points = Vec::new();
            for r in data.where_text("method", method).iter() {
                let (Some(x), Some(counts)) = (r.number("thresh"), r.numbers("n_correct")) else {
                    continue;
                };
                let point = SeriesPoint::new(x, mean(counts)?);
                points.push(if banded {
                    point.with_spread(stddev(counts)?)
                } else {
                    point
                });
            }
            points.sort_by(|a, b| a.x.total_cmp(&b.x));
            Ok(Series {
                key: (*method).to_owned(),
                color: method_color(method),
                points,
            })
        })
        .collect()
}

fn roc_series(data: &Dataset) -> Vec<Series> {
    METHODS
        .iter()
        .map(|method| {
            let mut points: Vec<SeriesPoint> = data
                .where_text("method", method)
                .iter()
                .filter_map(|r| {
                    Some(SeriesPoint::new(r.number("fp_rate")?, r.number("tp_rate")?))
                })
                .collect();
            points.sort_by(|a, b| a.x.total_cmp(&b.x));
            Series {
                key: (*method).to_owned(),
                color: method_color(method),
                points,
            }
        })
        .collect()
}

impl PairSpec {
    /// Fetches every option's files and fixes the shared domains.
    pub(crate) fn load(
        self,
        source: &dyn DataSource,
        files: impl Fn(&str) -> PairFiles,
        config: &RenderConfig,
    ) -> Result<IdentificationPair, FigureError> {
        let mut slices = HashMap::new();
        for (option, _) in &self.control.options {
            let paths = files(option);
            let n_correct = fetch(source, &paths.n_correct, &n_correct_mapper())?;
            let roc = fetch(source, &paths.roc, &roc_mapper())?;
            slices.insert(
                option.clone(),
                Slice {
                    n_correct: n_correct_series(&n_correct, self.banded)?,
                    roc: roc_series(&roc),
                },
            );
        }

        let samples = || slices.values().flat_map(|s| &s.n_correct).map(|s| &s.points);
        let x = nested_extent(samples().map(|p| p.iter().map(|p| p.x)))
            .ok_or(EmptyInputError { statistic: "extent" })?;
        let y = nested_extent(samples().map(|p| p.iter().map(|p| p.y)))
            .ok_or(EmptyInputError { statistic: "extent" })?;

        let transition = config.millis(1000.0);
        let n_group = self.group.child("n-correct");
        let n_plot = SeriesPlot::new(
            n_group,
            FRAME,
            ScaleLinearSpec::new(x).with_nice(true),
            ScaleLinearSpec::new(y).with_nice(true),
        )
        .with_labels("PEP Threshold", "Number of Correct Identifications")
        .with_dots(3.0)
        .with_transition(transition);
        let roc_plot = SeriesPlot::new(
            self.group.child("roc"),
            FRAME,
            ScaleLinearSpec::new((0.0, 1.0)),
            ScaleLinearSpec::new((0.0, 1.0)),
        )
        .with_labels("False Positive Rate", "True Positive Rate")
        .with_transition(transition);

        Ok(IdentificationPair {
            n_correct: Panel::new(format!("n-correct-{}", self.name), FRAME),
            roc: Panel::new(format!("roc-{}", self.name), FRAME),
            control: self.control,
            n_plot,
            roc_plot,
            slices,
        })
    }
}

impl IdentificationPair {
    /// Binds both panels to the selected option.
    pub(crate) fn draw(&mut self, now: f64) {
        let option = self.control.selected.as_str();
        let Some(slice) = self.slices.get(option) else {
            return;
        };
        let pass = self.n_correct.begin(option);
        self.n_correct.apply(self.n_plot.render(&slice.n_correct, pass), now);
        let pass = self.roc.begin(option);
        self.roc.apply(self.roc_plot.render(&slice.roc, pass), now);
    }

    /// Selects `option` and rebinds. Returns `false` if the selection did not change.
    pub(crate) fn select(&mut self, option: &str, now: f64) -> Result<bool, FigureError> {
        if self.control.selected == option {
            return Ok(false);
        }
        self.control.select(option)?;
        tracing::debug!(control = %self.control.id, option, "rebinding identification plots");
        self.draw(now);
        Ok(true)
    }
}

/// Routes a dropdown change to the pair that owns the control; the other pairs keep their
/// selection.
pub(crate) fn handle_select(
    figure: &str,
    pairs: &mut [IdentificationPair],
    event: &FigureEvent,
    now: f64,
) -> Result<(), FigureError> {
    match event {
        FigureEvent::Select { control, option } => {
            let pair = pairs
                .iter_mut()
                .find(|p| p.control.id == *control)
                .ok_or_else(|| unknown_target(figure, control.clone()))?;
            pair.select(option, now).map(drop)
        }
        FigureEvent::Hover { region, .. }
        | FigureEvent::Pointer { region, .. }
        | FigureEvent::Leave { region } => Err(unknown_target(figure, region.clone())),
    }
}

/// Panels of `pairs`, n-correct before ROC.
pub(crate) fn pair_panels(pairs: &[IdentificationPair]) -> Vec<&Panel> {
    pairs.iter().flat_map(|p| [&p.n_correct, &p.roc]).collect()
}

pub(crate) fn pair_panels_mut(pairs: &mut [IdentificationPair]) -> Vec<&mut Panel> {
    pairs
        .iter_mut()
        .flat_map(|p| [&mut p.n_correct, &mut p.roc])
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use figkit_core::{MarkId, MarkPayload};
    use figkit_data::MemorySource;
    use kurbo::Point;

    use super::*;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_file(
                "A-n.json",
                r#"[
                    {"method": "IDPEP", "thresh": 0.0, "n_correct": [0, 0, 0]},
                    {"method": "IDPEP", "thresh": 0.5, "n_correct": [900, 1000, 1100]},
                    {"method": "Percolator", "thresh": 0.5, "n_correct": [1000, 1000, 1000]}
                ]"#,
            )
            .with_file(
                "B-n.json",
                r#"[
                    {"method": "IDPEP", "thresh": 0.0, "n_correct": [0, 0, 0]},
                    {"method": "IDPEP", "thresh": 0.5, "n_correct": [1800, 1800, 1800]}
                ]"#,
            )
            .with_file("A-roc.json", r#"[{"method": "IDPEP", "fp_rate": 0.5, "tp_rate": 0.9}]"#)
            .with_file("B-roc.json", r#"[{"method": "IDPEP", "fp_rate": 0.2, "tp_rate": 0.4}]"#)
    }

    fn pair() -> IdentificationPair {
        pair_from(&source())
    }

    fn pair_from(source: &MemorySource) -> IdentificationPair {
        PairSpec {
            name: "comet".into(),
            group: GroupId::named("test/comet"),
            control: Control::mixture("mixture-comet"),
            banded: true,
        }
        .load(
            source,
            |m| PairFiles {
                n_correct: format!("{m}-n.json"),
                roc: format!("{m}-roc.json"),
            },
            &RenderConfig::default(),
        )
        .expect("all files present")
    }

    fn dot_center(pair: &IdentificationPair, key: &str) -> Option<Point> {
        match pair.n_correct.scene.get(MarkId::keyed(pair.n_plot.dot_group(), key)) {
            Some(MarkPayload::Circle(c)) => Some(c.center),
            _ => None,
        }
    }

    #[test]
    fn domains_span_every_option() {
        let p = pair();
        assert_eq!(p.n_plot.x.resolved_domain(), (0.0, 0.5), "thresholds");
        assert_eq!(p.n_plot.y.resolved_domain(), (0.0, 1800.0), "largest mean");
    }

    #[test]
    fn y_domain_follows_the_means_not_the_band() {
        let source = MemorySource::new()
            .with_file(
                "A-n.json",
                r#"[
                    {"method": "IDPEP", "thresh": 0.0, "n_correct": [0, 0, 0]},
                    {"method": "IDPEP", "thresh": 0.5, "n_correct": [600, 1000, 1400]}
                ]"#,
            )
            .with_file(
                "B-n.json",
                r#"[{"method": "IDPEP", "thresh": 0.5, "n_correct": [1000, 1000, 1000]}]"#,
            )
            .with_file("A-roc.json", r#"[{"method": "IDPEP", "fp_rate": 0.5, "tp_rate": 0.9}]"#)
            .with_file("B-roc.json", r#"[{"method": "IDPEP", "fp_rate": 0.2, "tp_rate": 0.4}]"#);
        let p = pair_from(&source);
        assert_eq!(
            p.n_plot.y.resolved_domain(),
            (0.0, 1000.0),
            "a spread of 400 around 1000 does not widen the domain"
        );
    }

    #[test]
    fn selecting_an_option_rebinds_both_panels() {
        let mut p = pair();
        p.draw(0.0);
        let before = dot_center(&p, "IDPEP:0.5").expect("dot drawn");
        assert!(p.select("B", 10.0).expect("offered"), "selection changed");
        assert!(p.n_correct.scene.is_animating(), "1000ms rebind");
        assert!(p.roc.scene.is_animating(), "roc follows");
        p.n_correct.scene.settle();
        let after = dot_center(&p, "IDPEP:0.5").expect("dot kept");
        assert!(after.y < before.y, "higher mean draws higher");
        assert_eq!(
            dot_center(&p, "Percolator:0.5"),
            None,
            "samples missing from the new option exit"
        );
        assert!(
            p.n_correct
                .scene
                .get(MarkId::keyed(p.n_plot.line_group(), "Percolator"))
                .is_none(),
            "a method without samples has no line"
        );
        assert!(!p.select("B", 20.0).expect("offered"), "same option is a no-op");
    }

    #[test]
    fn unknown_options_are_rejected() {
        let mut p = pair();
        p.draw(0.0);
        assert!(
            matches!(p.select("C", 10.0), Err(FigureError::UnknownOption { .. })),
            "only mixtures A and B"
        );
        assert_eq!(p.control.selected, "A", "selection kept");
    }
}
