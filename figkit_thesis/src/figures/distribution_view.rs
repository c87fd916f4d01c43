// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A score-distribution panel that redraws its axis only when the domain changes.

use figkit_charts::{DistributionPlot, Scored};
use figkit_data::{Dataset, RowMapper};
use figkit_stats::EmptyInputError;

use crate::error::FigureError;
use crate::figure::Panel;

/// Maps the `score` and `correct` fields of a distribution file.
pub(crate) fn score_mapper() -> RowMapper {
    RowMapper::new().number("score").boolean("correct")
}

/// The scored identifications of `data`; records without a score are skipped.
pub(crate) fn scored(data: &Dataset) -> Vec<Scored> {
    data.iter()
        .filter_map(|r| Some(Scored::new(r.number("score")?, r.boolean("correct")?)))
        .collect()
}

#[derive(Debug)]
pub(crate) struct DistributionView {
    pub(crate) panel: Panel,
    pub(crate) plot: DistributionPlot,
    axis_domain: Option<(f64, f64)>,
}

impl DistributionView {
    pub(crate) fn new(panel: Panel, plot: DistributionPlot) -> Self {
        Self {
            panel,
            plot,
            axis_domain: None,
        }
    }

    /// Binds the slice `key` and animates the bins toward it.
    pub(crate) fn draw(
        &mut self,
        key: &str,
        data: &[Scored],
        caption: &[String],
        now: f64,
    ) -> Result<(), FigureError> {
        if data.is_empty() {
            return Err(EmptyInputError { statistic: "extent" }.into());
        }
        let pass = self.panel.begin(key);
        let render = self.plot.render(data, pass, caption)?;
        let mut layers = render.bins;
        layers.push(render.guides);
        if self.axis_domain != Some(render.domain) {
            tracing::debug!(
                panel = %self.panel.name,
                domain = ?render.domain,
                "score domain changed; redrawing axis"
            );
            self.axis_domain = Some(render.domain);
            layers.push(render.axis);
        }
        self.panel.apply(layers, now);
        Ok(())
    }

    /// The domain of the axis currently drawn.
    #[cfg(test)]
    pub(crate) fn axis_domain(&self) -> Option<(f64, f64)> {
        self.axis_domain
    }
}
