// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! X!Tandem identifications of three search repetitions, to show run-to-run variation.

use figkit_core::GroupId;
use figkit_data::DataSource;

use super::identifications::{
    IdentificationPair, PairFiles, PairSpec, handle_select, pair_panels, pair_panels_mut,
};
use crate::config::RenderConfig;
use crate::error::FigureError;
use crate::event::FigureEvent;
use crate::figure::{Control, Figure, Panel};

const ID: &str = "fig06";
const REPETITIONS: [u32; 3] = [1, 2, 3];

/// Figure 6.
#[derive(Debug)]
pub struct Repetitions {
    config: RenderConfig,
    pairs: Vec<IdentificationPair>,
}

impl Repetitions {
    /// Creates the figure; nothing is loaded yet.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            config: config.clone(),
            pairs: Vec::new(),
        }
    }
}

impl Figure for Repetitions {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "Correct identifications and ROC curves of repeated X!Tandem searches"
    }

    fn load(&mut self, source: &dyn DataSource, now: f64) -> Result<(), FigureError> {
        let mut pairs = Vec::with_capacity(REPETITIONS.len());
        for rep in REPETITIONS {
            let spec = PairSpec {
                name: rep.to_string(),
                group: GroupId::named("fig06").child(&rep.to_string()),
                control: Control::mixture(format!("mixture-{rep}"))
                    .with_label("X!Tandem applied to")
                    .with_suffix(format!("(Repetition {rep})")),
                banded: false,
            };
            let files = |mixture: &str| PairFiles {
                n_correct: format!("fig06/{mixture}-{rep}-xtandem-n-correct-ids.json"),
                roc: format!("fig06/{mixture}-{rep}-xtandem-roc.json"),
            };
            let mut pair = spec.load(source, files, &self.config)?;
            pair.draw(now);
            pairs.push(pair);
        }
        self.pairs = pairs;
        Ok(())
    }

    fn handle(
        &mut self,
        event: &FigureEvent,
        _source: &dyn DataSource,
        now: f64,
    ) -> Result<(), FigureError> {
        handle_select(ID, &mut self.pairs, event, now)
    }

    fn panels(&self) -> Vec<&Panel> {
        pair_panels(&self.pairs)
    }

    fn panels_mut(&mut self) -> Vec<&mut Panel> {
        pair_panels_mut(&mut self.pairs)
    }

    fn controls(&self) -> Vec<&Control> {
        self.pairs.iter().map(|p| &p.control).collect()
    }
}
