// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Correct identifications and ROC curves of IDPEP and Percolator, per engine.

use figkit_core::GroupId;
use figkit_data::DataSource;

use super::identifications::{
    IdentificationPair, PairFiles, PairSpec, handle_select, pair_panels, pair_panels_mut,
};
use crate::catalog::pretty_engine;
use crate::config::RenderConfig;
use crate::error::FigureError;
use crate::event::FigureEvent;
use crate::figure::{Control, Figure, Panel};

const ID: &str = "fig04";
const ENGINES: [&str; 2] = ["comet", "msgf"];

/// Figure 4.
#[derive(Debug)]
pub struct EngineIdentifications {
    config: RenderConfig,
    pairs: Vec<IdentificationPair>,
}

impl EngineIdentifications {
    /// Creates the figure; nothing is loaded yet.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            config: config.clone(),
            pairs: Vec::new(),
        }
    }
}

impl Figure for EngineIdentifications {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "Correct identifications and ROC curves per search engine"
    }

    fn load(&mut self, source: &dyn DataSource, now: f64) -> Result<(), FigureError> {
        let mut pairs = Vec::with_capacity(ENGINES.len());
        for engine in ENGINES {
            let spec = PairSpec {
                name: engine.to_owned(),
                group: GroupId::named("fig04").child(engine),
                control: Control::mixture(format!("mixture-{engine}"))
                    .with_label(format!("{} applied to", pretty_engine(engine))),
                banded: true,
            };
            let files = |mixture: &str| PairFiles {
                n_correct: format!("fig04/{mixture}-{engine}-n-correct-ids.json"),
                roc: format!("fig04/{mixture}-{engine}-roc.json"),
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
