// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pearson correlations between the rescoring features, with a hover tooltip.

use figkit_charts::{Correlation, CorrelationPlot, Frame, Margin};
use figkit_core::{GroupId, MarkId};
use figkit_data::{DataSource, RowMapper};
use hashbrown::HashMap;

use super::fetch;
use crate::catalog::feature_names;
use crate::error::FigureError;
use crate::event::FigureEvent;
use crate::figure::{Figure, Panel, unknown_target};

const ID: &str = "fig08";
const FILE: &str = "fig08/correlations.json";
const REGION: &str = "matrix";

/// Figure 8.
#[derive(Debug)]
pub struct Correlations {
    panel: Panel,
    plot: CorrelationPlot,
    cells: Vec<Correlation>,
    targets: HashMap<MarkId, usize>,
    hovered: Option<usize>,
}

impl Correlations {
    /// Creates the figure; nothing is loaded yet.
    pub fn new() -> Self {
        let frame = Frame::new(740.0, 600.0, Margin::new(90.0, 200.0, 30.0, 120.0));
        let plot = CorrelationPlot::new(GroupId::named("fig08"), frame, feature_names())
            .with_highlight("sibling-scores", "sibling-ions")
            .with_highlight("precursor-scores", "replicate-spectra");
        Self {
            panel: Panel::new(REGION, frame),
            plot,
            cells: Vec::new(),
            targets: HashMap::new(),
            hovered: None,
        }
    }

    fn hover(&mut self, index: Option<usize>, now: f64) {
        if index == self.hovered {
            return;
        }
        self.hovered = index;
        let cell = index.and_then(|i| self.cells.get(i));
        self.panel.apply([self.plot.hover_layer(cell)], now);
    }
}

impl Default for Correlations {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure for Correlations {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "Correlations between rescoring features"
    }

    fn load(&mut self, source: &dyn DataSource, now: f64) -> Result<(), FigureError> {
        let mapper = RowMapper::new()
            .text("feature1")
            .text("feature2")
            .number("corr");
        let data = fetch(source, FILE, &mapper)?;
        self.cells = data
            .iter()
            .filter_map(|r| {
                Some(Correlation::new(
                    r.text("feature1")?,
                    r.text("feature2")?,
                    r.number("corr")?,
                ))
            })
            .collect();
        let group = self.plot.cell_group();
        self.targets = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, c)| (MarkId::keyed(group, &c.key()), i))
            .collect();
        self.panel.begin("correlations");
        self.panel.apply(self.plot.render(&self.cells), now);
        Ok(())
    }

    fn handle(
        &mut self,
        event: &FigureEvent,
        _source: &dyn DataSource,
        now: f64,
    ) -> Result<(), FigureError> {
        let index = match event {
            FigureEvent::Hover { region, target } if region == REGION => Some(
                *self
                    .targets
                    .get(target)
                    .ok_or_else(|| unknown_target(ID, format!("{region}/{target:?}")))?,
            ),
            FigureEvent::Pointer { region, point } if region == REGION => {
                self.plot.hit(&self.cells, *point)
            }
            FigureEvent::Leave { region } if region == REGION => None,
            FigureEvent::Hover { region, .. }
            | FigureEvent::Pointer { region, .. }
            | FigureEvent::Leave { region } => return Err(unknown_target(ID, region.clone())),
            FigureEvent::Select { control, .. } => return Err(unknown_target(ID, control.clone())),
        };
        self.hover(index, now);
        Ok(())
    }

    fn panels(&self) -> Vec<&Panel> {
        vec![&self.panel]
    }

    fn panels_mut(&mut self) -> Vec<&mut Panel> {
        vec![&mut self.panel]
    }

    fn target(&self, region: &str, key: &str) -> Option<MarkId> {
        let id = MarkId::keyed(self.plot.cell_group(), key);
        (region == REGION && self.targets.contains_key(&id)).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use figkit_core::MarkPayload;
    use figkit_data::MemorySource;

    use super::*;

    fn loaded() -> (Correlations, MemorySource) {
        let source = MemorySource::new().with_file(
            FILE,
            r#"[
                {"feature1": "sibling-ions", "feature2": "sibling-scores", "corr": 0.88},
                {"feature1": "sibling-ions", "feature2": "sibling-ions", "corr": 1.0}
            ]"#,
        );
        let mut fig = Correlations::new();
        fig.load(&source, 0.0).expect("loads");
        (fig, source)
    }

    fn tooltip(fig: &Correlations) -> Option<String> {
        let id = MarkId::keyed(fig.plot.hover_group(), "tooltip");
        match fig.panel.scene.get(id) {
            Some(MarkPayload::Text(t)) => Some(t.text.clone()),
            _ => None,
        }
    }

    #[test]
    fn hover_and_leave_toggle_the_tooltip() {
        let (mut fig, source) = loaded();
        let target = fig.target(REGION, "sibling-ions-sibling-scores").expect("drawn");
        fig.handle(&FigureEvent::Hover { region: REGION.into(), target }, &source, 1.0)
            .expect("known cell");
        assert!(
            tooltip(&fig).is_some_and(|t| t.ends_with("0.88")),
            "tooltip names the coefficient"
        );
        fig.handle(&FigureEvent::Leave { region: REGION.into() }, &source, 2.0)
            .expect("known region");
        assert_eq!(tooltip(&fig), None, "leave clears the tooltip");
    }

    #[test]
    fn pointer_outside_every_circle_hides_the_tooltip() {
        let (mut fig, source) = loaded();
        let center = fig.plot.center(&fig.cells[1]).expect("known features");
        let pointer = |point| FigureEvent::Pointer {
            region: REGION.into(),
            point,
        };
        fig.handle(&pointer(center), &source, 1.0).expect("inside");
        assert_eq!(fig.hovered, Some(1), "diagonal cell");
        fig.handle(&pointer(kurbo::Point::new(5.0, 5.0)), &source, 2.0).expect("outside");
        assert_eq!(fig.hovered, None, "empty space");
    }
}
