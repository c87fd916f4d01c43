// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The figure controller interface and its building blocks.

use core::fmt;

use figkit_charts::{Frame, Layer, apply_layers};
use figkit_core::{MarkDiff, MarkId, Region, RenderPass, Scene};
use figkit_data::DataSource;

use crate::catalog::MIXTURES;
use crate::error::FigureError;
use crate::event::FigureEvent;

/// One SVG viewport of a figure: its frame, its scene and the slice it currently shows.
#[derive(Debug)]
pub struct Panel {
    /// Panel name, unique within the figure (`"swarm"`, `"roc-comet"`).
    pub name: String,
    /// Viewport geometry.
    pub frame: Frame,
    /// Retained marks.
    pub scene: Scene,
    /// Render lifecycle.
    pub region: Region<String>,
}

impl Panel {
    /// Creates an empty, unrendered panel.
    pub fn new(name: impl Into<String>, frame: Frame) -> Self {
        Self {
            name: name.into(),
            frame,
            scene: Scene::new(),
            region: Region::new(),
        }
    }

    /// Records that the slice `key` is about to be drawn.
    pub fn begin(&mut self, key: impl Into<String>) -> RenderPass {
        self.region.render(key.into())
    }

    /// Applies layers to the scene at `now`.
    pub fn apply(&mut self, layers: impl IntoIterator<Item = Layer>, now: f64) -> Vec<MarkDiff> {
        apply_layers(&mut self.scene, layers, now)
    }

    /// Returns `true` once a slice is bound.
    pub fn is_rendered(&self) -> bool {
        self.region.is_rendered()
    }
}

/// A dropdown.
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    /// Id used by [`FigureEvent::Select`].
    pub id: String,
    /// Text shown before the dropdown, e.g. `"Comet applied to"`.
    pub label: String,
    /// Text shown after the dropdown.
    pub suffix: String,
    /// `(value, label)` pairs.
    pub options: Vec<(String, String)>,
    /// The selected value.
    pub selected: String,
}

impl Control {
    /// A mixture dropdown with "Mixture A" selected.
    pub fn mixture(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            suffix: String::new(),
            options: MIXTURES
                .iter()
                .map(|m| ((*m).to_owned(), format!("Mixture {m}")))
                .collect(),
            selected: MIXTURES[0].to_owned(),
        }
    }

    /// Sets the text shown before the dropdown.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the text shown after the dropdown.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Fails with [`FigureError::UnknownOption`] unless the control offers `option`.
    pub fn offers(&self, option: &str) -> Result<(), FigureError> {
        if self.options.iter().any(|(v, _)| v == option) {
            Ok(())
        } else {
            Err(FigureError::UnknownOption {
                control: self.id.clone(),
                option: option.to_owned(),
            })
        }
    }

    /// Selects `option`, rejecting values the control does not offer.
    pub fn select(&mut self, option: &str) -> Result<(), FigureError> {
        self.offers(option)?;
        option.clone_into(&mut self.selected);
        Ok(())
    }
}

/// A figure controller.
///
/// A figure owns its panels, scales, caches and controls. Events arrive as [`FigureEvent`]s and
/// are handled synchronously; data files are fetched from the source passed with each call.
pub trait Figure: fmt::Debug {
    /// Stable id, e.g. `"fig03"`.
    fn id(&self) -> &str;

    /// Caption shown above the figure.
    fn title(&self) -> &str;

    /// Loads the figure's data and draws the initial state.
    fn load(&mut self, source: &dyn DataSource, now: f64) -> Result<(), FigureError>;

    /// Handles one interaction.
    fn handle(
        &mut self,
        event: &FigureEvent,
        source: &dyn DataSource,
        now: f64,
    ) -> Result<(), FigureError>;

    /// The figure's panels in display order.
    fn panels(&self) -> Vec<&Panel>;

    /// Mutable access to the panels.
    fn panels_mut(&mut self) -> Vec<&mut Panel>;

    /// The figure's dropdowns.
    fn controls(&self) -> Vec<&Control> {
        Vec::new()
    }

    /// The mark bound to the record `key` in `region`, for scripted hovers.
    fn target(&self, region: &str, key: &str) -> Option<MarkId> {
        let _ = (region, key);
        None
    }

    /// Advances every running transition to `now`.
    fn advance(&mut self, now: f64) -> Vec<MarkDiff> {
        self.panels_mut()
            .into_iter()
            .flat_map(|p| p.scene.advance(now))
            .collect()
    }

    /// Jumps every transition to its end.
    fn settle(&mut self) -> Vec<MarkDiff> {
        self.panels_mut()
            .into_iter()
            .flat_map(|p| p.scene.settle())
            .collect()
    }

    /// Returns `true` once every panel shows data.
    fn is_rendered(&self) -> bool {
        let panels = self.panels();
        !panels.is_empty() && panels.iter().all(|p| p.is_rendered())
    }
}

/// The error for an event addressed to a region this figure does not have.
pub(crate) fn unknown_target(figure: &str, target: impl Into<String>) -> FigureError {
    FigureError::UnknownTarget {
        figure: figure.to_owned(),
        target: target.into(),
    }
}
