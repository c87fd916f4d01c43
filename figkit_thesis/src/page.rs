// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page: every figure, event routing and per-figure failure isolation.

use figkit_data::DataSource;

use crate::error::FigureError;
use crate::event::{FigureEvent, ScriptedAction, ScriptedEvent};
use crate::figure::{Figure, unknown_target};

/// Load outcome of one figure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FigureStatus {
    /// [`Page::load_all`] has not run yet.
    Pending,
    /// The figure loaded and drew its initial state.
    Ready,
    /// Loading failed; the figure stays unrendered.
    Failed(String),
}

/// All figures of the thesis page.
#[derive(Debug)]
pub struct Page {
    figures: Vec<Box<dyn Figure>>,
    status: Vec<FigureStatus>,
}

impl Page {
    /// Creates a page; nothing is loaded yet.
    pub fn new(figures: Vec<Box<dyn Figure>>) -> Self {
        let status = vec![FigureStatus::Pending; figures.len()];
        Self { figures, status }
    }

    /// Loads every figure. A figure whose data fails to load is logged and skipped; the
    /// others still render. Returns the number of figures that loaded.
    pub fn load_all(&mut self, source: &dyn DataSource, now: f64) -> usize {
        let mut ready = 0;
        for (figure, status) in self.figures.iter_mut().zip(&mut self.status) {
            match figure.load(source, now) {
                Ok(()) => {
                    tracing::info!(figure = figure.id(), "figure rendered");
                    *status = FigureStatus::Ready;
                    ready += 1;
                }
                Err(err) => {
                    tracing::warn!(figure = figure.id(), error = %err, "figure left unrendered");
                    *status = FigureStatus::Failed(err.to_string());
                }
            }
        }
        ready
    }

    /// Delivers `event` to the figure `id`.
    pub fn dispatch(
        &mut self,
        id: &str,
        event: &FigureEvent,
        source: &dyn DataSource,
        now: f64,
    ) -> Result<(), FigureError> {
        let index = self.index_of(id)?;
        if self.status[index] != FigureStatus::Ready {
            return Err(FigureError::NotLoaded(id.to_owned()));
        }
        tracing::debug!(figure = id, ?event, "dispatching event");
        self.figures[index].handle(event, source, now)
    }

    /// Resolves a scripted event to a [`FigureEvent`] and dispatches it.
    pub fn run_script(
        &mut self,
        script: &ScriptedEvent,
        source: &dyn DataSource,
        now: f64,
    ) -> Result<(), FigureError> {
        let figure = self.figures[self.index_of(&script.figure)?].as_ref();
        let event = match &script.action {
            ScriptedAction::Hover { region, key } => FigureEvent::Hover {
                region: region.clone(),
                target: figure
                    .target(region, key)
                    .ok_or_else(|| unknown_target(figure.id(), format!("{region}/{key}")))?,
            },
            ScriptedAction::Pointer { region, point } => FigureEvent::Pointer {
                region: region.clone(),
                point: *point,
            },
            ScriptedAction::Leave { region } => FigureEvent::Leave {
                region: region.clone(),
            },
            ScriptedAction::Select { control, option } => FigureEvent::Select {
                control: control.clone(),
                option: option.clone(),
            },
        };
        self.dispatch(&script.figure, &event, source, now)
    }

    /// Advances every figure's transitions to `now`.
    pub fn advance(&mut self, now: f64) {
        for figure in &mut self.figures {
            figure.advance(now);
        }
    }

    /// Finishes every transition.
    pub fn settle(&mut self) {
        for figure in &mut self.figures {
            figure.settle();
        }
    }

    /// The figures in page order.
    pub fn figures(&self) -> impl Iterator<Item = &dyn Figure> + '_ {
        self.figures.iter().map(|f| -> &dyn Figure { f.as_ref() })
    }

    /// The figure with id `id`.
    pub fn figure(&self, id: &str) -> Option<&dyn Figure> {
        self.index_of(id).ok().map(|i| self.figures[i].as_ref())
    }

    /// The load outcome of figure `id`.
    pub fn status(&self, id: &str) -> Option<&FigureStatus> {
        self.index_of(id).ok().map(|i| &self.status[i])
    }

    fn index_of(&self, id: &str) -> Result<usize, FigureError> {
        self.figures
            .iter()
            .position(|f| f.id() == id)
            .ok_or_else(|| FigureError::UnknownFigure(id.to_owned()))
    }
}
