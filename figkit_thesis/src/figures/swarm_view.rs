// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A swarm panel with pointer resolution, shared by the KS-distance and feature figures.

use figkit_charts::{Layer, SwarmPlot, SwarmPoint, SwarmRender};
use figkit_core::{MarkId, Transition};
use figkit_stats::EmptyInputError;
use hashbrown::HashMap;
use peniko::Color;

use crate::error::FigureError;
use crate::event::FigureEvent;
use crate::figure::{Panel, unknown_target};

#[derive(Debug)]
pub(crate) struct SwarmView {
    pub(crate) panel: Panel,
    pub(crate) plot: SwarmPlot,
    pub(crate) points: Vec<SwarmPoint>,
    pub(crate) render: SwarmRender,
    targets: HashMap<MarkId, usize>,
    show_cells: bool,
}

impl SwarmView {
    /// Lays out `points`; nothing is drawn until [`SwarmView::draw`].
    pub(crate) fn new(
        panel: Panel,
        plot: SwarmPlot,
        points: Vec<SwarmPoint>,
        show_cells: bool,
    ) -> Result<Self, EmptyInputError> {
        let render = plot.layout(&points)?;
        let group = plot.point_group();
        let targets = points
            .iter()
            .enumerate()
            .map(|(i, p)| (MarkId::keyed(group, &p.key), i))
            .collect();
        Ok(Self {
            panel,
            plot,
            points,
            render,
            targets,
            show_cells,
        })
    }

    /// Draws axes, titles, points and extra layers.
    pub(crate) fn draw(
        &mut self,
        key: &str,
        paint: impl Fn(usize, &SwarmPoint) -> (Color, Color),
        extra: Vec<Layer>,
        now: f64,
    ) {
        self.panel.begin(key);
        let mut layers = vec![
            self.plot.axis_layer(&self.render),
            self.plot.label_layer(),
            self.points_layer(Transition::NONE, paint),
        ];
        if self.show_cells {
            layers.push(self.render.cell_layer(self.plot.cell_group(), &self.points));
        }
        layers.extend(extra);
        self.panel.apply(layers, now);
    }

    /// The point circles painted by `paint`.
    pub(crate) fn points_layer(
        &self,
        transition: Transition,
        paint: impl Fn(usize, &SwarmPoint) -> (Color, Color),
    ) -> Layer {
        self.plot.point_layer(&self.points, &self.render, transition, paint)
    }

    /// Id of the circle bound to `key`.
    pub(crate) fn target(&self, key: &str) -> Option<MarkId> {
        let id = MarkId::keyed(self.plot.point_group(), key);
        self.targets.contains_key(&id).then_some(id)
    }

    pub(crate) fn index_of(&self, key: &str) -> Option<usize> {
        self.points.iter().position(|p| p.key == key)
    }

    /// The point an event refers to: `Ok(None)` for a pointer over empty space or a leave.
    pub(crate) fn resolve(
        &self,
        figure: &str,
        event: &FigureEvent,
    ) -> Result<Option<usize>, FigureError> {
        match event {
            FigureEvent::Hover { region, target } if *region == self.panel.name => self
                .targets
                .get(target)
                .copied()
                .map(Some)
                .ok_or_else(|| unknown_target(figure, format!("{region}/{target:?}"))),
            FigureEvent::Pointer { region, point } if *region == self.panel.name => {
                Ok(self.render.hit(*point))
            }
            FigureEvent::Leave { region } if *region == self.panel.name => Ok(None),
            FigureEvent::Hover { region, .. }
            | FigureEvent::Pointer { region, .. }
            | FigureEvent::Leave { region } => Err(unknown_target(figure, region.clone())),
            FigureEvent::Select { control, .. } => Err(unknown_target(figure, control.clone())),
        }
    }
}
