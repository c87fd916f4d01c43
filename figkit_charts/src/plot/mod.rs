// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot builders.
//!
//! Each builder owns a [`Frame`](crate::Frame) and a root [`GroupId`], derives its scales from
//! the slice it is given and returns one [`Layer`](crate::Layer) per child group. Callers apply
//! the layers to a scene; builders never touch the scene themselves, so the caller decides
//! which layers to re-apply (for example, skipping an axis whose domain did not change).

mod box_plot;
mod correlation;
mod distribution;
mod series;
mod swarm;

pub use box_plot::{BoxGroup, BoxPlot};
pub use correlation::{Correlation, CorrelationPlot, Highlight};
pub use distribution::{DistributionPlot, DistributionRender, Scored};
pub use series::{Series, SeriesPlot, SeriesPoint};
pub use swarm::{SwarmPlot, SwarmPoint, SwarmRender};

use figkit_core::{GroupId, RenderPass, TextAnchor, Transition};
use kurbo::Point;

use crate::text_mark::TextMarkSpec;

/// Font size of axis titles and panel labels.
pub const LABEL_FONT_SIZE: f64 = 12.0;

/// A centered 12px title.
pub(crate) fn label(group: GroupId, key: &str, pos: Point, text: &str) -> TextMarkSpec {
    TextMarkSpec::new(group, key, pos)
        .with_text(text)
        .with_font_size(LABEL_FONT_SIZE)
        .with_anchor(TextAnchor::Middle)
}

/// Static guides snap into place on the first render and follow data transitions afterwards.
pub(crate) fn guide_transition(pass: RenderPass, update: Transition) -> Transition {
    match pass {
        RenderPass::First => Transition::NONE,
        RenderPass::Rebind | RenderPass::Same => update,
    }
}
