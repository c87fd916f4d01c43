// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render settings, loadable from JSON.

use std::path::PathBuf;

use figkit_core::Transition;
use figkit_layout::SwarmLayout;
use serde::{Deserialize, Serialize};

/// Settings for a page render; every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory holding the `figNN/` data folders.
    pub data_dir: PathBuf,
    /// Directory the SVG files and `index.html` are written to.
    pub out_dir: PathBuf,
    /// Relaxation steps of the swarm layouts.
    pub swarm_iterations: usize,
    /// Radius of swarm points.
    pub swarm_radius: f64,
    /// Multiplier for every transition duration; `0` snaps all updates.
    pub transition_scale: f64,
    /// Outlines the hover cells of the swarm plots.
    pub show_hit_cells: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("out"),
            swarm_iterations: 120,
            swarm_radius: 7.0,
            transition_scale: 1.0,
            show_hit_cells: false,
        }
    }
}

impl RenderConfig {
    /// Parses a JSON config; absent fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The swarm relaxation settings.
    pub fn swarm_layout(&self) -> SwarmLayout {
        SwarmLayout::new()
            .with_iterations(self.swarm_iterations)
            .with_radius(self.swarm_radius)
    }

    /// `transition` with its timing scaled by [`RenderConfig::transition_scale`].
    pub fn scaled(&self, transition: Transition) -> Transition {
        let k = self.transition_scale.max(0.0);
        if k == 0.0 {
            return Transition::NONE;
        }
        Transition {
            duration_ms: transition.duration_ms * k,
            delay_ms: transition.delay_ms * k,
            stagger_ms: transition.stagger_ms * k,
            easing: transition.easing,
        }
    }

    /// A scaled transition of `duration_ms`.
    pub fn millis(&self, duration_ms: f64) -> Transition {
        self.scaled(Transition::millis(duration_ms))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RenderConfig::from_json(r#"{"swarm_iterations": 40, "show_hit_cells": true}"#)
            .expect("valid config");
        assert_eq!(config.swarm_iterations, 40, "overridden");
        assert!(config.show_hit_cells, "overridden");
        assert_eq!(config.swarm_radius, 7.0, "default radius");
        assert_eq!(config.data_dir, PathBuf::from("data"), "default data dir");
    }

    #[test]
    fn zero_scale_snaps() {
        let config = RenderConfig {
            transition_scale: 0.0,
            ..RenderConfig::default()
        };
        assert!(config.millis(800.0).is_instant(), "no animation");
        let half = RenderConfig {
            transition_scale: 0.5,
            ..RenderConfig::default()
        };
        assert_eq!(half.millis(800.0).duration_ms, 400.0, "scaled duration");
    }
}
