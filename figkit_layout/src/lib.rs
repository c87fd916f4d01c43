// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point placement for swarm plots.
//!
//! - [`SwarmLayout`] relaxes points toward per-point targets while keeping them apart, for a
//!   fixed number of ticks.
//! - [`Voronoi`] partitions a rectangle into nearest-site cells, used as enlarged hover areas.
//! - [`HitIndex`] answers "which site is closest to this pointer" with an R-tree, which is the
//!   same question as "which Voronoi cell contains it".

mod hit;
mod swarm;
mod voronoi;

pub use hit::HitIndex;
pub use swarm::{SwarmLayout, SwarmTarget};
pub use voronoi::{Cell, Voronoi};
