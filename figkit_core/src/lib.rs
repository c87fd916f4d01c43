// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal retained scene for figkit charts.
//!
//! This crate provides:
//! - **Marks**: stable-identity shapes (rects, circles, paths, text) keyed by a group tag plus an
//!   explicit composite key, never by sequence position.
//! - **Scene**: a keyed store that turns successive mark sets into [`MarkDiff`]s
//!   (enter/update/exit) for renderers.
//! - **Transitions**: timed interpolation between a mark's current and target geometry, where the
//!   most recent retarget wins.
//! - **Regions**: the per-figure `Unrendered -> Rendered(key)` lifecycle.
//!
//! Time is an abstract millisecond clock supplied by the caller.

mod mark;
mod payload;
mod region;
mod scene;
mod transition;

pub use mark::{GroupId, Mark, MarkId};
pub use payload::{
    CirclePayload, MarkPayload, PathPayload, RectPayload, TextAnchor, TextBaseline, TextPayload,
};
pub use region::{Region, RegionState, RenderPass};
pub use scene::{MarkDiff, Scene};
pub use transition::{Easing, Transition};
