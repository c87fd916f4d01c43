// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render lifecycle of one figure region.

/// Lifecycle state of a region: nothing drawn yet, or drawn from the slice identified by `K`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RegionState<K> {
    /// No data has been bound yet (or the load failed).
    #[default]
    Unrendered,
    /// Marks are bound to the slice with this key.
    Rendered(K),
}

/// What a render call has to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderPass {
    /// First render: create marks from their enter geometry.
    First,
    /// Rebind existing marks to a different slice.
    Rebind,
    /// Rebind to the slice that is already rendered.
    Same,
}

/// A figure region (one SVG viewport) and the key of the slice it currently shows.
#[derive(Clone, Debug, Default)]
pub struct Region<K> {
    state: RegionState<K>,
}

impl<K: Clone + PartialEq> Region<K> {
    /// Creates an unrendered region.
    pub fn new() -> Self {
        Self {
            state: RegionState::Unrendered,
        }
    }

    /// The current state.
    pub fn state(&self) -> &RegionState<K> {
        &self.state
    }

    /// The key of the rendered slice, if any.
    pub fn key(&self) -> Option<&K> {
        match &self.state {
            RegionState::Unrendered => None,
            RegionState::Rendered(k) => Some(k),
        }
    }

    /// Returns `true` once a slice has been rendered.
    pub fn is_rendered(&self) -> bool {
        matches!(self.state, RegionState::Rendered(_))
    }

    /// Records that the slice `key` is being rendered and reports which pass this is.
    pub fn render(&mut self, key: K) -> RenderPass {
        let pass = match &self.state {
            RegionState::Unrendered => RenderPass::First,
            RegionState::Rendered(k) if *k == key => RenderPass::Same,
            RegionState::Rendered(_) => RenderPass::Rebind,
        };
        self.state = RegionState::Rendered(key);
        pass
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn region_walks_the_lifecycle() {
        let mut region: Region<&str> = Region::new();
        assert!(!region.is_rendered(), "starts unrendered");
        assert_eq!(region.render("B1-xtandem"), RenderPass::First, "first render");
        assert_eq!(region.render("B1-xtandem"), RenderPass::Same, "same key");
        assert_eq!(region.render("A2-comet"), RenderPass::Rebind, "new key");
        assert_eq!(region.key(), Some(&"A2-comet"), "tracks the latest key");
    }
}
