// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark identity and the mark record stored in a [`crate::Scene`].

use crate::payload::MarkPayload;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(seed: u64, bytes: &[u8]) -> u64 {
    let mut hash = seed;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// A named family of marks that is updated as a unit.
///
/// Typical groups are "the correct histogram bins of panel B" or "the tick labels of the left
/// axis". [`crate::Scene::update_group`] removes marks of a group that are absent from a new set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u64);

impl GroupId {
    /// Derives a group id from a stable name.
    pub fn named(name: &str) -> Self {
        Self(fnv1a(FNV_OFFSET, name.as_bytes()))
    }

    /// Derives a child group, e.g. `panel.child("bins-correct")`.
    pub fn child(self, name: &str) -> Self {
        Self(fnv1a(fnv1a(self.0, b"/"), name.as_bytes()))
    }
}

/// Stable identity of a mark across updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives the id of the mark bound to `key` inside `group`.
    ///
    /// The key is the bound datum's composite key (method, feature, bin boundary, category).
    /// The same `(group, key)` always yields the same id, so rebinding a reordered or filtered
    /// slice keeps each datum on its own shape.
    pub fn keyed(group: GroupId, key: &str) -> Self {
        Self(fnv1a(fnv1a(group.0, b"#"), key.as_bytes()))
    }
}

/// A shape with stable identity, ready to be inserted into a [`crate::Scene`].
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable mark id.
    pub id: MarkId,
    /// The group this mark belongs to.
    pub group: GroupId,
    /// Rendering order hint; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Target geometry and paint.
    pub payload: MarkPayload,
    /// Optional degenerate geometry the mark starts from when it first enters.
    pub enter: Option<MarkPayload>,
}

impl Mark {
    /// Creates a mark keyed by `key` inside `group`.
    pub fn new(group: GroupId, key: &str, payload: impl Into<MarkPayload>) -> Self {
        Self {
            id: MarkId::keyed(group, key),
            group,
            z_index: 0,
            payload: payload.into(),
            enter: None,
        }
    }

    /// Creates a mark with an explicit id.
    pub fn with_id(id: MarkId, group: GroupId, payload: impl Into<MarkPayload>) -> Self {
        Self {
            id,
            group,
            z_index: 0,
            payload: payload.into(),
            enter: None,
        }
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the geometry the mark enters from.
    pub fn with_enter(mut self, enter: impl Into<MarkPayload>) -> Self {
        self.enter = Some(enter.into());
        self
    }
}
