// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark sets bound to a scene group.

use figkit_core::{GroupId, Mark, MarkDiff, Scene, Transition};

/// The complete set of marks one group should show, plus how to get there.
///
/// Applying a layer is a keyed join: marks present in the scene are retargeted, new ones enter
/// and marks of the group that are missing from the layer exit.
#[derive(Clone, Debug)]
pub struct Layer {
    /// Target group.
    pub group: GroupId,
    /// Marks in update order; stagger delays follow this order.
    pub marks: Vec<Mark>,
    /// Timing of the retarget.
    pub transition: Transition,
}

impl Layer {
    /// Creates an empty layer.
    pub fn new(group: GroupId, transition: Transition) -> Self {
        Self {
            group,
            marks: Vec::new(),
            transition,
        }
    }

    /// Creates a layer from a mark list.
    pub fn with_marks(group: GroupId, marks: Vec<Mark>, transition: Transition) -> Self {
        Self {
            group,
            marks,
            transition,
        }
    }

    /// Adds one mark.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Adds several marks.
    pub fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.marks.extend(marks);
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the layer clears its group.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Binds the layer to `scene` at time `now`.
    pub fn apply(self, scene: &mut Scene, now: f64) -> Vec<MarkDiff> {
        scene.update_group(self.group, self.marks, self.transition, now)
    }
}

/// Applies `layers` in order and concatenates their diffs.
pub fn apply_layers(
    scene: &mut Scene,
    layers: impl IntoIterator<Item = Layer>,
    now: f64,
) -> Vec<MarkDiff> {
    let mut diffs = Vec::new();
    for layer in layers {
        diffs.extend(layer.apply(scene, now));
    }
    diffs
}

#[cfg(test)]
mod tests {
    extern crate std;

    use figkit_core::{CirclePayload, MarkDiff};
    use kurbo::Point;
    use peniko::color::palette::css;
    use peniko::{Brush, Color};

    use super::*;

    fn dot(group: GroupId, key: &str, x: f64) -> Mark {
        Mark::new(
            group,
            key,
            CirclePayload {
                center: Point::new(x, 0.0),
                radius: 3.0,
                fill: Brush::Solid(css::STEEL_BLUE),
                stroke: Brush::Solid(Color::TRANSPARENT),
                stroke_width: 0.0,
            },
        )
    }

    #[test]
    fn layers_only_touch_their_own_group() {
        let a = GroupId::named("a");
        let b = GroupId::named("b");
        let mut scene = Scene::new();
        apply_layers(
            &mut scene,
            [
                Layer::with_marks(a, vec![dot(a, "x", 1.0), dot(a, "y", 2.0)], Transition::NONE),
                Layer::with_marks(b, vec![dot(b, "x", 3.0)], Transition::NONE),
            ],
            0.0,
        );
        assert_eq!(scene.len(), 3, "all marks entered");

        let diffs =
            Layer::with_marks(a, vec![dot(a, "x", 1.0)], Transition::NONE).apply(&mut scene, 1.0);
        assert!(
            matches!(&diffs[..], [MarkDiff::Exit { .. }]),
            "only the dropped mark exits, got {diffs:?}"
        );
        assert_eq!(scene.group_ids(b).len(), 1, "other group untouched");
    }
}
