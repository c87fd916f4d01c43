// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed mark store with enter/update/exit diffs and timed transitions.

use hashbrown::{HashMap, HashSet};

use crate::mark::{GroupId, Mark, MarkId};
use crate::payload::MarkPayload;
use crate::transition::{Easing, Transition};

/// A change to the rendered state of one mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark appeared.
    Enter {
        /// The mark id.
        id: MarkId,
        /// Its z-index.
        z_index: i32,
        /// Its initial payload (the enter geometry when one was given).
        new: Box<MarkPayload>,
    },
    /// A mark's rendered payload or z-index changed.
    Update {
        /// The mark id.
        id: MarkId,
        /// Previous z-index.
        old_z_index: i32,
        /// New z-index.
        new_z_index: i32,
        /// Previous payload.
        old: Box<MarkPayload>,
        /// New payload.
        new: Box<MarkPayload>,
    },
    /// A mark was removed.
    Exit {
        /// The mark id.
        id: MarkId,
        /// The last rendered payload.
        old: Box<MarkPayload>,
    },
}

impl MarkDiff {
    /// The id of the mark this diff refers to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

#[derive(Clone, Debug)]
struct Animation {
    from: MarkPayload,
    start: f64,
    duration: f64,
    easing: Easing,
}

#[derive(Clone, Debug)]
struct Entry {
    group: GroupId,
    z_index: i32,
    current: MarkPayload,
    target: MarkPayload,
    animation: Option<Animation>,
}

impl Entry {
    /// Samples the running animation at `now`. Returns the payload and whether it finished.
    fn sample(&self, now: f64) -> (MarkPayload, bool) {
        let Some(anim) = &self.animation else {
            return (self.current.clone(), true);
        };
        if now < anim.start {
            return (anim.from.clone(), false);
        }
        if anim.duration <= 0.0 || now >= anim.start + anim.duration {
            return (self.target.clone(), true);
        }
        let t = anim.easing.apply((now - anim.start) / anim.duration);
        (anim.from.lerp(&self.target, t), false)
    }
}

/// A retained set of marks keyed by [`MarkId`].
///
/// Every mutation returns the [`MarkDiff`]s it caused so a renderer can mirror the scene.
#[derive(Debug, Default)]
pub struct Scene {
    entries: HashMap<MarkId, Entry>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of marks in the scene.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts entering marks and retargets existing ones. Never removes marks.
    ///
    /// For an existing mark the transition starts from its geometry at `now`, so a retarget in
    /// the middle of a running transition continues smoothly and supersedes it. Retargeting to
    /// the current target is a no-op.
    pub fn upsert(
        &mut self,
        marks: impl IntoIterator<Item = Mark>,
        transition: Transition,
        now: f64,
    ) -> Vec<MarkDiff> {
        let mut diffs = Vec::new();
        for (index, mark) in marks.into_iter().enumerate() {
            let Mark {
                id,
                group,
                z_index,
                payload,
                enter,
            } = mark;
            let start = transition.start_for(now, index);

            let Some(entry) = self.entries.get_mut(&id) else {
                let (current, animation) = match enter {
                    Some(enter) if !transition.is_instant() => (
                        enter.clone(),
                        Some(Animation {
                            from: enter,
                            start,
                            duration: transition.duration_ms,
                            easing: transition.easing,
                        }),
                    ),
                    _ => (payload.clone(), None),
                };
                diffs.push(MarkDiff::Enter {
                    id,
                    z_index,
                    new: Box::new(current.clone()),
                });
                self.entries.insert(
                    id,
                    Entry {
                        group,
                        z_index,
                        current,
                        target: payload,
                        animation,
                    },
                );
                continue;
            };

            entry.group = group;
            let old_z_index = entry.z_index;
            if entry.target == payload && old_z_index == z_index {
                continue;
            }

            let (now_payload, _) = entry.sample(now);
            let old = core::mem::replace(&mut entry.current, now_payload);
            entry.z_index = z_index;
            entry.target = payload;
            if transition.is_instant() {
                entry.current = entry.target.clone();
                entry.animation = None;
            } else {
                entry.animation = Some(Animation {
                    from: entry.current.clone(),
                    start,
                    duration: transition.duration_ms,
                    easing: transition.easing,
                });
            }
            if old != entry.current || old_z_index != z_index {
                diffs.push(MarkDiff::Update {
                    id,
                    old_z_index,
                    new_z_index: z_index,
                    old: Box::new(old),
                    new: Box::new(entry.current.clone()),
                });
            }
        }
        diffs
    }

    /// Binds a complete mark set to `group`.
    ///
    /// Marks are upserted as in [`Scene::upsert`]; marks of `group` that are absent from `marks`
    /// exit. Marks of other groups are untouched.
    pub fn update_group(
        &mut self,
        group: GroupId,
        marks: impl IntoIterator<Item = Mark>,
        transition: Transition,
        now: f64,
    ) -> Vec<MarkDiff> {
        let marks: Vec<Mark> = marks.into_iter().collect();
        let keep: HashSet<MarkId> = marks.iter().map(|m| m.id).collect();
        let mut diffs = self.upsert(marks, transition, now);

        let mut exiting: Vec<MarkId> = self
            .entries
            .iter()
            .filter(|(id, e)| e.group == group && !keep.contains(*id))
            .map(|(id, _)| *id)
            .collect();
        exiting.sort();
        for id in exiting {
            if let Some(entry) = self.entries.remove(&id) {
                diffs.push(MarkDiff::Exit {
                    id,
                    old: Box::new(entry.current),
                });
            }
        }
        diffs
    }

    /// Removes every mark of `group`.
    pub fn remove_group(&mut self, group: GroupId) -> Vec<MarkDiff> {
        self.update_group(group, Vec::new(), Transition::NONE, 0.0)
    }

    /// Advances running transitions to `now`.
    pub fn advance(&mut self, now: f64) -> Vec<MarkDiff> {
        let mut ids: Vec<MarkId> = self
            .entries
            .iter()
            .filter(|(_, e)| e.animation.is_some())
            .map(|(id, _)| *id)
            .collect();
        ids.sort();

        let mut diffs = Vec::new();
        for id in ids {
            let Some(entry) = self.entries.get_mut(&id) else {
                continue;
            };
            let (payload, done) = entry.sample(now);
            if done {
                entry.animation = None;
            }
            if payload != entry.current {
                let old = core::mem::replace(&mut entry.current, payload);
                diffs.push(MarkDiff::Update {
                    id,
                    old_z_index: entry.z_index,
                    new_z_index: entry.z_index,
                    old: Box::new(old),
                    new: Box::new(entry.current.clone()),
                });
            }
        }
        diffs
    }

    /// Finishes all running transitions immediately.
    pub fn settle(&mut self) -> Vec<MarkDiff> {
        self.advance(f64::INFINITY)
    }

    /// Returns `true` while any transition is pending or running.
    pub fn is_animating(&self) -> bool {
        self.entries.values().any(|e| e.animation.is_some())
    }

    /// The currently rendered payload of a mark.
    pub fn get(&self, id: MarkId) -> Option<&MarkPayload> {
        self.entries.get(&id).map(|e| &e.current)
    }

    /// The payload a mark is transitioning towards (equal to [`Scene::get`] when at rest).
    pub fn target(&self, id: MarkId) -> Option<&MarkPayload> {
        self.entries.get(&id).map(|e| &e.target)
    }

    /// Ids of all marks in `group`, sorted.
    pub fn group_ids(&self, group: GroupId) -> Vec<MarkId> {
        let mut ids: Vec<MarkId> = self
            .entries
            .iter()
            .filter(|(_, e)| e.group == group)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// All marks in render order `(z_index, id)`.
    pub fn iter_sorted(&self) -> Vec<(MarkId, i32, &MarkPayload)> {
        let mut out: Vec<(MarkId, i32, &MarkPayload)> = self
            .entries
            .iter()
            .map(|(id, e)| (*id, e.z_index, &e.current))
            .collect();
        out.sort_by_key(|(id, z, _)| (*z, id.0));
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::{Point, Rect};
    use peniko::color::palette::css;
    use peniko::{Brush, Color};

    use super::*;
    use crate::payload::{CirclePayload, RectPayload};

    fn bar(x1: f64) -> RectPayload {
        RectPayload {
            rect: Rect::new(0.0, 0.0, x1, 10.0),
            fill: Brush::Solid(css::STEEL_BLUE),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
        }
    }

    fn dot(x: f64) -> CirclePayload {
        CirclePayload {
            center: Point::new(x, 0.0),
            radius: 3.0,
            fill: Brush::Solid(css::ORANGE),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
        }
    }

    fn width_of(scene: &Scene, id: MarkId) -> f64 {
        match scene.get(id) {
            Some(MarkPayload::Rect(r)) => r.rect.width(),
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn entering_marks_start_from_enter_geometry() {
        let group = GroupId::named("bins");
        let mut scene = Scene::new();
        let mark = Mark::new(group, "0", bar(40.0)).with_enter(bar(0.0));
        let diffs = scene.upsert([mark.clone()], Transition::millis(300.0), 0.0);
        assert!(
            matches!(&diffs[..], [MarkDiff::Enter { .. }]),
            "first bind enters"
        );
        assert_eq!(width_of(&scene, mark.id), 0.0, "enters degenerate");

        scene.advance(150.0);
        let mid = width_of(&scene, mark.id);
        assert!(mid > 0.0 && mid < 40.0, "halfway width was {mid}");

        scene.advance(300.0);
        assert_eq!(width_of(&scene, mark.id), 40.0, "reaches the target");
        assert!(!scene.is_animating(), "transition finished");
    }

    #[test]
    fn stagger_delays_later_marks() {
        let group = GroupId::named("bins");
        let marks: Vec<Mark> = (0..3)
            .map(|i| Mark::new(group, &i.to_string(), bar(30.0)).with_enter(bar(0.0)))
            .collect();
        let ids: Vec<MarkId> = marks.iter().map(|m| m.id).collect();
        let mut scene = Scene::new();
        scene.upsert(marks, Transition::millis(300.0).with_stagger(100.0), 0.0);
        scene.advance(150.0);
        assert!(width_of(&scene, ids[0]) > 0.0, "first bin is moving");
        assert!(width_of(&scene, ids[1]) > 0.0, "second bin has started");
        assert_eq!(width_of(&scene, ids[2]), 0.0, "third bin still waits");
    }

    #[test]
    fn retarget_mid_transition_starts_from_current_value() {
        let group = GroupId::named("indicator");
        let mut scene = Scene::new();
        let id = MarkId::keyed(group, "line");
        scene.upsert([Mark::new(group, "line", bar(0.0))], Transition::NONE, 0.0);
        scene.upsert(
            [Mark::new(group, "line", bar(100.0))],
            Transition::millis(800.0).with_easing(Easing::Linear),
            0.0,
        );
        scene.advance(400.0);
        assert!((width_of(&scene, id) - 50.0).abs() < 1e-9, "halfway");

        scene.upsert(
            [Mark::new(group, "line", bar(0.0))],
            Transition::millis(800.0).with_easing(Easing::Linear),
            400.0,
        );
        assert!(
            (width_of(&scene, id) - 50.0).abs() < 1e-9,
            "latest transition starts where the previous one was"
        );
        scene.advance(800.0);
        assert!((width_of(&scene, id) - 25.0).abs() < 1e-9, "heading back");
        scene.settle();
        assert_eq!(width_of(&scene, id), 0.0, "latest target wins");
    }

    #[test]
    fn rebinding_the_same_marks_is_idempotent() {
        let group = GroupId::named("dots");
        let marks = || vec![Mark::new(group, "a", dot(1.0)), Mark::new(group, "b", dot(2.0))];
        let mut scene = Scene::new();
        scene.update_group(group, marks(), Transition::millis(500.0), 0.0);
        scene.settle();
        let once: Vec<MarkPayload> = scene
            .iter_sorted()
            .into_iter()
            .map(|(_, _, p)| p.clone())
            .collect();

        let diffs = scene.update_group(group, marks(), Transition::millis(500.0), 1000.0);
        assert!(diffs.is_empty(), "identical rebind produces no diffs");
        assert!(!scene.is_animating(), "identical rebind starts no transition");
        scene.settle();
        let twice: Vec<MarkPayload> = scene
            .iter_sorted()
            .into_iter()
            .map(|(_, _, p)| p.clone())
            .collect();
        assert_eq!(once, twice, "final geometry is unchanged");
    }

    #[test]
    fn update_group_exits_only_its_own_missing_marks() {
        let dots = GroupId::named("dots");
        let other = GroupId::named("other");
        let mut scene = Scene::new();
        scene.update_group(
            dots,
            [Mark::new(dots, "a", dot(1.0)), Mark::new(dots, "b", dot(2.0))],
            Transition::NONE,
            0.0,
        );
        scene.update_group(other, [Mark::new(other, "z", bar(5.0))], Transition::NONE, 0.0);

        let diffs = scene.update_group(
            dots,
            [Mark::new(dots, "b", dot(3.0))],
            Transition::NONE,
            0.0,
        );
        let exits: Vec<MarkId> = diffs
            .iter()
            .filter(|d| matches!(d, MarkDiff::Exit { .. }))
            .map(MarkDiff::id)
            .collect();
        assert_eq!(exits, vec![MarkId::keyed(dots, "a")], "only `a` exits");
        assert!(
            scene.get(MarkId::keyed(other, "z")).is_some(),
            "other groups are untouched"
        );
        assert_eq!(scene.group_ids(dots), vec![MarkId::keyed(dots, "b")], "b stays bound");
    }

    #[test]
    fn keyed_binding_survives_reordering() {
        let dots = GroupId::named("dots");
        let mut scene = Scene::new();
        scene.update_group(
            dots,
            [Mark::new(dots, "IDPEP", dot(1.0)), Mark::new(dots, "Percolator", dot(2.0))],
            Transition::NONE,
            0.0,
        );
        let diffs = scene.update_group(
            dots,
            [Mark::new(dots, "Percolator", dot(2.0)), Mark::new(dots, "IDPEP", dot(1.0))],
            Transition::NONE,
            0.0,
        );
        assert!(diffs.is_empty(), "reordered slice rebinds to the same shapes");
    }
}
