// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Force relaxation for beeswarm layouts.

use core::f64::consts::PI;

use kurbo::{Point, Vec2};

/// Where one point wants to be: `x` from the value scale, `y` from its lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwarmTarget {
    /// Target x in pixels.
    pub x: f64,
    /// Target y (lane center) in pixels.
    pub y: f64,
}

impl SwarmTarget {
    /// Creates a target.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fixed-budget collision relaxation.
///
/// Each tick pulls every point toward its target (strongly along x, weakly along y), damps the
/// velocity, then runs `passes` rounds of pairwise separation so that no two points are closer
/// than `2 * (radius + collide_padding)`. There is no convergence check: the layout always runs
/// `iterations` ticks, and dense clusters of identical targets may not fully separate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwarmLayout {
    /// Number of ticks.
    pub iterations: usize,
    /// Point radius in pixels.
    pub radius: f64,
    /// Extra gap per point; the collision distance is `2 * (radius + collide_padding)`.
    pub collide_padding: f64,
    /// Pull strength toward the target x.
    pub x_strength: f64,
    /// Pull strength toward the lane y.
    pub y_strength: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    /// Alpha the schedule decays toward.
    pub alpha_min: f64,
    /// Ticks the schedule takes to reach `alpha_min` from 1.
    pub alpha_ticks: usize,
    /// Separation rounds per tick.
    pub passes: usize,
}

impl Default for SwarmLayout {
    fn default() -> Self {
        Self {
            iterations: 120,
            radius: 7.0,
            collide_padding: 0.5,
            x_strength: 5.0,
            y_strength: 0.1,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            alpha_ticks: 300,
            passes: 3,
        }
    }
}

const INITIAL_RADIUS: f64 = 10.0;

impl SwarmLayout {
    /// Creates the default layout (120 ticks, radius 7).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of ticks.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the point radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the per-point collision padding.
    pub fn with_collide_padding(mut self, padding: f64) -> Self {
        self.collide_padding = padding;
        self
    }

    /// Sets the x and y pull strengths.
    pub fn with_strength(mut self, x: f64, y: f64) -> Self {
        self.x_strength = x;
        self.y_strength = y;
        self
    }

    /// Sets the number of separation rounds per tick.
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }

    /// Minimum center distance between two points after separation.
    pub fn collision_distance(&self) -> f64 {
        2.0 * (self.radius + self.collide_padding)
    }

    fn alpha_decay(&self) -> f64 {
        if self.alpha_ticks == 0 || self.alpha_min.is_nan() || self.alpha_min <= 0.0 {
            return 1.0;
        }
        1.0 - self.alpha_min.powf(1.0 / self.alpha_ticks as f64)
    }

    /// Runs the relaxation and returns one position per target, in input order.
    ///
    /// The result is deterministic: start positions are a phyllotaxis spiral around each
    /// target, and coincident points are split along an index-derived direction.
    pub fn run(&self, targets: &[SwarmTarget]) -> Vec<Point> {
        let golden = PI * (3.0 - 5.0_f64.sqrt());
        let mut pos: Vec<Point> = targets
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let r = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
                let a = i as f64 * golden;
                Point::new(t.x + r * a.cos(), t.y + r * a.sin())
            })
            .collect();
        let mut vel = vec![Vec2::ZERO; targets.len()];

        let decay = self.alpha_decay();
        let keep = 1.0 - self.velocity_decay;
        let dist = self.collision_distance();
        let mut alpha = 1.0;
        for _ in 0..self.iterations {
            alpha -= alpha * decay;
            let kx = (self.x_strength * alpha).min(1.0);
            let ky = (self.y_strength * alpha).min(1.0);
            for ((p, v), t) in pos.iter_mut().zip(&mut vel).zip(targets) {
                v.x += (t.x - p.x) * kx;
                v.y += (t.y - p.y) * ky;
                *v *= keep;
                *p += *v;
            }
            for _ in 0..self.passes {
                separate(&mut pos, dist, golden);
            }
        }

        tracing::debug!(
            points = targets.len(),
            iterations = self.iterations,
            "swarm layout finished"
        );
        pos
    }
}

/// One Gauss-Seidel round of pairwise separation.
fn separate(pos: &mut [Point], dist: f64, golden: f64) {
    let n = pos.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let d = pos[j] - pos[i];
            let len = d.hypot();
            if len >= dist {
                continue;
            }
            let dir = if len < 1e-9 {
                let a = (i * n + j) as f64 * golden;
                Vec2::new(a.cos(), a.sin())
            } else {
                d / len
            };
            let push = dir * ((dist - len) * 0.5);
            pos[i] -= push;
            pos[j] += push;
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn min_distance(points: &[Point]) -> f64 {
        let mut min = f64::INFINITY;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                min = min.min(a.distance(*b));
            }
        }
        min
    }

    #[test]
    fn coincident_targets_separate() {
        let layout = SwarmLayout::new();
        let out = layout.run(&[SwarmTarget::new(100.0, 50.0); 3]);
        assert!(
            min_distance(&out) >= 2.0 * layout.radius,
            "pairwise distance {} after 120 ticks",
            min_distance(&out)
        );
    }

    #[test]
    fn distinct_lanes_settle_on_targets() {
        let targets = [
            SwarmTarget::new(100.0, 50.0),
            SwarmTarget::new(100.0, 150.0),
            SwarmTarget::new(100.0, 250.0),
        ];
        let out = SwarmLayout::new().run(&targets);
        for (p, t) in out.iter().zip(&targets) {
            assert!((p.x - t.x).abs() < 0.5, "x {} near target {}", p.x, t.x);
            assert!((p.y - t.y).abs() < 1.0, "y {} near lane {}", p.y, t.y);
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let targets: Vec<SwarmTarget> = (0..12)
            .map(|i| SwarmTarget::new(f64::from(i % 4) * 6.0, 40.0))
            .collect();
        let layout = SwarmLayout::new().with_iterations(60);
        assert_eq!(layout.run(&targets), layout.run(&targets), "same input, same output");
    }

    #[test]
    fn zero_iterations_returns_spiral_start() {
        let out = SwarmLayout::new()
            .with_iterations(0)
            .run(&[SwarmTarget::new(0.0, 0.0)]);
        let r = out[0].to_vec2().hypot();
        assert!((r - 10.0 * 0.5_f64.sqrt()).abs() < 1e-9, "first spiral radius {r}");
    }
}
