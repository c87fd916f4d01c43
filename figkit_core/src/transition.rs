// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition timing.

/// Easing curve applied to normalized transition time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic ease-in-out (slow start and end).
    #[default]
    CubicInOut,
}

impl Easing {
    /// Maps normalized time `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

/// Timing of a retarget: how long marks take to reach their new geometry.
///
/// `stagger_ms` delays the `i`th mark of an update by `i * stagger_ms` on top of `delay_ms`,
/// which gives the bin-by-bin entry animation of histograms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Duration in milliseconds.
    pub duration_ms: f64,
    /// Delay before the first mark starts moving.
    pub delay_ms: f64,
    /// Additional delay per mark, in update order.
    pub stagger_ms: f64,
    /// Easing curve.
    pub easing: Easing,
}

impl Transition {
    /// Apply changes immediately.
    pub const NONE: Self = Self {
        duration_ms: 0.0,
        delay_ms: 0.0,
        stagger_ms: 0.0,
        easing: Easing::Linear,
    };

    /// A transition of the given duration with the default easing.
    pub fn millis(duration_ms: f64) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            delay_ms: 0.0,
            stagger_ms: 0.0,
            easing: Easing::default(),
        }
    }

    /// Sets the initial delay.
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    /// Sets the per-mark stagger.
    pub fn with_stagger(mut self, stagger_ms: f64) -> Self {
        self.stagger_ms = stagger_ms.max(0.0);
        self
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Returns `true` if marks snap without interpolation.
    pub fn is_instant(&self) -> bool {
        self.duration_ms <= 0.0 && self.delay_ms <= 0.0 && self.stagger_ms <= 0.0
    }

    /// Start time of the mark at `index` when the update happens at `now`.
    pub(crate) fn start_for(&self, now: f64, index: usize) -> f64 {
        now + self.delay_ms + self.stagger_ms * index as f64
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::millis(250.0)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn cubic_in_out_is_symmetric() {
        let e = Easing::CubicInOut;
        assert_eq!(e.apply(0.0), 0.0, "starts at 0");
        assert_eq!(e.apply(1.0), 1.0, "ends at 1");
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12, "midpoint is 0.5");
        assert!(
            (e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12,
            "curve is point-symmetric around the midpoint"
        );
    }
}
