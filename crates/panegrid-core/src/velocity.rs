#![forbid(unsafe_code)]

//! Pointer velocity estimation for fling detection.
//!
//! The switcher feeds every pointer sample of a gesture into a
//! [`VelocityEstimator`] and queries it once, on release. Hosts that already
//! track velocity (platform gesture APIs, recorded traces) can plug in their
//! own implementation; [`VelocityTracker`] is the default.
//!
//! # Algorithm
//!
//! [`VelocityTracker`] keeps the most recent [`HISTORY_SIZE`] samples and
//! fits a least-squares line through the samples that fall within
//! [`HORIZON`] of the newest one, independently per axis. The slope is the
//! velocity. Fewer than two samples in the window, or a window with no time
//! span, yields zero.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

use crate::geometry::Point;

/// Maximum number of samples retained.
pub const HISTORY_SIZE: usize = 20;

/// Only samples this close to the newest one contribute to the estimate.
pub const HORIZON: Duration = Duration::from_millis(100);

/// Signed pointer velocity in units per second.
///
/// Positive `x` means the pointer moved right; positive `y` means it moved
/// down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp each component into `[-limit, limit]`.
    #[must_use]
    pub fn clamped(self, limit: f64) -> Self {
        Self {
            x: self.x.clamp(-limit, limit),
            y: self.y.clamp(-limit, limit),
        }
    }
}

/// Source of release velocity for a gesture.
pub trait VelocityEstimator {
    /// Record a pointer sample.
    fn add_sample(&mut self, position: Point, time: Instant);

    /// Signed velocity of the samples recorded since the last [`clear`](Self::clear).
    fn estimate(&self) -> Velocity;

    /// Forget every recorded sample.
    fn clear(&mut self);
}

/// Default least-squares velocity tracker.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Point, Instant)>,
}

impl VelocityTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
        }
    }

    /// Number of retained samples.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl VelocityEstimator for VelocityTracker {
    fn add_sample(&mut self, position: Point, time: Instant) {
        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back((position, time));
    }

    fn estimate(&self) -> Velocity {
        let Some(&(_, newest)) = self.samples.back() else {
            return Velocity::ZERO;
        };

        // (seconds before newest, position), oldest first.
        let window: Vec<(f64, Point)> = self
            .samples
            .iter()
            .filter(|(_, t)| newest.saturating_duration_since(*t) <= HORIZON)
            .map(|(p, t)| (-newest.saturating_duration_since(*t).as_secs_f64(), *p))
            .collect();

        if window.len() < 2 {
            return Velocity::ZERO;
        }

        Velocity {
            x: slope(window.iter().map(|(t, p)| (*t, p.x))),
            y: slope(window.iter().map(|(t, p)| (*t, p.y))),
        }
    }

    fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Least-squares slope of `(t, v)` pairs; zero when `t` has no spread.
fn slope(points: impl Iterator<Item = (f64, f64)> + Clone) -> f64 {
    let n = points.clone().count() as f64;
    let (sum_t, sum_v) = points
        .clone()
        .fold((0.0, 0.0), |(st, sv), (t, v)| (st + t, sv + v));
    let (mean_t, mean_v) = (sum_t / n, sum_v / n);

    let (cov, var) = points.fold((0.0, 0.0), |(cov, var), (t, v)| {
        let dt = t - mean_t;
        (cov + dt * (v - mean_v), var + dt * dt)
    });

    if var <= f64::EPSILON { 0.0 } else { cov / var }
}
