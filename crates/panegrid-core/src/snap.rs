#![forbid(unsafe_code)]

//! Snap settling: time-driven convergence of the scroll offset onto a pane.
//!
//! [`SnapAnimator`] animates one axis per snap. A horizontal snap moves only
//! `x` and places `y` on the target's row immediately; a vertical snap moves
//! only `y` and places `x` on the target's column.
//!
//! # State Machine
//!
//! ```text
//!            start_snap (while Idle)
//!   Idle ─────────────────────────────▶ Animating
//!    ▲                                     │
//!    └──── tick observes completion ───────┤
//!    └──── abort ──────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. At most one snap is in flight; `start_snap` while animating is a no-op.
//! 2. The tick that first observes `elapsed >= duration` writes the exact
//!    target offset and returns [`SnapProgress::Settled`]. It happens once per
//!    snap; later ticks return [`SnapProgress::Idle`].
//! 3. Intermediate offsets move monotonically from start to target and only
//!    reach the target when the animation completes.
//! 4. An aborted snap never settles.

use std::time::Duration;

use web_time::Instant;

use crate::geometry::{Axis, Offset, Viewport};
use crate::gesture::SnapRequest;
use crate::grid::Grid;

/// An in-flight snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSession {
    /// Pane that becomes active on completion.
    pub target: usize,
    pub axis: Axis,
    pub start: Offset,
    pub end: Offset,
    pub start_time: Instant,
    pub duration: Duration,
}

impl SnapSession {
    /// Offset at `now`, and whether the snap has completed.
    fn sample(&self, now: Instant) -> (Offset, bool) {
        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= self.duration {
            return (self.end, true);
        }

        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let from = self.start.along(self.axis);
        let to = self.end.along(self.axis);
        let mut offset = self.end;
        let value = from + (to - from) * ease_out(t);
        offset.set_along(self.axis, value.clamp(from.min(to), from.max(to)));
        (offset, false)
    }
}

/// Animator state. Replaces a "no pending screen" sentinel with a tag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SnapState {
    #[default]
    Idle,
    Animating(SnapSession),
}

/// Result of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapProgress {
    /// Nothing in flight.
    Idle,
    /// Offset updated; schedule another frame.
    Running,
    /// The snap completed on this frame and `pane` is now active.
    Settled(usize),
}

/// Quadratic ease-out: decelerates into the target.
#[inline]
fn ease_out(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv
}

/// Drives snap animations from host-supplied frame times.
#[derive(Debug, Clone)]
pub struct SnapAnimator {
    state: SnapState,
    duration_scale: f64,
}

impl SnapAnimator {
    /// `duration_scale` is milliseconds of animation per unit of distance.
    #[must_use]
    pub fn new(duration_scale: f64) -> Self {
        Self {
            state: SnapState::Idle,
            duration_scale,
        }
    }

    /// Begin settling onto `request.target`.
    ///
    /// Returns `false` (and changes nothing) when a snap is already running.
    /// The off-axis component of `offset` is placed on the target's line
    /// immediately.
    pub fn start_snap(
        &mut self,
        request: SnapRequest,
        offset: &mut Offset,
        grid: &Grid,
        viewport: Viewport,
        now: Instant,
    ) -> bool {
        if self.is_animating() {
            tracing::trace!(target_pane = request.target, "snap already running; ignored");
            return false;
        }

        let target = grid.clamp_index(request.target as isize);
        let end = grid.pane_offset(target, viewport);
        let axis = request.axis;

        let mut start = end;
        start.set_along(axis, offset.along(axis));
        *offset = start;

        let distance = (end.along(axis) - start.along(axis)).abs();
        let duration = Duration::from_nanos((distance * self.duration_scale * 1e6).round() as u64);

        tracing::debug!(
            target_pane = target,
            ?axis,
            distance,
            duration_ms = duration.as_millis() as u64,
            "snap started"
        );

        self.state = SnapState::Animating(SnapSession {
            target,
            axis,
            start,
            end,
            start_time: now,
            duration,
        });
        true
    }

    /// Advance the animation to `now`, writing the new offset.
    pub fn tick(&mut self, now: Instant, offset: &mut Offset) -> SnapProgress {
        let SnapState::Animating(session) = self.state else {
            return SnapProgress::Idle;
        };

        let (sampled, done) = session.sample(now);
        *offset = sampled;

        if done {
            self.state = SnapState::Idle;
            tracing::debug!(pane = session.target, "snap settled");
            SnapProgress::Settled(session.target)
        } else {
            tracing::trace!(x = sampled.x, y = sampled.y, "snap frame");
            SnapProgress::Running
        }
    }

    /// Discard the running snap without completing it.
    ///
    /// Returns whether one was running. The offset stays wherever the last
    /// frame left it.
    pub fn abort(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            SnapState::Idle => false,
            SnapState::Animating(session) => {
                tracing::debug!(target_pane = session.target, "snap aborted");
                true
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, SnapState::Animating(_))
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &SnapState {
        &self.state
    }

    /// Change the duration scale for future snaps.
    pub fn set_duration_scale(&mut self, scale: f64) {
        self.duration_scale = scale;
    }
}
