#![forbid(unsafe_code)]

//! Drag classification: turns raw pointer motion into live panning and, on
//! release, a navigation decision.
//!
//! [`GestureClassifier`] tracks one gesture session at a time, from press to
//! release or cancel.
//!
//! # State Machine
//!
//! - **Rest**: pressed, but cumulative movement has not exceeded the touch
//!   slop. Moves do not pan. A release here is a tap and navigates nowhere.
//! - **Scrolling**: the slop was exceeded (or the press interrupted a running
//!   snap). The first scrolling move locks the axis from its per-step delta;
//!   every move then pans the offset along the locked axis only.
//!
//! # Invariants
//!
//! 1. The axis lock is decided once per session and never revisited.
//! 2. A pan step never moves the offset below 0 or beyond the far edge of
//!    the strip adjacent to the active pane.
//! 3. The release decision uses the cumulative `|Δx|` vs `|Δy|` since the
//!    press, not the axis lock.
//! 4. Fling comparisons are strict: a velocity exactly at the threshold does
//!    not navigate directionally.
//! 5. Release and cancel both destroy the session.

use crate::geometry::{Axis, Offset, Point, Viewport};
use crate::grid::Grid;
use crate::velocity::Velocity;

/// Axis decision for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLock {
    #[default]
    Unset,
    Horizontal,
    Vertical,
}

impl AxisLock {
    /// The locked axis, if any.
    #[inline]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::Unset => None,
            Self::Horizontal => Some(Axis::Horizontal),
            Self::Vertical => Some(Axis::Vertical),
        }
    }
}

/// Whether the current touch has become a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    #[default]
    Rest,
    Scrolling,
}

/// Offset change applied by one move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanStep {
    pub axis: Axis,
    /// Signed distance the offset moved along `axis`.
    pub applied: f64,
}

/// Navigation decided at release: settle on `target` along `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapRequest {
    pub target: usize,
    pub axis: Axis,
}

/// Layout inputs a gesture is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct PanContext<'a> {
    pub grid: &'a Grid,
    pub viewport: Viewport,
    /// Currently active pane.
    pub active: usize,
}

/// Per-gesture state, alive from press to release/cancel.
#[derive(Debug, Clone)]
struct GestureSession {
    axis_lock: AxisLock,
    origin: Point,
    last: Point,
    touch_state: TouchState,
    abs_dx: f64,
    abs_dy: f64,
}

/// Classifies pointer motion into axis-locked panning and release decisions.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    touch_slop: f64,
    fling_threshold: f64,
    session: Option<GestureSession>,
}

impl GestureClassifier {
    #[must_use]
    pub fn new(touch_slop: f64, fling_threshold: f64) -> Self {
        Self {
            touch_slop,
            fling_threshold,
            session: None,
        }
    }

    /// Start a session at `position`.
    ///
    /// The caller aborts any running snap first and reports it through
    /// `interrupted_snap`: grabbing a moving view counts as a drag already.
    pub fn on_press(&mut self, position: Point, interrupted_snap: bool) {
        self.session = Some(GestureSession {
            axis_lock: AxisLock::Unset,
            origin: position,
            last: position,
            touch_state: if interrupted_snap {
                TouchState::Scrolling
            } else {
                TouchState::Rest
            },
            abs_dx: 0.0,
            abs_dy: 0.0,
        });
    }

    /// Process a move, panning `offset` when the session is scrolling.
    ///
    /// Returns the applied step, or `None` when nothing moved.
    pub fn on_move(
        &mut self,
        position: Point,
        ctx: PanContext<'_>,
        offset: &mut Offset,
    ) -> Option<PanStep> {
        let touch_slop = self.touch_slop;
        let session = self.session.as_mut()?;

        let dx = session.last.x - position.x;
        let dy = session.last.y - position.y;
        session.abs_dx = (position.x - session.origin.x).abs();
        session.abs_dy = (position.y - session.origin.y).abs();

        if session.touch_state == TouchState::Rest
            && (session.abs_dx > touch_slop || session.abs_dy > touch_slop)
        {
            session.touch_state = TouchState::Scrolling;
            tracing::debug!(
                abs_dx = session.abs_dx,
                abs_dy = session.abs_dy,
                "drag started"
            );
        }

        if session.touch_state != TouchState::Scrolling {
            return None;
        }

        if session.axis_lock == AxisLock::Unset {
            session.axis_lock = if dx.abs() > dy.abs() {
                AxisLock::Horizontal
            } else {
                AxisLock::Vertical
            };
            tracing::debug!(lock = ?session.axis_lock, dx, dy, "axis locked");
        }

        session.last = position;

        let axis = session.axis_lock.axis()?;
        let delta = match axis {
            Axis::Horizontal => dx,
            Axis::Vertical => dy,
        };
        let current = offset.along(axis);
        let next = pan_target(delta, axis, ctx, current);
        let applied = next - current;
        if applied == 0.0 {
            return None;
        }

        offset.set_along(axis, next);
        tracing::trace!(?axis, delta, applied, "pan");
        Some(PanStep { axis, applied })
    }

    /// End the session and decide where to settle.
    ///
    /// Returns `None` for a tap (the slop was never exceeded) or when no
    /// session is active.
    pub fn on_release(
        &mut self,
        velocity: Velocity,
        ctx: PanContext<'_>,
        offset: Offset,
    ) -> Option<SnapRequest> {
        let session = self.session.take()?;
        if session.touch_state != TouchState::Scrolling {
            return None;
        }

        let grid = ctx.grid;
        let active = ctx.active.min(grid.pane_count() - 1) as isize;
        let last_pane = grid.pane_count() as isize - 1;

        let (axis, speed, step) = if session.abs_dx > session.abs_dy {
            (Axis::Horizontal, velocity.x, 1)
        } else {
            (Axis::Vertical, velocity.y, grid.columns() as isize)
        };
        let line = grid.line_of(active as usize, axis);
        let last_line = grid.lines(axis) - 1;

        let target = if speed > self.fling_threshold && active > 0 && line > 0 {
            grid.clamp_index(active - step)
        } else if speed < -self.fling_threshold && active < last_pane && line < last_line {
            grid.clamp_index(active + step)
        } else {
            grid.nearest_pane(offset, ctx.viewport)
        };

        tracing::debug!(?axis, speed, target_pane = target, "gesture released");
        Some(SnapRequest { target, axis })
    }

    /// Abandon the session without a decision.
    ///
    /// Returns whether the session had become a drag.
    pub fn on_cancel(&mut self) -> bool {
        self.session
            .take()
            .is_some_and(|s| s.touch_state == TouchState::Scrolling)
    }

    /// Whether a session is open.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the open session has become a drag.
    #[inline]
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.touch_state == TouchState::Scrolling)
    }

    /// Axis lock of the open session (`Unset` when idle).
    #[inline]
    #[must_use]
    pub fn axis_lock(&self) -> AxisLock {
        self.session
            .as_ref()
            .map_or(AxisLock::Unset, |s| s.axis_lock)
    }

    /// Update thresholds. Applies to the open session too.
    pub fn set_thresholds(&mut self, touch_slop: f64, fling_threshold: f64) {
        self.touch_slop = touch_slop;
        self.fling_threshold = fling_threshold;
    }
}

/// Where a pan of `delta` from `current` lands, kept within `[0, pan_limit]`.
fn pan_target(delta: f64, axis: Axis, ctx: PanContext<'_>, current: f64) -> f64 {
    if delta < 0.0 && current > 0.0 {
        (current + delta).max(0.0)
    } else if delta > 0.0 {
        let limit = ctx.grid.pan_limit(ctx.active, axis, ctx.viewport);
        if current < limit {
            (current + delta).min(limit)
        } else {
            current
        }
    } else {
        current
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
