#![forbid(unsafe_code)]

//! The pane switcher: owns the scroll offset and active pane and wires the
//! gesture classifier to the snap animator.
//!
//! # Control flow
//!
//! 1. [`press`](PaneSwitcher::press) aborts any running snap and opens a
//!    gesture session.
//! 2. [`drag`](PaneSwitcher::drag) pans the offset directly (no animation).
//! 3. [`release`](PaneSwitcher::release) estimates velocity, picks a target
//!    pane and starts a snap.
//! 4. The host calls [`tick`](PaneSwitcher::tick) once per frame. The frame
//!    that completes the snap updates the active pane, notifies the listener
//!    and raises the [`take_switched`](PaneSwitcher::take_switched) signal.
//!
//! Everything runs synchronously on the thread delivering events; the host
//! may read [`offset`](PaneSwitcher::offset) and
//! [`active_pane`](PaneSwitcher::active_pane) between calls but never writes
//! them.

use web_time::Instant;

use crate::config::SwitcherConfig;
use crate::error::Result;
use crate::geometry::{Axis, Offset, Point, Viewport};
use crate::gesture::{AxisLock, GestureClassifier, PanContext, PanStep, SnapRequest};
use crate::grid::Grid;
use crate::snap::{SnapAnimator, SnapProgress};
use crate::velocity::{VelocityEstimator, VelocityTracker};

/// Receives completed pane switches.
pub trait ScreenSwitchListener {
    /// Called once per completed snap with the newly active pane.
    fn on_screen_switched(&mut self, pane: usize);
}

impl<F: FnMut(usize)> ScreenSwitchListener for F {
    fn on_screen_switched(&mut self, pane: usize) {
        self(pane);
    }
}

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Pointer input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    Cancel,
}

/// Observable effect of one pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchEvent {
    /// The offset moved during a drag.
    Panned(PanStep),
    /// A snap toward a pane began.
    SnapStarted(SnapRequest),
}

/// Grid pane container driven by pointer gestures.
pub struct PaneSwitcher<V = VelocityTracker> {
    grid: Grid,
    viewport: Viewport,
    config: SwitcherConfig,

    offset: Offset,
    active: usize,

    classifier: GestureClassifier,
    animator: SnapAnimator,
    velocity: V,

    listener: Option<(ListenerId, Box<dyn ScreenSwitchListener>)>,
    next_listener_id: u64,
    switched: Option<usize>,
}

impl<V> std::fmt::Debug for PaneSwitcher<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaneSwitcher")
            .field("grid", &self.grid)
            .field("viewport", &self.viewport)
            .field("offset", &self.offset)
            .field("active", &self.active)
            .field("dragging", &self.classifier.is_scrolling())
            .field("animating", &self.animator.is_animating())
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl PaneSwitcher<VelocityTracker> {
    /// Create a switcher showing pane 0.
    pub fn new(grid: Grid, viewport: Viewport, config: SwitcherConfig) -> Result<Self> {
        Self::with_estimator(grid, viewport, config, VelocityTracker::new())
    }
}

impl<V: VelocityEstimator> PaneSwitcher<V> {
    /// Create a switcher that asks `estimator` for release velocity.
    pub fn with_estimator(
        grid: Grid,
        viewport: Viewport,
        config: SwitcherConfig,
        estimator: V,
    ) -> Result<Self> {
        let config = config.validated()?;
        Ok(Self {
            grid,
            viewport,
            classifier: GestureClassifier::new(config.touch_slop, config.fling_threshold),
            animator: SnapAnimator::new(config.duration_scale),
            config,
            offset: Offset::default(),
            active: 0,
            velocity: estimator,
            listener: None,
            next_listener_id: 0,
            switched: None,
        })
    }

    /// Place the first layout on `pane` (builder pattern).
    #[must_use]
    pub fn with_initial_pane(mut self, pane: usize) -> Self {
        self.set_current_screen(pane);
        self
    }

    // --- Observers ---------------------------------------------------------

    /// Register the listener for completed switches, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl ScreenSwitchListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listener = Some((id, Box::new(listener)));
        id
    }

    /// Remove the listener registered as `id`. Returns whether it was present.
    pub fn clear_listener(&mut self, id: ListenerId) -> bool {
        if self.listener.as_ref().is_some_and(|(current, _)| *current == id) {
            self.listener = None;
            true
        } else {
            false
        }
    }

    /// Pane of the most recently completed snap, if not yet taken.
    pub fn take_switched(&mut self) -> Option<usize> {
        self.switched.take()
    }

    // --- Pointer input -----------------------------------------------------

    /// Dispatch a pointer event.
    pub fn handle(&mut self, event: &PointerEvent, now: Instant) -> Option<SwitchEvent> {
        match *event {
            PointerEvent::Press(pos) => {
                self.press(pos, now);
                None
            }
            PointerEvent::Move(pos) => self.drag(pos, now).map(SwitchEvent::Panned),
            PointerEvent::Release(pos) => self.release(pos, now).map(SwitchEvent::SnapStarted),
            PointerEvent::Cancel => self.cancel(now).map(SwitchEvent::SnapStarted),
        }
    }

    /// Pointer down. Stops a running snap where it is.
    pub fn press(&mut self, pos: Point, now: Instant) {
        let interrupted = self.animator.abort();
        self.velocity.clear();
        self.velocity.add_sample(pos, now);
        self.classifier.on_press(pos, interrupted);
    }

    /// Pointer moved while down.
    pub fn drag(&mut self, pos: Point, now: Instant) -> Option<PanStep> {
        if !self.classifier.is_tracking() {
            return None;
        }
        self.velocity.add_sample(pos, now);
        let ctx = PanContext {
            grid: &self.grid,
            viewport: self.viewport,
            active: self.active,
        };
        self.classifier.on_move(pos, ctx, &mut self.offset)
    }

    /// Pointer up. Starts a snap unless the gesture was a tap.
    pub fn release(&mut self, pos: Point, now: Instant) -> Option<SnapRequest> {
        if !self.classifier.is_tracking() {
            return None;
        }
        self.velocity.add_sample(pos, now);
        let velocity = self
            .velocity
            .estimate()
            .clamped(self.config.max_fling_velocity);
        let ctx = PanContext {
            grid: &self.grid,
            viewport: self.viewport,
            active: self.active,
        };
        let request = self.classifier.on_release(velocity, ctx, self.offset)?;
        self.start_snap(request, now)
    }

    /// Gesture cancelled by the platform.
    ///
    /// Leaves the offset where the drag stopped unless
    /// [`SwitcherConfig::settle_on_cancel`] is set, in which case a dragged
    /// view settles onto the nearest pane.
    pub fn cancel(&mut self, now: Instant) -> Option<SnapRequest> {
        let lock = self.classifier.axis_lock();
        let was_dragging = self.classifier.on_cancel();
        self.velocity.clear();
        if !(was_dragging && self.config.settle_on_cancel) {
            return None;
        }
        let request = SnapRequest {
            target: self.grid.nearest_pane(self.offset, self.viewport),
            axis: lock.axis().unwrap_or(Axis::Horizontal),
        };
        self.start_snap(request, now)
    }

    // --- Animation ---------------------------------------------------------

    /// Advance a running snap. Call once per frame while
    /// [`is_animating`](Self::is_animating).
    pub fn tick(&mut self, now: Instant) -> SnapProgress {
        let progress = self.animator.tick(now, &mut self.offset);
        if let SnapProgress::Settled(pane) = progress {
            self.active = self.grid.clamp_index(pane as isize);
            self.switched = Some(self.active);
            tracing::info!(pane = self.active, "screen switched");
            if let Some((_, listener)) = self.listener.as_mut() {
                listener.on_screen_switched(self.active);
            }
        }
        progress
    }

    // --- Programmatic control ----------------------------------------------

    /// Jump to `pane` without animation or notification.
    ///
    /// Out-of-range indices are clamped. A running snap is discarded.
    pub fn set_current_screen(&mut self, pane: usize) {
        self.animator.abort();
        self.active = pane.min(self.grid.pane_count() - 1);
        self.offset = self.grid.pane_offset(self.active, self.viewport);
        tracing::debug!(pane = self.active, "current screen set");
    }

    /// New layout pass. On a size change the offset is re-placed on the
    /// active pane and any running snap is discarded.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.animator.abort();
        self.offset = self.grid.pane_offset(self.active, viewport);
        tracing::debug!(
            width = viewport.width(),
            height = viewport.height(),
            "viewport changed"
        );
    }

    /// Replace the tuning parameters. Rejected configs leave the old one in place.
    pub fn set_config(&mut self, config: SwitcherConfig) -> Result<()> {
        let config = config.validated()?;
        self.classifier
            .set_thresholds(config.touch_slop, config.fling_threshold);
        self.animator.set_duration_scale(config.duration_scale);
        self.config = config;
        Ok(())
    }

    // --- Accessors ---------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn active_pane(&self) -> usize {
        self.active
    }

    #[inline]
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.classifier.is_scrolling()
    }

    #[inline]
    #[must_use]
    pub fn axis_lock(&self) -> AxisLock {
        self.classifier.axis_lock()
    }

    // --- Internals ---------------------------------------------------------

    fn start_snap(&mut self, request: SnapRequest, now: Instant) -> Option<SnapRequest> {
        self.animator
            .start_snap(request, &mut self.offset, &self.grid, self.viewport, now)
            .then_some(request)
    }
}
