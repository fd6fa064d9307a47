#![forbid(unsafe_code)]

//! Core: grid pane switching driven by drag gestures.
//!
//! # Role in panegrid
//! `panegrid-core` is the navigation state machine behind a container that
//! lays panes out on a rows × columns grid. The host delivers pointer samples
//! and frame times; the core answers with a scroll offset to render and a
//! notification whenever a different pane becomes active.
//!
//! # Primary responsibilities
//! - **Grid**: row-major pane indexing and the offsets each pane occupies.
//! - **GestureClassifier**: slop detection, one-time axis lock, clamped
//!   panning and the release-time fling decision.
//! - **SnapAnimator**: time-driven settling onto the chosen pane, completing
//!   exactly once.
//! - **PaneSwitcher**: owns offset and active pane, wires the two together,
//!   and notifies the registered listener.
//!
//! # Out of scope
//! Rendering, measurement, pointer delivery and the frame clock belong to
//! the host.

pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod grid;
pub mod snap;
pub mod switcher;
pub mod velocity;

pub use config::SwitcherConfig;
pub use error::{ConfigError, GeometryError, GridError, Result, SwitcherError};
pub use geometry::{Axis, Offset, Point, Viewport};
pub use gesture::{AxisLock, GestureClassifier, PanStep, SnapRequest};
pub use grid::Grid;
pub use snap::{SnapAnimator, SnapProgress, SnapState};
pub use switcher::{
    ListenerId, PaneSwitcher, PointerEvent, ScreenSwitchListener, SwitchEvent,
};
pub use velocity::{Velocity, VelocityEstimator, VelocityTracker};

/// Re-exported so hosts and tests can build timestamps without a direct
/// dependency.
pub use web_time::Instant;
