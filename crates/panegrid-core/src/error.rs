#![forbid(unsafe_code)]

//! Error types for grid construction, viewport geometry and configuration.
//!
//! Every error here is a precondition violation reported before any gesture
//! is processed. Gesture and animation operations themselves never fail:
//! out-of-range navigation targets are clamped silently.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SwitcherError>;

/// Invalid grid shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must contain at least one pane")]
    NoPanes,

    #[error("grid must have at least one row")]
    NoRows,

    #[error("grid has more rows ({rows}) than panes ({pane_count})")]
    TooManyRows { rows: usize, pane_count: usize },

    #[error("{pane_count} panes cannot be split evenly into {rows} rows")]
    RaggedGrid { pane_count: usize, rows: usize },
}

/// Invalid viewport geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("viewport extent must be finite and positive, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
}

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Any error surfaced by the switcher.
#[derive(Debug, Error)]
pub enum SwitcherError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
