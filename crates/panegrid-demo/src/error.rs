use std::path::PathBuf;

use panegrid_core::{ConfigError, GeometryError, GridError, SwitcherError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Switcher(#[from] SwitcherError),

    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("script file not found: {path}")]
    MissingScript { path: PathBuf },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Script { .. } | Self::MissingScript { .. } => 2,
            Self::Switcher(_) => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }
}

impl From<GridError> for DemoError {
    fn from(err: GridError) -> Self {
        Self::Switcher(err.into())
    }
}

impl From<GeometryError> for DemoError {
    fn from(err: GeometryError) -> Self {
        Self::Switcher(err.into())
    }
}

impl From<ConfigError> for DemoError {
    fn from(err: ConfigError) -> Self {
        Self::Switcher(err.into())
    }
}
