#![forbid(unsafe_code)]

//! Tunable thresholds for gesture classification and snap settling.
//!
//! Every field defaults to the value the pane switcher has always used, so
//! `SwitcherConfig::default()` reproduces stock behavior.
//!
//! # Loading
//!
//! With the `config` feature the struct can be loaded from TOML or JSON:
//!
//! ```toml
//! # panegrid.toml
//! touch_slop = 12.0
//! fling_threshold = 800.0
//! settle_on_cancel = true
//! ```
//!
//! ```rust,ignore
//! let config = SwitcherConfig::from_toml_file("panegrid.toml")?;
//! ```
//!
//! Loaders validate after parsing; missing fields keep their defaults.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default movement (units) absorbed as jitter before a touch becomes a drag.
pub const DEFAULT_TOUCH_SLOP: f64 = 8.0;

/// Default release velocity (units/s) required for directional navigation.
pub const DEFAULT_FLING_THRESHOLD: f64 = 1000.0;

/// Default per-axis cap applied to velocity estimates (units/s).
pub const DEFAULT_MAX_FLING_VELOCITY: f64 = 8000.0;

/// Default snap duration, in milliseconds per unit of distance.
pub const DEFAULT_DURATION_SCALE: f64 = 2.0;

/// Switcher tuning parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SwitcherConfig {
    /// Cumulative movement from the press point (either axis) that must be
    /// exceeded before a touch is treated as a drag.
    pub touch_slop: f64,
    /// Release velocity magnitude beyond which the switcher navigates to the
    /// neighbouring pane instead of the nearest one. Strict comparison.
    pub fling_threshold: f64,
    /// Velocity estimates are clamped to `±max_fling_velocity` per axis.
    pub max_fling_velocity: f64,
    /// Snap duration in milliseconds per unit of distance travelled.
    pub duration_scale: f64,
    /// Settle to the nearest pane when a drag is cancelled instead of
    /// leaving the offset where the drag stopped.
    pub settle_on_cancel: bool,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            fling_threshold: DEFAULT_FLING_THRESHOLD,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            duration_scale: DEFAULT_DURATION_SCALE,
            settle_on_cancel: false,
        }
    }
}

impl SwitcherConfig {
    /// Set the touch slop (builder pattern).
    #[must_use]
    pub fn with_touch_slop(mut self, slop: f64) -> Self {
        self.touch_slop = slop;
        self
    }

    /// Set the fling threshold (builder pattern).
    #[must_use]
    pub fn with_fling_threshold(mut self, threshold: f64) -> Self {
        self.fling_threshold = threshold;
        self
    }

    /// Set the snap duration scale (builder pattern).
    #[must_use]
    pub fn with_duration_scale(mut self, scale: f64) -> Self {
        self.duration_scale = scale;
        self
    }

    /// Enable or disable settling after a cancelled drag (builder pattern).
    #[must_use]
    pub fn with_settle_on_cancel(mut self, settle: bool) -> Self {
        self.settle_on_cancel = settle;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            errors.push(format!(
                "touch_slop must be finite and >= 0, got {}",
                self.touch_slop
            ));
        }

        if !self.fling_threshold.is_finite() || self.fling_threshold < 0.0 {
            errors.push(format!(
                "fling_threshold must be finite and >= 0, got {}",
                self.fling_threshold
            ));
        }

        if !self.max_fling_velocity.is_finite() || self.max_fling_velocity <= 0.0 {
            errors.push(format!(
                "max_fling_velocity must be finite and > 0, got {}",
                self.max_fling_velocity
            ));
        } else if self.max_fling_velocity < self.fling_threshold {
            errors.push(format!(
                "max_fling_velocity ({}) must not be below fling_threshold ({})",
                self.max_fling_velocity, self.fling_threshold
            ));
        }

        if !self.duration_scale.is_finite() || self.duration_scale < 0.0 {
            errors.push(format!(
                "duration_scale must be finite and >= 0, got {}",
                self.duration_scale
            ));
        }

        errors
    }

    /// Return `self` when valid, otherwise every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            tracing::warn!(problems = errors.len(), "rejecting switcher config");
            Err(ConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = SwitcherConfig::default();
        assert_eq!(config.touch_slop, 8.0);
        assert_eq!(config.fling_threshold, 1000.0);
        assert_eq!(config.max_fling_velocity, 8000.0);
        assert_eq!(config.duration_scale, 2.0);
        assert!(!config.settle_on_cancel);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validate_collects_every_problem() {
        let config = SwitcherConfig {
            touch_slop: -1.0,
            fling_threshold: f64::NAN,
            max_fling_velocity: 0.0,
            duration_scale: -2.0,
            settle_on_cancel: false,
        };
        assert_eq!(config.validate().len(), 4);
    }

    #[test]
    fn max_velocity_below_threshold_is_rejected() {
        let config = SwitcherConfig::default().with_fling_threshold(9000.0);
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("max_fling_velocity"));
    }

    #[test]
    fn validated_wraps_errors() {
        let err = SwitcherConfig::default()
            .with_touch_slop(-3.0)
            .validated()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 1));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_keeps_defaults() {
        let config = SwitcherConfig::from_toml_str("touch_slop = 12.0\nsettle_on_cancel = true\n")
            .unwrap();
        assert_eq!(config.touch_slop, 12.0);
        assert!(config.settle_on_cancel);
        assert_eq!(config.fling_threshold, DEFAULT_FLING_THRESHOLD);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_invalid_values_fail_validation() {
        let err = SwitcherConfig::from_json_str(r#"{"duration_scale": -1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panegrid.toml");
        let config = SwitcherConfig::default().with_fling_threshold(750.0);
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
        assert_eq!(SwitcherConfig::from_toml_file(&path).unwrap(), config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn missing_file_is_io_error() {
        let err = SwitcherConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
