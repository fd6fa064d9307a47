#![forbid(unsafe_code)]

//! Scripted gesture replay for `panegrid-core`.
//!
//! Reads a small line-based gesture script, feeds synthetic pointer samples
//! and frame ticks into a [`panegrid_core::PaneSwitcher`] on a simulated
//! clock, and reports every completed switch.

pub mod cli;
pub mod error;
pub mod replay;
pub mod script;

pub use cli::{run, run_from_env};
pub use error::{DemoError, Result};
