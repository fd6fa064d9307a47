//! Line-oriented gesture scripts.
//!
//! One step per line, `#` starts a comment:
//!
//! ```text
//! swipe  <dir> <distance> [duration_ms] [hold_ms]
//! fling  <dir> <distance>
//! cancel <dir> <distance> [duration_ms]
//! tap
//! jump   <pane>
//! wait   <ms>
//! resize <width> <height>
//! ```
//!
//! `<dir>` is the direction the finger travels: `left`, `right`, `up` or
//! `down`.

use std::path::Path;
use std::str::FromStr;

use crate::error::{DemoError, Result};

/// Built-in tour of the 3 × 3 grid.
pub const DEFAULT_SCRIPT: &str = "\
# Drag well past the neighbouring column, then hold before lifting.
swipe left 500 250 300
# Quick flick to the last column.
fling left 120
# Down a row, then back up.
fling up 120
fling down 120
# Centre pane, then a tap that must not move anything.
jump 4
tap
# Slow vertical drag that stops short of halfway.
swipe down 100 300 200
";

const DEFAULT_SWIPE_MS: u64 = 80;
const FLING_MS: u64 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step of the finger in screen coordinates.
    #[must_use]
    pub const fn unit(self) -> (f64, f64) {
        match self {
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(format!("unknown direction `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Press, drag in a straight line, optionally hold still, release.
    Swipe {
        direction: Direction,
        distance: f64,
        duration_ms: u64,
        hold_ms: u64,
    },
    /// Press, drag, then the platform cancels the gesture.
    Cancel {
        direction: Direction,
        distance: f64,
        duration_ms: u64,
    },
    Tap,
    Jump(usize),
    Wait(u64),
    Resize { width: f64, height: f64 },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self> {
        let mut steps = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            steps.push(parse_step(line).map_err(|message| DemoError::script(index + 1, message))?);
        }
        Ok(Self { steps })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DemoError::MissingScript {
                path: path.to_path_buf(),
            });
        }
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::parse(DEFAULT_SCRIPT).unwrap_or_default()
    }
}

fn parse_step(line: &str) -> std::result::Result<Step, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let step = match verb.as_str() {
        "swipe" => {
            expect_args(&verb, &args, 2, 4)?;
            Step::Swipe {
                direction: args[0].parse()?,
                distance: distance(args[1])?,
                duration_ms: optional_ms(args.get(2))?.unwrap_or(DEFAULT_SWIPE_MS),
                hold_ms: optional_ms(args.get(3))?.unwrap_or(0),
            }
        }
        "fling" => {
            expect_args(&verb, &args, 2, 2)?;
            Step::Swipe {
                direction: args[0].parse()?,
                distance: distance(args[1])?,
                duration_ms: FLING_MS,
                hold_ms: 0,
            }
        }
        "cancel" => {
            expect_args(&verb, &args, 2, 3)?;
            Step::Cancel {
                direction: args[0].parse()?,
                distance: distance(args[1])?,
                duration_ms: optional_ms(args.get(2))?.unwrap_or(DEFAULT_SWIPE_MS),
            }
        }
        "tap" => {
            expect_args(&verb, &args, 0, 0)?;
            Step::Tap
        }
        "jump" => {
            expect_args(&verb, &args, 1, 1)?;
            Step::Jump(
                args[0]
                    .parse()
                    .map_err(|_| format!("invalid pane index `{}`", args[0]))?,
            )
        }
        "wait" => {
            expect_args(&verb, &args, 1, 1)?;
            Step::Wait(ms(args[0])?)
        }
        "resize" => {
            expect_args(&verb, &args, 2, 2)?;
            Step::Resize {
                width: distance(args[0])?,
                height: distance(args[1])?,
            }
        }
        other => return Err(format!("unknown step `{other}`")),
    };
    Ok(step)
}

fn expect_args(verb: &str, args: &[&str], min: usize, max: usize) -> std::result::Result<(), String> {
    if args.len() < min || args.len() > max {
        return Err(format!(
            "`{verb}` takes {min}..={max} arguments, got {}",
            args.len()
        ));
    }
    Ok(())
}

fn distance(word: &str) -> std::result::Result<f64, String> {
    match word.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(format!("invalid distance `{word}`")),
    }
}

fn ms(word: &str) -> std::result::Result<u64, String> {
    word.parse()
        .map_err(|_| format!("invalid duration `{word}`"))
}

fn optional_ms(word: Option<&&str>) -> std::result::Result<Option<u64>, String> {
    word.map(|w| ms(w)).transpose()
}
