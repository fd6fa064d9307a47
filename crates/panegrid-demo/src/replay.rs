//! Deterministic replay of a gesture script against a [`PaneSwitcher`].
//!
//! The clock is simulated: pointer samples arrive every [`SAMPLE`] and
//! frames every [`FRAME`], so a replay produces the same trace on every run.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use panegrid_core::{
    Instant, PaneSwitcher, Point, PointerEvent, SnapProgress, SwitchEvent, Viewport,
};
use serde::Serialize;

use crate::error::Result;
use crate::script::{Direction, Script, Step};

/// Interval between synthetic pointer samples.
pub const SAMPLE: Duration = Duration::from_millis(8);
/// Interval between animation frames.
pub const FRAME: Duration = Duration::from_millis(16);

const MAX_FRAMES_PER_SNAP: usize = 10_000;
const MAX_SAMPLES_PER_DRAG: u64 = 4_096;

/// One line of the JSON trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub step: usize,
    pub t_ms: u64,
    pub event: &'static str,
    pub offset_x: f64,
    pub offset_y: f64,
    pub active: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switched: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub steps: usize,
    pub frames: usize,
    pub switches: Vec<usize>,
    pub final_pane: usize,
    pub final_offset: [f64; 2],
}

pub struct Replay<'w> {
    switcher: PaneSwitcher,
    origin: Instant,
    now: Instant,
    step: usize,
    frames: usize,
    switches: Rc<RefCell<Vec<usize>>>,
    trace: Option<&'w mut dyn Write>,
}

impl<'w> Replay<'w> {
    pub fn new(mut switcher: PaneSwitcher) -> Self {
        let switches = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&switches);
        switcher.set_listener(move |pane: usize| sink.borrow_mut().push(pane));
        let origin = Instant::now();
        Self {
            switcher,
            origin,
            now: origin,
            step: 0,
            frames: 0,
            switches,
            trace: None,
        }
    }

    /// Emit one JSON line per event and frame into `out`.
    #[must_use]
    pub fn with_trace(mut self, out: &'w mut dyn Write) -> Self {
        self.trace = Some(out);
        self
    }

    pub fn run(&mut self, script: &Script) -> Result<ReplaySummary> {
        for (index, step) in script.steps.iter().enumerate() {
            self.step = index + 1;
            tracing::debug!(step = self.step, ?step, "replaying");
            self.apply(step)?;
        }
        Ok(self.summary())
    }

    #[must_use]
    pub fn summary(&self) -> ReplaySummary {
        let offset = self.switcher.offset();
        ReplaySummary {
            steps: self.step,
            frames: self.frames,
            switches: self.switches.borrow().clone(),
            final_pane: self.switcher.active_pane(),
            final_offset: [offset.x, offset.y],
        }
    }

    #[must_use]
    pub fn switcher(&self) -> &PaneSwitcher {
        &self.switcher
    }

    fn apply(&mut self, step: &Step) -> Result<()> {
        match *step {
            Step::Swipe {
                direction,
                distance,
                duration_ms,
                hold_ms,
            } => {
                let end = self.drag(direction, distance, duration_ms)?;
                self.now += Duration::from_millis(hold_ms);
                self.pointer(PointerEvent::Release(end), "release")?;
                self.settle()
            }
            Step::Cancel {
                direction,
                distance,
                duration_ms,
            } => {
                self.drag(direction, distance, duration_ms)?;
                self.pointer(PointerEvent::Cancel, "cancel")?;
                self.settle()
            }
            Step::Tap => {
                let centre = self.centre();
                self.pointer(PointerEvent::Press(centre), "press")?;
                self.now += SAMPLE;
                self.pointer(PointerEvent::Release(centre), "release")?;
                self.settle()
            }
            Step::Jump(pane) => {
                self.switcher.set_current_screen(pane);
                self.record("jump", None)
            }
            Step::Wait(ms) => {
                let until = self.now + Duration::from_millis(ms);
                while self.switcher.is_animating() && self.now + FRAME <= until {
                    self.frame()?;
                }
                self.now = until;
                Ok(())
            }
            Step::Resize { width, height } => {
                self.switcher.set_viewport(Viewport::new(width, height)?);
                self.record("resize", None)
            }
        }
    }

    /// Press at the centre and move `distance` along `direction`; returns the
    /// final finger position.
    fn drag(&mut self, direction: Direction, distance: f64, duration_ms: u64) -> Result<Point> {
        let start = self.centre();
        let (ux, uy) = direction.unit();
        self.pointer(PointerEvent::Press(start), "press")?;

        let pressed_at = self.now;
        let samples = (duration_ms / SAMPLE.as_millis() as u64).clamp(1, MAX_SAMPLES_PER_DRAG);
        let mut pos = start;
        for i in 1..=samples {
            let fraction = i as f64 / samples as f64;
            pos = Point::new(
                start.x + ux * distance * fraction,
                start.y + uy * distance * fraction,
            );
            self.now = pressed_at + Duration::from_millis(duration_ms).mul_f64(fraction);
            self.pointer(PointerEvent::Move(pos), "move")?;
        }
        Ok(pos)
    }

    fn pointer(&mut self, event: PointerEvent, label: &'static str) -> Result<()> {
        match self.switcher.handle(&event, self.now) {
            Some(SwitchEvent::SnapStarted(request)) => {
                tracing::info!(
                    step = self.step,
                    target_pane = request.target,
                    axis = ?request.axis,
                    "snap started"
                );
            }
            Some(SwitchEvent::Panned(_)) | None => {}
        }
        self.record(label, None)
    }

    /// Tick frames until the running snap completes.
    fn settle(&mut self) -> Result<()> {
        for _ in 0..MAX_FRAMES_PER_SNAP {
            if !self.switcher.is_animating() {
                return Ok(());
            }
            self.frame()?;
        }
        tracing::warn!(step = self.step, "snap did not settle");
        Ok(())
    }

    fn frame(&mut self) -> Result<()> {
        self.now += FRAME;
        self.frames += 1;
        match self.switcher.tick(self.now) {
            SnapProgress::Settled(pane) => self.record("frame", Some(pane)),
            SnapProgress::Running => self.record("frame", None),
            SnapProgress::Idle => Ok(()),
        }
    }

    fn centre(&self) -> Point {
        let viewport = self.switcher.viewport();
        Point::new(viewport.width() / 2.0, viewport.height() / 2.0)
    }

    fn record(&mut self, event: &'static str, switched: Option<usize>) -> Result<()> {
        let Some(out) = self.trace.as_mut() else {
            return Ok(());
        };
        let offset = self.switcher.offset();
        let record = FrameRecord {
            step: self.step,
            t_ms: u64::try_from(self.now.duration_since(self.origin).as_millis())
                .unwrap_or(u64::MAX),
            event,
            offset_x: offset.x,
            offset_y: offset.y,
            active: self.switcher.active_pane(),
            switched,
        };
        serde_json::to_writer(&mut **out, &record)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use panegrid_core::{Grid, Offset, SwitcherConfig};

    use super::*;
    use crate::script::DEFAULT_SCRIPT;

    fn switcher(width: f64, height: f64) -> PaneSwitcher {
        PaneSwitcher::new(
            Grid::new(9, 3).unwrap(),
            Viewport::new(width, height).unwrap(),
            SwitcherConfig::default(),
        )
        .unwrap()
    }

    fn run(source: &str) -> ReplaySummary {
        let script = Script::parse(source).unwrap();
        Replay::new(switcher(300.0, 300.0)).run(&script).unwrap()
    }

    #[test]
    fn long_slow_drag_settles_on_adjacent_column() {
        let summary = run("swipe left 500 250 300");
        assert_eq!(summary.switches, vec![1]);
        assert_eq!(summary.final_pane, 1);
        assert_eq!(summary.final_offset, [300.0, 0.0]);
    }

    #[test]
    fn flings_walk_the_grid() {
        let summary = run("fling left 60\nfling left 60\nfling up 60\nfling right 60");
        assert_eq!(summary.switches, vec![1, 2, 5, 4]);
        assert_eq!(summary.final_offset, [300.0, 300.0]);
    }

    #[test]
    fn tap_and_jump_do_not_notify() {
        let summary = run("jump 8\ntap");
        assert!(summary.switches.is_empty());
        assert_eq!(summary.final_pane, 8);
        assert_eq!(summary.final_offset, [600.0, 600.0]);
        assert_eq!(summary.frames, 0);
    }

    #[test]
    fn cancel_leaves_the_view_in_place() {
        let summary = run("cancel left 100");
        assert!(summary.switches.is_empty());
        assert_eq!(summary.final_offset, [100.0, 0.0]);
    }

    #[test]
    fn resize_reanchors_on_active_pane() {
        let mut replay = Replay::new(switcher(300.0, 300.0));
        replay
            .run(&Script::parse("jump 4\nresize 200 100").unwrap())
            .unwrap();
        assert_eq!(replay.switcher().offset(), Offset::new(200.0, 100.0));
    }

    #[test]
    fn builtin_script_runs_to_completion() {
        let summary = Replay::new(switcher(360.0, 640.0))
            .run(&Script::parse(DEFAULT_SCRIPT).unwrap())
            .unwrap();
        assert_eq!(summary.steps, 7);
        assert_eq!(summary.switches.first(), Some(&1));
        assert!(summary.final_pane < 9);
    }

    #[test]
    fn trace_is_json_lines() {
        let mut out = Vec::new();
        let summary = Replay::new(switcher(300.0, 300.0))
            .with_trace(&mut out)
            .run(&Script::parse("fling left 60").unwrap())
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines[0]["event"], "press");
        assert_eq!(lines[0]["t_ms"], 0);
        let last = lines.last().unwrap();
        assert_eq!(last["event"], "frame");
        assert_eq!(last["switched"], 1);
        let frame_lines = lines.iter().filter(|l| l["event"] == "frame").count();
        assert_eq!(frame_lines, summary.frames);
    }
}
