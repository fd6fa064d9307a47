//! End-to-end navigation scenarios on the 3×3 example grid.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use panegrid_core::*;

const FRAME: Duration = Duration::from_millis(16);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn grid3x3() -> Grid {
    Grid::new(9, 3).unwrap()
}

fn viewport() -> Viewport {
    Viewport::new(300.0, 300.0).unwrap()
}

/// Switcher with a listener that records every switch.
fn recording_switcher() -> (PaneSwitcher, Rc<RefCell<Vec<usize>>>) {
    let mut sw = PaneSwitcher::new(grid3x3(), viewport(), SwitcherConfig::default()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    sw.set_listener(move |pane| sink.borrow_mut().push(pane));
    (sw, seen)
}

/// Tick at frame cadence until the snap settles; returns the settle time.
fn run_frames(sw: &mut PaneSwitcher<impl VelocityEstimator>, start: Instant) -> Instant {
    let mut now = start;
    for _ in 0..500 {
        match sw.tick(now) {
            SnapProgress::Settled(_) | SnapProgress::Idle => return now,
            SnapProgress::Running => now += FRAME,
        }
    }
    panic!("snap did not settle within 500 frames");
}

#[test]
fn drag_past_adjacent_column_clamps_then_settles_on_it() {
    let (mut sw, seen) = recording_switcher();
    let t = Instant::now();

    sw.press(Point::new(400.0, 150.0), t);
    sw.drag(Point::new(300.0, 150.0), t + ms(10));
    assert_eq!(sw.offset().x, 100.0);
    sw.drag(Point::new(200.0, 150.0), t + ms(20));
    assert_eq!(sw.offset().x, 200.0);
    sw.drag(Point::new(100.0, 150.0), t + ms(30));
    assert_eq!(sw.offset().x, 300.0);
    // Total finger travel is now 350; the view stays on the adjacent column.
    assert!(sw.drag(Point::new(50.0, 150.0), t + ms(40)).is_none());
    assert_eq!(sw.offset(), Offset::new(300.0, 0.0));
    assert_eq!(sw.axis_lock(), AxisLock::Horizontal);

    // Hold still, then lift: no fling, nearest pane wins.
    let req = sw.release(Point::new(50.0, 150.0), t + ms(400)).unwrap();
    assert_eq!(req, SnapRequest { target: 1, axis: Axis::Horizontal });
    assert_eq!(sw.active_pane(), 0, "active pane changes only on completion");

    run_frames(&mut sw, t + ms(400));
    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(sw.active_pane(), 1);
    assert_eq!(sw.offset(), Offset::new(300.0, 0.0));
}

#[test]
fn vertical_fling_from_center_goes_up_one_row() {
    let (mut sw, seen) = recording_switcher();
    sw.set_current_screen(4);
    let t = Instant::now();

    // Finger moves down 15 units every 10ms: 1500 units/s.
    sw.press(Point::new(150.0, 100.0), t);
    for step in 1..=3u32 {
        sw.drag(Point::new(150.0, 100.0 + 15.0 * f64::from(step)), t + ms(10) * step);
    }
    assert_eq!(sw.axis_lock(), AxisLock::Vertical);
    let req = sw.release(Point::new(150.0, 160.0), t + ms(40)).unwrap();
    assert_eq!(req, SnapRequest { target: 1, axis: Axis::Vertical });

    let mut now = t + ms(40);
    let mut settled = Vec::new();
    for _ in 0..200 {
        if let SnapProgress::Settled(pane) = sw.tick(now) {
            settled.push(pane);
        }
        now += FRAME;
    }
    assert_eq!(settled, vec![1]);
    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(sw.offset(), Offset::new(300.0, 0.0));
}

#[test]
fn tap_changes_nothing() {
    let (mut sw, seen) = recording_switcher();
    sw.set_current_screen(4);
    let before = sw.offset();
    let t = Instant::now();

    sw.press(Point::new(150.0, 150.0), t);
    sw.drag(Point::new(154.0, 147.0), t + ms(30));
    assert!(sw.release(Point::new(154.0, 147.0), t + ms(60)).is_none());

    assert_eq!(sw.tick(t + ms(100)), SnapProgress::Idle);
    assert_eq!(sw.offset(), before);
    assert!(seen.borrow().is_empty());
    assert_eq!(sw.take_switched(), None);
}

/// Estimator reporting a fixed horizontal velocity.
struct FixedX(f64);

impl VelocityEstimator for FixedX {
    fn add_sample(&mut self, _: Point, _: Instant) {}
    fn estimate(&self) -> Velocity {
        Velocity::new(self.0, 0.0)
    }
    fn clear(&mut self) {}
}

fn release_with_velocity(vx: f64) -> usize {
    let mut sw = PaneSwitcher::with_estimator(
        grid3x3(),
        viewport(),
        SwitcherConfig::default(),
        FixedX(vx),
    )
    .unwrap()
    .with_initial_pane(4);
    let t = Instant::now();
    sw.press(Point::new(150.0, 150.0), t);
    sw.drag(Point::new(170.0, 150.0), t + ms(10));
    sw.release(Point::new(170.0, 150.0), t + ms(20)).unwrap().target
}

#[test]
fn fling_threshold_is_strict() {
    assert_eq!(release_with_velocity(1000.0), 4);
    assert_eq!(release_with_velocity(1001.0), 3);
    assert_eq!(release_with_velocity(-1000.0), 4);
    assert_eq!(release_with_velocity(-1001.0), 5);
}

#[test]
fn completion_fires_on_first_tick_past_duration_only() {
    let (mut sw, seen) = recording_switcher();
    let t = Instant::now();
    sw.press(Point::new(300.0, 100.0), t);
    sw.drag(Point::new(100.0, 100.0), t + ms(200));
    // x = 200; nearest pane 1 is 100 away: 200ms snap.
    sw.release(Point::new(100.0, 100.0), t + ms(500)).unwrap();

    let start = t + ms(500);
    assert_eq!(sw.tick(start + ms(100)), SnapProgress::Running);
    assert_ne!(sw.offset().x, 300.0);
    assert_eq!(sw.tick(start + ms(199)), SnapProgress::Running);
    assert!(seen.borrow().is_empty());

    assert_eq!(sw.tick(start + ms(250)), SnapProgress::Settled(1));
    assert_eq!(sw.offset().x, 300.0);
    for extra in 1..10u32 {
        assert_eq!(sw.tick(start + ms(250) + FRAME * extra), SnapProgress::Idle);
    }
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn set_current_screen_jumps_without_notification() {
    let (mut sw, seen) = recording_switcher();
    sw.set_current_screen(8);
    assert_eq!(sw.offset(), Offset::new(600.0, 600.0));
    assert_eq!(sw.active_pane(), 8);
    assert!(!sw.is_animating());
    assert!(seen.borrow().is_empty());
}

#[test]
fn grabbing_a_settling_view_continues_as_a_drag() {
    let (mut sw, seen) = recording_switcher();
    let t = Instant::now();
    sw.press(Point::new(300.0, 100.0), t);
    sw.drag(Point::new(100.0, 100.0), t + ms(200));
    sw.release(Point::new(100.0, 100.0), t + ms(500)).unwrap();
    sw.tick(t + ms(550));
    let mid = sw.offset().x;
    assert!(mid > 200.0 && mid < 300.0);

    // Re-grab: a 2-unit move pans immediately, slop does not apply.
    sw.press(Point::new(100.0, 100.0), t + ms(560));
    let step = sw.drag(Point::new(102.0, 100.0), t + ms(570)).unwrap();
    assert_eq!(step.applied, -2.0);
    assert_eq!(sw.tick(t + ms(2000)), SnapProgress::Idle);
    assert!(seen.borrow().is_empty());
}

#[test]
fn switching_along_a_row_and_back() {
    let (mut sw, seen) = recording_switcher();
    let mut t = Instant::now();

    for (from, to) in [(250.0, 50.0), (250.0, 50.0), (50.0, 250.0)] {
        sw.press(Point::new(from, 100.0), t);
        sw.drag(Point::new((from + to) / 2.0, 100.0), t + ms(10));
        sw.drag(Point::new(to, 100.0), t + ms(20));
        sw.release(Point::new(to, 100.0), t + ms(30));
        t = run_frames(&mut sw, t + ms(30)) + FRAME;
    }
    assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    assert_eq!(sw.offset(), Offset::new(300.0, 0.0));
}

#[test]
fn cancel_without_settle_leaves_view_between_panes() {
    let (mut sw, seen) = recording_switcher();
    let t = Instant::now();
    sw.handle(&PointerEvent::Press(Point::new(200.0, 100.0)), t);
    sw.handle(&PointerEvent::Move(Point::new(60.0, 100.0)), t + ms(10));
    assert_eq!(sw.handle(&PointerEvent::Cancel, t + ms(20)), None);
    assert_eq!(sw.offset().x, 140.0);
    assert!(!sw.is_dragging());
    assert_eq!(sw.axis_lock(), AxisLock::Unset);
    assert!(seen.borrow().is_empty());
}
