#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use panegrid_core::{Grid, Instant, PaneSwitcher, Point, SnapProgress, SwitcherConfig, Viewport};

#[derive(Debug, Arbitrary)]
enum Op {
    Press(i16, i16),
    Move(i16, i16),
    Release(i16, i16),
    Cancel,
    Tick(u8),
    Jump(u8),
    Resize(u16, u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    rows: u8,
    columns: u8,
    settle_on_cancel: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    // Shapes 1..=6 x 1..=6.
    let rows = usize::from(input.rows % 6) + 1;
    let columns = usize::from(input.columns % 6) + 1;
    let Ok(grid) = Grid::new(rows * columns, rows) else {
        return;
    };
    let Ok(viewport) = Viewport::new(320.0, 480.0) else {
        return;
    };
    let config = SwitcherConfig::default().with_settle_on_cancel(input.settle_on_cancel);
    let Ok(mut switcher) = PaneSwitcher::new(grid, viewport, config) else {
        return;
    };

    let mut now = Instant::now();
    let mut switches = 0usize;
    let mut snaps = 0usize;
    for op in input.ops.iter().take(512) {
        match *op {
            Op::Press(x, y) => switcher.press(point(x, y), now),
            Op::Move(x, y) => {
                switcher.drag(point(x, y), now);
            }
            Op::Release(x, y) => {
                if switcher.release(point(x, y), now).is_some() {
                    snaps += 1;
                }
            }
            Op::Cancel => {
                if switcher.cancel(now).is_some() {
                    snaps += 1;
                }
            }
            Op::Tick(ms) => {
                now += Duration::from_millis(u64::from(ms));
                if let SnapProgress::Settled(pane) = switcher.tick(now) {
                    assert!(pane < grid.pane_count(), "settled on a missing pane");
                    switches += 1;
                }
            }
            Op::Jump(pane) => switcher.set_current_screen(usize::from(pane)),
            Op::Resize(w, h) => {
                if let Ok(viewport) = Viewport::new(f64::from(w), f64::from(h)) {
                    switcher.set_viewport(viewport);
                }
            }
        }

        // Post-conditions that must always hold:
        let max = switcher.grid().max_offset(switcher.viewport());
        let offset = switcher.offset();
        assert!((0.0..=max.x).contains(&offset.x), "x out of range");
        assert!((0.0..=max.y).contains(&offset.y), "y out of range");
        assert!(switcher.active_pane() < grid.pane_count(), "active pane OOB");
        assert!(switches <= snaps, "more completions than snaps");
    }
});

fn point(x: i16, y: i16) -> Point {
    Point::new(f64::from(x), f64::from(y))
}
