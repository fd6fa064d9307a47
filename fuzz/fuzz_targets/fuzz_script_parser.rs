#![no_main]

use libfuzzer_sys::fuzz_target;
use panegrid_demo::script::{Script, Step};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(script) = Script::parse(source) else {
        return;
    };

    // Every parsed step is well formed.
    for step in &script.steps {
        match *step {
            Step::Swipe { distance, .. } | Step::Cancel { distance, .. } => {
                assert!(distance.is_finite() && distance >= 0.0);
            }
            Step::Resize { width, height } => {
                assert!(width.is_finite() && height.is_finite());
            }
            Step::Tap | Step::Jump(_) | Step::Wait(_) => {}
        }
    }
});
