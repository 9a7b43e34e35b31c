// src/core/timer.rs

use std::time::{Duration, Instant};

/// Capture-style timer for the classifier's phase accounting: each
/// `capture` returns the time since the previous capture and restarts.
pub struct Timer {
    last: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Timer {
            last: Instant::now(),
        }
    }

    pub fn capture(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed
    }
}
