use std::collections::VecDeque;

use crate::clock::{elapsed_ms, Millis};

/// Measures ticks-per-second over a sliding window of [`Millis`].
///
/// Call [`tick`](TickCounter::tick) once per host-loop iteration, then
/// [`tps`](TickCounter::tps) to read the current rate. Timestamps that fall
/// out of the window are pruned on every tick.
pub struct TickCounter {
    timestamps: VecDeque<Millis>,
    window_ms: u32,
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new(1_000)
    }
}

impl TickCounter {
    /// Create a counter with a window of `window_ms` milliseconds.
    ///
    /// A zero window is bumped to one millisecond.
    pub fn new(window_ms: u32) -> Self {
        Self {
            timestamps: VecDeque::new(),
            window_ms: window_ms.max(1),
        }
    }

    /// Record a tick at `now` and prune expired timestamps.
    pub fn tick(&mut self, now: Millis) {
        self.timestamps.push_back(now);
        while let Some(&front) = self.timestamps.front() {
            if elapsed_ms(now, front) > self.window_ms {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Ticks per second over the window.
    ///
    /// Returns `0.0` until at least two ticks have been recorded.
    pub fn tps(&self) -> f64 {
        if self.timestamps.len() < 2 {
            return 0.0;
        }
        self.timestamps.len() as f64 * 1_000.0 / self.window_ms as f64
    }
}
