use std::time::Instant;

/// Millisecond timestamp from a monotonic counter.
///
/// The counter is 32 bits wide and wraps after roughly 49.7 days, like a
/// microcontroller's `millis()`. Never subtract two `Millis` directly; use
/// [`elapsed_ms`] so a single wrap between the two readings is harmless.
pub type Millis = u32;

/// Milliseconds between `since` and `now`, tolerating one counter wrap.
pub fn elapsed_ms(now: Millis, since: Millis) -> u32 {
    now.wrapping_sub(since)
}

/// A source of monotonic millisecond timestamps.
pub trait Clock {
    /// Current timestamp. Successive calls never go backwards (modulo wrap).
    fn now_ms(&self) -> Millis;
}

/// [`Clock`] backed by [`std::time::Instant`], counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        // Truncation is the wrap.
        self.origin.elapsed().as_millis() as u64 as Millis
    }
}
