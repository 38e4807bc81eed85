use peepers_config::BlinkConfig;
use peepers_core::clock::{elapsed_ms, Millis};

use super::draw_ms;
use crate::random::RandomSource;

/// Decides when to blink: once per randomly drawn interval.
pub struct BlinkDirector {
    config: BlinkConfig,
    last_blink: Millis,
    next_interval_ms: u32,
}

impl BlinkDirector {
    pub fn new(config: &BlinkConfig, now: Millis, rng: &mut dyn RandomSource) -> Self {
        Self {
            config: config.clone(),
            last_blink: now,
            next_interval_ms: draw_ms(rng, config.interval_ms),
        }
    }

    /// Returns `true` when a blink is due. The caller must then start the
    /// blink on the engine straight away.
    pub fn update(&mut self, now: Millis, rng: &mut dyn RandomSource) -> bool {
        if elapsed_ms(now, self.last_blink) <= self.next_interval_ms {
            return false;
        }
        self.last_blink = now;
        self.next_interval_ms = draw_ms(rng, self.config.interval_ms);
        tracing::trace!(next_interval_ms = self.next_interval_ms, "blink due");
        true
    }

    /// Milliseconds until the next blink is due, as of `now`.
    pub fn remaining_ms(&self, now: Millis) -> u32 {
        self.next_interval_ms
            .saturating_sub(elapsed_ms(now, self.last_blink))
    }
}
