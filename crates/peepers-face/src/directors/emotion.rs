use peepers_config::EmotionConfig;
use peepers_core::clock::{elapsed_ms, Millis};

use super::draw_ms;
use crate::catalog::EmotionCatalog;
use crate::easing::Easing;
use crate::engine::{AnimationEngine, EmotionTransition};
use crate::random::RandomSource;
use crate::types::EmotionId;

/// Decides which expression to show next and how long to hold it.
///
/// From any expression the face usually drifts back to neutral; from
/// neutral it sometimes wanders off to a random expression. Every decision
/// point restarts the dwell countdown, even when the decision is to stay.
pub struct EmotionDirector {
    config: EmotionConfig,
    current: EmotionId,
    state_start: Millis,
    dwell_ms: u32,
}

impl EmotionDirector {
    /// Start settled on neutral with a neutral dwell.
    pub fn new(
        config: &EmotionConfig,
        catalog: &EmotionCatalog,
        now: Millis,
        rng: &mut dyn RandomSource,
    ) -> Self {
        Self {
            config: config.clone(),
            current: catalog.neutral(),
            state_start: now,
            dwell_ms: draw_ms(rng, config.neutral_dwell_ms),
        }
    }

    /// The expression the director last settled on.
    pub fn current(&self) -> EmotionId {
        self.current
    }

    /// Make a decision if the engine is free and the dwell time is over.
    pub fn update(&mut self, engine: &mut AnimationEngine, now: Millis, rng: &mut dyn RandomSource) {
        if engine.is_busy() || elapsed_ms(now, self.state_start) < self.dwell_ms {
            return;
        }

        match self.decide(engine.catalog(), rng) {
            Some(target) => {
                self.transition_to(engine, target, now, rng);
            }
            None => {
                tracing::trace!(
                    emotion = engine.catalog().name(self.current),
                    "emotion director holds"
                );
            }
        }
        self.state_start = now;
    }

    /// Morph from the current expression to `target` with a random
    /// duration, then remember it with a fresh dwell.
    ///
    /// Returns `false`, leaving the director untouched, while the engine is
    /// busy with a morph or a blink.
    pub fn transition_to(
        &mut self,
        engine: &mut AnimationEngine,
        target: EmotionId,
        now: Millis,
        rng: &mut dyn RandomSource,
    ) -> bool {
        if engine.is_busy() {
            tracing::trace!(
                target_emotion = engine.catalog().name(target),
                "emotion transition dropped, engine busy"
            );
            return false;
        }
        let duration_ms = draw_ms(rng, self.config.transition_ms);
        let dwell_ms = if target == engine.catalog().neutral() {
            draw_ms(rng, self.config.neutral_dwell_ms)
        } else {
            draw_ms(rng, self.config.emotion_dwell_ms)
        };

        let accepted = engine.change_emotion(
            EmotionTransition {
                start: self.current,
                target,
                duration_sec: duration_ms as f32 / 1000.0,
                intensity: 1.0,
                easing: Easing::EaseInOutQuad,
                dwell_ms,
            },
            now,
        );
        if accepted {
            tracing::debug!(
                from = engine.catalog().name(self.current),
                to = engine.catalog().name(target),
                duration_ms,
                dwell_ms,
                "emotion director picked a transition"
            );
            self.current = target;
            self.dwell_ms = dwell_ms;
            self.state_start = now;
        }
        accepted
    }

    fn decide(&self, catalog: &EmotionCatalog, rng: &mut dyn RandomSource) -> Option<EmotionId> {
        let neutral = catalog.neutral();
        if self.current != neutral {
            return rng
                .chance(self.config.return_to_neutral_percent)
                .then_some(neutral);
        }

        if !rng.chance(self.config.leave_neutral_percent) {
            return None;
        }
        let choices = catalog.len().saturating_sub(1);
        if choices == 0 {
            return None;
        }
        let pick = rng.range(0, choices as u32) as usize;
        catalog.non_neutral().nth(pick)
    }
}
