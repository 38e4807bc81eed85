use std::fmt;

use peepers_config::GazeConfig;
use peepers_core::clock::{elapsed_ms, Millis};

use super::draw_ms;
use crate::engine::AnimationEngine;
use crate::random::RandomSource;

/// Where the [`GazeDirector`] is in its glance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GazeState {
    /// Looking straight ahead, waiting for the next glance.
    #[default]
    Idle,
    TransitionToSide,
    /// Holding the side position for `dwell_ms`.
    DwellingAtSide { dwell_ms: u32 },
    TransitionToCenter,
}

impl fmt::Display for GazeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GazeState::Idle => "idle",
            GazeState::TransitionToSide => "to side",
            GazeState::DwellingAtSide { .. } => "at side",
            GazeState::TransitionToCenter => "to center",
        };
        f.write_str(label)
    }
}

/// Horizontal side of a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Four-state machine that makes the eyes glance to a side now and then
/// and come back to the centre.
///
/// Nothing happens while the engine is busy with an emotion morph or a
/// blink; the machine simply picks up where it left off afterwards.
pub struct GazeDirector {
    config: GazeConfig,
    state: GazeState,
    state_start: Millis,
    idle_interval_ms: u32,
}

impl GazeDirector {
    pub fn new(config: &GazeConfig, now: Millis, rng: &mut dyn RandomSource) -> Self {
        Self {
            config: config.clone(),
            state: GazeState::Idle,
            state_start: now,
            idle_interval_ms: draw_ms(rng, config.idle_ms),
        }
    }

    pub fn state(&self) -> GazeState {
        self.state
    }

    pub fn update(&mut self, engine: &mut AnimationEngine, now: Millis, rng: &mut dyn RandomSource) {
        if engine.is_busy() {
            return;
        }
        let elapsed = elapsed_ms(now, self.state_start);

        match self.state {
            GazeState::Idle => {
                if elapsed <= self.idle_interval_ms {
                    return;
                }
                if rng.chance(self.config.glance_percent) {
                    let side = if rng.range(0, 2) == 0 { Side::Left } else { Side::Right };
                    self.start_glance(engine, side, now);
                } else {
                    tracing::trace!("gaze director stays centred");
                    self.enter_idle(now, rng);
                }
            }
            GazeState::TransitionToSide => {
                if !engine.is_gaze_transitioning() {
                    let dwell_ms = draw_ms(rng, self.config.dwell_at_side_ms);
                    self.enter(GazeState::DwellingAtSide { dwell_ms }, now);
                }
            }
            GazeState::DwellingAtSide { dwell_ms } => {
                if elapsed > dwell_ms
                    && engine.start_gaze_transition(0.0, self.config.to_center_sec, now)
                {
                    self.enter(GazeState::TransitionToCenter, now);
                }
            }
            GazeState::TransitionToCenter => {
                if !engine.is_gaze_transitioning() {
                    self.enter_idle(now, rng);
                }
            }
        }
    }

    /// Glance to `side` right away, skipping the idle wait.
    ///
    /// Only honoured from [`GazeState::Idle`] with the engine free; the
    /// rest of the cycle then runs as usual.
    pub fn glance(&mut self, engine: &mut AnimationEngine, side: Side, now: Millis) -> bool {
        if self.state != GazeState::Idle || engine.is_busy() {
            return false;
        }
        self.start_glance(engine, side, now)
    }

    fn start_glance(&mut self, engine: &mut AnimationEngine, side: Side, now: Millis) -> bool {
        let target = side.sign() * engine.max_gaze_offset();
        if !engine.start_gaze_transition(target, self.config.to_side_sec, now) {
            return false;
        }
        tracing::debug!(?side, target, "gaze director glances");
        self.enter(GazeState::TransitionToSide, now);
        true
    }

    fn enter_idle(&mut self, now: Millis, rng: &mut dyn RandomSource) {
        self.idle_interval_ms = draw_ms(rng, self.config.idle_ms);
        self.enter(GazeState::Idle, now);
    }

    fn enter(&mut self, state: GazeState, now: Millis) {
        tracing::trace!(from = %self.state, to = %state, "gaze state change");
        self.state = state;
        self.state_start = now;
    }
}
