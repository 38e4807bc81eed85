use peepers_core::clock::{elapsed_ms, Millis};

use crate::easing::Easing;
use crate::types::{lerp, EmotionId};

/// Playback state of a [`Track`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackStatus {
    #[default]
    Idle,
    Playing,
    /// Frozen by a blink; `progress` is the raw progress at the moment of
    /// pausing.
    Paused { progress: f32 },
}

/// One independently timed shape interpolation: the emotion track or the
/// blink track.
#[derive(Debug, Clone)]
pub struct Track {
    pub(crate) status: TrackStatus,
    pub(crate) start_time: Millis,
    pub(crate) duration_sec: f32,
    pub(crate) start_state: EmotionId,
    pub(crate) end_state: EmotionId,
    pub(crate) intensity: f32,
    pub(crate) easing: Easing,
    pub(crate) dwell_ms: u32,
}

impl Track {
    /// An idle track resting on `rest`.
    pub(crate) fn idle(rest: EmotionId) -> Self {
        Self {
            status: TrackStatus::Idle,
            start_time: 0,
            duration_sec: 0.0,
            start_state: rest,
            end_state: rest,
            intensity: 1.0,
            easing: Easing::Linear,
            dwell_ms: 0,
        }
    }

    /// `true` while playing or paused.
    pub fn is_playing(&self) -> bool {
        !matches!(self.status, TrackStatus::Idle)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.status, TrackStatus::Paused { .. })
    }

    pub fn status(&self) -> TrackStatus {
        self.status
    }

    pub fn start_state(&self) -> EmotionId {
        self.start_state
    }

    pub fn end_state(&self) -> EmotionId {
        self.end_state
    }

    /// Elapsed fraction of the duration at `now`, unclamped.
    ///
    /// A non-positive or non-finite duration counts as already finished.
    pub fn raw_progress(&self, now: Millis) -> f32 {
        let duration_ms = self.duration_sec * 1000.0;
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return 1.0;
        }
        elapsed_ms(now, self.start_time) as f32 / duration_ms
    }

    /// Freeze the track at its current progress.
    pub(crate) fn pause(&mut self, now: Millis) {
        if self.status == TrackStatus::Playing {
            self.status = TrackStatus::Paused {
                progress: self.raw_progress(now),
            };
        }
    }

    /// Continue a paused track so that its progress at `now` equals the
    /// progress it was paused at.
    pub(crate) fn resume(&mut self, now: Millis) {
        if let TrackStatus::Paused { progress } = self.status {
            let offset_ms = (self.duration_sec * 1000.0 * progress) as u32;
            self.start_time = now.wrapping_sub(offset_ms);
            self.status = TrackStatus::Playing;
        }
    }
}

/// Which half of a blink is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    /// Pre-blink shape towards the closed shape.
    Closing,
    /// Closed shape back towards the pre-blink shape.
    Opening,
}

impl BlinkPhase {
    /// Split a blink's raw progress into its phase and the phase-local
    /// progress in `[0, 1]`.
    pub fn split(raw_progress: f32) -> (BlinkPhase, f32) {
        if raw_progress < 0.5 {
            (BlinkPhase::Closing, (raw_progress * 2.0).max(0.0))
        } else {
            (BlinkPhase::Opening, ((raw_progress - 0.5) * 2.0).min(1.0))
        }
    }
}

/// Horizontal glance offset and its in-flight transition.
#[derive(Debug, Clone, Default)]
pub struct GazeTrack {
    pub(crate) offset_x: f32,
    pub(crate) offset_y: f32,
    pub(crate) is_transitioning: bool,
    pub(crate) start_time: Millis,
    pub(crate) duration_sec: f32,
    pub(crate) start_offset: f32,
    pub(crate) target_offset: f32,
}

impl GazeTrack {
    pub(crate) fn start(&mut self, target: f32, duration_sec: f32, now: Millis) {
        self.is_transitioning = true;
        self.start_time = now;
        self.duration_sec = duration_sec;
        self.start_offset = self.offset_x;
        self.target_offset = target;
    }

    /// Advance the transition to `now`, ending it once progress reaches 1.
    pub(crate) fn advance(&mut self, now: Millis) {
        if !self.is_transitioning {
            return;
        }
        let duration_ms = self.duration_sec * 1000.0;
        let progress = if duration_ms.is_finite() && duration_ms > 0.0 {
            elapsed_ms(now, self.start_time) as f32 / duration_ms
        } else {
            1.0
        };
        if progress >= 1.0 {
            // Land on the target itself; the lerp can round past it.
            self.offset_x = self.target_offset;
            self.is_transitioning = false;
            return;
        }
        let (lo, hi) = if self.start_offset <= self.target_offset {
            (self.start_offset, self.target_offset)
        } else {
            (self.target_offset, self.start_offset)
        };
        self.offset_x = lerp(
            self.start_offset,
            self.target_offset,
            Easing::EaseInOutQuad.apply(progress),
        )
        .clamp(lo, hi);
    }
}
