use anyhow::{Context, Result};
use peepers_config::FaceConfig;
use peepers_core::clock::Millis;

use crate::catalog::EmotionCatalog;
use crate::directors::{BlinkDirector, EmotionDirector, GazeDirector, GazeState, Side};
use crate::engine::AnimationEngine;
use crate::loader;
use crate::random::{RandomSource, SeededRandom};
use crate::surface::Surface;

/// A complete animated face: the engine plus the three directors that
/// drive it, sharing one random source.
///
/// Hosts call [`tick`](Self::tick) at a steady cadence and hand it the
/// surface to draw on.
pub struct Face {
    engine: AnimationEngine,
    emotion: EmotionDirector,
    gaze: GazeDirector,
    blink: BlinkDirector,
    rng: Box<dyn RandomSource>,
}

impl Face {
    /// Build a face over `catalog`. Uses `config.seed` when set, entropy
    /// otherwise.
    pub fn new(catalog: EmotionCatalog, config: &FaceConfig, now: Millis) -> Self {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(SeededRandom::from_entropy()),
        };
        Self::with_random(catalog, config, now, rng)
    }

    /// Build a face drawing from a caller-supplied random source.
    pub fn with_random(
        catalog: EmotionCatalog,
        config: &FaceConfig,
        now: Millis,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let emotion = EmotionDirector::new(&config.emotion, &catalog, now, rng.as_mut());
        let gaze = GazeDirector::new(&config.gaze, now, rng.as_mut());
        let blink = BlinkDirector::new(&config.blink, now, rng.as_mut());
        Self {
            engine: AnimationEngine::new(catalog, config),
            emotion,
            gaze,
            blink,
            rng,
        }
    }

    /// Build a face over the embedded default catalog.
    pub fn load_default(config: &FaceConfig, now: Millis) -> Result<Self> {
        let catalog = loader::load_default().context("failed to load default emotion catalog")?;
        Ok(Self::new(catalog, config, now))
    }

    /// One host-loop iteration: directors decide, then the engine
    /// animates and draws.
    pub fn tick<S: Surface + ?Sized>(&mut self, now: Millis, surface: &mut S) {
        self.emotion.update(&mut self.engine, now, self.rng.as_mut());
        self.gaze.update(&mut self.engine, now, self.rng.as_mut());
        if self.blink.update(now, self.rng.as_mut()) {
            self.engine.start_blink(now);
        }
        self.engine.update(now, surface);
    }

    /// Blink immediately, outside the director's schedule.
    pub fn blink_now(&mut self, now: Millis) -> bool {
        self.engine.start_blink(now)
    }

    /// Glance to `side` immediately if the gaze is at rest.
    pub fn glance(&mut self, side: Side, now: Millis) -> bool {
        self.gaze.glance(&mut self.engine, side, now)
    }

    /// Shift both eyes vertically; negative looks up. Held until changed.
    pub fn look_vertical(&mut self, offset_y: f32) {
        self.engine.set_vertical_gaze(offset_y);
    }

    /// Morph to the named expression. The emotion director takes over
    /// again after the usual dwell.
    ///
    /// Errors on an unknown name; returns `false` while the engine is busy
    /// with another morph or a blink.
    pub fn show_emotion(&mut self, name: &str, now: Millis) -> Result<bool> {
        let target = self
            .engine
            .catalog()
            .find(name)
            .with_context(|| format!("unknown emotion \"{name}\""))?;
        Ok(self
            .emotion
            .transition_to(&mut self.engine, target, now, self.rng.as_mut()))
    }

    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    /// Name of the expression the face is showing or morphing towards.
    pub fn emotion(&self) -> &str {
        self.engine.catalog().name(self.emotion.current())
    }

    pub fn gaze_state(&self) -> GazeState {
        self.gaze.state()
    }

    /// Milliseconds until the next scheduled blink.
    pub fn next_blink_in(&self, now: Millis) -> u32 {
        self.blink.remaining_ms(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FrameRecorder;
    use crate::testing::{square_catalog, ScriptedRandom};

    fn seeded_config(seed: u64) -> FaceConfig {
        FaceConfig {
            seed: Some(seed),
            ..FaceConfig::default()
        }
    }

    #[test]
    fn load_default_starts_neutral() {
        let face = Face::load_default(&seeded_config(1), 0).unwrap();
        assert_eq!(face.emotion(), "neutral");
        assert_eq!(face.gaze_state(), GazeState::Idle);
        assert!(!face.engine().is_busy());
    }

    #[test]
    fn every_tick_draws_one_frame() {
        let mut face = Face::load_default(&seeded_config(2), 0).unwrap();
        let mut surface = FrameRecorder::new();
        for now in (0..3_000).step_by(30) {
            face.tick(now, &mut surface);
            assert_eq!(surface.last_frame().len(), 2);
        }
        assert_eq!(surface.frame_count(), 100);
    }

    #[test]
    fn scheduled_blink_fires() {
        // emotion dwell 8000, gaze idle 8000, blink after 2000
        let rng = ScriptedRandom::new([8_000, 8_000, 2_000]);
        let mut face = Face::with_random(square_catalog(true), &FaceConfig::default(), 0, Box::new(rng));
        let mut surface = FrameRecorder::new();

        face.tick(2_000, &mut surface);
        assert!(face.engine().blink_phase(2_000).is_none());
        face.tick(2_030, &mut surface);
        assert!(face.engine().blink_phase(2_030).is_some());
        assert_eq!(face.next_blink_in(2_030), 2_000);
    }

    #[test]
    fn show_emotion_by_name() {
        let mut face = Face::load_default(&seeded_config(3), 0).unwrap();
        assert!(face.show_emotion("surprise", 10).unwrap());
        assert_eq!(face.emotion(), "surprise");
        assert!(face.engine().is_busy());
        assert!(!face.show_emotion("sad", 20).unwrap());
        assert_eq!(face.emotion(), "surprise");
    }

    #[test]
    fn show_emotion_waits_for_a_blink() {
        let mut face = Face::load_default(&seeded_config(6), 0).unwrap();
        let mut surface = FrameRecorder::new();
        assert!(face.blink_now(0));
        assert!(!face.show_emotion("happy", 10).unwrap());
        assert_eq!(face.emotion(), "neutral");

        face.tick(250, &mut surface);
        let neutral = face.engine().catalog().get(face.engine().catalog().neutral()).clone();
        assert_eq!(face.engine().current_left(), neutral.left_shape.as_slice());
        assert!(face.show_emotion("happy", 260).unwrap());
    }

    #[test]
    fn show_unknown_emotion_fails() {
        let mut face = Face::load_default(&seeded_config(4), 0).unwrap();
        let err = face.show_emotion("smug", 10).unwrap_err();
        assert!(err.to_string().contains("smug"));
    }

    #[test]
    fn manual_glance_moves_the_gaze() {
        let mut face = Face::load_default(&seeded_config(5), 0).unwrap();
        let mut surface = FrameRecorder::new();
        assert!(face.glance(Side::Left, 10));
        face.tick(300, &mut surface);
        assert!(face.engine().gaze_offset() < 0.0);
    }

    #[test]
    fn look_vertical_shifts_the_drawn_eyes() {
        let mut face = Face::load_default(&seeded_config(7), 0).unwrap();
        let mut surface = FrameRecorder::new();
        face.look_vertical(-4.0);
        face.tick(30, &mut surface);
        let engine = face.engine();
        for (drawn, shape) in engine.rendered_left().iter().zip(engine.current_left()) {
            assert_eq!(drawn.y, shape.y - 4);
        }
        assert_eq!(surface.last_frame()[0], engine.rendered_left());
    }

    #[test]
    fn same_seed_same_performance() {
        let run = |seed| {
            let mut face = Face::load_default(&seeded_config(seed), 0).unwrap();
            let mut surface = FrameRecorder::new();
            let mut names = Vec::new();
            for now in (0..60_000).step_by(30) {
                face.tick(now, &mut surface);
                names.push(face.emotion().to_string());
            }
            (names, surface.last_frame().to_vec())
        };
        assert_eq!(run(9), run(9));
    }
}
