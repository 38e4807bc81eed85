use peepers_config::FaceConfig;
use peepers_core::clock::Millis;

use crate::catalog::EmotionCatalog;
use crate::easing::Easing;
use crate::surface::Surface;
use crate::track::{BlinkPhase, GazeTrack, Track, TrackStatus};
use crate::types::{blend_shapes, EmotionId, Point};

/// Parameters of an emotion morph requested through
/// [`AnimationEngine::change_emotion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionTransition {
    pub start: EmotionId,
    pub target: EmotionId,
    pub duration_sec: f32,
    /// Scales the eased progress; `1.0` reaches the target shape fully.
    pub intensity: f32,
    pub easing: Easing,
    /// How long the caller intends to hold `target` afterwards.
    pub dwell_ms: u32,
}

/// Geometry and timing the engine needs from [`FaceConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct EngineSettings {
    blink_duration_sec: f32,
    max_gaze_offset: f32,
    perspective_scale: f32,
}

impl From<&FaceConfig> for EngineSettings {
    fn from(config: &FaceConfig) -> Self {
        Self {
            blink_duration_sec: config.blink.duration_sec,
            max_gaze_offset: config.render.max_gaze_offset,
            perspective_scale: config.render.perspective_scale,
        }
    }
}

/// Owns the rendered eye shapes and advances the emotion, blink, and gaze
/// tracks every tick.
///
/// The engine only knows *how* to animate. Deciding what to play and when
/// is left to the directors, which talk to it through
/// [`change_emotion`](Self::change_emotion),
/// [`start_blink`](Self::start_blink) and
/// [`start_gaze_transition`](Self::start_gaze_transition), and read
/// [`is_busy`](Self::is_busy) before issuing anything. Commands that arrive
/// while the relevant track is active are dropped, never queued.
pub struct AnimationEngine {
    catalog: EmotionCatalog,
    settings: EngineSettings,
    emotion: Track,
    blink: Track,
    gaze: GazeTrack,
    left_eye: Vec<Point>,
    right_eye: Vec<Point>,
    rendered_left: Vec<Point>,
    rendered_right: Vec<Point>,
}

impl AnimationEngine {
    /// Build an engine over `catalog` and [`initialize`](Self::initialize) it.
    pub fn new(catalog: EmotionCatalog, config: &FaceConfig) -> Self {
        let neutral = catalog.neutral();
        let n = catalog.vertex_count();
        let mut engine = Self {
            catalog,
            settings: EngineSettings::from(config),
            emotion: Track::idle(neutral),
            blink: Track::idle(neutral),
            gaze: GazeTrack::default(),
            left_eye: vec![Point::default(); n],
            right_eye: vec![Point::default(); n],
            rendered_left: vec![Point::default(); n],
            rendered_right: vec![Point::default(); n],
        };
        engine.initialize();
        engine
    }

    /// Reset in place: neutral shapes, idle tracks, gaze centred.
    ///
    /// The emotion track rests on neutral so the next transition has a
    /// defined starting shape.
    pub fn initialize(&mut self) {
        let neutral = self.catalog.neutral();
        let shape = self.catalog.get(neutral);
        self.left_eye.copy_from_slice(&shape.left_shape);
        self.right_eye.copy_from_slice(&shape.right_shape);
        self.rendered_left.copy_from_slice(&shape.left_shape);
        self.rendered_right.copy_from_slice(&shape.right_shape);
        self.emotion = Track::idle(neutral);
        self.blink = Track::idle(neutral);
        self.gaze = GazeTrack::default();
    }

    /// `true` while the emotion track (playing or paused) or the blink
    /// track is active.
    pub fn is_busy(&self) -> bool {
        self.emotion.is_playing() || self.blink.is_playing()
    }

    /// Start morphing between two expressions.
    ///
    /// Only accepted while the emotion track is idle; returns whether the
    /// command was taken.
    pub fn change_emotion(&mut self, transition: EmotionTransition, now: Millis) -> bool {
        if self.emotion.is_playing() {
            tracing::trace!(
                target_emotion = self.catalog.name(transition.target),
                "emotion change dropped, track busy"
            );
            return false;
        }

        self.emotion = Track {
            status: TrackStatus::Playing,
            start_time: now,
            duration_sec: transition.duration_sec,
            start_state: transition.start,
            end_state: transition.target,
            intensity: transition.intensity,
            easing: transition.easing,
            dwell_ms: transition.dwell_ms,
        };
        tracing::debug!(
            from = self.catalog.name(transition.start),
            to = self.catalog.name(transition.target),
            duration_sec = transition.duration_sec,
            "emotion track started"
        );
        true
    }

    /// Close and reopen the eyes once.
    ///
    /// Ignored while a blink is in flight or when the catalog has no
    /// `"blink"` shape. A running emotion morph is paused and resumes from
    /// the same point when the blink ends.
    pub fn start_blink(&mut self, now: Millis) -> bool {
        if self.blink.is_playing() {
            tracing::trace!("blink dropped, already blinking");
            return false;
        }
        let Some(closed) = self.catalog.blink() else {
            return false;
        };

        self.emotion.pause(now);

        self.blink = Track {
            status: TrackStatus::Playing,
            start_time: now,
            duration_sec: self.settings.blink_duration_sec,
            start_state: self.emotion.end_state,
            end_state: closed,
            intensity: 1.0,
            easing: Easing::EaseInOutQuad,
            dwell_ms: 0,
        };
        tracing::trace!(paused_emotion = self.emotion.is_paused(), "blink started");
        true
    }

    /// Slide the gaze to `target_offset_x` over `duration_sec`.
    ///
    /// Ignored while another gaze transition is running. The target is
    /// clamped to the configured maximum offset.
    pub fn start_gaze_transition(&mut self, target_offset_x: f32, duration_sec: f32, now: Millis) -> bool {
        if self.gaze.is_transitioning {
            tracing::trace!(target_offset_x, "gaze transition dropped, already moving");
            return false;
        }
        let max = self.settings.max_gaze_offset;
        let target = if target_offset_x.is_nan() {
            0.0
        } else {
            target_offset_x.clamp(-max, max)
        };
        self.gaze.start(target, duration_sec, now);
        true
    }

    /// Set the vertical gaze offset applied on top of the shapes, clamped
    /// to the same bound as the horizontal offset. Negative looks up.
    pub fn set_vertical_gaze(&mut self, offset_y: f32) {
        let max = self.settings.max_gaze_offset;
        self.gaze.offset_y = if offset_y.is_nan() {
            0.0
        } else {
            offset_y.clamp(-max, max)
        };
    }

    /// Advance every track to `now` and draw the frame onto `surface`.
    ///
    /// Call once per tick. Blink has priority over the emotion morph; when
    /// neither is active the last computed shapes are redrawn unchanged.
    pub fn update<S: Surface + ?Sized>(&mut self, now: Millis, surface: &mut S) {
        self.gaze.advance(now);

        if self.blink.is_playing() {
            self.advance_blink(now);
        } else if self.emotion.status == TrackStatus::Playing {
            self.advance_emotion(now);
        }

        self.apply_gaze_transform();

        surface.clear();
        surface.fill_polygon(&self.rendered_left);
        surface.fill_polygon(&self.rendered_right);
        surface.flush();
    }

    fn advance_blink(&mut self, now: Millis) {
        let raw = self.blink.raw_progress(now);
        let (phase, local) = BlinkPhase::split(raw);
        let t = self.blink.easing.apply(local);
        let (from, to) = match phase {
            BlinkPhase::Closing => (self.blink.start_state, self.blink.end_state),
            BlinkPhase::Opening => (self.blink.end_state, self.blink.start_state),
        };
        self.blend(from, to, t);

        if raw >= 1.0 {
            self.blink.status = TrackStatus::Idle;
            if self.emotion.is_paused() {
                self.emotion.resume(now);
                tracing::trace!("emotion track resumed after blink");
            }
        }
    }

    fn advance_emotion(&mut self, now: Millis) {
        let mut raw = self.emotion.raw_progress(now);
        if raw >= 1.0 {
            raw = 1.0;
            self.emotion.status = TrackStatus::Idle;
            tracing::debug!(
                emotion = self.catalog.name(self.emotion.end_state),
                "emotion track finished"
            );
        }
        let t = self.emotion.easing.apply(raw) * self.emotion.intensity;
        self.blend(self.emotion.start_state, self.emotion.end_state, t);
    }

    fn blend(&mut self, from: EmotionId, to: EmotionId, t: f32) {
        let from = self.catalog.get(from);
        let to = self.catalog.get(to);
        blend_shapes(&mut self.left_eye, &from.left_shape, &to.left_shape, t);
        blend_shapes(&mut self.right_eye, &from.right_shape, &to.right_shape, t);
    }

    /// Perspective-scale each eye about its centroid, then shift both by
    /// the gaze offset. Looking right shrinks the left eye and grows the
    /// right one.
    fn apply_gaze_transform(&mut self) {
        let gx = self.gaze.offset_x;
        let gy = self.gaze.offset_y;
        let lean = (gx / self.settings.max_gaze_offset) * self.settings.perspective_scale;

        transform_eye(&mut self.rendered_left, &self.left_eye, 1.0 - lean, gx, gy);
        transform_eye(&mut self.rendered_right, &self.right_eye, 1.0 + lean, gx, gy);
    }

    pub fn catalog(&self) -> &EmotionCatalog {
        &self.catalog
    }

    /// Left eye outline before the gaze transform.
    pub fn current_left(&self) -> &[Point] {
        &self.left_eye
    }

    /// Right eye outline before the gaze transform.
    pub fn current_right(&self) -> &[Point] {
        &self.right_eye
    }

    /// Left eye outline as last drawn.
    pub fn rendered_left(&self) -> &[Point] {
        &self.rendered_left
    }

    /// Right eye outline as last drawn.
    pub fn rendered_right(&self) -> &[Point] {
        &self.rendered_right
    }

    pub fn gaze_offset(&self) -> f32 {
        self.gaze.offset_x
    }

    pub fn vertical_gaze(&self) -> f32 {
        self.gaze.offset_y
    }

    pub fn is_gaze_transitioning(&self) -> bool {
        self.gaze.is_transitioning
    }

    /// Largest horizontal gaze offset, in either direction.
    pub fn max_gaze_offset(&self) -> f32 {
        self.settings.max_gaze_offset
    }

    pub fn emotion_track(&self) -> &Track {
        &self.emotion
    }

    /// Dwell time recorded with the latest accepted emotion change.
    pub fn emotion_dwell_ms(&self) -> u32 {
        self.emotion.dwell_ms
    }

    /// Phase of the running blink at `now`, if any.
    pub fn blink_phase(&self, now: Millis) -> Option<BlinkPhase> {
        self.blink
            .is_playing()
            .then(|| BlinkPhase::split(self.blink.raw_progress(now)).0)
    }
}

/// Scale `shape` by `scale` about its integer centroid and translate it by
/// `(dx, dy)` into `out`.
fn transform_eye(out: &mut [Point], shape: &[Point], scale: f32, dx: f32, dy: f32) {
    let (cx, cy) = centroid(shape);
    for (dst, p) in out.iter_mut().zip(shape) {
        let x = (p.x as f32 - cx as f32) * scale + cx as f32 + dx;
        let y = (p.y as f32 - cy as f32) * scale + cy as f32 + dy;
        *dst = Point::new(x as i16, y as i16);
    }
}

fn centroid(shape: &[Point]) -> (i32, i32) {
    if shape.is_empty() {
        return (0, 0);
    }
    let n = shape.len() as i32;
    let (sx, sy) = shape
        .iter()
        .fold((0i32, 0i32), |(sx, sy), p| (sx + p.x as i32, sy + p.y as i32));
    (sx / n, sy / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{square_catalog, test_engine};
    use crate::surface::FrameRecorder;
    use proptest::prelude::*;

    fn expected_blend(engine: &AnimationEngine, from: &str, to: &str, t: f32) -> (Vec<Point>, Vec<Point>) {
        let catalog = engine.catalog();
        let a = catalog.get(catalog.find(from).unwrap());
        let b = catalog.get(catalog.find(to).unwrap());
        let mut left = vec![Point::default(); catalog.vertex_count()];
        let mut right = left.clone();
        blend_shapes(&mut left, &a.left_shape, &b.left_shape, t);
        blend_shapes(&mut right, &a.right_shape, &b.right_shape, t);
        (left, right)
    }

    fn to_happy(engine: &AnimationEngine, duration_sec: f32) -> EmotionTransition {
        let catalog = engine.catalog();
        EmotionTransition {
            start: catalog.neutral(),
            target: catalog.find("happy").unwrap(),
            duration_sec,
            intensity: 1.0,
            easing: Easing::EaseInOutQuad,
            dwell_ms: 3_000,
        }
    }

    #[test]
    fn initialize_shows_neutral() {
        let engine = test_engine(true);
        let neutral = engine.catalog().get(engine.catalog().neutral());
        assert_eq!(engine.current_left(), neutral.left_shape.as_slice());
        assert_eq!(engine.current_right(), neutral.right_shape.as_slice());
        assert_eq!(engine.emotion_track().end_state(), engine.catalog().neutral());
        assert!(!engine.is_busy());
    }

    #[test]
    fn neutral_to_happy_scenario() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        let t0 = 10_000;
        assert!(engine.change_emotion(to_happy(&engine, 0.5), t0));
        assert!(engine.is_busy());
        assert_eq!(engine.emotion_dwell_ms(), 3_000);

        engine.update(t0 + 250, &mut surface);
        let (left, right) = expected_blend(&engine, "neutral", "happy", 0.5);
        assert_eq!(engine.current_left(), left.as_slice());
        assert_eq!(engine.current_right(), right.as_slice());
        assert!(engine.is_busy());

        engine.update(t0 + 500, &mut surface);
        let happy = engine.catalog().get(engine.catalog().find("happy").unwrap());
        assert_eq!(engine.current_left(), happy.left_shape.as_slice());
        assert_eq!(engine.current_right(), happy.right_shape.as_slice());
        assert!(!engine.is_busy());
    }

    #[test]
    fn busy_until_progress_reaches_one() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        engine.change_emotion(to_happy(&engine, 0.4), 0);
        for now in (0..400).step_by(10) {
            engine.update(now, &mut surface);
            assert!(engine.is_busy(), "idle too early at {now}");
        }
        engine.update(400, &mut surface);
        assert!(!engine.is_busy());
    }

    #[test]
    fn change_emotion_is_dropped_while_playing() {
        let mut engine = test_engine(true);
        let first = to_happy(&engine, 1.0);
        assert!(engine.change_emotion(first, 0));

        let mut second = first;
        second.target = engine.catalog().find("blink").unwrap();
        second.dwell_ms = 1;
        assert!(!engine.change_emotion(second, 10));
        assert_eq!(engine.emotion_track().end_state(), first.target);
        assert_eq!(engine.emotion_dwell_ms(), 3_000);
    }

    #[test]
    fn intensity_scales_the_final_shape() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        let mut half = to_happy(&engine, 0.2);
        half.intensity = 0.5;
        half.easing = Easing::Linear;
        engine.change_emotion(half, 0);
        engine.update(200, &mut surface);

        let (left, _) = expected_blend(&engine, "neutral", "happy", 0.5);
        assert_eq!(engine.current_left(), left.as_slice());
        assert!(!engine.is_busy());
    }

    #[test]
    fn idle_engine_holds_last_frame() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        let mut partial = to_happy(&engine, 0.2);
        partial.intensity = 0.5;
        engine.change_emotion(partial, 0);
        engine.update(300, &mut surface);
        let held = engine.current_left().to_vec();

        engine.update(5_000, &mut surface);
        assert_eq!(engine.current_left(), held.as_slice());
        assert_ne!(held, engine.catalog().get(engine.catalog().neutral()).left_shape);
    }

    #[test]
    fn blink_without_catalog_entry_is_a_no_op() {
        let mut engine = test_engine(false);
        let mut surface = FrameRecorder::new();
        let before = engine.current_left().to_vec();

        assert!(!engine.start_blink(0));
        assert!(!engine.is_busy());
        engine.update(100, &mut surface);
        assert_eq!(engine.current_left(), before.as_slice());
        assert!(!engine.is_busy());
    }

    #[test]
    fn blink_closes_then_reopens() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        let catalog = engine.catalog().clone();
        let neutral = catalog.get(catalog.neutral());
        let closed = catalog.get(catalog.blink().unwrap());

        assert!(engine.start_blink(0));
        assert!(engine.is_busy());
        assert!(!engine.start_blink(10));

        engine.update(125, &mut surface);
        assert_eq!(engine.blink_phase(125), Some(BlinkPhase::Opening));
        assert_eq!(engine.current_left(), closed.left_shape.as_slice());

        assert_eq!(engine.blink_phase(60), Some(BlinkPhase::Closing));

        engine.update(250, &mut surface);
        assert_eq!(engine.current_left(), neutral.left_shape.as_slice());
        assert_eq!(engine.current_right(), neutral.right_shape.as_slice());
        assert!(!engine.is_busy());
        assert_eq!(engine.blink_phase(250), None);
    }

    #[test]
    fn blink_overshoot_lands_on_the_open_shape() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        engine.start_blink(0);
        engine.update(290, &mut surface);
        let neutral = engine.catalog().get(engine.catalog().neutral());
        assert_eq!(engine.current_left(), neutral.left_shape.as_slice());
    }

    #[test]
    fn blink_preempts_and_resumes_emotion() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        engine.change_emotion(to_happy(&engine, 1.0), 0);
        engine.update(400, &mut surface);

        assert!(engine.start_blink(400));
        assert!(engine.emotion_track().is_paused());
        for now in [450, 500, 550, 600] {
            engine.update(now, &mut surface);
            assert!(engine.emotion_track().is_paused());
        }
        engine.update(650, &mut surface);
        assert!(!engine.emotion_track().is_paused());
        assert!(engine.is_busy());

        let resumed = engine.emotion_track().raw_progress(650);
        assert!((resumed - 0.4).abs() <= 0.01, "resumed at {resumed}");

        engine.update(1_250, &mut surface);
        assert!(!engine.is_busy());
        let happy = engine.catalog().get(engine.catalog().find("happy").unwrap());
        assert_eq!(engine.current_left(), happy.left_shape.as_slice());
    }

    #[test]
    fn blink_starts_from_the_emotion_target() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        engine.change_emotion(to_happy(&engine, 0.1), 0);
        engine.update(100, &mut surface);
        engine.start_blink(200);
        assert_eq!(engine.blink.start_state, engine.catalog().find("happy").unwrap());

        engine.update(450, &mut surface);
        let happy = engine.catalog().get(engine.catalog().find("happy").unwrap());
        assert_eq!(engine.current_left(), happy.left_shape.as_slice());
    }

    #[test]
    fn gaze_transition_moves_and_clamps() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        assert!(engine.start_gaze_transition(50.0, 0.25, 0));
        assert!(engine.is_gaze_transitioning());
        assert!(!engine.start_gaze_transition(-5.0, 0.25, 10));

        engine.update(300, &mut surface);
        assert_eq!(engine.gaze_offset(), 10.0);
        assert!(!engine.is_gaze_transitioning());
        assert!(!engine.is_busy());
    }

    #[test]
    fn gaze_shifts_and_scales_the_rendered_eyes() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        engine.start_gaze_transition(10.0, 0.1, 0);
        engine.update(100, &mut surface);

        let width = |shape: &[Point]| {
            let xs = shape.iter().map(|p| p.x);
            xs.clone().max().unwrap() - xs.min().unwrap()
        };
        let base = width(engine.current_left());
        assert!(width(engine.rendered_left()) < base);
        assert!(width(engine.rendered_right()) > base);

        let frame = surface.last_frame();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame[0], engine.rendered_left());
        assert_eq!(frame[1], engine.rendered_right());

        let shift = centroid(engine.rendered_left()).0 - centroid(engine.current_left()).0;
        assert!((9..=10).contains(&shift), "shift was {shift}");
    }

    #[test]
    fn centred_gaze_renders_shapes_unchanged() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        engine.update(0, &mut surface);
        assert_eq!(engine.rendered_left(), engine.current_left());
        assert_eq!(engine.rendered_right(), engine.current_right());
        assert_eq!(surface.frame_count(), 1);
    }

    #[test]
    fn vertical_gaze_offsets_both_eyes() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        engine.set_vertical_gaze(3.0);
        engine.update(0, &mut surface);
        for (r, c) in engine.rendered_left().iter().zip(engine.current_left()) {
            assert_eq!(r.y, c.y + 3);
        }
    }

    #[test]
    fn vertical_gaze_is_bounded() {
        let mut engine = test_engine(true);
        engine.set_vertical_gaze(-25.0);
        assert_eq!(engine.vertical_gaze(), -10.0);
        engine.set_vertical_gaze(f32::NAN);
        assert_eq!(engine.vertical_gaze(), 0.0);
    }

    #[test]
    fn gaze_reversal_stops_exactly_at_the_bound() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        engine.start_gaze_transition(-9.7, 0.1, 0);
        engine.update(200, &mut surface);
        engine.start_gaze_transition(10.0, 0.1, 200);
        engine.update(400, &mut surface);
        assert_eq!(engine.gaze_offset(), 10.0);
    }

    #[test]
    fn nan_duration_does_not_stall_the_engine() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        let mut nan = to_happy(&engine, f32::NAN);
        nan.easing = Easing::Linear;
        assert!(engine.change_emotion(nan, 0));
        engine.update(30, &mut surface);
        assert!(!engine.is_busy());
        let happy = engine.catalog().get(engine.catalog().find("happy").unwrap());
        assert_eq!(engine.current_left(), happy.left_shape.as_slice());
    }

    #[test]
    fn animation_survives_clock_wrap() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        let t0 = u32::MAX - 199;
        engine.change_emotion(to_happy(&engine, 0.5), t0);

        engine.update(t0.wrapping_add(250), &mut surface);
        let (left, _) = expected_blend(&engine, "neutral", "happy", 0.5);
        assert_eq!(engine.current_left(), left.as_slice());
        assert!(engine.is_busy());

        engine.update(t0.wrapping_add(500), &mut surface);
        assert!(!engine.is_busy());
    }

    #[test]
    fn initialize_resets_in_place() {
        let mut engine = test_engine(true);
        let mut surface = FrameRecorder::new();
        engine.change_emotion(to_happy(&engine, 1.0), 0);
        engine.start_gaze_transition(-10.0, 0.1, 0);
        engine.update(500, &mut surface);

        engine.initialize();
        assert!(!engine.is_busy());
        assert!(!engine.is_gaze_transitioning());
        assert_eq!(engine.gaze_offset(), 0.0);
        let neutral = engine.catalog().get(engine.catalog().neutral());
        assert_eq!(engine.current_left(), neutral.left_shape.as_slice());
    }

    #[test]
    fn centroid_uses_integer_mean() {
        let shape = [Point::new(0, 0), Point::new(3, 0), Point::new(3, 3), Point::new(0, 4)];
        assert_eq!(centroid(&shape), (1, 1));
        assert_eq!(centroid(&[]), (0, 0));
    }

    #[test]
    fn shape_buffers_match_vertex_count() {
        let catalog = square_catalog(true);
        let engine = AnimationEngine::new(catalog, &FaceConfig::default());
        assert_eq!(engine.current_left().len(), 4);
    }

    proptest! {
        #[test]
        fn gaze_never_exceeds_max_offset(
            commands in proptest::collection::vec((-40.0f32..40.0, 0.0f32..0.5, 0u32..300), 1..30)
        ) {
            let mut engine = test_engine(true);
            let mut surface = FrameRecorder::new();
            let mut now = 0u32;
            for (target, duration, step) in commands {
                engine.start_gaze_transition(target, duration, now);
                for _ in 0..4 {
                    now += step / 4 + 1;
                    engine.update(now, &mut surface);
                    prop_assert!(engine.gaze_offset().abs() <= 10.0);
                }
            }
        }
    }
}
