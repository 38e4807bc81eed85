//! Animated robot eyes: an emotion catalog, the animation engine that
//! morphs between its shapes, and the directors that decide what to show.
//!
//! Everything here is poll-based. Hosts pass a millisecond timestamp into
//! every call and nothing sleeps or spawns threads.
//!
//! # Quick start
//!
//! ```no_run
//! use peepers_config::FaceConfig;
//! use peepers_face::{Face, FrameRecorder};
//!
//! let mut face = Face::load_default(&FaceConfig::default(), 0).unwrap();
//! let mut surface = FrameRecorder::new();
//! for now in (0..10_000).step_by(30) {
//!     face.tick(now, &mut surface);
//! }
//! let _eyes = surface.last_frame();
//! ```

mod catalog;
pub mod directors;
mod easing;
mod engine;
mod face;
pub mod loader;
mod random;
mod surface;
mod track;
mod types;

#[cfg(test)]
mod testing;

pub use catalog::{EmotionCatalog, BLINK, NEUTRAL};
pub use directors::{GazeState, Side};
pub use easing::Easing;
pub use engine::{AnimationEngine, EmotionTransition};
pub use face::Face;
pub use random::{RandomSource, SeededRandom};
pub use surface::{FrameRecorder, Surface};
pub use track::{BlinkPhase, Track, TrackStatus};
pub use types::{lerp, Emotion, EmotionId, Point};
