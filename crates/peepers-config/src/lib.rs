//! Configuration schema and loader for peepers.
//!
//! Owns the tunable constants of the face: blink cadence, emotion dwell
//! times and probabilities, glance timings, and render geometry. Every
//! section defaults to the values the robot ships with, so an empty file is
//! a valid configuration.

pub mod face;

pub use face::{BlinkConfig, EmotionConfig, FaceConfig, GazeConfig, MsRange, RenderConfig};
