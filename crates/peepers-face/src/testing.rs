//! Shared fixtures for unit tests.

use std::collections::VecDeque;

use peepers_config::FaceConfig;

use crate::catalog::EmotionCatalog;
use crate::engine::AnimationEngine;
use crate::random::RandomSource;
use crate::types::{Emotion, Point};

fn square(x0: i16, y0: i16, size: i16) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x0 + size, y0),
        Point::new(x0 + size, y0 + size),
        Point::new(x0, y0 + size),
    ]
}

/// A four-vertex emotion: two 20px squares shifted by `(dx, dy)`.
pub(crate) fn emotion(name: &str, dx: i16, dy: i16) -> Emotion {
    Emotion::new(name, square(10 + dx, 10 + dy, 20), square(50 + dx, 10 + dy, 20))
}

/// `neutral`, `happy`, and optionally a flat `blink`.
pub(crate) fn square_catalog(with_blink: bool) -> EmotionCatalog {
    let mut entries = vec![emotion("neutral", 0, 0), emotion("happy", 6, -8)];
    if with_blink {
        let flat = |x0: i16| {
            vec![
                Point::new(x0, 19),
                Point::new(x0 + 20, 19),
                Point::new(x0 + 20, 21),
                Point::new(x0, 21),
            ]
        };
        entries.push(Emotion::new("blink", flat(10), flat(50)));
    }
    EmotionCatalog::new(entries).expect("fixture catalog is valid")
}

pub(crate) fn test_engine(with_blink: bool) -> AnimationEngine {
    AnimationEngine::new(square_catalog(with_blink), &FaceConfig::default())
}

/// [`RandomSource`] replaying a fixed script.
///
/// Each draw pops the next scripted value and clamps it into the requested
/// range; once the script runs dry every draw returns the range's low end.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRandom {
    script: VecDeque<u32>,
}

impl ScriptedRandom {
    pub(crate) fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }

    pub(crate) fn push(&mut self, values: impl IntoIterator<Item = u32>) {
        self.script.extend(values);
    }
}

impl RandomSource for ScriptedRandom {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.script
            .pop_front()
            .map_or(low, |v| v.clamp(low, high - 1))
    }
}
