//! Directors decide *when* and *what* to animate.
//!
//! Each director keeps a little private memory (deadlines, the settled
//! expression, a state machine) and issues commands to the
//! [`AnimationEngine`](crate::AnimationEngine). None of them renders.

mod blink;
mod emotion;
mod gaze;

pub use blink::BlinkDirector;
pub use emotion::EmotionDirector;
pub use gaze::{GazeDirector, GazeState, Side};

use peepers_config::MsRange;

use crate::random::RandomSource;

/// Draw a millisecond duration from an inclusive range.
fn draw_ms(rng: &mut dyn RandomSource, range: MsRange) -> u32 {
    let (low, high) = range.half_open();
    rng.range(low, high)
}
