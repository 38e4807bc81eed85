/// Timing curve applied to a track's normalised progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Accelerate through the first half, decelerate through the second.
    EaseInOutQuad,
}

impl Easing {
    /// Map progress `t` in `[0, 1]` onto the curve.
    ///
    /// Both curves fix `0` and `1`. Inputs outside the unit interval are
    /// not clamped.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}
