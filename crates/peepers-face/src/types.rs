use std::fmt;

/// An integer vertex on the display, in pixels. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Point at fraction `t` of the way from `a` to `b`.
    ///
    /// Each coordinate is computed in `f32` and truncated toward zero, so
    /// `t == 0.0` yields `a` and `t == 1.0` yields `b` exactly.
    pub fn lerp(a: Point, b: Point, t: f32) -> Point {
        Point {
            x: lerp(a.x as f32, b.x as f32, t) as i16,
            y: lerp(a.y as f32, b.y as f32, t) as i16,
        }
    }
}

impl From<[i16; 2]> for Point {
    fn from([x, y]: [i16; 2]) -> Self {
        Self { x, y }
    }
}

/// Linear interpolation between two scalars.
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + t * (end - start)
}

/// Fill `out` with the per-vertex blend of `from` and `to` at `t`.
///
/// All three slices must have the same length; the catalog guarantees it.
pub(crate) fn blend_shapes(out: &mut [Point], from: &[Point], to: &[Point], t: f32) {
    debug_assert_eq!(out.len(), from.len());
    debug_assert_eq!(out.len(), to.len());
    for ((dst, &a), &b) in out.iter_mut().zip(from).zip(to) {
        *dst = Point::lerp(a, b, t);
    }
}

/// Stable handle to an entry of an [`EmotionCatalog`](crate::EmotionCatalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmotionId(pub(crate) usize);

impl EmotionId {
    /// Position of the entry in catalog order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EmotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named expression: one outline per eye.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emotion {
    pub name: String,
    pub left_shape: Vec<Point>,
    pub right_shape: Vec<Point>,
}

impl Emotion {
    pub fn new(name: impl Into<String>, left_shape: Vec<Point>, right_shape: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            left_shape,
            right_shape,
        }
    }
}
