use crate::types::Point;

/// Display the engine draws each frame onto.
///
/// A frame is always `clear`, then one `fill_polygon` per eye, then
/// `flush`. How the polygon is filled (triangle fan, scanline, outline
/// only) is the surface's business.
pub trait Surface {
    /// Start a new frame with a blank surface.
    fn clear(&mut self);

    /// Draw one closed polygon, vertices in outline order.
    fn fill_polygon(&mut self, vertices: &[Point]);

    /// Present the frame.
    fn flush(&mut self);
}

/// A [`Surface`] that keeps the polygons of the last presented frame.
///
/// Useful for headless hosts and for asserting on what was drawn.
#[derive(Debug, Default, Clone)]
pub struct FrameRecorder {
    pending: Vec<Vec<Point>>,
    presented: Vec<Vec<Point>>,
    frames: u64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polygons of the most recently flushed frame.
    pub fn last_frame(&self) -> &[Vec<Point>] {
        &self.presented
    }

    /// Number of frames flushed so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Surface for FrameRecorder {
    fn clear(&mut self) {
        self.pending.clear();
    }

    fn fill_polygon(&mut self, vertices: &[Point]) {
        self.pending.push(vertices.to_vec());
    }

    fn flush(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.presented);
        self.pending.clear();
        self.frames += 1;
    }
}
