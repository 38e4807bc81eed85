use peepers_face::{Point, Surface};

/// Pixel size of the virtual eye display.
pub const DISPLAY_WIDTH: f64 = 128.0;
pub const DISPLAY_HEIGHT: f64 = 64.0;

/// One outline edge in canvas coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// [`Surface`] that turns each polygon into closed outline edges for a
/// terminal canvas.
///
/// Display coordinates grow downwards while the canvas grows upwards, so
/// `y` is flipped on the way in. Edges collected between `clear` and
/// `flush` only become visible once the frame is flushed.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    pending: Vec<Segment>,
    segments: Vec<Segment>,
    frames: u64,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges of the last flushed frame.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    fn to_canvas(p: Point) -> (f64, f64) {
        (p.x as f64, DISPLAY_HEIGHT - p.y as f64)
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self) {
        self.pending.clear();
    }

    fn fill_polygon(&mut self, vertices: &[Point]) {
        let Some(&last) = vertices.last() else {
            return;
        };
        let mut prev = Self::to_canvas(last);
        for &p in vertices {
            let next = Self::to_canvas(p);
            self.pending.push(Segment {
                x1: prev.0,
                y1: prev.1,
                x2: next.0,
                y2: next.1,
            });
            prev = next;
        }
    }

    fn flush(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.segments);
        self.pending.clear();
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> [Point; 3] {
        [Point::new(0, 0), Point::new(10, 0), Point::new(5, 8)]
    }

    #[test]
    fn polygon_becomes_closed_outline() {
        let mut surface = TerminalSurface::new();
        surface.clear();
        surface.fill_polygon(&triangle());
        surface.flush();

        let segs = surface.segments();
        assert_eq!(segs.len(), 3);
        // closing edge first: last vertex back to the first
        assert_eq!((segs[0].x1, segs[0].y1), (5.0, 56.0));
        assert_eq!((segs[0].x2, segs[0].y2), (0.0, 64.0));
        assert_eq!((segs[2].x2, segs[2].y2), (5.0, 56.0));
    }

    #[test]
    fn nothing_visible_before_flush() {
        let mut surface = TerminalSurface::new();
        surface.clear();
        surface.fill_polygon(&triangle());
        assert!(surface.segments().is_empty());
        assert_eq!(surface.frame_count(), 0);
    }

    #[test]
    fn clear_drops_the_previous_frame() {
        let mut surface = TerminalSurface::new();
        surface.fill_polygon(&triangle());
        surface.flush();
        surface.clear();
        surface.flush();
        assert!(surface.segments().is_empty());
        assert_eq!(surface.frame_count(), 2);
    }

    #[test]
    fn empty_polygon_is_ignored() {
        let mut surface = TerminalSurface::new();
        surface.fill_polygon(&[]);
        surface.flush();
        assert!(surface.segments().is_empty());
    }
}
