use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line},
        Block, Borders, Widget,
    },
};

use crate::surface::{Segment, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Draws the eye outlines on a braille canvas scaled to the virtual
/// 128×64 display.
pub struct EyesWidget<'a> {
    segments: &'a [Segment],
    color: Color,
    title: &'a str,
}

impl<'a> EyesWidget<'a> {
    pub fn new(segments: &'a [Segment]) -> Self {
        Self {
            segments,
            color: Color::Cyan,
            title: "EYES",
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

impl Widget for EyesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let color = self.color;
        Canvas::default()
            .block(Block::default().borders(Borders::ALL).title(self.title))
            .marker(Marker::Braille)
            .x_bounds([0.0, DISPLAY_WIDTH])
            .y_bounds([0.0, DISPLAY_HEIGHT])
            .paint(|ctx| {
                for s in self.segments {
                    ctx.draw(&Line::new(s.x1, s.y1, s.x2, s.y2, color));
                }
            })
            .render(area, buf);
    }
}
