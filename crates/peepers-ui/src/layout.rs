use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct FaceRects {
    pub top: Rect,
    pub eyes: Rect,
    pub bottom: Rect,
    pub hud: Rect,
    pub logs: Rect,
}

/// Title bar on top, the eyes filling the middle, and a bottom strip split
/// between the HUD and the log panel.
pub fn face_layout(area: Rect, bottom_height: u16, hud_width: u16) -> FaceRects {
    let bottom_height = bottom_height
        .max(3)
        .min(area.height.saturating_sub(2).max(3));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // title bar
            Constraint::Min(1),                // eyes
            Constraint::Length(bottom_height), // hud + logs
        ])
        .split(area);

    let bottom = chunks[2];
    let hud_width = hud_width.min(bottom.width / 2);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(hud_width), Constraint::Min(1)])
        .split(bottom);

    FaceRects {
        top: chunks[0],
        eyes: chunks[1],
        bottom,
        hud: cols[0],
        logs: cols[1],
    }
}
