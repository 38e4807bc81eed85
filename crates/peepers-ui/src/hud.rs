use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use peepers_core::logging::{LogBuffer, LogEntry, LogLevel};

/// Snapshot of the face state shown in the HUD.
pub struct HudView<'a> {
    pub emotion: &'a str,
    pub gaze: String,
    pub busy: bool,
    pub next_blink_ms: u32,
    pub tps: f64,
}

impl HudView<'_> {
    fn lines(&self) -> Vec<Line<'_>> {
        let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::DarkGray));
        vec![
            Line::from(vec![label("emotion "), Span::raw(self.emotion)]),
            Line::from(vec![label("gaze    "), Span::raw(self.gaze.as_str())]),
            Line::from(vec![
                label("engine  "),
                Span::raw(if self.busy { "animating" } else { "idle" }),
            ]),
            Line::from(vec![label("blink in "), Span::raw(format!("{} ms", self.next_blink_ms))]),
            Line::from(vec![label("tps     "), Span::raw(format!("{:.1}", self.tps))]),
        ]
    }
}

/// One-line title bar with the key bindings.
pub fn render_title(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " PEEPERS ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  q quit  b blink  ←/→ glance  ↑/↓ look  n neutral",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

pub fn render_hud(f: &mut Frame, area: Rect, view: &HudView<'_>) {
    let hud = Paragraph::new(view.lines())
        .block(Block::default().borders(Borders::ALL).title("FACE"));
    f.render_widget(hud, area);
}

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Green,
        LogLevel::Debug => Color::Cyan,
        LogLevel::Trace => Color::DarkGray,
    }
}

fn log_line(entry: &LogEntry) -> Line<'_> {
    Line::from(vec![
        Span::styled(
            format!("{:<5} ", entry.level.to_string()),
            Style::default()
                .fg(level_color(entry.level))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}] ", entry.target),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(entry.message.as_str()),
    ])
}

/// Colour-coded tail of the captured log, newest line at the bottom.
pub fn render_logs(f: &mut Frame, area: Rect, logs: &LogBuffer) {
    let block = Block::default().borders(Borders::ALL).title("LOG");
    let visible = block.inner(area).height as usize;
    let Ok(entries) = logs.lock() else {
        f.render_widget(block, area);
        return;
    };

    let skip = entries.len().saturating_sub(visible);
    let lines: Vec<Line> = entries.iter().skip(skip).map(log_line).collect();
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
