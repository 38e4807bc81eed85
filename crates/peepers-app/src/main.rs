use std::env;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use peepers_config::FaceConfig;
use peepers_core::{
    clock::{Clock, MonotonicClock},
    fps::TickCounter,
    logging::{self, LogBuffer},
};
use peepers_face::{loader, EmotionCatalog, Face, Side, NEUTRAL};
use peepers_ui::{
    eyes::EyesWidget,
    hud::{render_hud, render_logs, render_title, HudView},
    layout::face_layout,
    surface::TerminalSurface,
};

/// Polling cadence of the host loop.
const TICK: Duration = Duration::from_millis(30);
/// Pixels the up/down keys move the gaze per press.
const VERTICAL_STEP: f32 = 2.0;

struct App {
    face: Face,
    surface: TerminalSurface,
    clock: MonotonicClock,
    tick_counter: TickCounter,
    log_buffer: LogBuffer,
}

impl App {
    fn new(log_buffer: LogBuffer) -> Result<Self> {
        let config = load_config()?;
        let catalog = load_catalog()?;
        tracing::info!(
            emotions = catalog.len(),
            vertices = catalog.vertex_count(),
            seed = ?config.seed,
            "emotion catalog loaded"
        );

        let clock = MonotonicClock::new();
        let face = Face::new(catalog, &config, clock.now_ms());
        Ok(Self {
            face,
            surface: TerminalSurface::new(),
            clock,
            tick_counter: TickCounter::default(),
            log_buffer,
        })
    }

    /// Handle one key press. Returns `true` to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let now = self.clock.now_ms();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('b') => {
                if !self.face.blink_now(now) {
                    tracing::debug!("manual blink ignored");
                }
            }
            KeyCode::Left => {
                self.face.glance(Side::Left, now);
            }
            KeyCode::Right => {
                self.face.glance(Side::Right, now);
            }
            KeyCode::Up => {
                let y = self.face.engine().vertical_gaze() - VERTICAL_STEP;
                self.face.look_vertical(y);
            }
            KeyCode::Down => {
                let y = self.face.engine().vertical_gaze() + VERTICAL_STEP;
                self.face.look_vertical(y);
            }
            KeyCode::Char('n') => match self.face.show_emotion(NEUTRAL, now) {
                Ok(true) => {}
                Ok(false) => tracing::debug!("face busy, neutral request dropped"),
                Err(err) => tracing::warn!(error = %err, "cannot show neutral"),
            },
            _ => {}
        }
        false
    }
}

fn config_path() -> Option<PathBuf> {
    env::var_os("PEEPERS_CONFIG").map(PathBuf::from)
}

fn load_config() -> Result<FaceConfig> {
    match config_path() {
        Some(path) => {
            let config = FaceConfig::from_path(&path)?;
            tracing::info!(path = %path.display(), "face config loaded");
            Ok(config)
        }
        None => Ok(FaceConfig::default()),
    }
}

fn load_catalog() -> Result<EmotionCatalog> {
    match env::var_os("PEEPERS_CATALOG").map(PathBuf::from) {
        Some(path) => loader::load_from_path(&path),
        None => loader::load_default().context("embedded emotion catalog is invalid"),
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let log_buffer = logging::init();
    tracing::info!("peepers starting up");

    // Load everything before touching the terminal so errors print normally.
    let mut app = App::new(log_buffer)?;

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(terminal)?;
    tracing::info!("peepers shutting down");
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // ── Directors, engine, surface ──
        let now = app.clock.now_ms();
        app.face.tick(now, &mut app.surface);
        app.tick_counter.tick(now);

        // ── Render ──
        terminal.draw(|f| {
            let rects = face_layout(f.area(), 8, 28);
            render_title(f, rects.top);
            f.render_widget(EyesWidget::new(app.surface.segments()), rects.eyes);

            let view = HudView {
                emotion: app.face.emotion(),
                gaze: app.face.gaze_state().to_string(),
                busy: app.face.engine().is_busy(),
                next_blink_ms: app.face.next_blink_in(now),
                tps: app.tick_counter.tps(),
            };
            render_hud(f, rects.hud, &view);
            render_logs(f, rects.logs, &app.log_buffer);
        })?;

        // ── Input ──
        if event::poll(TICK)? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
