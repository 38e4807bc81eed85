use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name prefix used by the daily rolling appender.
const LOG_FILE_PREFIX: &str = "peepers.log";
/// Number of lines kept for the on-screen log panel.
const MAX_PANEL_LINES: usize = 200;
const LOG_RETENTION_DAYS: u64 = 7;

/// Severity of a captured log line, for colouring in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<&tracing::Level> for LogLevel {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// One captured log line.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Shared ring buffer the log panel reads from.
pub type LogBuffer = Arc<Mutex<VecDeque<LogEntry>>>;

/// Create an empty shared log buffer with room for `capacity` entries.
pub fn new_log_buffer(capacity: usize) -> LogBuffer {
    Arc::new(Mutex::new(VecDeque::with_capacity(capacity)))
}

/// Push `entry`, evicting the oldest line once `max_lines` is reached.
fn push_capped(buffer: &LogBuffer, entry: LogEntry, max_lines: usize) {
    if let Ok(mut buf) = buffer.lock() {
        while buf.len() >= max_lines.max(1) {
            buf.pop_front();
        }
        buf.push_back(entry);
    }
}

/// Directory the rolling log files are written to.
///
/// `PEEPERS_LOG_DIR` wins; otherwise the platform data directory
/// (`~/.local/share/peepers/logs` on Linux,
/// `~/Library/Application Support/peepers/logs` on macOS), falling back to
/// `./logs`.
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PEEPERS_LOG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|data| data.join("peepers").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Delete `peepers.log*` files older than `max_age_days` in `dir`.
fn cleanup_old_logs(dir: &Path, max_age_days: u64) {
    let Some(cutoff) =
        SystemTime::now().checked_sub(Duration::from_secs(max_age_days * 86_400))
    else {
        return;
    };
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        if !entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX) {
            continue;
        }
        let stale = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .map(|modified| modified < cutoff)
            .unwrap_or(false);
        if stale {
            let _ = std::fs::remove_file(entry.path());
        }
    }
}

/// Tracing layer mirroring events into a [`LogBuffer`].
struct PanelLayer {
    buffer: LogBuffer,
    max_lines: usize,
}

impl<S: tracing::Subscriber> Layer<S> for PanelLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            level: event.metadata().level().into(),
            target: event.metadata().target().to_string(),
            message: visitor.finish(),
        };
        push_capped(&self.buffer, entry, self.max_lines);
    }
}

/// Flattens an event's `message` and extra fields into one line.
#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Vec<String>,
}

impl FieldCollector {
    fn finish(self) -> String {
        let mut parts = Vec::with_capacity(self.fields.len() + 1);
        parts.extend(self.message);
        parts.extend(self.fields);
        parts.join(" ")
    }
}

impl tracing::field::Visit for FieldCollector {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

/// Install the global subscriber and return the log panel buffer.
///
/// Filter: `PEEPERS_LOG`, then `RUST_LOG`, then `info`. Files roll daily in
/// [`log_dir`] and are kept for seven days. Nothing is written to stdout,
/// which belongs to the terminal UI.
pub fn init() -> LogBuffer {
    let buffer = new_log_buffer(MAX_PANEL_LINES);

    let filter = EnvFilter::try_from_env("PEEPERS_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let dir = log_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("warning: failed to create log directory {}: {e}", dir.display());
    }
    cleanup_old_logs(&dir, LOG_RETENTION_DAYS);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(rolling::daily(&dir, LOG_FILE_PREFIX))
        .with_ansi(false)
        .with_target(true);

    let panel_layer = PanelLayer {
        buffer: buffer.clone(),
        max_lines: MAX_PANEL_LINES,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(panel_layer)
        .init();

    buffer
}
