//! Console Logger
//!
//! A `tracing` layer for the browser. Every event is formatted once, written
//! to the developer console (stderr when not on wasm), and kept in a bounded
//! circular buffer so the app can show recent lines without devtools open.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log level `{0}`")]
    InvalidLevel(String),

    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

// ========================
// Ring buffer
// ========================

/// Circular buffer of formatted lines, oldest dropped first
#[derive(Debug, Clone)]
pub struct RingBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    fn guard(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, line: String) {
        let mut lines = self.guard();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Oldest first
    pub fn lines(&self) -> Vec<String> {
        self.guard().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }
}

// ========================
// Layer
// ========================

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: String,
}

impl FieldVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Formats events, mirrors them to the console and records them
pub struct ConsoleLayer {
    app_name: String,
    buffer: RingBuffer,
}

impl ConsoleLayer {
    pub fn new(app_name: impl Into<String>, buffer: RingBuffer) -> Self {
        Self {
            app_name: app_name.into(),
            buffer,
        }
    }

    fn format(&self, event: &Event<'_>) -> String {
        let meta = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        format!(
            "[{}] [{}] {:<5} {}: {}",
            Utc::now().format("%H:%M:%S%.3f"),
            self.app_name,
            meta.level(),
            meta.target(),
            visitor.finish()
        )
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = self.format(event);
        emit(*event.metadata().level(), &line);
        self.buffer.push(line);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = line.into();
    match level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        Level::INFO => web_sys::console::info_1(&value),
        _ => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: Level, line: &str) {
    if level <= Level::INFO {
        eprintln!("{line}");
    }
}

// ========================
// Init
// ========================

/// Access to what the logger has recorded
#[derive(Debug, Clone)]
pub struct LogHandle {
    buffer: RingBuffer,
}

impl LogHandle {
    pub fn recent_lines(&self) -> Vec<String> {
        self.buffer.lines()
    }
}

pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| LoggerError::InvalidLevel(level.to_string()))
}

/// Install the global subscriber
pub fn init_logger(app_name: &str, level: &str) -> Result<LogHandle, LoggerError> {
    let filter = parse_level(level)?;
    let buffer = RingBuffer::new(DEFAULT_CAPACITY);

    tracing_subscriber::registry()
        .with(ConsoleLayer::new(app_name, buffer.clone()).with_filter(filter))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(level = %filter, "Logger initialized");
    Ok(LogHandle { buffer })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let buffer = RingBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {i}"));
        }
        assert_eq!(buffer.lines(), vec!["line 2", "line 3", "line 4"]);

        buffer.clear();
        assert!(buffer.lines().is_empty());
    }

    #[test]
    fn test_layer_records_message_and_fields() {
        let buffer = RingBuffer::new(10);
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new("Dash", buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(task_id = "t1", attempts = 2, "Stage update failed");
        });

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[Dash]"));
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("Stage update failed task_id=t1 attempts=2"));
    }

    #[test]
    fn test_level_filter_applies() {
        let buffer = RingBuffer::new(10);
        let filter = parse_level("warn").unwrap();
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new("Dash", buffer.clone()).with_filter(filter));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("hidden");
            tracing::error!("shown");
        });

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("shown"));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        assert!(matches!(parse_level("loud"), Err(LoggerError::InvalidLevel(_))));
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::DEBUG);
    }
}
