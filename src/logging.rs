//! Logging utilities for cmip6kit.
//!
//! Library code logs through `tracing` with structured fields. Catalog
//! searches additionally report their diagnostics through a [`SearchLogger`]
//! supplied by the caller; passing no logger keeps a search quiet and skips
//! the diagnostic dataset read.

use parking_lot::Mutex;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Leveled sink for search diagnostics
pub trait SearchLogger {
    fn warning(&self, message: &str);
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Forwards search diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl SearchLogger for TracingLogger {
    fn warning(&self, message: &str) {
        warn!(target: "cmip6kit::search", "{}", message);
    }

    fn info(&self, message: &str) {
        info!(target: "cmip6kit::search", "{}", message);
    }

    fn debug(&self, message: &str) {
        debug!(target: "cmip6kit::search", "{}", message);
    }
}

/// Severity of a recorded message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warning,
    Info,
    Debug,
}

/// A message captured by [`RecordingLogger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps search diagnostics in memory
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records captured so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Whether a message at `level` contains `fragment`
    pub fn contains(&self, level: LogLevel, fragment: &str) -> bool {
        self.records
            .lock()
            .iter()
            .any(|record| record.level == level && record.message.contains(fragment))
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.records.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }
}

impl SearchLogger for RecordingLogger {
    fn warning(&self, message: &str) {
        self.push(LogLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }
}

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = generate_operation_id();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        operation_id = %operation_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Generate a unique operation ID
pub fn generate_operation_id() -> String {
    Uuid::new_v4().to_string()
}
