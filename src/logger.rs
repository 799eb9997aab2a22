//! Logging capability used by chains.
//!
//! The engine never owns a logger: pipelines and chains hold a shared
//! `Arc<dyn Logger>` supplied by the host. [`TracingLogger`] forwards to the
//! `tracing` ecosystem; [`MemoryLogger`] keeps every message for inspection.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// A sink accepting informational and error messages.
///
/// Calls are fire-and-forget and happen sequentially.
pub trait Logger: Send + Sync {
    /// Emit an informational message.
    fn info(&self, message: &str);

    /// Emit an error message.
    fn error(&self, message: &str);
}

/// Forwards messages to `tracing` under the `typed_pipeline` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "typed_pipeline", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "typed_pipeline", "{message}");
    }
}

/// Severity of a [`LogRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Emitted through [`Logger::info`].
    Info,
    /// Emitted through [`Logger::error`].
    Error,
}

/// A message captured by [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Which logger method received the message.
    pub level: LogLevel,
    /// The message text.
    pub message: String,
}

/// A logger that records messages in memory, in arrival order.
///
/// # Example
///
/// ```rust
/// use typed_pipeline::{Logger, MemoryLogger};
///
/// let logger = MemoryLogger::new();
/// logger.info("2 elements.");
/// logger.error("disk full");
///
/// assert_eq!(logger.infos(), vec!["2 elements."]);
/// assert_eq!(logger.errors(), vec!["disk full"]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    /// Create an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord {
                level,
                message: message.to_string(),
            });
    }

    /// A snapshot of every record so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|record| record.level == level)
            .map(|record| record.message.clone())
            .collect()
    }

    /// Messages received through [`Logger::info`].
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.messages(LogLevel::Info)
    }

    /// Messages received through [`Logger::error`].
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.messages(LogLevel::Error)
    }

    /// Forget every recorded message.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_keeps_arrival_order() {
        let logger = MemoryLogger::new();
        logger.error("first");
        logger.info("second");

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, LogLevel::Error);
        assert_eq!(records[1].message, "second");
    }

    #[test]
    fn test_memory_logger_clear() {
        let logger = MemoryLogger::new();
        logger.info("gone");
        logger.clear();
        assert!(logger.records().is_empty());
    }

    #[test]
    fn test_log_record_serialization() {
        let record = LogRecord {
            level: LogLevel::Error,
            message: "oops".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"level":"error","message":"oops"}"#);
    }

    #[test]
    fn test_tracing_logger_is_a_logger() {
        let logger: &dyn Logger = &TracingLogger;
        logger.info("no subscriber installed");
        logger.error("still fine");
    }
}
