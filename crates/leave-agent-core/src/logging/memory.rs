//! Logger that keeps its records in memory

use std::sync::Arc;

use parking_lot::Mutex;

use super::traits::{LogLevel, Logger};

/// Collects records so tests can assert on what was logged
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<(LogLevel, String)>>,
    min_level: Option<LogLevel>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep records at or above `level`
    pub fn with_level(level: LogLevel) -> Self {
        Self {
            min_level: Some(level),
            ..Self::default()
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of everything logged so far
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records.lock().clone()
    }

    /// Messages logged at exactly `level`
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if self.enabled(level) {
            self.records.lock().push((level, message.to_string()));
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        self.min_level.map_or(true, |min| level >= min)
    }
}
