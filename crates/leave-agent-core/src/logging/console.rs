//! Console logger

use super::traits::{LogLevel, Logger};

/// Writes records at or above a minimum level to stderr
///
/// Replies go to stdout, so logs never interleave with the chat itself
/// when stderr is redirected.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// `[LeaveAgent]`-prefixed logger at info level
    pub fn new() -> Self {
        Self {
            prefix: "[LeaveAgent]".to_string(),
            min_level: LogLevel::Info,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    fn format(&self, level: LogLevel, message: &str) -> String {
        format!("{} {:<5} {}", self.prefix, level, message)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if self.enabled(level) {
            eprintln!("{}", self.format(level, message));
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        let logger = ConsoleLogger::new().with_level(LogLevel::Warn);
        assert!(!logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Warn));
        assert!(logger.enabled(LogLevel::Error));
    }

    #[test]
    fn test_format() {
        let logger = ConsoleLogger::new();
        assert_eq!(
            logger.format(LogLevel::Info, "[Agent] ready"),
            "[LeaveAgent] INFO  [Agent] ready"
        );
        assert_eq!(
            logger.format(LogLevel::Error, "[Agent] down"),
            "[LeaveAgent] ERROR [Agent] down"
        );
    }
}
