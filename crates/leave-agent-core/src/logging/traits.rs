//! Logger trait and levels

use std::str::FromStr;
use std::sync::Arc;

/// Severity of a log record, least severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Upper-case name used in console output
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Sink for the agent's diagnostics
///
/// Components receive a [`SharedLogger`] and prefix their messages with
/// `[Component]`. Implementations only need [`Logger::log`]; the per-level
/// methods forward to it.
///
/// Implementations:
/// - `ConsoleLogger`: stderr, so the chat on stdout stays clean
/// - `MemoryLogger`: keeps records for assertions
/// - `NoOpLogger`: discards everything
pub trait Logger: Send + Sync {
    /// Write one record
    fn log(&self, level: LogLevel, message: &str);

    /// Whether records at `level` would be written at all
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Logger handle shared between components
pub type SharedLogger = Arc<dyn Logger>;

/// Format and log at a level, skipping the formatting when the level is off
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)*) => {{
        let level = $level;
        if $logger.enabled(level) {
            $logger.log(level, &format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_at!($logger, $crate::logging::LogLevel::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_at!($logger, $crate::logging::LogLevel::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_at!($logger, $crate::logging::LogLevel::Warn, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_at!($logger, $crate::logging::LogLevel::Error, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!(" warning ".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }

    #[test]
    fn test_display_honours_width() {
        assert_eq!(format!("{:<5}|", LogLevel::Info), "INFO |");
        assert_eq!(format!("{:<5}|", LogLevel::Warn), "WARN |");
        assert_eq!(format!("{:<5}|", LogLevel::Error), "ERROR|");
        assert_eq!(format!("{:>6}", LogLevel::Debug), " DEBUG");
    }

    #[test]
    fn test_macros_route_by_level() {
        let logger = MemoryLogger::new();
        crate::log_info!(logger, "[Test] {} tools", 2);
        crate::log_warn!(logger, "[Test] dropped {}", "c2");

        assert_eq!(
            logger.records(),
            vec![
                (LogLevel::Info, "[Test] 2 tools".to_string()),
                (LogLevel::Warn, "[Test] dropped c2".to_string()),
            ]
        );
    }

    #[test]
    fn test_disabled_level_is_skipped() {
        let logger = MemoryLogger::with_level(LogLevel::Warn);
        crate::log_debug!(logger, "[Test] noisy");
        logger.info("[Test] also noisy");
        logger.error("[Test] kept");

        assert_eq!(logger.records().len(), 1);
    }
}
