use chrono::Local;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp in HH:MM:SS format
    pub timestamp: String,
    /// Message level
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Global logger state
#[derive(Debug)]
struct Logger {
    /// Debug log (last N messages)
    entries: VecDeque<LogEntry>,
    /// Maximum number of entries in log
    max_entries: usize,
    /// Minimum log level to record
    min_level: LogLevel,
    /// Log file path
    file_path: PathBuf,
}

impl Logger {
    /// Create new logger instance
    fn new(file_path: PathBuf, max_entries: usize, min_level: LogLevel) -> Self {
        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        // Clear log file on startup
        if let Ok(mut file) = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
        {
            let _ = writeln!(file, "=== confedit log start ===");
        }

        Self {
            entries: VecDeque::new(),
            max_entries,
            min_level,
            file_path,
        }
    }

    /// Add entry to log
    fn add_entry(&mut self, level: LogLevel, message: String) {
        // Filter by minimum level
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S").to_string();
        let entry = LogEntry {
            timestamp: timestamp.clone(),
            level,
            message: message.clone(),
        };

        // Add to queue
        self.entries.push_back(entry);

        // Limit queue size
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }

        // Write to file (create if deleted)
        if let Ok(mut file) = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.file_path)
        {
            let _ = writeln!(file, "[{}] {}: {}", timestamp, level.to_str(), message);
        }
    }

    /// Get all log entries
    fn get_entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

/// Global logger instance that persists for the application lifetime.
static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

fn get_logger() -> Option<&'static Mutex<Logger>> {
    LOGGER.get()
}

/// Initialize the global logger
///
/// Must be called once at application startup before any logging functions.
/// Subsequent calls will be ignored. Logging before initialization is a
/// silent no-op, which keeps unit tests free of logger setup.
pub fn init(file_path: PathBuf, max_entries: usize, min_level: LogLevel) {
    LOGGER.get_or_init(|| Mutex::new(Logger::new(file_path, max_entries, min_level)));
}

/// Log a debug message
pub fn debug(message: impl Into<String>) {
    if let Some(logger) = get_logger() {
        if let Ok(mut logger) = logger.lock() {
            logger.add_entry(LogLevel::Debug, message.into());
        }
    }
}

/// Log an informational message
///
/// # Example
///
/// ```ignore
/// logger::info("Application started");
/// logger::info(format!("Loaded {} files", count));
/// ```
pub fn info(message: impl Into<String>) {
    if let Some(logger) = get_logger() {
        if let Ok(mut logger) = logger.lock() {
            logger.add_entry(LogLevel::Info, message.into());
        }
    }
}

/// Log a warning message
pub fn warn(message: impl Into<String>) {
    if let Some(logger) = get_logger() {
        if let Ok(mut logger) = logger.lock() {
            logger.add_entry(LogLevel::Warn, message.into());
        }
    }
}

/// Log an error message
pub fn error(message: impl Into<String>) {
    if let Some(logger) = get_logger() {
        if let Ok(mut logger) = logger.lock() {
            logger.add_entry(LogLevel::Error, message.into());
        }
    }
}

/// Get all log entries currently stored in memory
#[allow(dead_code)]
pub fn get_entries() -> Vec<LogEntry> {
    if let Some(logger) = get_logger() {
        if let Ok(logger) = logger.lock() {
            return logger.get_entries();
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_logging_is_noop() {
        // Must not panic even before init
        debug("dropped");
    }

    #[test]
    fn test_init_and_entry_recording() {
        let dir = tempfile::TempDir::new().unwrap();
        init(dir.path().join("test.log"), 100, LogLevel::Debug);

        info("logger smoke entry");
        let entries = get_entries();
        let found = entries
            .iter()
            .find(|e| e.message == "logger smoke entry")
            .expect("entry should be recorded");
        assert_eq!(found.level, LogLevel::Info);
        assert!(!found.timestamp.is_empty());
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(LogLevel::from_str("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("ERROR"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_str("bogus"), None);
        assert_eq!(LogLevel::Debug.to_str(), "DEBUG");
    }
}
