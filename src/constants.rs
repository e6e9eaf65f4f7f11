/// Application constants
///
/// Sentinel entry used when the backend supplies no files at all
pub const SENTINEL_PATH: &str = "/dev/null";
pub const SENTINEL_CONTENT: &str = "No files specified";

/// Default file list width in characters
pub const FILE_LIST_WIDTH: u16 = 34;

/// Maximum number of log entries kept in memory
pub const MAX_LOG_ENTRIES: usize = 1000;

/// Event update interval in milliseconds (42ms = ~24 FPS)
pub const EVENT_HANDLER_INTERVAL_MS: u64 = 42;

/// How long a transient status message stays on screen, in ticks
pub const STATUS_MESSAGE_TICKS: u32 = 96;
