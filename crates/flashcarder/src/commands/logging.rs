//! Logging initialization.
//!
//! Verbose runs log to stderr at debug level. Otherwise logs go to a file
//! in the platform log directory so they never mix with command output.

use flashcarder_util::log::{self, LogConfig, LogLevel};
use std::path::PathBuf;

/// Initialize logging. Returns the log file path if logging to file.
pub fn init_logging(verbose: bool, level: Option<LogLevel>) -> Option<PathBuf> {
    let config = if verbose {
        LogConfig {
            print: true,
            level: LogLevel::Debug,
            include_location: true,
            file: None,
        }
    } else {
        LogConfig {
            print: false,
            level: level.unwrap_or_default(),
            include_location: false,
            file: Some(log::default_log_path()),
        }
    };
    log::init(config)
}
