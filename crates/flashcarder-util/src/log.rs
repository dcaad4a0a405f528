//! Logging setup using tracing.
//!
//! This module provides consistent logging configuration across flashcarder.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose targets the level applies to.
const CRATE_TARGETS: [&str; 4] = [
    "flashcarder",
    "flashcarder_core",
    "flashcarder_storage",
    "flashcarder_translate",
];

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parse a log level from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Filter directive applying this level to every flashcarder crate.
    pub fn directive(&self) -> String {
        CRATE_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Whether to print logs to stderr.
    pub print: bool,
    /// Log level.
    pub level: LogLevel,
    /// Whether to include file/line info in logs.
    pub include_location: bool,
    /// Log file path (if any).
    pub file: Option<PathBuf>,
}

/// Initialize logging with the given configuration.
///
/// Returns the log file actually opened, if any. Calling this twice is
/// harmless; the second subscriber is ignored.
pub fn init(config: LogConfig) -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.directive()));

    let stderr_layer = config.print.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
    });

    let opened = config
        .file
        .as_deref()
        .and_then(|path| open_log_file(path).map(|file| (path.to_path_buf(), file)));

    let (opened_path, file_layer) = match opened {
        Some((path, file)) => (
            Some(path),
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_target(false)
                    .with_ansi(false),
            ),
        ),
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    opened_path
}

fn open_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            return None;
        }
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: Could not open log file: {e}");
            None
        }
    }
}

/// Get the default log file path.
pub fn default_log_path() -> PathBuf {
    crate::path::log_dir().join("flashcarder.log")
}
