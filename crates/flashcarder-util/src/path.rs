//! Path utilities.
//!
//! Directory locations follow XDG conventions on Linux and the platform
//! defaults elsewhere.

use std::path::PathBuf;

const APP_DIR: &str = "flashcarder";

/// Get the flashcarder configuration directory.
///
/// - `$XDG_CONFIG_HOME/flashcarder` if set
/// - `~/.config/flashcarder` otherwise
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR))
}

/// Get the flashcarder data directory.
///
/// - `$XDG_DATA_HOME/flashcarder` if set
/// - `~/.local/share/flashcarder` otherwise
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(APP_DIR))
}

/// Get the log directory.
pub fn log_dir() -> PathBuf {
    // macOS: ~/Library/Logs/flashcarder
    // Linux: ~/.local/state/flashcarder/logs
    // Windows: %LOCALAPPDATA%/flashcarder/logs

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            return home.join("Library/Logs").join(APP_DIR);
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(state_dir) = dirs::state_dir() {
            return state_dir.join(APP_DIR).join("logs");
        }
        if let Some(home) = dirs::home_dir() {
            return home.join(".local/state").join(APP_DIR).join("logs");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local_app) = dirs::data_local_dir() {
            return local_app.join(APP_DIR).join("logs");
        }
    }

    PathBuf::from(".flashcarder/logs")
}
