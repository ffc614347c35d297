//! Platform-specific configuration paths.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/swfir/` (Linux), `~/Library/Application Support/swfir/` (macOS), `%APPDATA%\swfir\` (Windows)
//! - **Config file**: `config.toml` inside the user config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use swfir_config::paths;
//!
//! let path = paths::user_config_file();
//! println!("Config file: {:?}", path);
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "swfir";

/// File name of the export configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user's export configuration file.
pub fn user_config_file() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Ensure the user config directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// Pick the configuration file to load.
///
/// An explicit path always wins, whether or not it exists (loading it will
/// report the error). Otherwise `fallback` is used when it is a file.
pub fn resolve_config_file(explicit: Option<&Path>, fallback: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if fallback.is_file() => Some(fallback.to_path_buf()),
        None => None,
    }
}
