// Linkding Sync platform abstraction
// Provides platform-specific config and log locations for Windows, macOS, and Linux.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/linkding-sync` (or `$XDG_CONFIG_HOME/linkding-sync`)
/// - **macOS**: `~/Library/Application Support/LinkdingSync`
/// - **Windows**: `%APPDATA%/LinkdingSync`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from(".linkding-sync")
    }
}

/// Returns the platform-specific directory for rolling log files.
pub fn get_log_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_log_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_log_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_log_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from(".linkding-sync").join("logs")
    }
}
