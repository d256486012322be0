// Linkding Sync platform paths for macOS
// Config: ~/Library/Application Support/LinkdingSync
// Logs:   ~/Library/Logs/LinkdingSync

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `~/Library/Application Support/LinkdingSync`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("LinkdingSync")
}

/// `~/Library/Logs/LinkdingSync`
pub fn get_log_dir() -> PathBuf {
    home_dir().join("Library").join("Logs").join("LinkdingSync")
}
