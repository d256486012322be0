// Linkding Sync platform paths for Linux
// Config: ~/.config/linkding-sync
// Logs:   ~/.local/state/linkding-sync/logs

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "linkding-sync";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/linkding-sync` if set, otherwise `~/.config/linkding-sync`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
        _ => home_dir().join(".config").join(APP_DIR),
    }
}

/// Uses `$XDG_STATE_HOME/linkding-sync/logs` if set, otherwise
/// `~/.local/state/linkding-sync/logs`.
pub fn get_log_dir() -> PathBuf {
    let state = match env::var("XDG_STATE_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => home_dir().join(".local").join("state"),
    };
    state.join(APP_DIR).join("logs")
}
