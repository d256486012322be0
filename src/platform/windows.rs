// Linkding Sync platform paths for Windows
// Config: %APPDATA%/LinkdingSync
// Logs:   %LOCALAPPDATA%/LinkdingSync/logs

use std::env;
use std::path::PathBuf;

/// `%APPDATA%/LinkdingSync`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("LinkdingSync")
}

/// `%LOCALAPPDATA%/LinkdingSync/logs`
pub fn get_log_dir() -> PathBuf {
    let local_appdata = env::var("LOCALAPPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local"));
    PathBuf::from(local_appdata).join("LinkdingSync").join("logs")
}
