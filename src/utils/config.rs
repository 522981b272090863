// Centralized configuration for the roster bot

use std::path::PathBuf;
use std::time::Duration;

/// Default location of the persisted roster
pub const DEFAULT_ROSTER_FILE: &str = "roster.json";

/// Default location of the persisted bot config
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Discord returns at most 100 messages per history request
pub const FETCH_LIMIT: u8 = 100;

/// Messages older than this many days can't be bulk deleted
pub const BULK_DELETE_MAX_AGE_DAYS: i64 = 14;

/// Pause after each single-message delete and after each purge batch
pub const PURGE_PAUSE: Duration = Duration::from_secs(1);

/// Delay before the startup render, gives the gateway time to fill the cache
pub const STARTUP_RENDER_DELAY: Duration = Duration::from_secs(5);

/// Discord embed colors
pub mod colors {
    pub const ROSTER_FRAME: u32 = 0xF8F8FF;
}

/// Roster file path, overridable with ROSTER_FILE
pub fn roster_file() -> PathBuf {
    std::env::var("ROSTER_FILE")
        .unwrap_or_else(|_| DEFAULT_ROSTER_FILE.to_string())
        .into()
}

/// Config file path, overridable with CONFIG_FILE
pub fn config_file() -> PathBuf {
    std::env::var("CONFIG_FILE")
        .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
        .into()
}
