//! Path resolution for agenda data files.
//!
//! Provides XDG-compliant defaults with an `AGENDA_DB` override.

use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the database file location.
pub const DB_ENV: &str = "AGENDA_DB";

/// Get XDG-compliant data directory for agenda.
///
/// # Returns
/// `$XDG_DATA_HOME/agenda`, else `~/.local/share/agenda`. Falls back to a
/// relative `.agenda` directory when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")));

    match data_home {
        Ok(dir) => dir.join("agenda"),
        Err(_) => PathBuf::from(".agenda"),
    }
}

/// Get database file path.
///
/// # Returns
/// `$AGENDA_DB` when set, else `data_dir/agenda.db`.
pub fn get_db_path() -> PathBuf {
    match env::var(DB_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => get_data_dir().join("agenda.db"),
    }
}
