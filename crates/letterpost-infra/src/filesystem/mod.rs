//! Filesystem layout for Letterpost.
//!
//! Resolves the data directory and the directory rendered letters are
//! written to.

use std::path::{Path, PathBuf};

use letterpost_types::config::GlobalConfig;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority: `LETTERPOST_DATA_DIR`, then `~/.letterpost`, then
/// `./.letterpost`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LETTERPOST_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".letterpost");
    }

    PathBuf::from(".letterpost")
}

/// Directory rendered letters go to.
///
/// A relative `results_dir` is resolved against the data directory.
pub fn resolve_results_dir(data_dir: &Path, config: &GlobalConfig) -> PathBuf {
    let configured = Path::new(&config.results_dir);
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        data_dir.join(configured)
    }
}

/// Path of the SQLite database inside the data directory.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("letterpost.db")
}
