//! Global configuration types for Letterpost.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! channel commands, where artifacts are written, and which session store
//! backs the composer.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.letterpost/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Literal input that leaves the current field absent.
    #[serde(default = "default_skip_command")]
    pub skip_command: String,

    /// Literal input that abandons the composition in progress.
    #[serde(default = "default_cancel_command")]
    pub cancel_command: String,

    /// Directory (relative to the data dir unless absolute) for rendered letters.
    #[serde(default = "default_results_dir")]
    pub results_dir: String,

    /// Backing store for in-progress sessions.
    #[serde(default)]
    pub store: StoreKind,
}

fn default_skip_command() -> String {
    "/skip".to_string()
}

fn default_cancel_command() -> String {
    "/cancel".to_string()
}

fn default_results_dir() -> String {
    "results".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            skip_command: default_skip_command(),
            cancel_command: default_cancel_command(),
            results_dir: default_results_dir(),
            store: StoreKind::default(),
        }
    }
}

impl GlobalConfig {
    /// Check that the channel commands can be told apart.
    pub fn validate(&self) -> Result<(), String> {
        if self.skip_command.is_empty() {
            return Err("skip_command must not be empty".to_string());
        }
        if self.cancel_command.is_empty() {
            return Err("cancel_command must not be empty".to_string());
        }
        if self.skip_command == self.cancel_command {
            return Err(format!(
                "skip_command and cancel_command are both '{}'",
                self.skip_command
            ));
        }
        Ok(())
    }
}

/// Session store backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Sessions live in process memory and vanish on restart.
    #[default]
    Memory,
    /// Sessions survive restarts in the SQLite database.
    Sqlite,
}
