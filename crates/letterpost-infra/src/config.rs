//! Global configuration loader for Letterpost.
//!
//! Reads `{data_dir}/config.toml` into [`GlobalConfig`]. The composer never
//! sees a half-valid config: anything wrong with the file means defaults.

use std::path::Path;

use letterpost_types::config::GlobalConfig;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// A missing file yields [`GlobalConfig::default()`]. An unreadable,
/// malformed, or invalid file is logged and also yields the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "config unreadable, using defaults");
            return GlobalConfig::default();
        }
    };

    match parse_global_config(&content) {
        Ok(config) => config,
        Err(reason) => {
            tracing::warn!(path = %path.display(), %reason, "config rejected, using defaults");
            GlobalConfig::default()
        }
    }
}

fn parse_global_config(content: &str) -> Result<GlobalConfig, String> {
    let config: GlobalConfig = toml::from_str(content).map_err(|e| e.to_string())?;
    config.validate()?;
    Ok(config)
}
