//! Default paths for lovethyeyes
//!
//! Everything lives under the per-user configuration directory:
//! - Config: `$XDG_CONFIG_HOME/lovethyeyes/config.toml`
//! - Stats:  `$XDG_CONFIG_HOME/lovethyeyes/lovethyeyes.json`

use std::path::PathBuf;

/// Environment variable for overriding the stats file path
pub const LOVETHYEYES_STATS_ENV: &str = "LOVETHYEYES_STATS";

/// Application subdirectory name
const APP_DIR: &str = "lovethyeyes";

/// Config filename within the app directory
const CONFIG_FILENAME: &str = "config.toml";

/// Stats filename within the app directory
const STATS_FILENAME: &str = "lovethyeyes.json";

/// Get the per-user application config directory.
///
/// Order of precedence:
/// 1. `$XDG_CONFIG_HOME/lovethyeyes` (if XDG_CONFIG_HOME is set)
/// 2. the platform config dir (`~/.config` on Linux) + `lovethyeyes`
/// 3. `/tmp/lovethyeyes-$USER` (last resort)
pub fn app_config_dir() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME")
        && !config_home.is_empty()
    {
        return PathBuf::from(config_home).join(APP_DIR);
    }

    if let Some(dir) = dirs::config_dir() {
        return dir.join(APP_DIR);
    }

    let username = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
    PathBuf::from(format!("/tmp/{}-{}", APP_DIR, username))
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    app_config_dir().join(CONFIG_FILENAME)
}

/// Get the default stats file path.
///
/// Order of precedence:
/// 1. `$LOVETHYEYES_STATS` environment variable (if set)
/// 2. `<app config dir>/lovethyeyes.json`
pub fn default_stats_path() -> PathBuf {
    if let Ok(path) = std::env::var(LOVETHYEYES_STATS_ENV) {
        return PathBuf::from(path);
    }

    stats_path_without_env()
}

/// Get the stats path without checking the LOVETHYEYES_STATS env var.
/// Used for default values in configs where the env var is checked separately.
pub fn stats_path_without_env() -> PathBuf {
    app_config_dir().join(STATS_FILENAME)
}
