//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Break and stats cadence
    #[serde(default)]
    pub intervals: RawIntervals,

    /// Notification presentation
    #[serde(default)]
    pub notifications: RawNotifications,

    /// Snooze lengths offered on the prompts
    #[serde(default)]
    pub snooze: RawSnooze,

    /// Service-level settings
    #[serde(default)]
    pub service: RawServiceConfig,

    /// Message pool overrides
    #[serde(default)]
    pub messages: RawMessages,
}

/// Timer intervals, all in seconds except the tick
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawIntervals {
    pub short_break_seconds: Option<u64>,
    pub long_break_seconds: Option<u64>,
    pub stats_seconds: Option<u64>,
    pub tick_millis: Option<u64>,
}

/// Notification settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawNotifications {
    /// Show prompts at all
    pub enabled: Option<bool>,

    /// Attach a sound hint to prompts
    pub audio: Option<bool>,

    /// Icon name or path shown on prompts
    pub icon: Option<String>,

    pub short_break_timeout_seconds: Option<u64>,
    pub long_break_timeout_seconds: Option<u64>,
    pub stats_timeout_seconds: Option<u64>,
}

/// Snooze lengths
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSnooze {
    pub short_break_seconds: Option<u64>,
    pub long_break_seconds: Option<u64>,
}

/// Service settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Stats file location
    pub stats_path: Option<PathBuf>,

    /// Upper bound on a single stats write
    pub persist_timeout_millis: Option<u64>,
}

/// Optional replacements for the built-in message pools.
/// A pool that is present must not be empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMessages {
    pub short_break: Option<Vec<String>>,
    pub long_break: Option<Vec<String>>,
    pub eco: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            config_version = 1

            [intervals]
            short_break_seconds = 1200
            long_break_seconds = 3600
            stats_seconds = 840

            [notifications]
            enabled = true
            audio = false
            icon = "eye"

            [snooze]
            short_break_seconds = 300

            [service]
            stats_path = "/tmp/stats.json"

            [messages]
            eco = ["Water your plants"]
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.intervals.short_break_seconds, Some(1200));
        assert_eq!(config.notifications.audio, Some(false));
        assert_eq!(config.snooze.long_break_seconds, None);
        assert_eq!(
            config.service.stats_path,
            Some(PathBuf::from("/tmp/stats.json"))
        );
        assert_eq!(config.messages.eco.as_ref().map(Vec::len), Some(1));
        assert!(config.messages.short_break.is_none());
    }

    #[test]
    fn sections_are_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.intervals.short_break_seconds.is_none());
        assert!(config.notifications.enabled.is_none());
    }
}
