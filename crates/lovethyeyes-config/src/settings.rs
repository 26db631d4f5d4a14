//! Validated settings

use crate::schema::{RawConfig, RawMessages, RawServiceConfig};
use crate::CURRENT_CONFIG_VERSION;
use lovethyeyes_util::default_stats_path;
use std::path::PathBuf;
use std::time::Duration;

/// Default short-break interval (20-20-20 rule)
pub const DEFAULT_SHORT_BREAK: Duration = Duration::from_secs(20 * 60);

/// Default long-break interval
pub const DEFAULT_LONG_BREAK: Duration = Duration::from_secs(60 * 60);

/// Default stats summary interval
pub const DEFAULT_STATS_INTERVAL: Duration = Duration::from_secs(14 * 60);

/// Default scheduler tick
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Validated settings ready for use by the engine and the daemon
#[derive(Debug, Clone)]
pub struct Settings {
    pub intervals: Intervals,
    pub notifications: NotificationSettings,
    pub snooze: SnoozeSettings,
    pub service: ServiceConfig,
    pub messages: MessageOverrides,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let secs = |value: Option<u64>, default: Duration| {
            value.map(Duration::from_secs).unwrap_or(default)
        };

        let intervals = Intervals {
            short_break: secs(raw.intervals.short_break_seconds, DEFAULT_SHORT_BREAK),
            long_break: secs(raw.intervals.long_break_seconds, DEFAULT_LONG_BREAK),
            stats: secs(raw.intervals.stats_seconds, DEFAULT_STATS_INTERVAL),
            tick: raw
                .intervals
                .tick_millis
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TICK),
        };

        let notifications = NotificationSettings {
            enabled: raw.notifications.enabled.unwrap_or(true),
            audio: raw.notifications.audio.unwrap_or(true),
            icon: raw.notifications.icon,
            short_break_timeout: secs(
                raw.notifications.short_break_timeout_seconds,
                Duration::from_secs(30),
            ),
            long_break_timeout: secs(
                raw.notifications.long_break_timeout_seconds,
                Duration::from_secs(60),
            ),
            stats_timeout: secs(
                raw.notifications.stats_timeout_seconds,
                Duration::from_secs(15),
            ),
        };

        let snooze = SnoozeSettings {
            short_break: secs(raw.snooze.short_break_seconds, Duration::from_secs(5 * 60)),
            long_break: secs(raw.snooze.long_break_seconds, Duration::from_secs(10 * 60)),
        };

        Self {
            intervals,
            notifications,
            snooze,
            service: ServiceConfig::from_raw(raw.service),
            messages: MessageOverrides::from_raw(raw.messages),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_raw(RawConfig {
            config_version: CURRENT_CONFIG_VERSION,
            intervals: Default::default(),
            notifications: Default::default(),
            snooze: Default::default(),
            service: Default::default(),
            messages: Default::default(),
        })
    }
}

/// Timer intervals, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub short_break: Duration,
    pub long_break: Duration,
    pub stats: Duration,
    pub tick: Duration,
}

/// Notification presentation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Initial value of the runtime notifications toggle
    pub enabled: bool,
    /// Initial value of the runtime audio toggle
    pub audio: bool,
    pub icon: Option<String>,
    pub short_break_timeout: Duration,
    pub long_break_timeout: Duration,
    pub stats_timeout: Duration,
}

/// Snooze lengths offered by the break prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnoozeSettings {
    pub short_break: Duration,
    pub long_break: Duration,
}

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub stats_path: PathBuf,
    pub persist_timeout: Duration,
}

impl ServiceConfig {
    fn from_raw(raw: RawServiceConfig) -> Self {
        Self {
            stats_path: raw.stats_path.unwrap_or_else(default_stats_path),
            persist_timeout: raw
                .persist_timeout_millis
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_secs(2)),
        }
    }
}

/// User-supplied message pools; `None` keeps the built-in pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOverrides {
    pub short_break: Option<Vec<String>>,
    pub long_break: Option<Vec<String>>,
    pub eco: Option<Vec<String>>,
}

impl MessageOverrides {
    fn from_raw(raw: RawMessages) -> Self {
        Self {
            short_break: raw.short_break,
            long_break: raw.long_break,
            eco: raw.eco,
        }
    }
}
