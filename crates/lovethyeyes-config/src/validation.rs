//! Configuration validation

use crate::schema::{RawConfig, RawMessages};
use thiserror::Error;

/// Longest snooze a prompt may offer
pub const MAX_SNOOZE_SECONDS: u64 = 24 * 60 * 60;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("{field} = {seconds}s exceeds the {max}s limit")]
    SnoozeTooLong {
        field: &'static str,
        seconds: u64,
        max: u64,
    },

    #[error("Message pool '{pool}' is empty")]
    EmptyPool { pool: &'static str },

    #[error("Message pool '{pool}' has a blank entry at index {index}")]
    BlankMessage { pool: &'static str, index: usize },

    #[error("Global config error: {0}")]
    GlobalError(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let positive = [
        ("intervals.short_break_seconds", config.intervals.short_break_seconds),
        ("intervals.long_break_seconds", config.intervals.long_break_seconds),
        ("intervals.stats_seconds", config.intervals.stats_seconds),
        ("intervals.tick_millis", config.intervals.tick_millis),
        (
            "notifications.short_break_timeout_seconds",
            config.notifications.short_break_timeout_seconds,
        ),
        (
            "notifications.long_break_timeout_seconds",
            config.notifications.long_break_timeout_seconds,
        ),
        (
            "notifications.stats_timeout_seconds",
            config.notifications.stats_timeout_seconds,
        ),
        (
            "service.persist_timeout_millis",
            config.service.persist_timeout_millis,
        ),
    ];
    for (field, value) in positive {
        if value == Some(0) {
            errors.push(ValidationError::ZeroDuration { field });
        }
    }

    let snoozes = [
        ("snooze.short_break_seconds", config.snooze.short_break_seconds),
        ("snooze.long_break_seconds", config.snooze.long_break_seconds),
    ];
    for (field, value) in snoozes {
        match value {
            Some(0) => errors.push(ValidationError::ZeroDuration { field }),
            Some(seconds) if seconds > MAX_SNOOZE_SECONDS => {
                errors.push(ValidationError::SnoozeTooLong {
                    field,
                    seconds,
                    max: MAX_SNOOZE_SECONDS,
                })
            }
            _ => {}
        }
    }

    if let Some(icon) = &config.notifications.icon
        && icon.trim().is_empty()
    {
        errors.push(ValidationError::GlobalError(
            "notifications.icon cannot be blank".into(),
        ));
    }

    errors.extend(validate_messages(&config.messages));
    errors
}

fn validate_messages(messages: &RawMessages) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let pools = [
        ("short_break", &messages.short_break),
        ("long_break", &messages.long_break),
        ("eco", &messages.eco),
    ];
    for (pool, entries) in pools {
        let Some(entries) = entries else { continue };
        errors.extend(validate_pool(pool, entries));
    }

    errors
}

/// Check that a message pool is usable: non-empty, no blank entries.
pub fn validate_pool(pool: &'static str, entries: &[String]) -> Vec<ValidationError> {
    if entries.is_empty() {
        return vec![ValidationError::EmptyPool { pool }];
    }

    entries
        .iter()
        .enumerate()
        .filter(|(_, message)| message.trim().is_empty())
        .map(|(index, _)| ValidationError::BlankMessage { pool, index })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> RawConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let config = parse("config_version = 1");
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn zero_interval_rejected() {
        let config = parse(
            r#"
            config_version = 1
            [intervals]
            short_break_seconds = 0
            "#,
        );
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::ZeroDuration {
                field: "intervals.short_break_seconds"
            }
        ));
    }

    #[test]
    fn overlong_snooze_rejected() {
        let config = parse(
            r#"
            config_version = 1
            [snooze]
            long_break_seconds = 90000
            "#,
        );
        let errors = validate_config(&config);
        assert!(matches!(
            errors[0],
            ValidationError::SnoozeTooLong { seconds: 90000, .. }
        ));
    }

    #[test]
    fn empty_pool_rejected() {
        let config = parse(
            r#"
            config_version = 1
            [messages]
            short_break = []
            "#,
        );
        let errors = validate_config(&config);
        assert!(matches!(
            errors[0],
            ValidationError::EmptyPool { pool: "short_break" }
        ));
    }

    #[test]
    fn blank_message_rejected() {
        let errors = validate_pool("eco", &["ok".into(), "   ".into()]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::BlankMessage { pool: "eco", index: 1 }
        ));
    }
}
