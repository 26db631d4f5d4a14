//! Notification requests handed to the dispatcher

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{PromptKind, UserAction};

/// Notification urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    Critical,
}

/// Freedesktop sound theme names used by the prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundName {
    DialogInformation,
    DialogWarning,
}

impl SoundName {
    /// Freedesktop sound theme name
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundName::DialogInformation => "dialog-information",
            SoundName::DialogWarning => "dialog-warning",
        }
    }
}

/// A labeled button on a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    pub action: UserAction,
}

impl NotificationAction {
    pub fn new(label: impl Into<String>, action: UserAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Everything the dispatcher needs to present a prompt.
///
/// `timeout` is advisory; it is passed to the notification server and never
/// enforced by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub prompt: PromptKind,
    pub title: String,
    pub body: String,
    pub actions: Vec<NotificationAction>,
    /// Action reported when the prompt is closed without a choice
    pub on_dismiss: Option<UserAction>,
    pub timeout: Duration,
    pub urgency: Urgency,
    pub sound: Option<SoundName>,
    pub icon: Option<String>,
}

impl NotificationRequest {
    pub fn new(prompt: PromptKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            prompt,
            title: title.into(),
            body: body.into(),
            actions: Vec::new(),
            on_dismiss: None,
            timeout: Duration::from_secs(30),
            urgency: Urgency::Normal,
            sound: None,
            icon: None,
        }
    }

    pub fn with_action(mut self, label: impl Into<String>, action: UserAction) -> Self {
        self.actions.push(NotificationAction::new(label, action));
        self
    }

    pub fn on_dismiss(mut self, action: UserAction) -> Self {
        self.on_dismiss = Some(action);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_sound(mut self, sound: Option<SoundName>) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }

    /// Look up the action bound to the button at `index`
    pub fn action_at(&self, index: usize) -> Option<UserAction> {
        self.actions.get(index).map(|a| a.action)
    }
}
