//! Notification requests for each prompt kind

use lovethyeyes_api::{
    BreakKind, NotificationRequest, PromptKind, SoundName, Urgency, UserAction,
};
use lovethyeyes_config::{NotificationSettings, SnoozeSettings};
use std::time::Duration;

pub const SHORT_BREAK_TITLE: &str = "Time for a quick eye break!";
pub const LONG_BREAK_TITLE: &str = "Time for a longer break!";
pub const STATS_TITLE: &str = "Eye Care Stats";

/// Presentation state shared by all prompts
#[derive(Debug, Clone, Copy)]
pub struct PromptStyle<'a> {
    pub notifications: &'a NotificationSettings,
    pub snooze: &'a SnoozeSettings,
    pub audio: bool,
}

impl PromptStyle<'_> {
    fn sound(&self, sound: SoundName) -> Option<SoundName> {
        self.audio.then_some(sound)
    }

    fn icon(&self) -> Option<String> {
        self.notifications.icon.clone()
    }
}

pub fn short_break_prompt(style: PromptStyle<'_>, body: String) -> NotificationRequest {
    let kind = BreakKind::Short;
    let snooze = style.snooze.short_break;

    NotificationRequest::new(PromptKind::Break { kind }, SHORT_BREAK_TITLE, body)
        .with_action("I did it!", UserAction::TakeBreak { kind })
        .with_action(snooze_label(snooze), UserAction::Snooze { duration: snooze })
        .with_action("Skip", UserAction::SkipBreak { kind })
        .on_dismiss(UserAction::SkipBreak { kind })
        .with_timeout(style.notifications.short_break_timeout)
        .with_sound(style.sound(SoundName::DialogInformation))
        .with_icon(style.icon())
}

pub fn long_break_prompt(style: PromptStyle<'_>, body: String) -> NotificationRequest {
    let kind = BreakKind::Long;
    let snooze = style.snooze.long_break;

    NotificationRequest::new(PromptKind::Break { kind }, LONG_BREAK_TITLE, body)
        .with_action("Break taken!", UserAction::TakeBreak { kind })
        .with_action(snooze_label(snooze), UserAction::Snooze { duration: snooze })
        .with_action("Logout Now!", UserAction::Logout)
        .with_action("Skip", UserAction::SkipBreak { kind })
        .on_dismiss(UserAction::SkipBreak { kind })
        .with_timeout(style.notifications.long_break_timeout)
        .with_urgency(Urgency::Critical)
        .with_sound(style.sound(SoundName::DialogWarning))
        .with_icon(style.icon())
}

/// Ignoring a summary is not a skipped break, so there is no dismiss action
pub fn stats_prompt(style: PromptStyle<'_>, body: String) -> NotificationRequest {
    NotificationRequest::new(PromptKind::Stats, STATS_TITLE, body)
        .with_action("Thanks for reminding me!", UserAction::AcknowledgeStats)
        .with_timeout(style.notifications.stats_timeout)
        .with_sound(style.sound(SoundName::DialogInformation))
        .with_icon(style.icon())
}

/// `"Snooze (5 min)"`, or seconds for sub-minute snoozes
fn snooze_label(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("Snooze ({} min)", secs / 60)
    } else {
        format!("Snooze ({} s)", secs)
    }
}
