//! Core events emitted by the engine

use lovethyeyes_api::{BreakKind, NotificationRequest};

/// Events emitted by the core engine for the daemon to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    /// A break timer fired and a prompt should be shown
    BreakDue {
        kind: BreakKind,
        request: NotificationRequest,
    },

    /// The stats timer fired and a summary should be shown
    StatsDue { request: NotificationRequest },

    /// The user accepted a logout; the record is already persisted
    SessionTerminationRequested,
}

impl CoreEvent {
    /// The prompt to dispatch, if this event carries one
    pub fn request(&self) -> Option<&NotificationRequest> {
        match self {
            CoreEvent::BreakDue { request, .. } | CoreEvent::StatsDue { request } => Some(request),
            CoreEvent::SessionTerminationRequested => None,
        }
    }
}
