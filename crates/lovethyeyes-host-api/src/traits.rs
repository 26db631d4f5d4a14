//! Host adapter traits

use async_trait::async_trait;
use lovethyeyes_api::{NotificationRequest, UserAction};
use lovethyeyes_util::DispatchId;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from host adapter operations
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Notification service unavailable: {0}")]
    NotificationUnavailable(String),

    #[error("Dispatch failed: {0}")]
    DispatchFailed(String),

    #[error("Session termination failed ({strategy}): {message}")]
    TerminateFailed {
        strategy: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type HostResult<T> = Result<T, HostError>;

/// Events reported back by the notification boundary.
///
/// At most one event is sent per dispatched notification, at an arbitrary
/// later time, or never.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The user chose one of the offered actions
    ActionInvoked {
        dispatch_id: DispatchId,
        action: UserAction,
    },

    /// The notification was closed without a choice
    Dismissed {
        dispatch_id: DispatchId,
        on_dismiss: Option<UserAction>,
    },
}

impl HostEvent {
    pub fn dispatch_id(&self) -> DispatchId {
        match self {
            HostEvent::ActionInvoked { dispatch_id, .. } => *dispatch_id,
            HostEvent::Dismissed { dispatch_id, .. } => *dispatch_id,
        }
    }

    /// The action the core should apply for this event, if any
    pub fn resolved_action(&self) -> Option<UserAction> {
        match self {
            HostEvent::ActionInvoked { action, .. } => Some(*action),
            HostEvent::Dismissed { on_dismiss, .. } => *on_dismiss,
        }
    }
}

/// Notification dispatcher - presents prompts and reports the user's choice
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Present a prompt. Responses arrive later on the `subscribe` channel.
    async fn dispatch(&self, request: NotificationRequest) -> HostResult<DispatchId>;

    /// Subscribe to response events
    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent>;

    /// Optional: check if the notification service is reachable
    fn is_healthy(&self) -> bool {
        true
    }
}

/// One way of ending the user's desktop session
#[async_trait]
pub trait SessionTerminator: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Attempt to end the session
    async fn terminate(&self) -> HostResult<()>;
}
