//! Desktop notification dispatch via the freedesktop notification service

use async_trait::async_trait;
use lovethyeyes_api::{APP_NAME, NotificationRequest, Urgency};
use lovethyeyes_host_api::{HostError, HostEvent, HostResult, Notifier};
use lovethyeyes_util::DispatchId;
use notify_rust::{Hint, Notification, Timeout};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Action key the server reports when a notification is closed or expires
const CLOSED_ACTION: &str = "__closed";

/// Notifier backed by `org.freedesktop.Notifications`.
///
/// Each dispatch shows the notification on a detached thread and then waits
/// there for the user's choice, which is sent on the event channel.
pub struct LinuxNotifier {
    event_tx: mpsc::UnboundedSender<HostEvent>,
    event_rx: Arc<Mutex<Option<mpsc::UnboundedReceiver<HostEvent>>>>,
}

impl LinuxNotifier {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            event_tx: tx,
            event_rx: Arc::new(Mutex::new(Some(rx))),
        }
    }
}

impl Default for LinuxNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for LinuxNotifier {
    async fn dispatch(&self, request: NotificationRequest) -> HostResult<DispatchId> {
        let event_tx = self.event_tx.clone();

        let id_rx = spawn_prompt_thread(move |id_tx| {
            let handle = match build_notification(&request).show() {
                Ok(handle) => handle,
                Err(e) => {
                    let _ = id_tx.send(Err(HostError::DispatchFailed(e.to_string())));
                    return;
                }
            };

            let dispatch_id = DispatchId::new(handle.id());
            let _ = id_tx.send(Ok(dispatch_id));

            handle.wait_for_action(|key| match resolve_action(&request, dispatch_id, key) {
                Some(event) => {
                    if event_tx.send(event).is_err() {
                        debug!(%dispatch_id, "Event receiver dropped");
                    }
                }
                None => {
                    warn!(%dispatch_id, key, "Unrecognized notification action");
                }
            });
        })?;

        id_rx
            .await
            .map_err(|_| HostError::Internal("notification thread ended early".into()))?
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent> {
        match self.event_rx.lock() {
            Ok(mut guard) => guard.take().unwrap_or_else(|| {
                warn!("LinuxNotifier events already subscribed");
                mpsc::unbounded_channel().1
            }),
            Err(_) => mpsc::unbounded_channel().1,
        }
    }

    fn is_healthy(&self) -> bool {
        match notify_rust::get_server_information() {
            Ok(info) => {
                debug!(server = %info.name, vendor = %info.vendor, "Notification server found");
                true
            }
            Err(e) => {
                warn!(error = %e, "Notification server unavailable");
                false
            }
        }
    }
}

/// Run a prompt on its own detached thread.
///
/// Waiting for the user can take as long as the server keeps the
/// notification open, so it must not occupy the runtime's blocking pool,
/// which the runtime joins on shutdown.
fn spawn_prompt_thread<F>(work: F) -> HostResult<oneshot::Receiver<HostResult<DispatchId>>>
where
    F: FnOnce(oneshot::Sender<HostResult<DispatchId>>) + Send + 'static,
{
    let (id_tx, id_rx) = oneshot::channel();
    std::thread::Builder::new()
        .name("lovethyeyes-prompt".into())
        .spawn(move || work(id_tx))
        .map_err(|e| HostError::Internal(format!("failed to spawn prompt thread: {}", e)))?;
    Ok(id_rx)
}

/// Build the notify-rust notification. Action keys are button indices.
fn build_notification(request: &NotificationRequest) -> Notification {
    let mut notification = Notification::new();
    notification
        .appname(APP_NAME)
        .summary(&request.title)
        .body(&request.body)
        .urgency(map_urgency(request.urgency))
        .timeout(Timeout::Milliseconds(timeout_millis(request)));

    if let Some(icon) = &request.icon {
        notification.icon(icon);
    }
    if let Some(sound) = request.sound {
        notification.hint(Hint::SoundName(sound.as_str().to_string()));
    }
    for (index, action) in request.actions.iter().enumerate() {
        notification.action(&index.to_string(), &action.label);
    }

    notification
}

fn map_urgency(urgency: Urgency) -> notify_rust::Urgency {
    match urgency {
        Urgency::Low => notify_rust::Urgency::Low,
        Urgency::Normal => notify_rust::Urgency::Normal,
        Urgency::Critical => notify_rust::Urgency::Critical,
    }
}

fn timeout_millis(request: &NotificationRequest) -> u32 {
    u32::try_from(request.timeout.as_millis()).unwrap_or(u32::MAX)
}

/// Translate an action key from the server into a host event
fn resolve_action(
    request: &NotificationRequest,
    dispatch_id: DispatchId,
    key: &str,
) -> Option<HostEvent> {
    if key == CLOSED_ACTION {
        return Some(HostEvent::Dismissed {
            dispatch_id,
            on_dismiss: request.on_dismiss,
        });
    }

    let index: usize = key.parse().ok()?;
    let action = request.action_at(index)?;
    Some(HostEvent::ActionInvoked {
        dispatch_id,
        action,
    })
}
