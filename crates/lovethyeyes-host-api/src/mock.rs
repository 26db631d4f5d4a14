//! Mock host adapters for testing

use async_trait::async_trait;
use lovethyeyes_api::NotificationRequest;
use lovethyeyes_util::DispatchId;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::{HostError, HostEvent, HostResult, Notifier, SessionTerminator};

/// A prompt the mock notifier was asked to show
#[derive(Debug, Clone)]
pub struct MockDispatch {
    pub dispatch_id: DispatchId,
    pub request: NotificationRequest,
}

/// Mock notifier for unit/integration testing.
///
/// Records every dispatch; tests play the user by calling `respond` or
/// `dismiss`, which emit the same events a real notification server would.
pub struct MockNotifier {
    next_id: AtomicU32,
    dispatched: Arc<Mutex<Vec<MockDispatch>>>,
    resolved: Arc<Mutex<HashSet<DispatchId>>>,
    event_tx: mpsc::UnboundedSender<HostEvent>,
    event_rx: Arc<Mutex<Option<mpsc::UnboundedReceiver<HostEvent>>>>,

    /// Configure dispatch to fail
    pub fail_dispatch: Arc<Mutex<bool>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            next_id: AtomicU32::new(1),
            dispatched: Arc::new(Mutex::new(Vec::new())),
            resolved: Arc::new(Mutex::new(HashSet::new())),
            event_tx: tx,
            event_rx: Arc::new(Mutex::new(Some(rx))),
            fail_dispatch: Arc::new(Mutex::new(false)),
        }
    }

    /// All successful dispatches, oldest first
    pub fn dispatched(&self) -> Vec<MockDispatch> {
        self.dispatched.lock().unwrap().clone()
    }

    /// The most recent successful dispatch
    pub fn last_dispatched(&self) -> Option<MockDispatch> {
        self.dispatched.lock().unwrap().last().cloned()
    }

    /// Simulate the user clicking the action at `index`.
    /// Returns false if the dispatch is unknown, already resolved, or has no such action.
    pub fn respond(&self, dispatch_id: DispatchId, index: usize) -> bool {
        let Some(request) = self.request_for(dispatch_id) else {
            return false;
        };
        let Some(action) = request.action_at(index) else {
            return false;
        };
        if !self.mark_resolved(dispatch_id) {
            return false;
        }

        self.event_tx
            .send(HostEvent::ActionInvoked {
                dispatch_id,
                action,
            })
            .is_ok()
    }

    /// Simulate the user closing the notification (or it expiring)
    pub fn dismiss(&self, dispatch_id: DispatchId) -> bool {
        let Some(request) = self.request_for(dispatch_id) else {
            return false;
        };
        if !self.mark_resolved(dispatch_id) {
            return false;
        }

        self.event_tx
            .send(HostEvent::Dismissed {
                dispatch_id,
                on_dismiss: request.on_dismiss,
            })
            .is_ok()
    }

    fn request_for(&self, dispatch_id: DispatchId) -> Option<NotificationRequest> {
        self.dispatched
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.dispatch_id == dispatch_id)
            .map(|d| d.request.clone())
    }

    fn mark_resolved(&self, dispatch_id: DispatchId) -> bool {
        self.resolved.lock().unwrap().insert(dispatch_id)
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn dispatch(&self, request: NotificationRequest) -> HostResult<DispatchId> {
        if *self.fail_dispatch.lock().unwrap() {
            return Err(HostError::NotificationUnavailable(
                "Mock dispatch failure".into(),
            ));
        }

        let dispatch_id = DispatchId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.dispatched.lock().unwrap().push(MockDispatch {
            dispatch_id,
            request,
        });

        Ok(dispatch_id)
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent> {
        self.event_rx
            .lock()
            .unwrap()
            .take()
            .expect("subscribe() can only be called once")
    }
}

/// Shared view of how often a mock terminator ran
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mock session terminator
pub struct MockTerminator {
    name: &'static str,
    calls: CallCounter,

    /// Configure terminate to fail
    pub fail: Arc<Mutex<bool>>,
}

impl MockTerminator {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: CallCounter::default(),
            fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        let terminator = Self::new(name);
        *terminator.fail.lock().unwrap() = true;
        terminator
    }

    /// Handle on the call counter that survives moving the terminator
    pub fn calls(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait]
impl SessionTerminator for MockTerminator {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn terminate(&self) -> HostResult<()> {
        self.calls.bump();
        if *self.fail.lock().unwrap() {
            return Err(HostError::TerminateFailed {
                strategy: self.name,
                message: "Mock terminate failure".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lovethyeyes_api::{BreakKind, PromptKind, UserAction};

    fn short_break_request() -> NotificationRequest {
        let kind = BreakKind::Short;
        NotificationRequest::new(PromptKind::Break { kind }, "Break", "Look away")
            .with_action("Done", UserAction::TakeBreak { kind })
            .on_dismiss(UserAction::SkipBreak { kind })
    }

    #[tokio::test]
    async fn mock_dispatch_and_respond() {
        let notifier = MockNotifier::new();
        let mut rx = notifier.subscribe();

        let id = notifier.dispatch(short_break_request()).await.unwrap();
        assert_eq!(notifier.dispatched().len(), 1);

        assert!(notifier.respond(id, 0));
        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            HostEvent::ActionInvoked {
                dispatch_id: id,
                action: UserAction::TakeBreak {
                    kind: BreakKind::Short
                },
            }
        );
    }

    #[tokio::test]
    async fn mock_resolves_at_most_once() {
        let notifier = MockNotifier::new();
        let _rx = notifier.subscribe();

        let id = notifier.dispatch(short_break_request()).await.unwrap();
        assert!(notifier.dismiss(id));
        assert!(!notifier.respond(id, 0));
        assert!(!notifier.dismiss(id));
    }

    #[tokio::test]
    async fn mock_dispatch_failure() {
        let notifier = MockNotifier::new();
        let _rx = notifier.subscribe();
        *notifier.fail_dispatch.lock().unwrap() = true;

        assert!(notifier.dispatch(short_break_request()).await.is_err());
        assert!(notifier.dispatched().is_empty());
    }

    #[tokio::test]
    async fn unknown_action_index_is_rejected() {
        let notifier = MockNotifier::new();
        let _rx = notifier.subscribe();

        let id = notifier.dispatch(short_break_request()).await.unwrap();
        assert!(!notifier.respond(id, 5));
        // Still resolvable after a bad index
        assert!(notifier.respond(id, 0));
    }
}
