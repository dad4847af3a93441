//! Recording notifier for deterministic testing
//!
//! Captures every payload it is asked to send and answers with a fixed
//! behavior, so flows can assert on call counts without network access.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{NotificationPayload, Notifier, NotifyError};

/// How the recording notifier answers a send
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MockBehavior {
    #[default]
    Succeed,
    Fail,
    /// Never resolves; exercises the dispatch timeout
    Hang,
}

/// Notifier that records payloads instead of sending them
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    behavior: MockBehavior,
    sent: Arc<Mutex<Vec<NotificationPayload>>>,
}

impl RecordingNotifier {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Payloads received so far, in order
    pub fn sent(&self) -> Vec<NotificationPayload> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        self.sent.lock().push(payload.clone());

        match self.behavior {
            MockBehavior::Succeed => Ok(()),
            MockBehavior::Fail => Err(NotifyError::Other("simulated delivery failure".into())),
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }
}
