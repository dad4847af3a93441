//! Outbound receipt notification and user-facing notices.
//!
//! A completed card produces exactly one [`NotificationPayload`], handed to a
//! [`Notifier`] through [`dispatch`], which bounds the wait. Both outcomes are
//! non-fatal: the caller only uses them to pick which [`Notice`] to show.

mod emailjs;
mod error;
pub mod mock;
mod notice;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

pub use emailjs::{DisabledNotifier, EmailJsNotifier, NotificationCredentials, EMAILJS_ENDPOINT};
pub use error::NotifyError;
pub use mock::{MockBehavior, RecordingNotifier};
pub use notice::{Notice, NoticeLevel, NoticeSink};

/// Default bound on a single send before it is treated as failed
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Template parameters for the receipt email.
///
/// Field names are the template variable names the email template expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub to_name: String,
    pub from_name: String,
    pub to_email: String,
    pub game: String,
    pub watch: String,
    pub date_time: String,
}

/// Something that can deliver a receipt notification
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver the payload once. No retries are expected.
    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError>;
}

/// Send `payload` through `notifier`, giving up after `limit`.
pub async fn dispatch(
    notifier: &dyn Notifier,
    payload: &NotificationPayload,
    limit: Duration,
) -> Result<(), NotifyError> {
    match tokio::time::timeout(limit, notifier.send(payload)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "Notification send timed out");
            Err(NotifyError::Timeout(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NotificationPayload {
        NotificationPayload {
            to_name: "Ada".into(),
            from_name: "Maki".into(),
            to_email: "ada@example.com".into(),
            game: "Valorant".into(),
            watch: "Movies".into(),
            date_time: "2/14/2025, 7:00:00 PM".into(),
        }
    }

    #[test]
    fn test_payload_serializes_template_keys() {
        let value = serde_json::to_value(payload()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["date_time", "from_name", "game", "to_email", "to_name", "watch"]
        );
        assert_eq!(obj["to_name"], "Ada");
    }

    #[tokio::test]
    async fn test_dispatch_passes_through_success() {
        let notifier = RecordingNotifier::new(MockBehavior::Succeed);
        let result = dispatch(&notifier, &payload(), Duration::from_secs(1)).await;
        assert!(result.is_ok());
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_passes_through_failure() {
        let notifier = RecordingNotifier::new(MockBehavior::Fail);
        let result = dispatch(&notifier, &payload(), Duration::from_secs(1)).await;
        assert!(matches!(result, Err(NotifyError::Other(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_times_out_hung_send() {
        let notifier = RecordingNotifier::new(MockBehavior::Hang);
        let limit = Duration::from_secs(5);
        let result = dispatch(&notifier, &payload(), limit).await;
        assert!(matches!(result, Err(NotifyError::Timeout(d)) if d == limit));
        assert_eq!(notifier.sent().len(), 1);
    }
}
