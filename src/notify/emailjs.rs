//! EmailJS transactional email notifier.
//!
//! Uses the EmailJS REST endpoint. The account must allow API access from
//! non-browser applications for these calls to be accepted.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{NotificationPayload, Notifier, NotifyError};

/// Default EmailJS send endpoint
pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Opaque EmailJS credentials
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationCredentials {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub public_key: String,
}

impl NotificationCredentials {
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
        }
    }

    /// All three values are present
    pub fn is_complete(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

impl fmt::Debug for NotificationCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCredentials")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a NotificationPayload,
}

/// Sends receipts through the EmailJS REST API
pub struct EmailJsNotifier {
    client: Client,
    endpoint: String,
    credentials: NotificationCredentials,
}

impl EmailJsNotifier {
    pub fn new(credentials: NotificationCredentials) -> Self {
        Self::with_endpoint(credentials, EMAILJS_ENDPOINT)
    }

    pub fn with_endpoint(credentials: NotificationCredentials, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            credentials,
        }
    }
}

#[async_trait]
impl Notifier for EmailJsNotifier {
    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        let request = SendRequest {
            service_id: &self.credentials.service_id,
            template_id: &self.credentials.template_id,
            user_id: &self.credentials.public_key,
            template_params: payload,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            service_id = %self.credentials.service_id,
            template_id = %self.credentials.template_id,
            "Sending receipt email"
        );

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = %payload.to_email, "Receipt email accepted");
        Ok(())
    }
}

/// Stand-in used when no credentials are configured; every send fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, _payload: &NotificationPayload) -> Result<(), NotifyError> {
        Err(NotifyError::NotConfigured)
    }
}
