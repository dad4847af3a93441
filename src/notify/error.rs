use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while delivering a receipt notification
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification credentials are not configured")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("email service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("notification timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Other(String),
}
