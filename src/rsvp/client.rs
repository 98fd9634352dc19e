use crate::rsvp::submission::RsvpSubmission;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to reach RSVP endpoint: {0}")]
    Request(#[from] reqwest::Error),

    #[error("RSVP endpoint error ({status}): {message}")]
    Status { status: u16, message: String },
}

/// Delivers a validated submission to the server. One call, one request.
#[async_trait]
pub trait RsvpTransport: Send + Sync {
    async fn send(&self, submission: &RsvpSubmission) -> Result<(), TransportError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// JSON-over-HTTP transport posting to `POST /api/rsvp`.
///
/// Uses reqwest's default timeouts; there is no cancellation once sent.
#[derive(Debug, Clone)]
pub struct HttpRsvpClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRsvpClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RsvpTransport for HttpRsvpClient {
    async fn send(&self, submission: &RsvpSubmission) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.error)
            .unwrap_or(body);

        Err(TransportError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
