use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Why a dispatch did not succeed. `Display` renders the exact message the
/// UI shows the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No webhook URL configured; dispatch refused without a network call.
    #[error("Configuração do webhook ausente.")]
    MissingUrl,

    /// The webhook answered with a non-2xx status. The body is never parsed,
    /// so the message is fixed regardless of what the server said.
    #[error("Erro ao enviar dados para o webhook")]
    RemoteRejection { status: u16 },

    /// Network-level failure (or encoding failure) with a human-readable
    /// description, surfaced unchanged.
    #[error("{0}")]
    Transport(String),

    /// Failure with no usable description.
    #[error("Ocorreu um erro ao enviar os dados.")]
    Unknown,
}

/// Post-dispatch result surfaced to the controller.
pub type Outcome = Result<(), DispatchError>;

/// Transport-level failure reported by a [`WebhookTransport`].
#[derive(Debug, Clone)]
pub struct TransportFailure {
    pub description: Option<String>,
}

/// The single seam between the pipeline and the network. Production uses
/// [`HttpTransport`]; tests substitute stubs so no socket is ever opened.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// POST `body` as `application/json` to `url`; return the HTTP status.
    async fn post_json(&self, url: &str, body: String) -> Result<u16, TransportFailure>;
}

/// reqwest-backed transport. No extra headers, no auth, no retries; the
/// platform default timeout governs, and the response body is discarded.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookTransport for HttpTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<u16, TransportFailure> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TransportFailure { description: Some(e.to_string()) })?;

        Ok(response.status().as_u16())
    }
}

/// Single-shot webhook dispatcher. Stateless: the controller serializes
/// calls, but concurrent use from separate controllers is fine.
#[derive(Clone)]
pub struct WebhookClient {
    transport: Arc<dyn WebhookTransport>,
}

impl WebhookClient {
    pub fn new(transport: Arc<dyn WebhookTransport>) -> Self {
        Self { transport }
    }

    /// Production client backed by [`HttpTransport`].
    pub fn http() -> Self {
        Self::new(Arc::new(HttpTransport::new()))
    }

    /// POST the payload and classify the result. Success iff the status is
    /// 2xx; everything else maps onto [`DispatchError`].
    pub async fn dispatch(&self, url: &str, payload: &Value) -> Outcome {
        if url.is_empty() {
            return Err(DispatchError::MissingUrl);
        }

        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => return Err(DispatchError::Transport(e.to_string())),
        };

        match self.transport.post_json(url, body).await {
            Ok(status) if (200..300).contains(&status) => Ok(()),
            Ok(status) => {
                tracing::warn!(status, url, "webhook rejected dispatch");
                Err(DispatchError::RemoteRejection { status })
            }
            Err(TransportFailure { description: Some(description) }) => {
                tracing::warn!(error = %description, url, "webhook transport failure");
                Err(DispatchError::Transport(description))
            }
            Err(TransportFailure { description: None }) => Err(DispatchError::Unknown),
        }
    }
}
