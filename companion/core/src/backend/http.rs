//! HTTP Backend Implementation
//!
//! Talks to the generation proxy endpoint.
//!
//! # Wire Contract
//!
//! - Request: `POST <endpoint>`, `Content-Type: application/json`, body
//!   `{"prompt": "<string>"}`. No authentication headers; the proxy owns the
//!   upstream credentials.
//! - Response: any 2xx status with a body of UTF-8 text fragments. There is no
//!   envelope; every byte is display content.
//! - Non-2xx is a request failure. 204, or an explicit `Content-Length: 0`, is
//!   an empty body.

use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::StatusCode;
use tokio::sync::mpsc;

use super::traits::{
    GenerateRequest, GenerationBackend, GenerationError, GenerationOutcome, StreamChunk,
};
use crate::config::BackendSettings;
use crate::streaming::ChunkDecoder;

/// Longest slice of an error body that makes it into the log
const MAX_LOGGED_ERROR_BODY: usize = 256;

/// HTTP generation backend
#[derive(Clone)]
pub struct HttpBackend {
    /// Full URL of the generation endpoint
    endpoint: String,
    /// Buffered chunks between the body pump and the consumer
    channel_capacity: usize,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for the given endpoint with default client settings
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            channel_capacity: BackendSettings::default().channel_capacity,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create from configuration
    ///
    /// Only the connect phase is bounded by a timeout. The body itself may take
    /// as long as the model needs.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (TLS backend
    /// initialization failure).
    pub fn from_settings(settings: &BackendSettings) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(settings.connect_timeout_ms))
            .build()?;

        Ok(Self {
            endpoint: settings.endpoint.clone(),
            channel_capacity: settings.channel_capacity.max(1),
            http_client,
        })
    }

    /// The endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerationOutcome, GenerationError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            prompt_bytes = request.prompt.len(),
            "Sending generation request"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                body = %truncate(&body, MAX_LOGGED_ERROR_BODY),
                "Generation endpoint returned an error"
            );
            return Err(GenerationError::RequestFailed {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .map_or_else(|| status.to_string(), str::to_string),
            });
        }

        if status == StatusCode::NO_CONTENT || response.content_length() == Some(0) {
            tracing::debug!(status = status.as_u16(), "Generation response has no body");
            return Ok(GenerationOutcome::EmptyBody);
        }

        let (tx, rx) = mpsc::channel(self.channel_capacity);
        tokio::spawn(pump_body(response.bytes_stream(), tx));

        Ok(GenerationOutcome::Streaming(rx))
    }
}

/// Forward a byte stream into a chunk channel.
///
/// Each transport chunk is decoded and sent as one [`StreamChunk::Text`] in
/// arrival order. The stream ends with exactly one [`StreamChunk::Complete`] or
/// [`StreamChunk::Error`]. If the receiver goes away the pump stops reading.
pub async fn pump_body<S, B, E>(body: S, tx: mpsc::Sender<StreamChunk>)
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut body = std::pin::pin!(body);
    let mut decoder = ChunkDecoder::new();

    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(bytes) => {
                let text = decoder.decode(bytes.as_ref());
                if text.is_empty() {
                    continue;
                }
                if tx.send(StreamChunk::Text(text)).await.is_err() {
                    tracing::debug!("Chunk receiver dropped, stopping body pump");
                    return;
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    partial_char = decoder.has_pending(),
                    "Generation stream failed mid-body"
                );
                let _ = tx.send(StreamChunk::Error(e.to_string())).await;
                return;
            }
        }
    }

    let tail = decoder.finish();
    if !tail.is_empty() && tx.send(StreamChunk::Text(tail)).await.is_err() {
        return;
    }

    let _ = tx.send(StreamChunk::Complete).await;
}

/// Truncate on a character boundary
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
