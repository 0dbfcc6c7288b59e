//! Generation Backend Traits
//!
//! Trait definitions for the generation endpoint. The orchestrator only sees
//! [`GenerationBackend`]; how the request travels (HTTP, a test script) is the
//! implementation's business.
//!
//! # Result Shape
//!
//! A generation call has three distinct outcomes and each is explicit:
//!
//! - `Ok(GenerationOutcome::Streaming(rx))` - the body is streaming in
//! - `Ok(GenerationOutcome::EmptyBody)` - success status but nothing to read
//! - `Err(GenerationError)` - non-success status or transport failure
//!
//! None of them panic or escape past the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Chunk events from a streaming generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamChunk {
    /// Decoded text, in arrival order
    Text(String),
    /// The body ended normally
    Complete,
    /// The body failed part way through
    Error(String),
}

/// Receiving end of a streaming generation.
///
/// Finite and non-restartable: once drained it cannot be replayed, and
/// dropping it stops the producer.
pub type ChunkReceiver = mpsc::Receiver<StreamChunk>;

/// Payload sent to the generation endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The composed prompt
    pub prompt: String,
}

impl GenerateRequest {
    /// Create a request carrying the given prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Successful outcomes of a generation call
#[derive(Debug)]
pub enum GenerationOutcome {
    /// The response body is being streamed
    Streaming(ChunkReceiver),
    /// The endpoint answered with success but no body
    EmptyBody,
}

/// Generation failures
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The endpoint answered with a non-success status
    #[error("Generation request failed with status {status}: {reason}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase (or the status line when unknown)
        reason: String,
    },

    /// No response was received at all
    #[error("Could not reach the generation endpoint: {0}")]
    Transport(String),
}

impl GenerationError {
    /// Short text suitable for a notification
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::RequestFailed { status, reason } => {
                format!("Couldn't mix that one ({status} {reason}). Try again?")
            }
            Self::Transport(_) => {
                "Couldn't reach the cocktail generator. Try again?".to_string()
            }
        }
    }
}

/// Generation backend trait
///
/// Implement this to point the companion at a different endpoint or to script
/// responses in tests.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Backend name for logs (e.g., "HTTP")
    fn name(&self) -> &str;

    /// Issue exactly one generation request.
    ///
    /// On success the returned receiver yields [`StreamChunk::Text`] values in
    /// arrival order, terminated by [`StreamChunk::Complete`] or
    /// [`StreamChunk::Error`].
    async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerationOutcome, GenerationError>;
}
