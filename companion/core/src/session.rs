//! Submission Session
//!
//! Tracks the state of a single page: the ingredient text being edited, the
//! display buffer the current (or last) generation streams into, and whether a
//! request is in flight.
//!
//! ```text
//!   Idle ──submit──▶ Requesting ──stream opened──▶ Streaming
//!    ▲                   │                             │
//!    └──failure/empty────┘◀────complete / error────────┘
//! ```
//!
//! Every failure returns to `Idle`; there is no terminal faulted state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prompt::{compose_prompt, ComposedPrompt};
use crate::streaming::DisplayBuffer;

/// Where the session is in the submit cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Ready for a submit
    #[default]
    Idle,
    /// Request sent, waiting for response headers
    Requesting,
    /// Response body is being read
    Streaming,
}

impl SessionState {
    /// Whether a request is in flight in this state
    #[must_use]
    pub fn is_in_flight(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Why a submit was not started
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    /// A generation is already running
    #[error("a generation is already in flight")]
    InFlight,
}

/// Per-page state for ingredient editing and generation
#[derive(Debug, Default)]
pub struct GenerationSession {
    ingredients: String,
    buffer: DisplayBuffer,
    state: SessionState,
}

impl GenerationSession {
    /// Create an idle session with empty ingredient text
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current ingredient text
    #[must_use]
    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    /// Replace the ingredient text; allowed at any time, including mid-stream
    pub fn set_ingredients(&mut self, text: impl Into<String>) {
        self.ingredients = text.into();
    }

    /// The display buffer
    #[must_use]
    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Start a submit.
    ///
    /// Clears the display buffer, moves to `Requesting` and returns a prompt
    /// freshly composed from the current ingredient text.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitRejected::InFlight`] without touching any state if a
    /// request is already in flight.
    pub fn begin_submit(&mut self) -> Result<ComposedPrompt, SubmitRejected> {
        if self.in_flight() {
            return Err(SubmitRejected::InFlight);
        }

        self.buffer.reset();
        self.state = SessionState::Requesting;
        Ok(compose_prompt(&self.ingredients))
    }

    /// Response headers arrived with a body to read
    pub fn stream_opened(&mut self) {
        if self.state != SessionState::Requesting {
            tracing::warn!(state = ?self.state, "Stream opened outside Requesting");
        }
        self.state = SessionState::Streaming;
    }

    /// Append one decoded chunk. Returns false if the chunk was dropped.
    pub fn append_chunk(&mut self, text: &str) -> bool {
        if self.state != SessionState::Streaming {
            tracing::debug!(
                state = ?self.state,
                bytes = text.len(),
                "Ignoring chunk outside Streaming"
            );
            return false;
        }
        self.buffer.append(text);
        true
    }

    /// The stream finished normally
    pub fn complete(&mut self) {
        self.state = SessionState::Idle;
    }

    /// The request failed, had no body, or the stream broke.
    ///
    /// Whatever already reached the buffer stays there.
    pub fn abort(&mut self) {
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = GenerationSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.in_flight());
        assert!(session.buffer().is_empty());
        assert_eq!(session.ingredients(), "");
    }

    #[test]
    fn test_success_path() {
        let mut session = GenerationSession::new();
        session.set_ingredients("gin, basil");

        let prompt = session.begin_submit().unwrap();
        assert!(prompt.as_str().contains("gin, basil"));
        assert_eq!(session.state(), SessionState::Requesting);
        assert!(session.in_flight());

        session.stream_opened();
        assert_eq!(session.state(), SessionState::Streaming);

        for chunk in ["Mojito\n", "- mint\n", "- lime\n"] {
            assert!(session.append_chunk(chunk));
        }
        session.complete();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.buffer().as_str(), "Mojito\n- mint\n- lime\n");
    }

    #[test]
    fn test_submit_rejected_while_in_flight() {
        let mut session = GenerationSession::new();
        session.begin_submit().unwrap();
        session.stream_opened();
        session.append_chunk("partial");

        assert_eq!(session.begin_submit(), Err(SubmitRejected::InFlight));
        assert_eq!(session.buffer().as_str(), "partial");
        assert_eq!(session.state(), SessionState::Streaming);
    }

    #[test]
    fn test_failure_restores_idle() {
        let mut session = GenerationSession::new();
        session.begin_submit().unwrap();
        session.abort();

        assert!(!session.in_flight());
        assert!(session.begin_submit().is_ok());
    }

    #[test]
    fn test_abort_keeps_partial_buffer() {
        let mut session = GenerationSession::new();
        session.begin_submit().unwrap();
        session.stream_opened();
        session.append_chunk("Negroni\n- gin");
        session.abort();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.buffer().as_str(), "Negroni\n- gin");
    }

    #[test]
    fn test_submit_resets_previous_result() {
        let mut session = GenerationSession::new();
        session.begin_submit().unwrap();
        session.stream_opened();
        session.append_chunk("old recipe");
        session.complete();

        session.begin_submit().unwrap();
        assert!(session.buffer().is_empty());
    }

    #[test]
    fn test_chunks_outside_streaming_ignored() {
        let mut session = GenerationSession::new();
        assert!(!session.append_chunk("stray"));

        session.begin_submit().unwrap();
        assert!(!session.append_chunk("too early"));
        assert!(session.buffer().is_empty());
    }

    #[test]
    fn test_editing_allowed_mid_stream() {
        let mut session = GenerationSession::new();
        session.set_ingredients("rum");
        session.begin_submit().unwrap();
        session.set_ingredients("rum, cola");
        assert_eq!(session.ingredients(), "rum, cola");
        assert!(session.in_flight());
    }
}
