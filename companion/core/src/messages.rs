//! Companion Messages
//!
//! Messages sent from the companion to UI surfaces. Surfaces are renderers:
//! they show what these messages say and keep no business logic of their own.

use serde::{Deserialize, Serialize};

use crate::session::SessionState;

/// Messages from companion to UI surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanionMessage {
    // ============================================
    // Page Messages
    // ============================================
    /// Static page content, sent once per connection
    Welcome {
        /// Page headline
        headline: String,
        /// "Cocktails generated so far" figure (display only)
        generated_count: u64,
    },

    /// Submission state changed
    State {
        /// The new state
        state: CompanionState,
    },

    // ============================================
    // Generation Messages
    // ============================================
    /// A new generation started; surfaces clear the result panel
    StreamStarted,

    /// A decoded chunk to append to the result panel
    Chunk {
        /// The chunk text
        text: String,
    },

    /// Generation completed
    StreamEnded {
        /// Full result text
        content: String,
    },

    /// Generation failed; any partial result stays on screen
    StreamFailed {
        /// Error description
        error: String,
    },

    // ============================================
    // Surface Directives
    // ============================================
    /// Scroll so the result heading is in view
    ScrollToResult,

    /// Write text to the system clipboard
    CopyToClipboard {
        /// Exact text to copy
        text: String,
    },

    /// Show a transient notification
    Notify {
        /// Notification level
        level: NotifyLevel,
        /// Leading icon
        icon: Option<String>,
        /// Message content
        message: String,
        /// How long to show it
        duration_ms: u64,
        /// Whether the user can close it early
        dismissible: bool,
    },

    /// Hide the visible notification
    DismissNotification,

    /// Request surface to quit
    Quit {
        /// Optional goodbye message
        message: Option<String>,
    },
}

/// Notification levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Success
    Success,
}

/// Companion operational states as seen by surfaces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanionState {
    /// Ready for a submit
    Idle,
    /// Waiting for the endpoint to answer
    Requesting,
    /// Result is streaming in
    Streaming,
}

impl CompanionState {
    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Requesting => "Mixing...",
            Self::Streaming => "Pouring...",
        }
    }

    /// Whether the submit control should be disabled
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl From<SessionState> for CompanionState {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Idle => Self::Idle,
            SessionState::Requesting => Self::Requesting,
            SessionState::Streaming => Self::Streaming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_companion_state_description() {
        assert_eq!(CompanionState::Idle.description(), "Ready");
        assert_eq!(CompanionState::Streaming.description(), "Pouring...");
    }

    #[test]
    fn test_state_from_session() {
        assert_eq!(CompanionState::from(SessionState::Idle), CompanionState::Idle);
        assert!(CompanionState::from(SessionState::Requesting).is_in_flight());
        assert!(CompanionState::from(SessionState::Streaming).is_in_flight());
    }
}
