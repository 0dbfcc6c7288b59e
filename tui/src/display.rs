//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are derived from `CompanionMessage`s and used for rendering.
//!
//! The TUI keeps no business logic: the result text, the in-flight flag and
//! the visible toast are all whatever the companion last said they were.

use std::time::Duration;

use companion_core::{CompanionMessage, CompanionState, NotifyLevel};

/// The full display state for the TUI
#[derive(Debug)]
pub struct DisplayState {
    /// Page headline
    pub headline: String,
    /// "Cocktails generated so far" figure, once the companion has sent it
    pub generated_count: Option<u64>,
    /// Companion state
    pub companion_state: CompanionState,
    /// Result text shown in the recipe panel
    pub result: String,
    /// Whether the result is still streaming in
    pub streaming: bool,
    /// Last generation error, cleared by the next submit
    pub last_error: Option<String>,
    /// Visible notification (if any)
    pub notification: Option<DisplayNotification>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            headline: String::new(),
            generated_count: None,
            companion_state: CompanionState::Idle,
            result: String::new(),
            streaming: false,
            last_error: None,
            notification: None,
        }
    }
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `CompanionMessage` to update display state
    pub fn apply_message(&mut self, msg: CompanionMessage) {
        match msg {
            // Page messages
            CompanionMessage::Welcome {
                headline,
                generated_count,
            } => {
                self.headline = headline;
                self.generated_count = Some(generated_count);
            }
            CompanionMessage::State { state } => {
                self.companion_state = state;
            }

            // Generation messages
            CompanionMessage::StreamStarted => {
                self.result.clear();
                self.streaming = true;
                self.last_error = None;
            }
            CompanionMessage::Chunk { text } => {
                self.result.push_str(&text);
            }
            CompanionMessage::StreamEnded { content } => {
                self.result = content;
                self.streaming = false;
            }
            CompanionMessage::StreamFailed { error } => {
                // Partial text stays on screen
                self.last_error = Some(error);
                self.streaming = false;
            }

            // Notifications
            CompanionMessage::Notify {
                level,
                icon,
                message,
                duration_ms,
                dismissible,
            } => {
                self.notification = Some(DisplayNotification {
                    level,
                    icon,
                    message,
                    remaining: Duration::from_millis(duration_ms),
                    dismissible,
                });
            }
            CompanionMessage::DismissNotification => {
                self.clear_notification();
            }

            // Directives carried out by the app itself
            CompanionMessage::ScrollToResult
            | CompanionMessage::CopyToClipboard { .. }
            | CompanionMessage::Quit { .. } => {}
        }
    }

    /// Update timers, expiring the notification
    pub fn update(&mut self, delta: Duration) {
        if let Some(ref mut notification) = self.notification {
            notification.remaining = notification.remaining.saturating_sub(delta);
            if notification.remaining.is_zero() {
                self.notification = None;
            }
        }
    }

    /// Clear the notification
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    /// Whether the visible notification can be closed by the user
    pub fn has_dismissible_notification(&self) -> bool {
        self.notification.as_ref().is_some_and(|n| n.dismissible)
    }

    /// Whether a request is in flight (submit disabled)
    pub fn in_flight(&self) -> bool {
        self.companion_state.is_in_flight()
    }

    /// Whether the result section should be shown
    pub fn has_result(&self) -> bool {
        !self.result.is_empty()
    }
}

/// A notification to display
#[derive(Clone, Debug)]
pub struct DisplayNotification {
    /// Notification level
    pub level: NotifyLevel,
    /// Leading icon
    pub icon: Option<String>,
    /// Message content
    pub message: String,
    /// Time left on screen
    pub remaining: Duration,
    /// Whether the user can close it early
    pub dismissible: bool,
}

impl DisplayNotification {
    /// Icon and message as one line
    pub fn text(&self) -> String {
        match self.icon {
            Some(ref icon) => format!("{icon} {}", self.message),
            None => self.message.clone(),
        }
    }
}
