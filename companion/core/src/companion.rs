//! Companion - The Orchestration Core
//!
//! The companion owns everything the cocktail page does that is not drawing:
//! - Ingredient text and the submission state machine
//! - Calling the generation backend and relaying its stream
//! - Deciding when to scroll, copy, and notify
//!
//! It is UI-agnostic and communicates only through:
//! - `CompanionMessage`: Commands sent TO the UI surface
//! - `SurfaceEvent`: Events received FROM the UI surface
//!
//! # Driving It
//!
//! Surfaces call [`Companion::handle_event`] for user actions and
//! [`Companion::poll_streaming`] once per frame. Neither call waits on the
//! network: the request runs on a spawned task and chunks are drained with
//! `try_recv`, so the surface stays responsive while a recipe streams in.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;

use crate::backend::{
    ChunkReceiver, GenerateRequest, GenerationBackend, GenerationError, GenerationOutcome,
    StreamChunk,
};
use crate::config::CompanionConfig;
use crate::events::{SurfaceEvent, SurfaceType};
use crate::messages::{CompanionMessage, CompanionState, NotifyLevel};
use crate::session::{GenerationSession, SessionState};
use crate::streaming::DisplayBuffer;

/// Toast shown after the result is copied
pub const COPIED_MESSAGE: &str = "Recipe copied to clipboard";

/// Icon shown with the copy toast
pub const COPIED_ICON: &str = "\u{2702}\u{fe0f}";

/// Toast shown when the endpoint answers with nothing to read
pub const EMPTY_BODY_MESSAGE: &str = "The bartender came back empty-handed. Try again?";

/// Most chunks relayed in one poll
const MAX_CHUNKS_PER_POLL: usize = 32;

/// Messages the last chunk of a stream can produce (end, state, scroll)
const TERMINAL_MESSAGES: usize = 3;

/// Pause between polls in [`Companion::settle`]
const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(2);

type PendingRequest = JoinHandle<Result<GenerationOutcome, GenerationError>>;

/// The companion - headless orchestration core
pub struct Companion<B: GenerationBackend> {
    /// Configuration
    config: CompanionConfig,
    /// Generation backend
    backend: Arc<B>,
    /// Ingredient text, display buffer, in-flight state
    session: GenerationSession,
    /// Channel to send messages to UI surface
    tx: mpsc::Sender<CompanionMessage>,
    /// Connected surface
    surface_type: Option<SurfaceType>,
    /// Request waiting for response headers
    pending: Option<PendingRequest>,
    /// Body of the current response
    streaming_rx: Option<ChunkReceiver>,
}

impl<B: GenerationBackend + 'static> Companion<B> {
    /// Create a new companion with the given backend
    ///
    /// The surface drains `tx` only between calls, so it needs room for at
    /// least `TERMINAL_MESSAGES + 1` messages or streams never advance.
    pub fn new(backend: B, config: CompanionConfig, tx: mpsc::Sender<CompanionMessage>) -> Self {
        Self {
            config,
            backend: Arc::new(backend),
            session: GenerationSession::new(),
            tx,
            surface_type: None,
            pending: None,
            streaming_rx: None,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> CompanionState {
        self.session.state().into()
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.session.in_flight()
    }

    /// The display buffer
    #[must_use]
    pub fn buffer(&self) -> &DisplayBuffer {
        self.session.buffer()
    }

    /// Current ingredient text
    #[must_use]
    pub fn ingredients(&self) -> &str {
        self.session.ingredients()
    }

    /// The connected surface, if any
    #[must_use]
    pub fn surface_type(&self) -> Option<&SurfaceType> {
        self.surface_type.as_ref()
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &CompanionConfig {
        &self.config
    }

    /// Handle an event from the UI surface
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for surfaces that need to
    /// stop on orchestration errors.
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        match event {
            SurfaceEvent::Connected { surface_type } => {
                tracing::info!(surface = surface_type.name(), "Surface connected");
                self.surface_type = Some(surface_type);

                self.send(CompanionMessage::Welcome {
                    headline: self.config.display.headline.clone(),
                    generated_count: self.config.display.generated_count,
                })
                .await;
                self.send(CompanionMessage::State {
                    state: self.state(),
                })
                .await;
            }

            SurfaceEvent::IngredientsEdited { text } => {
                self.session.set_ingredients(text);
            }

            SurfaceEvent::SubmitRequested => {
                self.submit().await;
            }

            SurfaceEvent::ResultClicked => {
                self.copy_result().await;
            }

            SurfaceEvent::NotificationDismissed => {
                self.send(CompanionMessage::DismissNotification).await;
            }

            SurfaceEvent::QuitRequested => {
                self.shutdown().await?;
            }
        }

        Ok(())
    }

    /// Start a generation from the current ingredient text
    async fn submit(&mut self) {
        let prompt = match self.session.begin_submit() {
            Ok(prompt) => prompt,
            Err(rejected) => {
                tracing::debug!(reason = %rejected, "Submit ignored");
                return;
            }
        };

        tracing::info!(
            backend = self.backend.name(),
            ingredients_bytes = self.session.ingredients().len(),
            "Starting generation"
        );

        self.send(CompanionMessage::State {
            state: CompanionState::Requesting,
        })
        .await;
        self.send(CompanionMessage::StreamStarted).await;

        let backend = Arc::clone(&self.backend);
        let request = GenerateRequest::new(prompt.into_inner());
        self.pending = Some(tokio::spawn(
            async move { backend.generate(&request).await },
        ));
    }

    /// Copy the current result to the clipboard
    async fn copy_result(&mut self) {
        if self.session.buffer().is_empty() {
            tracing::debug!("Result clicked with nothing to copy");
            return;
        }

        self.send(CompanionMessage::CopyToClipboard {
            text: self.session.buffer().as_str().to_string(),
        })
        .await;
        self.send(CompanionMessage::Notify {
            level: NotifyLevel::Success,
            icon: Some(COPIED_ICON.to_string()),
            message: COPIED_MESSAGE.to_string(),
            duration_ms: self.config.display.toast_duration_ms,
            dismissible: false,
        })
        .await;
    }

    /// Poll the in-flight request and drain any available chunks
    ///
    /// Call this regularly (once per frame). Never waits on the network.
    /// Returns true if there was activity.
    pub async fn poll_streaming(&mut self) -> bool {
        let mut activity = false;

        if self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = self.pending.take() {
                let outcome = match handle.await {
                    Ok(result) => result,
                    Err(e) => Err(GenerationError::Transport(format!(
                        "request task ended unexpectedly: {e}"
                    ))),
                };
                self.handle_outcome(outcome).await;
                activity = true;
            }
        }

        // Every send below must fit in the surface channel: the surface
        // drains it only after this call returns.
        let budget = self
            .tx
            .capacity()
            .saturating_sub(TERMINAL_MESSAGES)
            .min(MAX_CHUNKS_PER_POLL);
        if budget == 0 {
            return activity;
        }

        // Collect first so the receiver borrow ends before we send
        let chunks: Vec<StreamChunk> = {
            let Some(rx) = self.streaming_rx.as_mut() else {
                return activity;
            };

            let mut collected = Vec::new();
            while collected.len() < budget {
                match rx.try_recv() {
                    Ok(chunk) => {
                        let is_terminal =
                            matches!(chunk, StreamChunk::Complete | StreamChunk::Error(_));
                        collected.push(chunk);
                        if is_terminal {
                            break;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        tracing::debug!("Chunk channel closed without a terminal chunk");
                        collected.push(StreamChunk::Complete);
                        break;
                    }
                }
            }
            collected
        };

        if chunks.is_empty() {
            return activity;
        }

        for chunk in chunks {
            match chunk {
                StreamChunk::Text(text) => {
                    if self.session.append_chunk(&text) {
                        self.send(CompanionMessage::Chunk { text }).await;
                    }
                }
                StreamChunk::Complete => {
                    self.finish_stream().await;
                }
                StreamChunk::Error(error) => {
                    self.fail_stream(error).await;
                }
            }
        }

        true
    }

    /// React to the backend's answer to the request itself
    async fn handle_outcome(&mut self, outcome: Result<GenerationOutcome, GenerationError>) {
        match outcome {
            Ok(GenerationOutcome::Streaming(rx)) => {
                self.session.stream_opened();
                self.streaming_rx = Some(rx);
                self.set_state(SessionState::Streaming).await;
            }
            Ok(GenerationOutcome::EmptyBody) => {
                tracing::warn!("Generation endpoint returned no body");
                self.session.abort();
                self.send(CompanionMessage::StreamEnded {
                    content: String::new(),
                })
                .await;
                self.notify(NotifyLevel::Warning, EMPTY_BODY_MESSAGE, true)
                    .await;
                self.set_state(SessionState::Idle).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Generation request failed");
                self.session.abort();
                self.send(CompanionMessage::StreamFailed {
                    error: e.to_string(),
                })
                .await;
                self.notify(NotifyLevel::Error, &e.user_message(), true)
                    .await;
                self.set_state(SessionState::Idle).await;
            }
        }
    }

    /// The stream ended normally
    async fn finish_stream(&mut self) {
        self.streaming_rx = None;
        self.session.complete();

        tracing::info!(
            bytes = self.session.buffer().as_str().len(),
            chunks = self.session.buffer().chunk_count(),
            title = self.session.buffer().title().unwrap_or_default(),
            "Generation complete"
        );

        self.send(CompanionMessage::StreamEnded {
            content: self.session.buffer().as_str().to_string(),
        })
        .await;
        self.set_state(SessionState::Idle).await;
        // Nothing to bring into view
        if !self.session.buffer().is_empty() {
            self.send(CompanionMessage::ScrollToResult).await;
        }
    }

    /// The stream broke after it started; partial text stays
    async fn fail_stream(&mut self, error: String) {
        tracing::warn!(
            error = %error,
            partial_bytes = self.session.buffer().as_str().len(),
            "Generation stream failed"
        );

        self.streaming_rx = None;
        self.session.abort();

        self.send(CompanionMessage::StreamFailed { error }).await;
        self.notify(
            NotifyLevel::Error,
            "The recipe was cut off. Try again?",
            true,
        )
        .await;
        self.set_state(SessionState::Idle).await;
    }

    /// Poll until no request is in flight
    ///
    /// For headless surfaces and tests. Returns as soon as the state is idle.
    pub async fn settle(&mut self) {
        while self.in_flight() {
            if !self.poll_streaming().await {
                tokio::time::sleep(SETTLE_POLL_INTERVAL).await;
            }
        }
    }

    /// Shutdown the companion
    ///
    /// Drops any in-flight request; the body pump stops once it notices the
    /// receiver is gone.
    ///
    /// # Errors
    ///
    /// Currently infallible.
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.streaming_rx = None;
        if self.session.in_flight() {
            self.session.abort();
        }

        self.send(CompanionMessage::Quit {
            message: Some("Cheers!".to_string()),
        })
        .await;

        Ok(())
    }

    /// Set state and notify UI
    async fn set_state(&mut self, state: SessionState) {
        debug_assert_eq!(self.session.state(), state);
        self.send(CompanionMessage::State {
            state: state.into(),
        })
        .await;
    }

    /// Send notification
    async fn notify(&self, level: NotifyLevel, message: &str, dismissible: bool) {
        self.send(CompanionMessage::Notify {
            level,
            icon: None,
            message: message.to_string(),
            duration_ms: self.config.display.toast_duration_ms,
            dismissible,
        })
        .await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: CompanionMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}
