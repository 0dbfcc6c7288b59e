//! Companion Client
//!
//! Thin wrapper around the Companion for TUI integration.
//! This client embeds the Companion directly (no network between them) and
//! provides a convenient interface for sending events and receiving messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any business logic.
//! All orchestration happens in the Companion. The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to the Companion
//! 3. Receive CompanionMessages
//! 4. Render display state based on messages

use tokio::sync::mpsc;

use companion_core::{
    Companion, CompanionConfig, CompanionMessage, CompanionState, GenerationBackend,
    HttpBackend, SurfaceEvent, SurfaceType,
};

/// Messages the Companion can queue between two drains
const SURFACE_CHANNEL_CAPACITY: usize = 100;

/// Client for communicating with the embedded Companion
pub struct CompanionClient<B: GenerationBackend + 'static = HttpBackend> {
    /// The embedded Companion instance
    companion: Companion<B>,
    /// Receiver for messages from the Companion
    rx: mpsc::Receiver<CompanionMessage>,
}

impl<B: GenerationBackend + 'static> CompanionClient<B> {
    /// Create a client around a new Companion using `backend`
    pub fn new(backend: B, config: CompanionConfig) -> Self {
        let (tx, rx) = mpsc::channel(SURFACE_CHANNEL_CAPACITY);
        let companion = Companion::new(backend, config, tx);
        Self { companion, rx }
    }

    /// Connect this surface to the Companion
    pub async fn connect(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::Connected {
            surface_type: SurfaceType::Tui,
        })
        .await
    }

    /// Report the full ingredient text after an edit
    pub async fn edit_ingredients(&mut self, text: String) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::IngredientsEdited { text }).await
    }

    /// Ask for a cocktail from the current ingredients
    pub async fn submit(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::SubmitRequested).await
    }

    /// Notify the Companion that the result panel was clicked
    pub async fn result_clicked(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::ResultClicked).await
    }

    /// Close the visible toast
    pub async fn dismiss_notification(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::NotificationDismissed).await
    }

    /// Notify the Companion that the user wants to quit
    pub async fn request_quit(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::QuitRequested).await
    }

    /// Poll for streaming chunks (must be called regularly)
    pub async fn poll_streaming(&mut self) -> bool {
        self.companion.poll_streaming().await
    }

    /// Receive all pending messages from the Companion (non-blocking)
    pub fn recv_all(&mut self) -> Vec<CompanionMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Configuration the Companion runs with
    pub fn config(&self) -> &CompanionConfig {
        self.companion.config()
    }

    /// Get the current Companion state
    pub fn state(&self) -> CompanionState {
        self.companion.state()
    }

    /// Send raw surface event to the Companion
    pub async fn send_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        self.companion.handle_event(event).await
    }
}
