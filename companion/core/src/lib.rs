//! Companion Core - Headless Orchestration for the Cocktail Companion
//!
//! This crate holds everything the cocktail page does apart from drawing:
//! composing the bartender prompt, calling the generation endpoint, streaming
//! the recipe into a display buffer, and deciding when to scroll, copy, and
//! notify. It can drive a terminal UI or run headless for tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      UI Surfaces                         │
//! │        ┌─────────┐              ┌──────────────┐         │
//! │        │   TUI   │              │   Headless   │         │
//! │        │(ratatui)│              │   (tests)    │         │
//! │        └────┬────┘              └──────┬───────┘         │
//! │             └───────────┬──────────────┘                 │
//! │                  SurfaceEvent (up)                       │
//! │                CompanionMessage (down)                   │
//! └─────────────────────────┼────────────────────────────────┘
//!                           │
//! ┌─────────────────────────┼────────────────────────────────┐
//! │                   COMPANION CORE                         │
//! │  ┌──────────────────────┴─────────────────────────────┐  │
//! │  │                    Companion                       │  │
//! │  │  ┌──────────┐  ┌──────────┐  ┌──────────────────┐  │  │
//! │  │  │  Prompt  │  │ Session  │  │ Backend (HTTP)   │  │  │
//! │  │  │ Composer │  │  State   │  │ + stream decode  │  │  │
//! │  │  └──────────┘  └──────────┘  └──────────────────┘  │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use companion_core::{
//!     backend::HttpBackend, load_config, Companion, SurfaceEvent, SurfaceType,
//! };
//! use tokio::sync::mpsc;
//!
//! let config = load_config()?;
//! let backend = HttpBackend::from_settings(&config.backend)?;
//! let (tx, mut rx) = mpsc::channel(100);
//! let mut companion = Companion::new(backend, config, tx);
//!
//! companion.handle_event(SurfaceEvent::Connected { surface_type: SurfaceType::Headless }).await?;
//! companion.handle_event(SurfaceEvent::IngredientsEdited { text: "rum, lime".into() }).await?;
//! companion.handle_event(SurfaceEvent::SubmitRequested).await?;
//!
//! loop {
//!     companion.poll_streaming().await;
//!     while let Ok(msg) = rx.try_recv() {
//!         // Render message
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`prompt`]: Prompt composition from ingredient text
//! - [`backend`]: Generation endpoint abstraction and the HTTP client
//! - [`streaming`]: Incremental decoding and the display buffer
//! - [`session`]: Submission state machine
//! - [`companion`]: Main `Companion` struct
//! - [`events`]: Events from UI surfaces to the companion
//! - [`messages`]: Messages from the companion to UI surfaces
//! - [`config`]: TOML/environment configuration
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod companion;
pub mod config;
pub mod events;
pub mod messages;
pub mod prompt;
pub mod session;
pub mod streaming;

// Re-exports for convenience
pub use backend::{
    GenerateRequest, GenerationBackend, GenerationError, GenerationOutcome, HttpBackend,
    StreamChunk,
};
pub use companion::Companion;
pub use events::{SurfaceEvent, SurfaceType};
pub use messages::{CompanionMessage, CompanionState, NotifyLevel};
pub use prompt::{compose_prompt, ComposedPrompt};
pub use session::{GenerationSession, SessionState, SubmitRejected};
pub use streaming::{ChunkDecoder, DisplayBuffer};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, BackendSettings, CompanionConfig,
    ConfigError, ConfigOverrides, ConfigSource, DisplaySettings,
};
