//! Cocktail Companion TUI - Terminal page for the cocktail generator
//!
//! This crate renders the companion's page in a full-screen terminal: an
//! ingredient field, a submit button, and the generated recipe streaming in
//! below it.
//!
//! # Architecture
//!
//! - **App**: Event loop and thin client over the embedded Companion
//! - **Compositor**: Layered rendering with z-ordering for toasts
//! - **Page**: The scrollable page laid out as styled rows
//! - **Widgets**: Ingredient field, recipe panel, loading dots, toast
//! - **Clipboard**: OSC 52 copy with an in-memory stand-in for tests

pub mod app;
pub mod clipboard;
pub mod companion_client;
pub mod compositor;
pub mod display;
pub mod page;
pub mod theme;
pub mod widgets;

pub use app::App;
