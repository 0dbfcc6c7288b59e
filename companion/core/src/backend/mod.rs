//! Generation Backend Integration
//!
//! Access to the external recipe-generation endpoint through a common trait,
//! so the orchestrator can run against the real HTTP endpoint or a scripted
//! backend in tests.
//!
//! # Available Backends
//!
//! - **HTTP**: `POST {"prompt": ...}` to a generation proxy that streams plain
//!   text back (default)
//!
//! # Usage
//!
//! ```ignore
//! use companion_core::backend::{GenerateRequest, GenerationBackend, GenerationOutcome, HttpBackend};
//!
//! let backend = HttpBackend::new("http://localhost:3000/api/generate");
//! match backend.generate(&GenerateRequest::new(prompt)).await? {
//!     GenerationOutcome::Streaming(mut rx) => { /* read StreamChunks */ }
//!     GenerationOutcome::EmptyBody => { /* nothing to show */ }
//! }
//! ```

mod http;
mod traits;

pub use http::{pump_body, HttpBackend};
pub use traits::{
    ChunkReceiver, GenerateRequest, GenerationBackend, GenerationError, GenerationOutcome,
    StreamChunk,
};
