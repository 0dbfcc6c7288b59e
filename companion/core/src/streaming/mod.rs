//! Streaming Response Consumption
//!
//! The generation endpoint answers with a plain byte stream. This module holds
//! the two pieces that turn it into what the user sees:
//!
//! - [`ChunkDecoder`]: incremental UTF-8 decoding that tolerates multi-byte
//!   characters split across transport chunks
//! - [`DisplayBuffer`]: the append-only text accumulated during one
//!   generation
//!
//! # Ordering
//!
//! Chunks are decoded and appended strictly in arrival order. Nothing here
//! reorders, coalesces, or retries.

mod buffer;
mod decoder;

pub use buffer::DisplayBuffer;
pub use decoder::ChunkDecoder;

// Re-export StreamChunk from backend for convenience
pub use crate::backend::StreamChunk;
