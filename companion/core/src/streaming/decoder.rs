//! Incremental UTF-8 decoding for streamed response bodies.

/// Decodes a sequence of byte chunks into text.
///
/// A character whose bytes straddle a chunk boundary is held back until the
/// rest of it arrives, so the concatenated output does not depend on where the
/// transport split the body. Invalid sequences become U+FFFD and decoding
/// carries on.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    /// Trailing bytes of an incomplete character from the previous chunk
    pending: Vec<u8>,
}

impl ChunkDecoder {
    /// Create a decoder with nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, returning all text that is complete so far
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(bytes);

        let mut out = String::with_capacity(input.len());
        let mut rest: &[u8] = &input;

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    if let Ok(text) = std::str::from_utf8(&rest[..valid]) {
                        out.push_str(text);
                    }

                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid + len..];
                        }
                        None => {
                            // Incomplete character at the end; wait for more bytes
                            self.pending = rest[valid..].to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Flush at end of stream.
    ///
    /// A dangling partial character can never complete now, so it decodes to a
    /// single U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            tracing::debug!(
                bytes = self.pending.len(),
                "Stream ended inside a multi-byte character"
            );
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    /// Whether bytes are being held for the next chunk
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
