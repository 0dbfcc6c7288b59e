//! Display Buffer

/// Text accumulated from one generation.
///
/// Append-only while a stream is active; reset at the start of every submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayBuffer {
    text: String,
    chunks: usize,
}

impl DisplayBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all content
    pub fn reset(&mut self) {
        self.text.clear();
        self.chunks = 0;
    }

    /// Append one decoded chunk
    pub fn append(&mut self, chunk: &str) {
        self.text.push_str(chunk);
        self.chunks += 1;
    }

    /// Current content
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether nothing has been appended since the last reset
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of chunks appended since the last reset
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    /// Content split on newlines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// The first line, which is the recipe name
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            self.lines().next()
        }
    }
}
