//! Clipboard Access
//!
//! The terminal has no clipboard API of its own, so copies go out as an
//! OSC 52 escape sequence and the terminal emulator forwards them to the
//! system clipboard. Terminals that ignore OSC 52 simply drop the copy.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crossterm::{execute, Command};
use thiserror::Error;

/// Clipboard write failure
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Writing the escape sequence failed
    #[error("failed to write to the terminal clipboard: {0}")]
    Io(#[from] io::Error),
}

/// Something that can receive copied text
pub trait Clipboard: Send {
    /// Replace the clipboard contents with `text`
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard backed by the terminal's OSC 52 support
pub struct Osc52Clipboard<W: Write + Send> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    /// Write copies to stdout
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    /// Write copies to an arbitrary terminal handle
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        execute!(self.out, SetClipboard(text))?;
        tracing::debug!(bytes = text.len(), "Copied to clipboard via OSC 52");
        Ok(())
    }
}

/// Sets the system clipboard through an OSC 52 escape sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetClipboard<'a>(pub &'a str);

impl Command for SetClipboard<'_> {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b]52;c;{}\x1b\\", base64_encode(self.0.as_bytes()))
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "OSC 52 needs a terminal with ANSI support",
        ))
    }
}

/// Standard base64 with padding
fn base64_encode(bytes: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let mut n: u32 = 0;
        for (i, &byte) in chunk.iter().enumerate() {
            n |= u32::from(byte) << (16 - i * 8);
        }

        let digits = chunk.len() + 1;
        for i in 0..digits {
            out.push(char::from(ALPHABET[((n >> (18 - i * 6)) & 0x3F) as usize]));
        }
        for _ in digits..4 {
            out.push('=');
        }
    }
    out
}

/// In-memory clipboard that records every copy
///
/// Clones share the same history, so a test can keep one handle and give the
/// other to the app.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything copied so far, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    /// Most recent copy
    pub fn latest(&self) -> Option<String> {
        self.entries().pop()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "clipboard lock poisoned"))?;
        entries.push(text.to_string());
        Ok(())
    }
}
