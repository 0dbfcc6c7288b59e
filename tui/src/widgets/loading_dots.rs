//! Loading Dots
//!
//! Three dots that fill in and drain while a recipe is being generated.

use std::time::Duration;

const FRAMES: [&str; 6] = ["•    ", "• •  ", "• • •", "  • •", "    •", "     "];
const FRAME_TIME: Duration = Duration::from_millis(200);

/// Frame-driven loading indicator
#[derive(Debug, Default)]
pub struct LoadingDots {
    elapsed: Duration,
}

impl LoadingDots {
    /// Start at the first frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the animation
    pub fn tick(&mut self, delta: Duration) {
        let cycle_ms = FRAME_TIME.as_millis() * FRAMES.len() as u128;
        let ms = (self.elapsed + delta).as_millis() % cycle_ms;
        self.elapsed = Duration::from_millis(u64::try_from(ms).unwrap_or_default());
    }

    /// Restart from the first frame
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// The current frame
    pub fn frame(&self) -> &'static str {
        let idx = (self.elapsed.as_millis() / FRAME_TIME.as_millis()) as usize;
        FRAMES[idx % FRAMES.len()]
    }
}
