//! Theme and Colors
//!
//! The cocktail bar palette: warm amber and citrus accents on the terminal's
//! own background, with a dim gray for secondary text.

use ratatui::style::{Color, Modifier, Style};

use companion_core::NotifyLevel;

// ============================================================================
// Bar Palette
// ============================================================================

/// Headline amber (aged rum)
pub const AMBER: Color = Color::Rgb(255, 176, 59);

/// Citrus accent for the active button
pub const LIME: Color = Color::Rgb(170, 220, 90);

/// Recipe title - cherry red
pub const CHERRY: Color = Color::Rgb(230, 70, 90);

/// Input border when the field has focus
pub const MINT: Color = Color::Rgb(120, 220, 180);

// ============================================================================
// UI Colors
// ============================================================================

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(110, 110, 110);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Warning yellow
pub const WARNING_YELLOW: Color = Color::Rgb(250, 210, 90);

/// Success green
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

/// Toast background
pub const TOAST_BG: Color = Color::Rgb(40, 40, 48);

/// Accent color for a notification level
pub fn notify_color(level: NotifyLevel) -> Color {
    match level {
        NotifyLevel::Info => Color::White,
        NotifyLevel::Success => SUCCESS_GREEN,
        NotifyLevel::Warning => WARNING_YELLOW,
        NotifyLevel::Error => ERROR_RED,
    }
}

/// Page headline style
pub fn headline() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Secondary text style
pub fn dim() -> Style {
    Style::default().fg(DIM_GRAY)
}
