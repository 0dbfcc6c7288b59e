//! Page Widgets
//!
//! The page is one tall column of styled lines that scrolls as a whole. Most
//! widgets here therefore produce lines for the page builder rather than
//! drawing into a fixed rectangle. The toast is the exception: it floats on
//! its own layer and renders as a regular ratatui widget.

pub mod ingredient_input;
pub mod loading_dots;
pub mod recipe_panel;
pub mod toast;

use ratatui::style::Style;

pub use ingredient_input::IngredientInput;
pub use loading_dots::LoadingDots;
pub use recipe_panel::recipe_lines;
pub use toast::Toast;

/// One rendered row of the page
pub type StyledLine = (String, Style);
