//! Page Layout
//!
//! Builds the whole scrollable page as one column of styled rows: header,
//! counter, instructions, ingredient field, button and (once there is text)
//! the generated recipe. The app draws a window of these rows into the page
//! layer and uses the recorded regions for mouse hit testing and for
//! scrolling the result heading into view.

use std::ops::Range;

use ratatui::style::{Modifier, Style};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::display::DisplayState;
use crate::theme::{dim, headline, AMBER, LIME};
use crate::widgets::{recipe_lines, IngredientInput, StyledLine};

/// Left and right margin in columns
pub const MARGIN: u16 = 2;

/// Page title
pub const TITLE: &str = "\u{1f378} Cocktail Companion AI";

/// First numbered instruction above the ingredient field
pub const INSTRUCTION: &str = "1. Write a list of ingredients you have on hand \
(or just add a few of your favorite ingredients).";

/// Submit button label
pub const BUTTON_LABEL: &str = "[ Generate your cocktail \u{2192} ]";

/// Heading above the result panel
pub const RESULT_HEADING: &str = "Your generated cocktail";

/// Hint under the result panel
pub const COPY_HINT: &str = "Click the recipe or press Ctrl+Y to copy it";

/// Inputs for one page build
pub struct PageView<'a> {
    /// Layer width in columns
    pub width: u16,
    /// Display state from the companion
    pub display: &'a DisplayState,
    /// Ingredient text as typed
    pub ingredients: &'a str,
    /// Whether the ingredient field has focus
    pub focused: bool,
    /// Current loading dots frame
    pub dots: &'a str,
}

/// Row ranges that respond to the mouse or to scrolling
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRegions {
    /// Row of the submit button
    pub button_row: usize,
    /// Columns covered by the button, relative to the margin
    pub button_cols: Range<u16>,
    /// Row of the result heading, when a result is shown
    pub result_heading: Option<usize>,
    /// Rows of the result panel
    pub result_rows: Range<usize>,
}

/// A laid out page
#[derive(Debug, Default)]
pub struct Page {
    /// Every row, top to bottom
    pub lines: Vec<StyledLine>,
    /// Interactive regions
    pub regions: PageRegions,
}

impl Page {
    /// Lay out the page for `view`
    pub fn build(view: &PageView<'_>) -> Self {
        let inner = usize::from(view.width.saturating_sub(MARGIN * 2)).max(8);
        let mut lines: Vec<StyledLine> = Vec::new();
        let blank = |lines: &mut Vec<StyledLine>| {
            lines.push((String::new(), Style::default()));
        };

        // Header
        blank(&mut lines);
        lines.push((TITLE.to_string(), headline()));
        if !view.display.headline.is_empty() {
            let style = Style::default().fg(AMBER);
            push_wrapped(&mut lines, &view.display.headline, inner, style);
        }
        if let Some(count) = view.display.generated_count {
            blank(&mut lines);
            lines.push((
                format!("{} cocktails generated so far.", group_thousands(count)),
                dim(),
            ));
        }
        blank(&mut lines);

        // Ingredient field
        push_wrapped(&mut lines, INSTRUCTION, inner, Style::default());
        blank(&mut lines);
        lines.extend(
            IngredientInput::new(view.ingredients)
                .focused(view.focused)
                .lines(inner),
        );
        blank(&mut lines);

        // Button
        let button_row = lines.len();
        let (label, style) = if view.display.in_flight() {
            (
                format!(
                    "[ {} {} ]",
                    view.display.companion_state.description(),
                    view.dots
                ),
                dim(),
            )
        } else {
            (
                BUTTON_LABEL.to_string(),
                Style::default().fg(LIME).add_modifier(Modifier::BOLD),
            )
        };
        let button_cols = 0..u16::try_from(label.width()).unwrap_or(u16::MAX);
        lines.push((label, style));
        blank(&mut lines);

        // Result
        let mut result_heading = None;
        let mut result_rows = 0..0;
        if view.display.has_result() {
            lines.push(("\u{2500}".repeat(inner), dim()));
            blank(&mut lines);
            result_heading = Some(lines.len());
            lines.push((RESULT_HEADING.to_string(), headline()));
            blank(&mut lines);

            let start = lines.len();
            lines.extend(recipe_lines(&view.display.result, inner));
            result_rows = start..lines.len();

            blank(&mut lines);
            if !view.display.streaming {
                lines.push((COPY_HINT.to_string(), dim()));
            }
        }

        Self {
            lines,
            regions: PageRegions {
                button_row,
                button_cols,
                result_heading,
                result_rows,
            },
        }
    }

    /// Total rows
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

fn push_wrapped(lines: &mut Vec<StyledLine>, text: &str, width: usize, style: Style) {
    lines.extend(
        wrap(text, width)
            .into_iter()
            .map(|cow| (cow.into_owned(), style)),
    );
}

/// 47118 -> "47,118"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
