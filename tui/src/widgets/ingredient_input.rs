//! Ingredient Input
//!
//! A bordered multi-line text field. Editing is append-only from the cursor
//! at the end of the text, which is all a shopping-list style input needs.

use ratatui::style::Style;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use super::StyledLine;
use crate::theme::{dim, MINT};

/// Example shown while the field is empty
pub const PLACEHOLDER: &str = "e.g. Tito's vodka, coconut rum, blackberry brandy, triple sec, \
limes, peanut butter, soda water, etc.";

/// Visible text rows when the content is short
pub const MIN_ROWS: usize = 6;

const TITLE: &str = " Ingredients ";
const CURSOR: &str = "\u{258f}";

/// Ingredient text field
pub struct IngredientInput<'a> {
    text: &'a str,
    focused: bool,
}

impl<'a> IngredientInput<'a> {
    /// Field showing `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            focused: true,
        }
    }

    /// Whether to draw the cursor and highlighted border
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Lay the field out in `width` columns, borders included
    pub fn lines(&self, width: usize) -> Vec<StyledLine> {
        let width = width.max(8);
        let inner = width - 4;
        let border = if self.focused {
            Style::default().fg(MINT)
        } else {
            dim()
        };

        let mut rows: Vec<StyledLine> = if self.text.is_empty() {
            let mut rows: Vec<StyledLine> = wrap(PLACEHOLDER, inner)
                .into_iter()
                .map(|cow| (cow.into_owned(), dim()))
                .collect();
            if self.focused {
                if let Some(first) = rows.first_mut() {
                    first.0.insert_str(0, CURSOR);
                    first.0 = truncate_to_width(&first.0, inner);
                }
            }
            rows
        } else {
            let shown = if self.focused {
                format!("{}{CURSOR}", self.text)
            } else {
                self.text.to_string()
            };
            shown
                .split('\n')
                .flat_map(|line| {
                    if line.is_empty() {
                        vec![String::new()]
                    } else {
                        wrap(line, inner)
                            .into_iter()
                            .map(|cow| cow.into_owned())
                            .collect()
                    }
                })
                .map(|line| (line, Style::default()))
                .collect()
        };

        while rows.len() < MIN_ROWS {
            rows.push((String::new(), Style::default()));
        }

        let mut out = Vec::with_capacity(rows.len() + 2);
        let top_fill = inner.saturating_sub(TITLE.width());
        out.push((format!("╭─{TITLE}{}─╮", "─".repeat(top_fill)), border));
        for (text, style) in rows {
            let pad = inner.saturating_sub(text.width());
            out.push((format!("│ {text}{} │", " ".repeat(pad)), style));
        }
        out.push((format!("╰{}╯", "─".repeat(inner + 2)), border));
        out
    }
}

fn truncate_to_width(text: &str, max: usize) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        let mut next = out.clone();
        next.push(ch);
        if next.width() > max {
            break;
        }
        out = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_shows_placeholder() {
        let lines = IngredientInput::new("").focused(false).lines(40);
        assert!(lines[1].0.contains("e.g."));
        assert_eq!(lines.len(), MIN_ROWS + 2);
    }

    #[test]
    fn test_rows_have_equal_width() {
        let lines = IngredientInput::new("gin, tonic\nlime").lines(30);
        let widths: Vec<usize> = lines.iter().map(|(t, _)| t.width()).collect();
        assert!(widths.iter().all(|w| *w == 30), "{widths:?}");
    }

    #[test]
    fn test_newlines_start_new_rows() {
        let lines = IngredientInput::new("gin\nlime").focused(false).lines(30);
        assert!(lines[1].0.contains("gin"));
        assert!(lines[2].0.contains("lime"));
    }

    #[test]
    fn test_long_input_grows_field() {
        let text = "rum\n".repeat(10);
        let lines = IngredientInput::new(&text).lines(30);
        assert!(lines.len() > MIN_ROWS + 2);
    }

    #[test]
    fn test_cursor_at_end_when_focused() {
        let lines = IngredientInput::new("mint").lines(30);
        assert!(lines[1].0.contains("mint\u{258f}"));
    }
}
