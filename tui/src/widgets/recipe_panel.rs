//! Recipe Panel
//!
//! Wraps the streamed recipe text for the page. The first line is the
//! cocktail's name and is drawn bold; every following line is plain.

use ratatui::style::{Modifier, Style};
use textwrap::wrap;

use super::StyledLine;
use crate::theme::CHERRY;

/// Wrap `content` to `width` columns, emboldening the first line
pub fn recipe_lines(content: &str, width: usize) -> Vec<StyledLine> {
    let width = width.max(1);
    let title = Style::default().fg(CHERRY).add_modifier(Modifier::BOLD);
    let body = Style::default();

    content
        .split('\n')
        .enumerate()
        .flat_map(|(idx, line)| {
            let style = if idx == 0 { title } else { body };
            if line.is_empty() {
                vec![(String::new(), style)]
            } else {
                wrap(line, width)
                    .into_iter()
                    .map(|cow| (cow.into_owned(), style))
                    .collect()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_line_bold_only() {
        let lines = recipe_lines("Mojito\n- mint\n- lime", 40);
        let texts: Vec<&str> = lines.iter().map(|(t, _)| t.as_str()).collect();

        assert_eq!(texts, vec!["Mojito", "- mint", "- lime"]);
        assert!(lines[0].1.add_modifier.contains(Modifier::BOLD));
        assert!(!lines[1].1.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_long_title_wraps_and_stays_bold() {
        let lines = recipe_lines("Smoky Rosemary Grapefruit Paloma", 12);
        assert!(lines.len() > 1);
        assert!(lines
            .iter()
            .all(|(_, s)| s.add_modifier.contains(Modifier::BOLD)));
    }

    #[test]
    fn test_trailing_newline_keeps_blank_row() {
        let lines = recipe_lines("Mojito\n- mint\n- lime\n", 40);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3].0, "");
    }
}
