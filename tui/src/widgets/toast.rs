//! Toast Widget
//!
//! A small boxed notification. It is drawn on its own layer at the top of the
//! screen, centred, the way the page's toasts appear.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::display::DisplayNotification;
use crate::theme::{notify_color, DIM_GRAY, TOAST_BG};

/// Horizontal padding inside the border
const PADDING: u16 = 1;

const DISMISS_HINT: &str = "Esc to dismiss";

/// A toast for one notification
pub struct Toast<'a> {
    notification: &'a DisplayNotification,
}

impl<'a> Toast<'a> {
    /// Toast for `notification`
    pub fn new(notification: &'a DisplayNotification) -> Self {
        Self { notification }
    }

    /// Width and height needed, limited to `max_width` columns
    pub fn size(&self, max_width: u16) -> (u16, u16) {
        let text_width = u16::try_from(self.notification.text().width()).unwrap_or(u16::MAX - 1);
        let hint_width = if self.notification.dismissible {
            DISMISS_HINT.width() as u16
        } else {
            0
        };
        let chrome = 2 + PADDING * 2;
        let inner_max = max_width.saturating_sub(chrome).max(1);
        // One spare column absorbs emoji whose width terminals disagree on
        let inner = (text_width.max(hint_width) + 1).clamp(1, inner_max);
        let rows = text_width.div_ceil(inner).max(1);
        let hint_rows = u16::from(self.notification.dismissible);
        (inner + chrome, rows + hint_rows + 2)
    }
}

impl Widget for Toast<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = notify_color(self.notification.level);

        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent).bg(TOAST_BG))
            .padding(ratatui::widgets::Padding::horizontal(PADDING))
            .style(Style::default().bg(TOAST_BG));

        let mut text = self.notification.text();
        if self.notification.dismissible {
            text.push('\n');
        }
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(text)
            .style(Style::default().fg(accent).bg(TOAST_BG))
            .wrap(Wrap { trim: true })
            .render(inner, buf);

        if self.notification.dismissible && inner.height > 0 {
            let y = inner.y + inner.height - 1;
            let x = inner.x + inner.width.saturating_sub(DISMISS_HINT.width() as u16);
            buf.set_string(x, y, DISMISS_HINT, Style::default().fg(DIM_GRAY).bg(TOAST_BG));
        }
    }
}
