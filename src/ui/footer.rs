use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Hints shown on every screen after the screen's own.
pub const GLOBAL_HINTS: &str = " │ Ctrl+F: Search │ Ctrl+Q: Quit";

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    /// Key hints on the left, version on the right. Hints are cut with an
    /// ellipsis when the terminal is too narrow for both.
    pub fn widget(&self, area: Rect, hints: &str) -> Paragraph<'static> {
        let style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let version = concat!("v", env!("CARGO_PKG_VERSION"), " ");
        let inner = area.width.saturating_sub(2) as usize;
        let room = inner.saturating_sub(version.chars().count());

        let hints = fit(&format!("{}{}", hints, GLOBAL_HINTS), room);
        let gap = room.saturating_sub(hints.chars().count());

        Paragraph::new(Line::from(vec![
            Span::raw(hints),
            Span::raw(" ".repeat(gap)),
            Span::raw(version),
        ]))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    if width > 0 {
        cut.push('…');
    }
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_hints_are_truncated() {
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 4), "abc");
        assert_eq!(fit("abc", 0), "");
    }
}
