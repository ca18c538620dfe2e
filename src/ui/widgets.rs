//! Rendering helpers shared by the screens.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::form::FormState;
use crate::ui::layout::{centered_rect_by_size, scroll_offset};
use crate::ui::theme::{
    ACTIVE_HIGHLIGHT, BRAND, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, POPUP_BORDER,
    STATUS_ERROR, STATUS_OK,
};

pub fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
}

pub fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("✗ {}", message),
        Style::default().fg(STATUS_ERROR),
    ))
}

pub fn success_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("✓ {}", message),
        Style::default().fg(STATUS_OK),
    ))
}

pub fn dim_line(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(HEADER_SEPARATOR),
    ))
}

/// One line per field, the focused one highlighted with a cursor mark.
pub fn form_lines(form: &FormState) -> Vec<Line<'static>> {
    let width = form
        .fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);
    form.fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == form.focused;
            let cursor = if focused { "▏" } else { "" };
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>width$}: ", field.label, width = width),
                    Style::default().fg(HEADER_SEPARATOR),
                ),
                Span::styled(
                    format!("{}{}", field.display(), cursor),
                    Style::default().fg(HEADER_TEXT),
                ),
            ]);
            if focused {
                line.style(Style::default().bg(ACTIVE_HIGHLIGHT))
            } else {
                line
            }
        })
        .collect()
}

/// Form with status lines below it.
pub fn render_form(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    form: &FormState,
    status: Vec<Line<'static>>,
) {
    let mut lines = form_lines(form);
    if !status.is_empty() {
        lines.push(Line::from(""));
        lines.extend(status);
    }
    let widget = Paragraph::new(lines)
        .block(panel(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

/// Lines of a selectable list, windowed so the selection stays visible.
pub fn list_lines(
    items: Vec<Line<'static>>,
    selected: usize,
    height: usize,
) -> Vec<Line<'static>> {
    let offset = scroll_offset(selected, height);
    items
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(index, line)| {
            if index == selected {
                line.style(Style::default().bg(ACTIVE_HIGHLIGHT))
            } else {
                line
            }
        })
        .collect()
}

/// Small bordered popup centered in `area`.
pub fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let width = content_width.saturating_add(4).max(40);
    let height = (lines.len() as u16).saturating_add(2);
    let popup = centered_rect_by_size(area, width, height);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), Style::default().fg(BRAND)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}
