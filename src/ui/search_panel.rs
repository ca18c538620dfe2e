//! Search overlay drawn above the current screen.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::search::{SearchField, SearchPanelState};
use crate::ui::layout::centered_rect_by_size;
use crate::ui::theme::{
    ACTIVE_HIGHLIGHT, BRAND, FAVORITE, HEADER_SEPARATOR, HEADER_TEXT, POPUP_BORDER, STATUS_ERROR,
};
use crate::ui::widgets::{dim_line, list_lines};

const PANEL_WIDTH: u16 = 72;

fn field_value(state: &SearchPanelState, field: SearchField) -> String {
    match field {
        SearchField::Query => state.query.query.clone(),
        SearchField::Tags => state.query.tags.clone(),
        SearchField::Person => state.query.person.clone(),
        SearchField::Favorite => {
            if state.query.favorite {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            }
        }
    }
}

fn field_lines(state: &SearchPanelState) -> Vec<Line<'static>> {
    let width = SearchField::ALL
        .iter()
        .map(|f| f.label().chars().count())
        .max()
        .unwrap_or(0);
    SearchField::ALL
        .iter()
        .map(|&field| {
            let focused = field == state.focus;
            let cursor = if focused && field != SearchField::Favorite {
                "▏"
            } else {
                ""
            };
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>width$}: ", field.label(), width = width),
                    Style::default().fg(HEADER_SEPARATOR),
                ),
                Span::styled(
                    format!("{}{}", field_value(state, field), cursor),
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

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &SearchPanelState, error: Option<&str>) {
    let height = area.height.saturating_sub(4).max(8);
    let popup = centered_rect_by_size(area, PANEL_WIDTH, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            " Search images ",
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = field_lines(state);
    lines.push(Line::from(""));

    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(STATUS_ERROR),
        )));
    } else if state.is_searching {
        lines.push(dim_line("Searching..."));
    } else if state.query.is_empty() {
        lines.push(dim_line("Type to search by name, tags or person."));
    } else if state.results.is_empty() {
        lines.push(dim_line("No images found."));
    } else {
        lines.push(dim_line(format!("{} result(s)", state.results.len())));
        let room = (inner.height as usize).saturating_sub(lines.len() + 1);
        let items = state
            .results
            .iter()
            .map(|image| {
                let mut spans = vec![
                    Span::styled(
                        if image.is_favorite { "♥ " } else { "  " },
                        Style::default().fg(FAVORITE),
                    ),
                    Span::raw(image.title().to_string()),
                ];
                if !image.tags.is_empty() {
                    spans.push(Span::styled(
                        format!("  #{}", image.tags.join(" #")),
                        Style::default().fg(HEADER_SEPARATOR),
                    ));
                }
                Line::from(spans)
            })
            .collect();
        lines.extend(list_lines(items, state.selected, room));
    }

    lines.push(dim_line(
        "Tab: Next field │ Space: Favorites │ ↑↓: Select │ Enter: Open │ Esc: Close",
    ));
    frame.render_widget(Paragraph::new(lines), inner);
}
