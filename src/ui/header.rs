use crate::routes::Route;
use crate::store::AppState;
use crate::ui::theme::{BRAND, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_OK};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, route: &Route, state: &AppState, searching: bool) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let user = match &state.auth.user {
            Some(user) if state.auth.is_authenticated => format!("@{}", user.username),
            _ => "Not signed in".to_string(),
        };
        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled(
                "Picsilfy",
                Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(route.title(), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(user, text_style),
        ];

        let loading = state.album.lifecycle.is_loading()
            || state.image.lifecycle.is_loading()
            || state.profile.lifecycle.is_loading()
            || state.profile.password.is_loading()
            || state.auth.lifecycle.is_loading()
            || searching;
        if loading {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled("● loading", Style::default().fg(STATUS_OK)));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
