use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::routes::Route;
use crate::store::AppState;
use crate::ui::screens::Command;
use crate::ui::theme::{BRAND, HEADER_TEXT};
use crate::ui::widgets::{dim_line, panel};

pub struct HomeScreen;

impl HomeScreen {
    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Command> {
        match key.code {
            KeyCode::Enter if state.auth.is_authenticated => {
                vec![Command::Navigate(Route::Albums { shared: false })]
            }
            KeyCode::Enter => vec![Command::Navigate(Route::login())],
            KeyCode::Char('r') if !state.auth.is_authenticated => {
                vec![Command::Navigate(Route::Auth { login: false })]
            }
            _ => Vec::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Picsilfy",
                Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Create albums, tag your photos and share them with friends.",
                Style::default().fg(HEADER_TEXT),
            )),
            Line::from(""),
        ];

        match &state.auth.user {
            Some(user) if state.auth.is_authenticated => {
                lines.push(Line::from(format!("Welcome back, {}!", user.display_name())));
                lines.push(dim_line("Enter: My albums │ Ctrl+S: Shared with me │ Ctrl+F: Search"));
            }
            _ => {
                lines.push(Line::from("Sign in to see your albums."));
                lines.push(dim_line("Enter: Login │ r: Register"));
            }
        }

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(panel("Home")),
            area,
        );
    }
}
