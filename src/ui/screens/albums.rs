use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::api::Album;
use crate::routes::Route;
use crate::store::album::{AlbumIntent, AlbumKind, AlbumOperation};
use crate::store::{Action, AppState, OperationKind};
use crate::ui::screens::Command;
use crate::ui::theme::{HEADER_TEXT, STATUS_OK};
use crate::ui::widgets::{dim_line, error_line, list_lines, panel, render_popup, success_line};
use crate::validation;

#[derive(Debug, Clone, PartialEq)]
enum Modal {
    ConfirmDelete { id: String, name: String },
    Share { id: String, name: String, input: String },
}

/// Own or shared album list.
pub struct AlbumsScreen {
    shared: bool,
    selected: usize,
    modal: Option<Modal>,
    sharing: bool,
    notice: Option<String>,
}

fn albums(state: &AppState, shared: bool) -> &[Album] {
    if shared {
        &state.album.shared_albums
    } else {
        &state.album.albums
    }
}

impl AlbumsScreen {
    pub fn new(shared: bool) -> Self {
        Self {
            shared,
            selected: 0,
            modal: None,
            sharing: false,
            notice: None,
        }
    }

    fn fetch(&self) -> Command {
        if self.shared {
            Command::Dispatch(AlbumOperation::FetchShared.into())
        } else {
            Command::Dispatch(AlbumOperation::FetchAll.into())
        }
    }

    pub fn on_enter(&self) -> Vec<Command> {
        vec![Command::Apply(Action::Album(AlbumIntent::ClearError)), self.fetch()]
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Command> {
        if let Some(modal) = self.modal.take() {
            return self.handle_modal_key(modal, key, state);
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return Vec::new();
        }

        let list = albums(state, self.shared);
        let selected = list.get(self.selected);
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down => {
                if self.selected + 1 < list.len() {
                    self.selected += 1;
                }
                Vec::new()
            }
            KeyCode::Enter => selected
                .map(|album| {
                    vec![Command::Navigate(Route::AlbumDetails {
                        album_id: album.id.clone(),
                        highlight: None,
                        shared: self.shared,
                    })]
                })
                .unwrap_or_default(),
            KeyCode::Tab => vec![Command::Navigate(Route::Albums {
                shared: !self.shared,
            })],
            KeyCode::Char('r') => vec![self.fetch()],
            KeyCode::Char('n') if !self.shared => {
                vec![Command::Navigate(Route::CreateAlbum { editing: None })]
            }
            KeyCode::Char('e') if !self.shared => selected
                .map(|album| {
                    vec![Command::Navigate(Route::CreateAlbum {
                        editing: Some(album.clone()),
                    })]
                })
                .unwrap_or_default(),
            KeyCode::Char('d') if !self.shared => {
                if let Some(album) = selected {
                    self.modal = Some(Modal::ConfirmDelete {
                        id: album.id.clone(),
                        name: album.name.clone(),
                    });
                }
                Vec::new()
            }
            KeyCode::Char('h') if !self.shared => {
                if let Some(album) = selected {
                    self.notice = None;
                    self.modal = Some(Modal::Share {
                        id: album.id.clone(),
                        name: album.name.clone(),
                        input: String::new(),
                    });
                }
                Vec::new()
            }
            KeyCode::Esc => vec![Command::Navigate(Route::Home)],
            _ => Vec::new(),
        }
    }

    fn handle_modal_key(&mut self, modal: Modal, key: KeyEvent, state: &AppState) -> Vec<Command> {
        match modal {
            Modal::ConfirmDelete { id, name } => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    vec![Command::Dispatch(AlbumOperation::Delete { id }.into())]
                }
                KeyCode::Char('n') | KeyCode::Esc => Vec::new(),
                _ => {
                    self.modal = Some(Modal::ConfirmDelete { id, name });
                    Vec::new()
                }
            },
            Modal::Share { id, name, mut input } => match key.code {
                KeyCode::Esc => {
                    self.sharing = false;
                    vec![Command::Apply(Action::Album(AlbumIntent::ClearError))]
                }
                KeyCode::Enter => {
                    let owner = state.auth.username();
                    let command = match validation::parse_usernames(&input, owner) {
                        Ok(usernames) => {
                            self.sharing = true;
                            Command::Dispatch(
                                AlbumOperation::Share {
                                    id: id.clone(),
                                    usernames,
                                }
                                .into(),
                            )
                        }
                        Err(e) => Command::Reject(OperationKind::Album(AlbumKind::Share), e),
                    };
                    self.modal = Some(Modal::Share { id, name, input });
                    vec![command]
                }
                KeyCode::Backspace => {
                    input.pop();
                    self.modal = Some(Modal::Share { id, name, input });
                    Vec::new()
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.push(c);
                    self.modal = Some(Modal::Share { id, name, input });
                    Vec::new()
                }
                _ => {
                    self.modal = Some(Modal::Share { id, name, input });
                    Vec::new()
                }
            },
        }
    }

    pub fn on_state(&mut self, state: &AppState) -> Vec<Command> {
        let len = albums(state, self.shared).len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        if self.sharing && state.album.lifecycle.succeeded(AlbumKind::Share) {
            self.sharing = false;
            if let Some(Modal::Share { name, .. }) = self.modal.take() {
                self.notice = Some(format!("Shared \"{}\"", name));
            }
        }
        Vec::new()
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(area);

        let title = if self.shared {
            "Shared with me"
        } else {
            "My albums"
        };
        let block = panel(title);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let list = albums(state, self.shared);
        let lines = if list.is_empty() {
            vec![dim_line(if state.album.lifecycle.is_loading() {
                "Loading albums..."
            } else if self.shared {
                "No albums have been shared with you yet."
            } else {
                "No albums yet. Press n to create one."
            })]
        } else {
            let items = list.iter().map(|album| self.album_line(album)).collect();
            list_lines(items, self.selected, inner.height as usize)
        };
        frame.render_widget(Paragraph::new(lines), inner);

        let mut status = Vec::new();
        if let Some(notice) = &self.notice {
            status.push(success_line(notice));
        }
        if let Some(error) = state.album.lifecycle.error_message() {
            status.push(error_line(error));
        }
        frame.render_widget(Paragraph::new(status), chunks[1]);

        match &self.modal {
            Some(Modal::ConfirmDelete { name, .. }) => render_popup(
                frame,
                area,
                "Delete album",
                vec![
                    Line::from(format!("Delete \"{}\" and all its images?", name)),
                    dim_line("y: Delete │ n: Cancel"),
                ],
            ),
            Some(Modal::Share { name, input, .. }) => {
                let mut lines = vec![
                    Line::from(format!("Share \"{}\" with:", name)),
                    Line::from(Span::styled(
                        format!("{}▏", input),
                        Style::default().fg(HEADER_TEXT),
                    )),
                    dim_line("Usernames separated by spaces or commas"),
                ];
                if let Some(error) = state.album.lifecycle.error_message() {
                    lines.push(error_line(error));
                }
                if state.album.lifecycle.is_loading() {
                    lines.push(dim_line("Sharing..."));
                }
                render_popup(frame, area, "Share album", lines);
            }
            None => {}
        }
    }

    fn album_line(&self, album: &Album) -> Line<'static> {
        let mut spans = vec![Span::styled(
            album.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !album.description.is_empty() {
            spans.push(Span::raw(format!("  {}", album.description)));
        }
        if self.shared {
            if let Some(owner) = &album.owner {
                spans.push(Span::styled(
                    format!("  by {}", owner.display_name()),
                    Style::default().fg(STATUS_OK),
                ));
            }
        } else if !album.shared_users.is_empty() {
            spans.push(Span::styled(
                format!("  shared with {}", album.shared_users.len()),
                Style::default().fg(STATUS_OK),
            ));
        }
        let created = album.created_label();
        if !created.is_empty() {
            spans.push(Span::raw(format!("  {}", created)));
        }
        Line::from(spans)
    }

    pub fn hints(&self) -> &'static str {
        if self.shared {
            " ↑↓: Select │ Enter: Open │ Tab: My albums │ r: Refresh │ Esc: Home"
        } else {
            " ↑↓: Select │ Enter: Open │ n: New │ e: Edit │ d: Delete │ h: Share │ Tab: Shared │ r: Refresh"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::User;
    use crate::store::Operation;
    use crate::validation::ValidationError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn album(id: &str, name: &str) -> Album {
        Album {
            id: id.into(),
            name: name.into(),
            ..Album::default()
        }
    }

    fn state() -> AppState {
        let mut state = AppState::default();
        state.auth.user = Some(User {
            id: "u1".into(),
            name: "Ann".into(),
            username: "ann".into(),
            profile_picture: None,
        });
        state.auth.is_authenticated = true;
        state.album.albums = vec![album("a1", "Trip"), album("a2", "Home")];
        state
    }

    #[test]
    fn enter_fetches_own_albums() {
        let screen = AlbumsScreen::new(false);
        assert_eq!(
            screen.on_enter()[1],
            Command::Dispatch(Operation::Album(AlbumOperation::FetchAll))
        );
    }

    #[test]
    fn delete_requires_confirmation() {
        let state = state();
        let mut screen = AlbumsScreen::new(false);
        screen.handle_key(key(KeyCode::Down), &state);
        assert!(screen.handle_key(key(KeyCode::Char('d')), &state).is_empty());

        let commands = screen.handle_key(key(KeyCode::Char('y')), &state);
        assert_eq!(
            commands,
            vec![Command::Dispatch(Operation::Album(AlbumOperation::Delete {
                id: "a2".into()
            }))]
        );
        assert!(screen.modal.is_none());
    }

    #[test]
    fn sharing_only_with_owner_is_rejected() {
        let state = state();
        let mut screen = AlbumsScreen::new(false);
        screen.handle_key(key(KeyCode::Char('h')), &state);
        for c in "ann".chars() {
            screen.handle_key(key(KeyCode::Char(c)), &state);
        }
        let commands = screen.handle_key(key(KeyCode::Enter), &state);
        assert_eq!(
            commands,
            vec![Command::Reject(
                OperationKind::Album(AlbumKind::Share),
                ValidationError::NoUsernames
            )]
        );
        assert!(screen.modal.is_some());
    }

    #[test]
    fn share_dispatches_parsed_usernames() {
        let state = state();
        let mut screen = AlbumsScreen::new(false);
        screen.handle_key(key(KeyCode::Char('h')), &state);
        for c in "bob, carl".chars() {
            screen.handle_key(key(KeyCode::Char(c)), &state);
        }
        let commands = screen.handle_key(key(KeyCode::Enter), &state);
        assert_eq!(
            commands,
            vec![Command::Dispatch(Operation::Album(AlbumOperation::Share {
                id: "a1".into(),
                usernames: vec!["bob".into(), "carl".into()],
            }))]
        );
    }
}
