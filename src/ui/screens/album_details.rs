use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::api::{Album, Image};
use crate::routes::Route;
use crate::store::album::{AlbumIntent, AlbumOperation};
use crate::store::image::{ImageIntent, ImageKind, ImageOperation};
use crate::store::{Action, AppState, OperationKind};
use crate::ui::screens::Command;
use crate::ui::theme::{FAVORITE, HEADER_SEPARATOR, HEADER_TEXT};
use crate::ui::widgets::{dim_line, error_line, list_lines, panel, render_popup};
use crate::validation;

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Browse,
    Comment(String),
    Filter(String),
    ConfirmDelete { image_id: String, name: String },
}

/// One album: its details, its images and the selected image's comments.
pub struct AlbumDetailsScreen {
    album_id: String,
    highlight: Option<String>,
    shared: bool,
    selected: usize,
    mode: Mode,
    tags: Option<String>,
    commenting: bool,
}

impl AlbumDetailsScreen {
    pub fn new(album_id: String, highlight: Option<String>, shared: bool) -> Self {
        Self {
            album_id,
            highlight,
            shared,
            selected: 0,
            mode: Mode::Browse,
            tags: None,
            commenting: false,
        }
    }

    fn fetch_images(&self) -> Command {
        Command::Dispatch(
            ImageOperation::FetchAll {
                album_id: self.album_id.clone(),
                tags: self.tags.clone(),
            }
            .into(),
        )
    }

    pub fn on_enter(&self) -> Vec<Command> {
        vec![
            Command::Apply(Action::Album(AlbumIntent::ClearError)),
            Command::Apply(Action::Image(ImageIntent::ClearError)),
            Command::Dispatch(
                AlbumOperation::FetchDetails {
                    id: self.album_id.clone(),
                }
                .into(),
            ),
            self.fetch_images(),
        ]
    }

    fn images<'a>(&self, state: &'a AppState) -> &'a [Image] {
        if state.image.is_showing(&self.album_id) {
            &state.image.images
        } else {
            &[]
        }
    }

    fn album<'a>(&self, state: &'a AppState) -> Option<&'a Album> {
        state
            .album
            .album_details
            .as_ref()
            .filter(|album| album.id == self.album_id)
            .or_else(|| state.album.find(&self.album_id))
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Command> {
        match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Browse => self.handle_browse_key(key, state),
            Mode::Comment(input) => self.handle_comment_key(input, key, state),
            Mode::Filter(input) => self.handle_filter_key(input, key),
            Mode::ConfirmDelete { image_id, name } => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => vec![Command::Dispatch(
                    ImageOperation::Delete {
                        album_id: self.album_id.clone(),
                        image_id,
                    }
                    .into(),
                )],
                KeyCode::Char('n') | KeyCode::Esc => Vec::new(),
                _ => {
                    self.mode = Mode::ConfirmDelete { image_id, name };
                    Vec::new()
                }
            },
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Command> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return Vec::new();
        }
        let images = self.images(state);
        let selected = images.get(self.selected);
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down => {
                if self.selected + 1 < images.len() {
                    self.selected += 1;
                }
                Vec::new()
            }
            KeyCode::Char('f') => selected
                .map(|image| {
                    vec![Command::Dispatch(
                        ImageOperation::ToggleFavorite {
                            album_id: self.album_id.clone(),
                            image_id: image.id.clone(),
                        }
                        .into(),
                    )]
                })
                .unwrap_or_default(),
            KeyCode::Char('c') if selected.is_some() => {
                self.mode = Mode::Comment(String::new());
                Vec::new()
            }
            KeyCode::Char('t') => {
                self.mode = Mode::Filter(self.tags.clone().unwrap_or_default());
                Vec::new()
            }
            KeyCode::Char('x') if !self.shared => {
                if let Some(image) = selected {
                    self.mode = Mode::ConfirmDelete {
                        image_id: image.id.clone(),
                        name: image.title().to_string(),
                    };
                }
                Vec::new()
            }
            KeyCode::Char('a') if !self.shared => vec![Command::Navigate(Route::AddImage {
                album_id: self.album_id.clone(),
            })],
            KeyCode::Char('e') if !self.shared => self
                .album(state)
                .map(|album| {
                    vec![Command::Navigate(Route::CreateAlbum {
                        editing: Some(album.clone()),
                    })]
                })
                .unwrap_or_default(),
            KeyCode::Char('r') => self.on_enter().split_off(2),
            KeyCode::Esc => vec![Command::Navigate(Route::Albums {
                shared: self.shared,
            })],
            _ => Vec::new(),
        }
    }

    fn handle_comment_key(&mut self, mut input: String, key: KeyEvent, state: &AppState) -> Vec<Command> {
        match key.code {
            KeyCode::Esc => Vec::new(),
            KeyCode::Enter => {
                let Some(image) = self.images(state).get(self.selected) else {
                    return Vec::new();
                };
                let command = match validation::comment_text(&input) {
                    Ok(text) => {
                        self.commenting = true;
                        Command::Dispatch(
                            ImageOperation::AddComment {
                                album_id: self.album_id.clone(),
                                image_id: image.id.clone(),
                                text,
                            }
                            .into(),
                        )
                    }
                    Err(e) => Command::Reject(OperationKind::Image(ImageKind::AddComment), e),
                };
                self.mode = Mode::Comment(input);
                vec![command]
            }
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::Comment(input);
                Vec::new()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                input.push(c);
                self.mode = Mode::Comment(input);
                Vec::new()
            }
            _ => {
                self.mode = Mode::Comment(input);
                Vec::new()
            }
        }
    }

    fn handle_filter_key(&mut self, mut input: String, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Esc => Vec::new(),
            KeyCode::Enter => {
                let tags = input.trim();
                self.tags = (!tags.is_empty()).then(|| tags.to_string());
                self.selected = 0;
                vec![self.fetch_images()]
            }
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::Filter(input);
                Vec::new()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                input.push(c);
                self.mode = Mode::Filter(input);
                Vec::new()
            }
            _ => {
                self.mode = Mode::Filter(input);
                Vec::new()
            }
        }
    }

    pub fn on_state(&mut self, state: &AppState) -> Vec<Command> {
        let images = self.images(state);
        if let Some(id) = &self.highlight {
            if let Some(index) = images.iter().position(|image| &image.id == id) {
                self.selected = index;
                self.highlight = None;
            }
        }
        if self.selected >= images.len() {
            self.selected = images.len().saturating_sub(1);
        }
        if self.commenting && state.image.lifecycle.succeeded(ImageKind::AddComment) {
            self.commenting = false;
            if matches!(self.mode, Mode::Comment(_)) {
                self.mode = Mode::Browse;
            }
        }
        Vec::new()
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(area);

        self.render_album(frame, chunks[0], state);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);
        self.render_images(frame, body[0], state);
        self.render_selected(frame, body[1], state);

        let mut status = Vec::new();
        match &self.mode {
            Mode::Comment(input) => status.push(Line::from(format!("Comment: {}▏", input))),
            Mode::Filter(input) => status.push(Line::from(format!("Tags: {}▏", input))),
            _ => {}
        }
        if let Some(error) = state
            .image
            .lifecycle
            .error_message()
            .or_else(|| state.album.lifecycle.error_message())
        {
            status.push(error_line(error));
        }
        frame.render_widget(Paragraph::new(status), chunks[2]);

        if let Mode::ConfirmDelete { name, .. } = &self.mode {
            render_popup(
                frame,
                area,
                "Delete image",
                vec![
                    Line::from(format!("Delete \"{}\"?", name)),
                    dim_line("y: Delete │ n: Cancel"),
                ],
            );
        }
    }

    fn render_album(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let lines = match self.album(state) {
            Some(album) => {
                let mut info = vec![Span::raw(album.created_label())];
                if let Some(owner) = &album.owner {
                    info.push(Span::raw(format!("  │  by {}", owner.display_name())));
                }
                if !album.shared_users.is_empty() {
                    info.push(Span::raw(format!(
                        "  │  shared with {}",
                        album.shared_users.join(", ")
                    )));
                }
                vec![
                    Line::from(Span::styled(
                        album.description.clone(),
                        Style::default().fg(HEADER_TEXT),
                    )),
                    Line::from(info).style(Style::default().fg(HEADER_SEPARATOR)),
                ]
            }
            None if state.album.lifecycle.is_loading() => vec![dim_line("Loading album...")],
            None => vec![dim_line("Album not found")],
        };
        let title = self
            .album(state)
            .map(|album| album.name.as_str())
            .unwrap_or("Album");
        frame.render_widget(Paragraph::new(lines).block(panel(title)), area);
    }

    fn render_images(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let title = match &self.tags {
            Some(tags) => format!("Images [{}]", tags),
            None => "Images".to_string(),
        };
        let block = panel(&title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let images = self.images(state);
        let lines = if images.is_empty() {
            vec![dim_line(if state.image.lifecycle.is_loading() {
                "Loading images..."
            } else {
                "No images in this album."
            })]
        } else {
            let items = images
                .iter()
                .map(|image| {
                    let heart = if image.is_favorite { "♥ " } else { "  " };
                    Line::from(vec![
                        Span::styled(heart, Style::default().fg(FAVORITE)),
                        Span::raw(image.title().to_string()),
                    ])
                })
                .collect();
            list_lines(items, self.selected, inner.height as usize)
        };
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_selected(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let Some(image) = self.images(state).get(self.selected) else {
            frame.render_widget(panel("Details"), area);
            return;
        };

        let mut lines = vec![Line::from(Span::styled(
            image.title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if !image.file.is_empty() {
            lines.push(dim_line(image.file.clone()));
        }
        if !image.tags.is_empty() {
            lines.push(Line::from(format!("Tags: {}", image.tags.join(", "))));
        }
        if let Some(person) = image.person.as_deref().filter(|p| !p.is_empty()) {
            lines.push(Line::from(format!("Person: {}", person)));
        }
        if image.is_favorite {
            lines.push(Line::from(Span::styled(
                "♥ Favorite",
                Style::default().fg(FAVORITE),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Comments ({})", image.comments.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for comment in &image.comments {
            let author = comment
                .author
                .as_ref()
                .map(|a| a.display_name().to_string())
                .unwrap_or_else(|| "Anonymous".to_string());
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", author), Style::default().fg(HEADER_SEPARATOR)),
                Span::raw(comment.text.clone()),
            ]));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .block(panel("Details"))
                .wrap(Wrap { trim: false }),
            area,
        );
    }

    pub fn hints(&self) -> &'static str {
        match self.mode {
            Mode::Comment(_) => " Enter: Post comment │ Esc: Cancel",
            Mode::Filter(_) => " Enter: Filter by tags (empty clears) │ Esc: Cancel",
            Mode::ConfirmDelete { .. } => " y: Delete │ n: Cancel",
            Mode::Browse if self.shared => {
                " ↑↓: Select │ f: Favorite │ c: Comment │ t: Tags │ r: Refresh │ Esc: Back"
            }
            Mode::Browse => {
                " ↑↓: Select │ f: Favorite │ c: Comment │ t: Tags │ a: Add │ x: Delete │ e: Edit album │ Esc: Back"
            }
        }
    }
}
