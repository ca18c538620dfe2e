use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::api::Album;
use crate::mvi::Reducer;
use crate::routes::Route;
use crate::store::album::{AlbumIntent, AlbumKind, AlbumOperation};
use crate::store::{Action, AppState, OperationKind};
use crate::ui::form::{intent_for_key, FormField, FormReducer, FormState};
use crate::ui::screens::Command;
use crate::ui::widgets::{dim_line, error_line, render_form, success_line};
use crate::validation;

const NAME: usize = 0;
const DESCRIPTION: usize = 1;
const COVER: usize = 2;

/// Create a new album, or edit an existing one.
pub struct AlbumFormScreen {
    editing: Option<Album>,
    form: FormState,
    submitted: bool,
    done: bool,
}

impl AlbumFormScreen {
    pub fn new(editing: Option<Album>) -> Self {
        let (name, description, cover) = match &editing {
            Some(album) => (
                album.name.clone(),
                album.description.clone(),
                album.album_cover.clone().unwrap_or_default(),
            ),
            None => Default::default(),
        };
        Self {
            form: FormState::new(vec![
                FormField::text("Name").with_value(name),
                FormField::text("Description").with_value(description),
                FormField::text("Cover image URL").with_value(cover),
            ]),
            editing,
            submitted: false,
            done: false,
        }
    }

    fn kind(&self) -> AlbumKind {
        if self.editing.is_some() {
            AlbumKind::Update
        } else {
            AlbumKind::Create
        }
    }

    pub fn on_enter(&self) -> Vec<Command> {
        vec![Command::Apply(Action::Album(AlbumIntent::ClearError))]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if self.done {
            return Vec::new();
        }
        match key.code {
            KeyCode::Esc => vec![Command::Navigate(Route::Albums { shared: false })],
            KeyCode::Enter => {
                let draft = validation::album_draft(
                    self.form.value(NAME),
                    self.form.value(DESCRIPTION),
                    self.form.value(COVER),
                );
                match draft {
                    Ok(draft) => {
                        self.submitted = true;
                        let op = match &self.editing {
                            Some(album) => AlbumOperation::Update {
                                id: album.id.clone(),
                                draft,
                            },
                            None => AlbumOperation::Create(draft),
                        };
                        vec![Command::Dispatch(op.into())]
                    }
                    Err(e) => vec![Command::Reject(OperationKind::Album(self.kind()), e)],
                }
            }
            _ => {
                if let Some(intent) = intent_for_key(key) {
                    self.form = FormReducer::reduce(std::mem::take(&mut self.form), intent);
                }
                Vec::new()
            }
        }
    }

    pub fn on_state(&mut self, state: &AppState) -> Vec<Command> {
        if self.submitted && state.album.lifecycle.succeeded(self.kind()) {
            self.submitted = false;
            self.done = true;
            return vec![Command::RedirectLater(Route::Albums { shared: false })];
        }
        Vec::new()
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let lifecycle = &state.album.lifecycle;
        let mut status = Vec::new();
        if self.done {
            status.push(success_line(if self.editing.is_some() {
                "Album updated successfully! Redirecting..."
            } else {
                "Album created successfully! Redirecting..."
            }));
        } else if let Some(error) = lifecycle.error_message() {
            status.push(error_line(error));
        } else if self.submitted && lifecycle.is_loading() {
            status.push(dim_line("Saving..."));
        }
        let title = if self.editing.is_some() {
            "Edit album"
        } else {
            "Create album"
        };
        render_form(frame, area, title, &self.form, status);
    }
}
