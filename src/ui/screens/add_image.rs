use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::api::ImageUpload;
use crate::mvi::Reducer;
use crate::routes::Route;
use crate::store::image::{ImageIntent, ImageKind, ImageOperation};
use crate::store::{Action, AppState, OperationKind};
use crate::ui::form::{intent_for_key, FormField, FormReducer, FormState};
use crate::ui::screens::Command;
use crate::ui::widgets::{dim_line, error_line, render_form, success_line};
use crate::validation::MAX_UPLOAD_BYTES;

const FILE: usize = 0;
const NAME: usize = 1;
const TAGS: usize = 2;
const PERSON: usize = 3;
const FAVORITE: usize = 4;

/// Upload an image file into an album.
pub struct AddImageScreen {
    album_id: String,
    form: FormState,
    submitted: bool,
    done: bool,
}

impl AddImageScreen {
    pub fn new(album_id: String) -> Self {
        Self {
            album_id,
            form: FormState::new(vec![
                FormField::text("File path"),
                FormField::text("Name"),
                FormField::text("Tags"),
                FormField::text("Person"),
                FormField::toggle("Favorite"),
            ]),
            submitted: false,
            done: false,
        }
    }

    pub fn on_enter(&self) -> Vec<Command> {
        vec![Command::Apply(Action::Image(ImageIntent::ClearError))]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if self.done {
            return Vec::new();
        }
        match key.code {
            KeyCode::Esc => vec![Command::Navigate(Route::album(self.album_id.clone()))],
            KeyCode::Enter => {
                let upload = ImageUpload::from_path(
                    Path::new(self.form.value(FILE).trim()),
                    self.form.value(NAME),
                    self.form.value(TAGS),
                    self.form.value(PERSON),
                    self.form.checked(FAVORITE),
                );
                match upload {
                    Ok(upload) => {
                        self.submitted = true;
                        vec![Command::Dispatch(
                            ImageOperation::Upload {
                                album_id: self.album_id.clone(),
                                upload,
                            }
                            .into(),
                        )]
                    }
                    Err(e) => vec![Command::Reject(OperationKind::Image(ImageKind::Upload), e)],
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
        if self.submitted && state.image.lifecycle.succeeded(ImageKind::Upload) {
            self.submitted = false;
            self.done = true;
            return vec![Command::RedirectLater(Route::album(self.album_id.clone()))];
        }
        Vec::new()
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let lifecycle = &state.image.lifecycle;
        let mut status = vec![dim_line(format!(
            "JPEG, PNG or GIF, up to {} MB. Tags are comma separated.",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        ))];
        if self.done {
            status.push(success_line("Image uploaded successfully! Redirecting..."));
        } else if let Some(error) = lifecycle.error_message() {
            status.push(error_line(error));
        } else if self.submitted && lifecycle.is_loading() {
            status.push(dim_line("Uploading..."));
        }
        render_form(frame, area, "Add image", &self.form, status);
    }
}
