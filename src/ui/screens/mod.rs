//! One module per route. Screens own transient UI state (form fields,
//! modals, selection) and talk to the rest of the app through [`Command`]s,
//! so their key handling can be tested without a terminal or a network.

mod add_image;
mod album_details;
mod album_form;
mod albums;
mod auth;
mod home;
mod profile;

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::routes::Route;
use crate::store::{Action, AppState, Operation, OperationKind};
use crate::validation::ValidationError;

pub use add_image::AddImageScreen;
pub use album_details::AlbumDetailsScreen;
pub use album_form::AlbumFormScreen;
pub use albums::AlbumsScreen;
pub use auth::AuthScreen;
pub use home::HomeScreen;
pub use profile::ProfileScreen;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Operation),
    Reject(OperationKind, ValidationError),
    Apply(Action),
    Navigate(Route),
    /// Navigate once the redirect delay has passed.
    RedirectLater(Route),
}

pub enum Screen {
    Home(HomeScreen),
    Auth(AuthScreen),
    Albums(AlbumsScreen),
    AlbumDetails(AlbumDetailsScreen),
    AlbumForm(AlbumFormScreen),
    AddImage(AddImageScreen),
    Profile(ProfileScreen),
}

impl Screen {
    pub fn for_route(route: &Route, state: &AppState) -> Self {
        match route {
            Route::Home => Screen::Home(HomeScreen),
            Route::Auth { login } => Screen::Auth(AuthScreen::new(*login)),
            Route::Albums { shared } => Screen::Albums(AlbumsScreen::new(*shared)),
            Route::AlbumDetails {
                album_id,
                highlight,
                shared,
            } => Screen::AlbumDetails(AlbumDetailsScreen::new(
                album_id.clone(),
                highlight.clone(),
                *shared,
            )),
            Route::CreateAlbum { editing } => {
                Screen::AlbumForm(AlbumFormScreen::new(editing.clone()))
            }
            Route::AddImage { album_id } => Screen::AddImage(AddImageScreen::new(album_id.clone())),
            Route::Profile => Screen::Profile(ProfileScreen::new(state)),
        }
    }

    /// Requests to issue when the screen is shown.
    pub fn on_enter(&self) -> Vec<Command> {
        match self {
            Screen::Home(_) => Vec::new(),
            Screen::Auth(screen) => screen.on_enter(),
            Screen::Albums(screen) => screen.on_enter(),
            Screen::AlbumDetails(screen) => screen.on_enter(),
            Screen::AlbumForm(screen) => screen.on_enter(),
            Screen::AddImage(screen) => screen.on_enter(),
            Screen::Profile(screen) => screen.on_enter(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Command> {
        match self {
            Screen::Home(screen) => screen.handle_key(key, state),
            Screen::Auth(screen) => screen.handle_key(key),
            Screen::Albums(screen) => screen.handle_key(key, state),
            Screen::AlbumDetails(screen) => screen.handle_key(key, state),
            Screen::AlbumForm(screen) => screen.handle_key(key),
            Screen::AddImage(screen) => screen.handle_key(key),
            Screen::Profile(screen) => screen.handle_key(key),
        }
    }

    /// React to a store change.
    pub fn on_state(&mut self, state: &AppState) -> Vec<Command> {
        match self {
            Screen::Home(_) => Vec::new(),
            Screen::Auth(screen) => screen.on_state(state),
            Screen::Albums(screen) => screen.on_state(state),
            Screen::AlbumDetails(screen) => screen.on_state(state),
            Screen::AlbumForm(screen) => screen.on_state(state),
            Screen::AddImage(screen) => screen.on_state(state),
            Screen::Profile(screen) => screen.on_state(state),
        }
    }

    pub fn on_tick(&mut self, state: &AppState, now: Instant, notice: Duration) -> Vec<Command> {
        match self {
            Screen::Profile(screen) => screen.on_tick(state, now, notice),
            _ => Vec::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        match self {
            Screen::Home(screen) => screen.render(frame, area, state),
            Screen::Auth(screen) => screen.render(frame, area, state),
            Screen::Albums(screen) => screen.render(frame, area, state),
            Screen::AlbumDetails(screen) => screen.render(frame, area, state),
            Screen::AlbumForm(screen) => screen.render(frame, area, state),
            Screen::AddImage(screen) => screen.render(frame, area, state),
            Screen::Profile(screen) => screen.render(frame, area, state),
        }
    }

    pub fn hints(&self) -> &'static str {
        match self {
            Screen::Home(_) => " Enter: Start │ r: Register",
            Screen::Auth(_) => " Enter: Submit │ Tab: Next field │ Ctrl+T: Login/Register │ Esc: Back",
            Screen::Albums(screen) => screen.hints(),
            Screen::AlbumDetails(screen) => screen.hints(),
            Screen::AlbumForm(_) | Screen::AddImage(_) => {
                " Enter: Save │ Tab: Next field │ Space: Toggle │ Esc: Cancel"
            }
            Screen::Profile(_) => " Enter: Save │ Tab: Next field │ Ctrl+T: Profile/Password",
        }
    }
}
