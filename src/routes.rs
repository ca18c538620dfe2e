//! Screen routes and the authentication guard.

use crate::api::Album;
use crate::store::auth::AuthState;

/// Read-only view of whether someone is signed in.
pub trait AuthStatus {
    fn is_authenticated(&self) -> bool;
}

impl AuthStatus for AuthState {
    fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }
}

impl AuthStatus for bool {
    fn is_authenticated(&self) -> bool {
        *self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    /// Login (`login == true`) or registration form.
    Auth { login: bool },
    /// Own albums, or the ones shared with the user.
    Albums { shared: bool },
    AlbumDetails {
        album_id: String,
        /// Image to select once the album loads, e.g. from a search hit.
        highlight: Option<String>,
        /// Opened from the shared list; owner-only actions are hidden.
        shared: bool,
    },
    /// Create a new album, or edit `editing`.
    CreateAlbum { editing: Option<Album> },
    AddImage { album_id: String },
    Profile,
}

impl Route {
    pub fn login() -> Self {
        Route::Auth { login: true }
    }

    pub fn album(album_id: impl Into<String>) -> Self {
        Route::AlbumDetails {
            album_id: album_id.into(),
            highlight: None,
            shared: false,
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Home | Route::Auth { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Auth { login: true } => "Login",
            Route::Auth { login: false } => "Register",
            Route::Albums { shared: false } => "Albums",
            Route::Albums { shared: true } => "Shared Albums",
            Route::AlbumDetails { .. } => "Album",
            Route::CreateAlbum { editing: Some(_) } => "Edit Album",
            Route::CreateAlbum { editing: None } => "Create Album",
            Route::AddImage { .. } => "Add Image",
            Route::Profile => "Profile",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Guarded {
    Render(Route),
    Redirect(Route),
}

pub struct RouteGuard;

impl RouteGuard {
    /// Render `route`, or redirect to the login form when it needs a
    /// signed-in user and there is none.
    pub fn resolve(route: Route, auth: &dyn AuthStatus) -> Guarded {
        if route.requires_auth() && !auth.is_authenticated() {
            tracing::debug!(route = route.title(), "Redirecting to login");
            Guarded::Redirect(Route::login())
        } else {
            Guarded::Render(route)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes_render_signed_out() {
        assert_eq!(RouteGuard::resolve(Route::Home, &false), Guarded::Render(Route::Home));
        assert_eq!(
            RouteGuard::resolve(Route::login(), &false),
            Guarded::Render(Route::login())
        );
    }

    #[test]
    fn guarded_routes_redirect_signed_out() {
        for route in [
            Route::Albums { shared: false },
            Route::Albums { shared: true },
            Route::album("a1"),
            Route::CreateAlbum { editing: None },
            Route::AddImage {
                album_id: "a1".to_string(),
            },
            Route::Profile,
        ] {
            assert_eq!(
                RouteGuard::resolve(route, &AuthState::default()),
                Guarded::Redirect(Route::login())
            );
        }
    }

    #[test]
    fn guarded_route_renders_when_signed_in() {
        let mut auth = AuthState::default();
        auth.is_authenticated = true;
        assert_eq!(
            RouteGuard::resolve(Route::Profile, &auth),
            Guarded::Render(Route::Profile)
        );
    }
}
