use crate::api::User;
use crate::mvi::UiState;
use crate::store::auth::operation::AuthKind;
use crate::store::status::Lifecycle;

pub const REGISTERED_NOTICE: &str = "Registration successful! Please login with your credentials.";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// Set when a registration completed; the auth screen switches to login.
    pub registered: bool,
    pub lifecycle: Lifecycle<AuthKind>,
}

impl UiState for AuthState {}

impl AuthState {
    /// State restored from a saved session, before the server confirms it.
    pub fn restored(user: Option<User>, has_token: bool) -> Self {
        Self {
            user,
            is_authenticated: has_token,
            ..Self::default()
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}
