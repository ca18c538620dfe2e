use crate::api::{ErrorPayload, User};
use crate::config::SecureString;
use crate::mvi::Intent;
use crate::store::auth::operation::AuthKind;
use crate::store::status::Ticket;

type AuthTicket = Ticket<AuthKind>;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthIntent {
    Started(AuthTicket),
    UserLoaded { ticket: AuthTicket, user: User },
    LoggedIn {
        ticket: AuthTicket,
        token: SecureString,
        user: User,
    },
    Registered(AuthTicket),
    LoggedOut(AuthTicket),
    Failed { ticket: AuthTicket, error: ErrorPayload },
    Abandoned(AuthTicket),
    /// The profile screen saved new details for the signed-in user.
    UserChanged(User),
    ClearError,
    ClearRegistered,
    Reset,
}

impl Intent for AuthIntent {}

impl AuthIntent {
    pub fn error(&self) -> Option<&ErrorPayload> {
        match self {
            AuthIntent::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
