use crate::api::{ErrorPayload, User};
use crate::mvi::Intent;
use crate::store::profile::operation::ProfileKind;
use crate::store::status::Ticket;

type ProfileTicket = Ticket<ProfileKind>;

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileIntent {
    Started(ProfileTicket),
    Loaded { ticket: ProfileTicket, user: User },
    Updated { ticket: ProfileTicket, user: User },
    PasswordChanged(ProfileTicket),
    Failed { ticket: ProfileTicket, error: ErrorPayload },
    Abandoned(ProfileTicket),
    ClearMessage,
    ClearError,
    ClearPasswordMessage,
    ClearPasswordError,
    Reset,
}

impl Intent for ProfileIntent {}

impl ProfileIntent {
    pub fn error(&self) -> Option<&ErrorPayload> {
        match self {
            ProfileIntent::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
