use crate::mvi::Reducer;
use crate::store::profile::intent::ProfileIntent;
use crate::store::profile::operation::ProfileKind;
use crate::store::profile::state::{ProfileState, PASSWORD_UPDATED, PROFILE_UPDATED};

pub struct ProfileReducer;

impl Reducer for ProfileReducer {
    type State = ProfileState;
    type Intent = ProfileIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ProfileIntent::Started(ticket) => {
                state.lifecycle_for(ticket.kind).begin(ticket);
                match ticket.kind {
                    ProfileKind::Fetch => {}
                    ProfileKind::Update => state.message = None,
                    ProfileKind::ChangePassword => state.password_message = None,
                }
            }
            ProfileIntent::Loaded { ticket, user } => {
                if state.lifecycle.succeed(ticket) {
                    state.user = Some(user);
                }
            }
            ProfileIntent::Updated { ticket, user } => {
                if state.lifecycle.succeed(ticket) {
                    state.user = Some(user);
                    state.message = Some(PROFILE_UPDATED.to_string());
                }
            }
            ProfileIntent::PasswordChanged(ticket) => {
                if state.password.succeed(ticket) {
                    state.password_message = Some(PASSWORD_UPDATED.to_string());
                }
            }
            ProfileIntent::Failed { ticket, error } => {
                state.lifecycle_for(ticket.kind).fail(ticket, error);
            }
            ProfileIntent::Abandoned(ticket) => state.lifecycle_for(ticket.kind).abandon(ticket),
            ProfileIntent::ClearMessage => state.message = None,
            ProfileIntent::ClearError => state.lifecycle.clear_error(),
            ProfileIntent::ClearPasswordMessage => state.password_message = None,
            ProfileIntent::ClearPasswordError => state.password.clear_error(),
            ProfileIntent::Reset => {
                return ProfileState {
                    lifecycle: state.lifecycle.retired(),
                    password: state.password.retired(),
                    ..ProfileState::default()
                };
            }
        }
        state
    }
}
