use crate::mvi::Reducer;
use crate::store::auth::intent::AuthIntent;
use crate::store::auth::operation::AuthKind;
use crate::store::auth::state::AuthState;

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Intent = AuthIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AuthIntent::Started(ticket) => {
                state.lifecycle.begin(ticket);
                state.registered = false;
            }
            AuthIntent::UserLoaded { ticket, user } => {
                if state.lifecycle.succeed(ticket) {
                    state.user = Some(user);
                    state.is_authenticated = true;
                }
            }
            AuthIntent::LoggedIn { ticket, user, .. } => {
                if state.lifecycle.succeed(ticket) {
                    state.user = Some(user);
                    state.is_authenticated = true;
                }
            }
            AuthIntent::Registered(ticket) => {
                if state.lifecycle.succeed(ticket) {
                    state.registered = true;
                }
            }
            AuthIntent::LoggedOut(ticket) => {
                if state.lifecycle.succeed(ticket) {
                    state.user = None;
                    state.is_authenticated = false;
                }
            }
            AuthIntent::Failed { ticket, error } => {
                let signs_out = match ticket.kind {
                    AuthKind::CurrentUser => state.lifecycle.is_current(ticket),
                    AuthKind::Login => !state.lifecycle.is_retired(ticket),
                    AuthKind::Register | AuthKind::Logout => false,
                };
                if signs_out {
                    state.user = None;
                    state.is_authenticated = false;
                }
                state.lifecycle.fail(ticket, error);
            }
            AuthIntent::Abandoned(ticket) => state.lifecycle.abandon(ticket),
            AuthIntent::UserChanged(user) => {
                if state.is_authenticated {
                    state.user = Some(user);
                }
            }
            AuthIntent::ClearError => state.lifecycle.clear_error(),
            AuthIntent::ClearRegistered => state.registered = false,
            AuthIntent::Reset => {
                return AuthState {
                    lifecycle: state.lifecycle.retired(),
                    ..AuthState::default()
                };
            }
        }
        state
    }
}
