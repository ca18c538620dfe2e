//! Application store: the four domain slices plus the API client.
//!
//! Views read [`Store::state`] and change it only through operations:
//!
//! 1. [`Store::begin`] applies the pending transition and returns a
//!    [`PendingRequest`] that owns everything needed to run the call;
//! 2. the request runs (on the tokio runtime in the TUI, inline in
//!    [`Store::run`]) and yields an [`Action`];
//! 3. [`Store::apply`] feeds the action through the slice reducer.
//!
//! Session side effects (saving the token on login, clearing it on logout
//! or auth failure) happen in `apply`, around the reducers.

pub mod album;
pub mod auth;
pub mod image;
pub mod profile;
mod status;

use std::sync::Arc;

pub use status::{Lifecycle, RequestKind, Sequencer, Status, Ticket};

use crate::api::{ApiClient, ApiError, ErrorPayload};
use crate::mvi::Reducer;
use crate::session::SessionStore;
use crate::validation::ValidationError;
use album::{AlbumIntent, AlbumKind, AlbumOperation, AlbumReducer, AlbumState};
use auth::{AuthIntent, AuthKind, AuthOperation, AuthReducer, AuthState};
use image::{ImageIntent, ImageKind, ImageOperation, ImageReducer, ImageState};
use profile::{ProfileIntent, ProfileKind, ProfileOperation, ProfileReducer, ProfileState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub album: AlbumState,
    pub image: ImageState,
    pub profile: ProfileState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Album(AlbumOperation),
    Image(ImageOperation),
    Profile(ProfileOperation),
    Auth(AuthOperation),
}

impl From<AlbumOperation> for Operation {
    fn from(op: AlbumOperation) -> Self {
        Operation::Album(op)
    }
}

impl From<ImageOperation> for Operation {
    fn from(op: ImageOperation) -> Self {
        Operation::Image(op)
    }
}

impl From<ProfileOperation> for Operation {
    fn from(op: ProfileOperation) -> Self {
        Operation::Profile(op)
    }
}

impl From<AuthOperation> for Operation {
    fn from(op: AuthOperation) -> Self {
        Operation::Auth(op)
    }
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Album(op) => OperationKind::Album(op.kind()),
            Operation::Image(op) => OperationKind::Image(op.kind()),
            Operation::Profile(op) => OperationKind::Profile(op.kind()),
            Operation::Auth(op) => OperationKind::Auth(op.kind()),
        }
    }
}

/// Operation kind without its payload, used to record local rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Album(AlbumKind),
    Image(ImageKind),
    Profile(ProfileKind),
    Auth(AuthKind),
}

impl OperationKind {
    /// True for fetches, whose responses replace held data.
    pub fn replaces(self) -> bool {
        match self {
            OperationKind::Album(kind) => kind.replaces(),
            OperationKind::Image(kind) => kind.replaces(),
            OperationKind::Profile(kind) => kind.replaces(),
            OperationKind::Auth(kind) => kind.replaces(),
        }
    }
}

/// A settled outcome, ready for [`Store::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Album(AlbumIntent),
    Image(ImageIntent),
    Profile(ProfileIntent),
    Auth(AuthIntent),
}

impl Action {
    /// Rejection payload when the action records a failure.
    pub fn error(&self) -> Option<&ErrorPayload> {
        match self {
            Action::Album(intent) => intent.error(),
            Action::Image(intent) => intent.error(),
            Action::Profile(intent) => intent.error(),
            Action::Auth(intent) => intent.error(),
        }
    }
}

enum Call {
    Album(Ticket<AlbumKind>, AlbumOperation),
    Image(Ticket<ImageKind>, ImageOperation),
    Profile(Ticket<ProfileKind>, ProfileOperation),
    Auth(Ticket<AuthKind>, AuthOperation),
}

/// An issued request that has not run yet.
pub struct PendingRequest {
    api: ApiClient,
    call: Call,
}

impl PendingRequest {
    /// Run the call and turn its result into an action.
    pub async fn execute(self) -> Action {
        let api = &self.api;
        match self.call {
            Call::Album(ticket, op) => Action::Album(op.execute(ticket, api).await),
            Call::Image(ticket, op) => Action::Image(op.execute(ticket, api).await),
            Call::Profile(ticket, op) => Action::Profile(op.execute(ticket, api).await),
            Call::Auth(ticket, op) => Action::Auth(op.execute(ticket, api).await),
        }
    }

    /// Action to apply when the request is cancelled instead.
    pub fn abandoned(&self) -> Action {
        match &self.call {
            Call::Album(ticket, _) => Action::Album(AlbumIntent::Abandoned(*ticket)),
            Call::Image(ticket, _) => Action::Image(ImageIntent::Abandoned(*ticket)),
            Call::Profile(ticket, _) => Action::Profile(ProfileIntent::Abandoned(*ticket)),
            Call::Auth(ticket, _) => Action::Auth(AuthIntent::Abandoned(*ticket)),
        }
    }
}

impl std::fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (slice, seq) = match &self.call {
            Call::Album(t, _) => ("album", t.seq),
            Call::Image(t, _) => ("image", t.seq),
            Call::Profile(t, _) => ("profile", t.seq),
            Call::Auth(t, _) => ("auth", t.seq),
        };
        f.debug_struct("PendingRequest")
            .field("slice", &slice)
            .field("seq", &seq)
            .finish()
    }
}

/// Explicit application state for one session.
pub struct Store {
    api: ApiClient,
    session: Arc<SessionStore>,
    state: AppState,
}

impl Store {
    /// Build a store whose client reads its token from `session`.
    pub fn open(base_url: &str, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let api = ApiClient::new(base_url, session.clone())?;
        Ok(Self::new(api, session))
    }

    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        let state = AppState {
            auth: AuthState::restored(session.user(), session.is_signed_in()),
            ..AppState::default()
        };
        Self {
            api,
            session,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Apply the pending transition for `op` and hand back the request.
    pub fn begin(&mut self, op: impl Into<Operation>) -> PendingRequest {
        let op = op.into();
        let call = match op {
            Operation::Album(op) => {
                let ticket = self.state.album.lifecycle.next_ticket(op.kind());
                self.apply(Action::Album(AlbumIntent::Started(ticket)));
                Call::Album(ticket, op)
            }
            Operation::Image(op) => {
                let ticket = self.state.image.lifecycle.next_ticket(op.kind());
                self.apply(Action::Image(ImageIntent::Started(ticket)));
                Call::Image(ticket, op)
            }
            Operation::Profile(op) => {
                let ticket = self.state.profile.next_ticket(op.kind());
                self.apply(Action::Profile(ProfileIntent::Started(ticket)));
                Call::Profile(ticket, op)
            }
            Operation::Auth(op) => {
                let ticket = self.state.auth.lifecycle.next_ticket(op.kind());
                self.apply(Action::Auth(AuthIntent::Started(ticket)));
                Call::Auth(ticket, op)
            }
        };
        let pending = PendingRequest {
            api: self.api.clone(),
            call,
        };
        tracing::debug!(?pending, "Request issued");
        pending
    }

    /// Record a local validation failure as a failed operation. Nothing is
    /// sent to the backend.
    pub fn reject(&mut self, kind: OperationKind, error: impl Into<ErrorPayload>) {
        let error = error.into();
        tracing::debug!(?kind, message = %error, "Rejected before sending");
        match kind {
            OperationKind::Album(kind) => {
                let ticket = self.state.album.lifecycle.next_ticket(kind);
                self.apply(Action::Album(AlbumIntent::Started(ticket)));
                self.apply(Action::Album(AlbumIntent::Failed { ticket, error }));
            }
            OperationKind::Image(kind) => {
                let ticket = self.state.image.lifecycle.next_ticket(kind);
                self.apply(Action::Image(ImageIntent::Started(ticket)));
                self.apply(Action::Image(ImageIntent::Failed { ticket, error }));
            }
            OperationKind::Profile(kind) => {
                let ticket = self.state.profile.next_ticket(kind);
                self.apply(Action::Profile(ProfileIntent::Started(ticket)));
                self.apply(Action::Profile(ProfileIntent::Failed { ticket, error }));
            }
            OperationKind::Auth(kind) => {
                let ticket = self.state.auth.lifecycle.next_ticket(kind);
                self.apply(Action::Auth(AuthIntent::Started(ticket)));
                self.apply(Action::Auth(AuthIntent::Failed { ticket, error }));
            }
        }
    }

    /// Unwrap validated form input, recording a rejection on failure.
    pub fn validated<T>(
        &mut self,
        kind: OperationKind,
        input: Result<T, ValidationError>,
    ) -> Option<T> {
        match input {
            Ok(value) => Some(value),
            Err(e) => {
                self.reject(kind, e);
                None
            }
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Album(intent) => {
                let state = std::mem::take(&mut self.state.album);
                self.state.album = AlbumReducer::reduce(state, intent);
            }
            Action::Image(intent) => {
                let state = std::mem::take(&mut self.state.image);
                self.state.image = ImageReducer::reduce(state, intent);
            }
            Action::Profile(intent) => {
                let changed_user = match &intent {
                    ProfileIntent::Updated { ticket, user }
                        if !self.state.profile.lifecycle.is_retired(*ticket) =>
                    {
                        Some(user.clone())
                    }
                    _ => None,
                };
                let state = std::mem::take(&mut self.state.profile);
                self.state.profile = ProfileReducer::reduce(state, intent);
                if let Some(user) = changed_user {
                    self.apply(Action::Auth(AuthIntent::UserChanged(user)));
                }
            }
            Action::Auth(intent) => self.apply_auth(intent),
        }
    }

    fn apply_auth(&mut self, intent: AuthIntent) {
        let lifecycle = &self.state.auth.lifecycle;
        let mut logged_out = false;
        match &intent {
            AuthIntent::LoggedIn {
                ticket,
                token,
                user,
            } if !lifecycle.is_retired(*ticket) => {
                if let Err(e) = self.session.save(token.expose(), user) {
                    tracing::error!(error = %e, "Failed to persist session");
                }
            }
            AuthIntent::Failed { ticket, .. }
                if (ticket.kind == AuthKind::CurrentUser && lifecycle.is_current(*ticket))
                    || (ticket.kind == AuthKind::Login && !lifecycle.is_retired(*ticket)) =>
            {
                self.clear_session();
            }
            AuthIntent::LoggedOut(ticket) if !lifecycle.is_retired(*ticket) => {
                self.clear_session();
                logged_out = true;
            }
            _ => {}
        }

        let state = std::mem::take(&mut self.state.auth);
        self.state.auth = AuthReducer::reduce(state, intent);

        if logged_out {
            self.teardown();
        }
    }

    fn clear_session(&self) {
        if let Err(e) = self.session.clear() {
            tracing::error!(error = %e, "Failed to clear session");
        }
    }

    /// Run one operation to completion.
    pub async fn run(&mut self, op: impl Into<Operation>) -> Result<(), ErrorPayload> {
        let pending = self.begin(op);
        let action = pending.execute().await;
        let outcome = match action.error() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        };
        self.apply(action);
        outcome
    }

    /// Drop every slice's data and ignore responses to earlier requests.
    pub fn teardown(&mut self) {
        tracing::info!("Tearing down application state");
        self.apply(Action::Album(AlbumIntent::Reset));
        self.apply(Action::Image(ImageIntent::Reset));
        self.apply(Action::Profile(ProfileIntent::Reset));
        self.apply(Action::Auth(AuthIntent::Reset));
    }
}
