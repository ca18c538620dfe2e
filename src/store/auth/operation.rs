use crate::api::{ApiClient, LoginRequest, RegisterRequest};
use crate::config::SecureString;
use crate::store::auth::intent::AuthIntent;
use crate::store::status::{RequestKind, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    CurrentUser,
    Login,
    Register,
    Logout,
}

impl RequestKind for AuthKind {
    fn replaces(self) -> bool {
        matches!(self, AuthKind::CurrentUser)
    }

    fn fallback_message(self) -> &'static str {
        match self {
            AuthKind::CurrentUser => "Failed to load current user",
            AuthKind::Login => "Login failed",
            AuthKind::Register => "Registration failed",
            AuthKind::Logout => "Logout failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOperation {
    CurrentUser,
    Login(LoginRequest),
    Register(RegisterRequest),
    Logout,
}

impl AuthOperation {
    pub fn kind(&self) -> AuthKind {
        match self {
            AuthOperation::CurrentUser => AuthKind::CurrentUser,
            AuthOperation::Login(_) => AuthKind::Login,
            AuthOperation::Register(_) => AuthKind::Register,
            AuthOperation::Logout => AuthKind::Logout,
        }
    }

    pub(crate) async fn execute(self, ticket: Ticket<AuthKind>, api: &ApiClient) -> AuthIntent {
        let result = match self {
            AuthOperation::CurrentUser => api
                .current_user()
                .await
                .map(|user| AuthIntent::UserLoaded { ticket, user }),
            AuthOperation::Login(request) => {
                api.login(&request)
                    .await
                    .map(|response| AuthIntent::LoggedIn {
                        ticket,
                        token: SecureString::new(response.token),
                        user: response.user,
                    })
            }
            AuthOperation::Register(request) => api
                .register(&request)
                .await
                .map(|_| AuthIntent::Registered(ticket)),
            AuthOperation::Logout => {
                // The local session is dropped whatever the server says.
                if let Err(e) = api.logout().await {
                    tracing::warn!(error = %e, "Logout request failed");
                }
                Ok(AuthIntent::LoggedOut(ticket))
            }
        };

        result.unwrap_or_else(|err| AuthIntent::Failed {
            ticket,
            error: err.into_rejection(ticket.kind.fallback_message()),
        })
    }
}
