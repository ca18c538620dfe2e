use crate::api::{ApiClient, PasswordChange, ProfileUpdate};
use crate::store::profile::intent::ProfileIntent;
use crate::store::status::{RequestKind, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Fetch,
    Update,
    ChangePassword,
}

impl RequestKind for ProfileKind {
    fn replaces(self) -> bool {
        matches!(self, ProfileKind::Fetch)
    }

    fn fallback_message(self) -> &'static str {
        match self {
            ProfileKind::Fetch => "Failed to fetch profile",
            ProfileKind::Update => "Failed to update profile",
            ProfileKind::ChangePassword => "Failed to update password",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOperation {
    Fetch,
    Update(ProfileUpdate),
    ChangePassword(PasswordChange),
}

impl ProfileOperation {
    pub fn kind(&self) -> ProfileKind {
        match self {
            ProfileOperation::Fetch => ProfileKind::Fetch,
            ProfileOperation::Update(_) => ProfileKind::Update,
            ProfileOperation::ChangePassword(_) => ProfileKind::ChangePassword,
        }
    }

    pub(crate) async fn execute(
        self,
        ticket: Ticket<ProfileKind>,
        api: &ApiClient,
    ) -> ProfileIntent {
        let result = match self {
            ProfileOperation::Fetch => api
                .get_profile()
                .await
                .map(|user| ProfileIntent::Loaded { ticket, user }),
            ProfileOperation::Update(update) => api
                .update_profile(&update)
                .await
                .map(|user| ProfileIntent::Updated { ticket, user }),
            ProfileOperation::ChangePassword(change) => api
                .update_password(&change)
                .await
                .map(|_| ProfileIntent::PasswordChanged(ticket)),
        };

        result.unwrap_or_else(|err| ProfileIntent::Failed {
            ticket,
            error: err.into_rejection(ticket.kind.fallback_message()),
        })
    }
}
