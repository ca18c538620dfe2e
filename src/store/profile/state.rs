use crate::api::User;
use crate::mvi::UiState;
use crate::store::profile::operation::ProfileKind;
use crate::store::status::Lifecycle;

pub const PROFILE_UPDATED: &str = "Profile updated successfully";
pub const PASSWORD_UPDATED: &str = "Password updated successfully";

/// Profile data plus two independent forms.
///
/// Fetching and updating the profile share `lifecycle`; the password form
/// has its own so a pending password change never hides profile errors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileState {
    pub user: Option<User>,
    pub lifecycle: Lifecycle<ProfileKind>,
    pub password: Lifecycle<ProfileKind>,
    pub message: Option<String>,
    pub password_message: Option<String>,
}

impl UiState for ProfileState {}

impl ProfileState {
    pub(crate) fn lifecycle_for(&mut self, kind: ProfileKind) -> &mut Lifecycle<ProfileKind> {
        match kind {
            ProfileKind::ChangePassword => &mut self.password,
            ProfileKind::Fetch | ProfileKind::Update => &mut self.lifecycle,
        }
    }

    pub fn next_ticket(&self, kind: ProfileKind) -> crate::store::status::Ticket<ProfileKind> {
        match kind {
            ProfileKind::ChangePassword => self.password.next_ticket(kind),
            ProfileKind::Fetch | ProfileKind::Update => self.lifecycle.next_ticket(kind),
        }
    }
}
