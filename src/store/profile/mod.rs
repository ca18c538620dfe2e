//! Profile slice: the signed-in user's profile and password forms.

mod intent;
mod operation;
mod reducer;
mod state;

pub use intent::ProfileIntent;
pub use operation::{ProfileKind, ProfileOperation};
pub use reducer::ProfileReducer;
pub use state::{ProfileState, PASSWORD_UPDATED, PROFILE_UPDATED};
