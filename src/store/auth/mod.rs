//! Auth slice: who is signed in.

mod intent;
mod operation;
mod reducer;
mod state;

pub use intent::AuthIntent;
pub use operation::{AuthKind, AuthOperation};
pub use reducer::AuthReducer;
pub use state::{AuthState, REGISTERED_NOTICE};
