//! Album slice: own albums, the album being viewed, and albums shared with
//! the user.

mod intent;
mod operation;
mod reducer;
mod state;

pub use intent::AlbumIntent;
pub use operation::{AlbumKind, AlbumOperation};
pub use reducer::AlbumReducer;
pub use state::AlbumState;
