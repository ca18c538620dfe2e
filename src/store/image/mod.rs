//! Image slice: the images of the album on screen.

mod intent;
mod operation;
mod reducer;
mod state;

pub use intent::ImageIntent;
pub use operation::{ImageKind, ImageOperation};
pub use reducer::ImageReducer;
pub use state::ImageState;
