//! Debounced image search overlay.

mod controller;
mod debounce;
mod intent;
mod reducer;
mod state;

pub use controller::{DueCallback, SearchController};
pub use debounce::Debouncer;
pub use intent::SearchIntent;
pub use reducer::SearchReducer;
pub use state::{SearchField, SearchPanelState};
