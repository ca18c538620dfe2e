//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are either user actions (key presses, form submissions) or
/// settled request outcomes posted back to the event loop.
pub trait Intent: Send + 'static {}
