//! Base trait for reducer-owned state.

/// Marker trait for state objects driven by a [`Reducer`](super::Reducer).
///
/// States are cloneable snapshots that carry everything a view needs to
/// render, and compare with `PartialEq` so tests can assert transitions.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
