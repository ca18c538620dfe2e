//! Terminal client for the Picsilfy photo-album sharing service.
//!
//! The crate is split into:
//! - [`api`] - typed REST client for the remote backend
//! - [`store`] - per-slice state containers (album, image, profile, auth)
//! - [`search`] - debounced image search panel
//! - [`routes`] - screen routes and the authentication guard
//! - [`ui`] - ratatui front end driving the store

pub mod api;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod routes;
pub mod search;
pub mod session;
pub mod store;
pub mod ui;
pub mod validation;
