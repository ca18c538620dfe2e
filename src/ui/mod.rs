//! Terminal front end.
//!
//! [`run`] owns the terminal and the event loop. Screens turn keys into
//! [`screens::Command`]s; [`app::App`] executes them against the store and
//! spawns requests on the tokio runtime.

pub mod app;
pub mod events;
pub mod footer;
pub mod form;
pub mod header;
pub mod input;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod search_panel;
pub mod terminal_guard;
pub mod theme;
pub mod widgets;

pub use runtime::run;
