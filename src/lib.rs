//! Reactive state core of a home-screen launcher.
//!
//! [`ui::mvi`] holds the screen-agnostic engine (state stream, intent
//! routing, one-shot events, cancellable task queue). [`ui::main_screen`]
//! builds the launcher's main screen on top of it, talking to the outside
//! world only through the collaborator traits in [`platform`].

pub mod config;
pub mod logging;
pub mod platform;
pub mod shutdown;
pub mod ui;
