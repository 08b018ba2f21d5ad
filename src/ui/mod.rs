//! Ratatui front-end. It renders the view model's filtered list and turns key
//! presses into view model calls; it never keeps its own copy of the emojis.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
