//! Core library surface for Emoji Shelf, a personal emoji collection kept in a
//! local SQLite key-value store.
//!
//! The list-management logic lives in [`view_model`] and can be driven without
//! the terminal UI; the `bin` target only wires the pieces together.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;
pub mod view_model;

/// Persistence seam and its implementations.
pub use db::{KeyValueStore, MemoryStore, SqliteStore};

pub use error::{StoreError, ValidationError};

/// The record type and the fixed category set.
pub use models::{categories, sample_emojis, Category, Emoji};

pub use ui::{run_app, App};
pub use view_model::{filter_emojis, EmojiFilter, EmojiViewModel};
