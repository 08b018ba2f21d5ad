//! Persistence split across logical submodules: the key-value seam, its SQLite
//! and in-memory implementations, and the JSON codec for the collection.

mod connection;
mod emojis;
mod memory;

use crate::error::StoreError;

pub use connection::SqliteStore;
pub use emojis::{decode_emojis, encode_emojis, load_emojis, save_emojis, EMOJIS_KEY};
pub use memory::MemoryStore;

/// Minimal string key-value storage. The view model only ever touches one key,
/// but keeping the key explicit lets tests and tooling share a store.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
