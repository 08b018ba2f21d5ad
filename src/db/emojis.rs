use tracing::warn;

use super::KeyValueStore;
use crate::error::StoreError;
use crate::models::Emoji;

/// The single entry holding the whole collection as a JSON array.
pub const EMOJIS_KEY: &str = "saved_emojis";

pub fn encode_emojis(emojis: &[Emoji]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(emojis)?)
}

pub fn decode_emojis(raw: &str) -> Result<Vec<Emoji>, StoreError> {
    Ok(serde_json::from_str(raw)?)
}

/// Read the persisted collection. A missing entry and a payload that does
/// not decode both come back as `Ok(None)`. A failing store is an error, since
/// whatever it holds may still be valid.
pub fn load_emojis<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Option<Vec<Emoji>>, StoreError> {
    let Some(raw) = store.read(EMOJIS_KEY)? else {
        return Ok(None);
    };

    match decode_emojis(&raw) {
        Ok(emojis) => Ok(Some(emojis)),
        Err(err) => {
            warn!(error = %err, "saved emojis are unreadable, ignoring them");
            Ok(None)
        }
    }
}

pub fn save_emojis<S: KeyValueStore + ?Sized>(
    store: &mut S,
    emojis: &[Emoji],
) -> Result<(), StoreError> {
    let encoded = encode_emojis(emojis)?;
    store.write(EMOJIS_KEY, &encoded)
}
