//! Domain models for the emoji collection. These stay plain data holders so
//! the view model can focus on list management and the UI on presentation.
//! The serde layout doubles as the on-disk JSON format, so renaming a field
//! here is a storage migration.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Closed set of categories an emoji can belong to. The declaration order is
/// the order shown in pickers and filter cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Smileys,
    Nature,
    Food,
    Objects,
    Symbols,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Smileys,
        Category::Nature,
        Category::Food,
        Category::Objects,
        Category::Symbols,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Smileys => "Smileys",
            Category::Nature => "Nature",
            Category::Food => "Food",
            Category::Objects => "Objects",
            Category::Symbols => "Symbols",
        }
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|category| *category == self)
            .unwrap_or(0)
    }

    /// Step forward through `ALL`, wrapping at the end.
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Step backward through `ALL`, wrapping at the start.
    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownCategory(wanted.to_string()))
    }
}

/// The fixed category enumeration in display order.
pub fn categories() -> &'static [Category] {
    &Category::ALL
}

/// One entry of the collection. Identity is the `id`; two values with the same
/// id compare equal even if an edit is in flight on one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emoji {
    pub id: Uuid,
    /// The glyph itself, e.g. "😀".
    pub emoji: String,
    pub description: String,
    pub category: Category,
    pub is_favorite: bool,
    /// Set once at creation.
    pub created_date: DateTime<Utc>,
}

impl Emoji {
    /// Build a record with a fresh id. Every other field is taken verbatim.
    pub fn new(
        emoji: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        is_favorite: bool,
        created_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            emoji: emoji.into(),
            description: description.into(),
            category,
            is_favorite,
            created_date,
        }
    }

    /// Shorthand for a non-favorite record created right now.
    pub fn create(
        emoji: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> Self {
        Self::new(emoji, description, category, false, Utc::now())
    }

    /// Constructor for user input: both text fields are trimmed and must be
    /// non-empty.
    pub fn validated(
        emoji: &str,
        description: &str,
        category: Category,
        is_favorite: bool,
    ) -> Result<Self, ValidationError> {
        let symbol = emoji.trim();
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        let description = validate_description(description)?;
        Ok(Self::new(symbol, description, category, is_favorite, Utc::now()))
    }

    /// `"<emoji> - <description>"`, the text handed to copy and share actions.
    pub fn share_text(&self) -> String {
        format!("{} - {}", self.emoji, self.description)
    }
}

impl PartialEq for Emoji {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Emoji {}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji, self.description)
    }
}

/// Trim a description and reject it when nothing is left.
pub fn validate_description(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyDescription)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Seed data used on first run and by "reset". Timestamps are staggered from
/// seven days ago up to now.
pub fn sample_emojis() -> Vec<Emoji> {
    let now = Utc::now();
    let days_ago = |days: i64| now - Duration::days(days);
    let hours_ago = |hours: i64| now - Duration::hours(hours);

    vec![
        Emoji::new(
            "😀",
            "Grinning face - Happiness and joy",
            Category::Smileys,
            true,
            days_ago(7),
        ),
        Emoji::new(
            "❤️",
            "Red heart - Deep love and affection",
            Category::Symbols,
            true,
            days_ago(6),
        ),
        Emoji::new(
            "🍕",
            "Pizza - Everyone's favorite Italian food",
            Category::Food,
            false,
            days_ago(5),
        ),
        Emoji::new(
            "🌳",
            "Tree - Nature and the environment",
            Category::Nature,
            false,
            days_ago(4),
        ),
        Emoji::new(
            "⚽",
            "Soccer ball - The most popular sport in the world",
            Category::Objects,
            true,
            days_ago(3),
        ),
        Emoji::new(
            "🎵",
            "Musical note - Music and melodies",
            Category::Symbols,
            false,
            days_ago(2),
        ),
        Emoji::new(
            "🚗",
            "Car - Transport and vehicles",
            Category::Objects,
            false,
            days_ago(1),
        ),
        Emoji::new(
            "🌙",
            "Moon - Night and astronomy",
            Category::Nature,
            true,
            hours_ago(12),
        ),
        Emoji::new(
            "🎉",
            "Party popper - Celebration and fun",
            Category::Symbols,
            false,
            hours_ago(6),
        ),
        Emoji::new(
            "☕",
            "Coffee - The morning energizer",
            Category::Food,
            true,
            now,
        ),
    ]
}
