use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::models::{validate_description, Category, Emoji};

use super::helpers::category_style;

/// Glyph pre-filled in the add form.
const DEFAULT_SYMBOL: &str = "😀";

/// Internal representation of the "new emoji" form.
#[derive(Clone)]
pub(crate) struct EmojiForm {
    pub(crate) emoji: String,
    pub(crate) description: String,
    pub(crate) category: Category,
    pub(crate) is_favorite: bool,
    pub(crate) active: EmojiField,
    pub(crate) error: Option<String>,
}

/// Fields available within the emoji form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum EmojiField {
    Symbol,
    #[default]
    Description,
    Category,
    Favorite,
}

impl EmojiField {
    fn next(self) -> Self {
        match self {
            EmojiField::Symbol => EmojiField::Description,
            EmojiField::Description => EmojiField::Category,
            EmojiField::Category => EmojiField::Favorite,
            EmojiField::Favorite => EmojiField::Symbol,
        }
    }

    fn previous(self) -> Self {
        match self {
            EmojiField::Symbol => EmojiField::Favorite,
            EmojiField::Description => EmojiField::Symbol,
            EmojiField::Category => EmojiField::Description,
            EmojiField::Favorite => EmojiField::Category,
        }
    }
}

impl Default for EmojiForm {
    fn default() -> Self {
        Self {
            emoji: DEFAULT_SYMBOL.to_string(),
            description: String::new(),
            category: Category::Smileys,
            is_favorite: false,
            active: EmojiField::default(),
            error: None,
        }
    }
}

impl EmojiForm {
    /// Start with the category filter preselected so new entries stay visible.
    pub(crate) fn with_category(category: Option<Category>) -> Self {
        let mut form = Self::default();
        if let Some(category) = category {
            form.category = category;
        }
        form
    }

    pub(crate) fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    /// Append a character to the active text field. Space flips the favorite
    /// flag when that field has focus.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            EmojiField::Symbol => {
                self.emoji.push(ch);
                true
            }
            EmojiField::Description => {
                self.description.push(ch);
                true
            }
            EmojiField::Category => false,
            EmojiField::Favorite => {
                if ch == ' ' {
                    self.is_favorite = !self.is_favorite;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            EmojiField::Symbol => {
                self.emoji.pop();
            }
            EmojiField::Description => {
                self.description.pop();
            }
            EmojiField::Category | EmojiField::Favorite => {}
        }
    }

    /// Left/right arrows cycle the category picker.
    pub(crate) fn cycle_category(&mut self, forward: bool) {
        if self.active == EmojiField::Category {
            self.category = if forward {
                self.category.next()
            } else {
                self.category.previous()
            };
        }
    }

    /// Validate the inputs and build the record to add.
    pub(crate) fn parse_inputs(&self) -> Result<Emoji, ValidationError> {
        Emoji::validated(&self.emoji, &self.description, self.category, self.is_favorite)
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: EmojiField) -> Line<'static> {
        let is_active = self.active == field;
        let label_style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let value = match field {
            EmojiField::Symbol => text_value(&self.emoji, is_active),
            EmojiField::Description => text_value(&self.description, is_active),
            EmojiField::Category => Span::styled(
                format!("< {} >", self.category),
                category_style(self.category),
            ),
            EmojiField::Favorite => {
                Span::raw(if self.is_favorite { "[x] ★" } else { "[ ]" }.to_string())
            }
        };

        let name = match field {
            EmojiField::Symbol => "Emoji",
            EmojiField::Description => "Description",
            EmojiField::Category => "Category",
            EmojiField::Favorite => "Favorite",
        };

        Line::from(vec![Span::styled(format!("{name}: "), label_style), value])
    }

    /// Character count of the active text field, for cursor placement.
    pub(crate) fn active_len(&self) -> Option<usize> {
        match self.active {
            EmojiField::Symbol => Some(self.emoji.chars().count()),
            EmojiField::Description => Some(self.description.chars().count()),
            EmojiField::Category | EmojiField::Favorite => None,
        }
    }
}

fn text_value(value: &str, is_active: bool) -> Span<'static> {
    if value.is_empty() {
        Span::styled("<required>", Style::default().fg(Color::DarkGray))
    } else if is_active {
        Span::styled(value.to_string(), Style::default().fg(Color::Yellow))
    } else {
        Span::raw(value.to_string())
    }
}

/// Single-field form used to edit an existing description.
#[derive(Clone)]
pub(crate) struct DescriptionForm {
    pub(crate) id: Uuid,
    pub(crate) emoji: String,
    pub(crate) description: String,
    pub(crate) error: Option<String>,
}

impl DescriptionForm {
    pub(crate) fn from_emoji(emoji: &Emoji) -> Self {
        Self {
            id: emoji.id,
            emoji: emoji.emoji.clone(),
            description: emoji.description.clone(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            false
        } else {
            self.description.push(ch);
            true
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.description.pop();
    }

    /// The save action stays unavailable while the text is blank.
    pub(crate) fn is_valid(&self) -> bool {
        validate_description(&self.description).is_ok()
    }
}

/// Pending delete, remembered by its position in the filtered list it was
/// picked from.
#[derive(Clone)]
pub(crate) struct ConfirmEmojiDelete {
    pub(crate) filtered_index: usize,
    pub(crate) label: String,
}
