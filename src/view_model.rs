//! The collection manager. `EmojiViewModel` owns the ordered list of emojis
//! plus the active search/category filter, and writes the whole list back to
//! its store at the end of every mutating call. The UI never keeps its own copy
//! of the list; it renders `filtered()` and routes user actions here.
//!
//! Index-based operations come in two flavours and must not be mixed up:
//! `remove_at` takes positions in a *filtered* view and resolves them to ids
//! first, while `move_items` takes positions in the full collection and is
//! refused whenever a filter is active.

use std::collections::{BTreeSet, HashSet};

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db::{load_emojis, save_emojis, KeyValueStore};
use crate::error::ValidationError;
use crate::models::{sample_emojis, validate_description, Category, Emoji};

/// Suffix appended to the description of a duplicated emoji.
pub const COPY_MARKER: &str = " (Copy)";

/// Ephemeral search state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiFilter {
    pub search_text: String,
    /// `None` shows every category.
    pub category: Option<Category>,
}

impl EmojiFilter {
    pub fn new(search_text: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            search_text: search_text.into(),
            category,
        }
    }

    pub fn with_category(category: Category) -> Self {
        Self::new("", Some(category))
    }

    pub fn with_search(search_text: impl Into<String>) -> Self {
        Self::new(search_text, None)
    }

    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty() || self.category.is_some()
    }

    /// Category must match exactly when one is selected; a non-empty search
    /// must appear, ignoring case, in the description, the glyph or the
    /// category name.
    pub fn matches(&self, emoji: &Emoji) -> bool {
        if let Some(category) = self.category {
            if emoji.category != category {
                return false;
            }
        }

        if self.search_text.is_empty() {
            return true;
        }

        let needle = self.search_text.to_lowercase();
        emoji.description.to_lowercase().contains(&needle)
            || emoji.emoji.to_lowercase().contains(&needle)
            || emoji.category.as_str().to_lowercase().contains(&needle)
    }
}

/// Filtered view of `emojis`, in collection order.
pub fn filter_emojis<'a>(emojis: &'a [Emoji], filter: &EmojiFilter) -> Vec<&'a Emoji> {
    emojis.iter().filter(|emoji| filter.matches(emoji)).collect()
}

/// Reorder like a list `move(fromOffsets:toOffset:)`: the selected elements
/// keep their relative order and land so that the first of them sits where
/// `to` pointed before the removal. Out-of-range sources are dropped and `to`
/// is clamped to the length. Returns false when nothing was selected.
fn move_offsets<T>(items: &mut Vec<T>, from: &[usize], to: usize) -> bool {
    let len = items.len();
    let sources: BTreeSet<usize> = from.iter().copied().filter(|&index| index < len).collect();
    if sources.is_empty() {
        return false;
    }

    let to = to.min(len);
    let below = sources.iter().filter(|&&index| index < to).count();

    let mut moved: Vec<T> = sources.iter().rev().map(|&index| items.remove(index)).collect();
    moved.reverse();

    let insert_at = to - below;
    items.splice(insert_at..insert_at, moved);
    true
}

pub struct EmojiViewModel<S: KeyValueStore> {
    emojis: Vec<Emoji>,
    filter: EmojiFilter,
    store: S,
    last_save_error: Option<String>,
}

impl<S: KeyValueStore> EmojiViewModel<S> {
    /// Hydrate from the store. When nothing usable is stored the sample data
    /// is installed and written back immediately. When the store cannot be
    /// read at all the samples are shown but nothing is written, so the
    /// stored collection is left intact.
    pub fn load(store: S) -> Self {
        let mut view_model = Self {
            emojis: Vec::new(),
            filter: EmojiFilter::default(),
            store,
            last_save_error: None,
        };

        match load_emojis(&view_model.store) {
            Ok(Some(saved)) => {
                debug!(count = saved.len(), "loaded saved emojis");
                view_model.emojis = saved;
            }
            Ok(None) => {
                view_model.emojis = sample_emojis();
                info!(
                    count = view_model.emojis.len(),
                    "no saved emojis found, seeding sample data"
                );
                view_model.persist();
            }
            Err(err) => {
                warn!(error = %err, "failed to read saved emojis, showing sample data");
                view_model.emojis = sample_emojis();
                view_model.last_save_error = Some(err.to_string());
            }
        }

        view_model
    }

    pub fn emojis(&self) -> &[Emoji] {
        &self.emojis
    }

    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Emoji> {
        self.emojis.iter().find(|emoji| emoji.id == id)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.emojis.iter().position(|emoji| emoji.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct access to the backing store. Writes made through here bypass
    /// the in-memory list; intended for tests and maintenance tooling.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Message from the most recent failed load or save, cleared by the next
    /// successful save.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    // Filter state

    pub fn filter(&self) -> &EmojiFilter {
        &self.filter
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filter.category = category;
    }

    pub fn clear_filters(&mut self) {
        self.filter = EmojiFilter::default();
    }

    /// The collection as seen through `filter`.
    pub fn filtered_view(&self, filter: &EmojiFilter) -> Vec<&Emoji> {
        filter_emojis(&self.emojis, filter)
    }

    /// The collection as seen through the view model's own filter.
    pub fn filtered(&self) -> Vec<&Emoji> {
        self.filtered_view(&self.filter)
    }

    /// Position of `id` in the current filtered view, if it is visible.
    pub fn filtered_index_of(&self, id: Uuid) -> Option<usize> {
        self.filtered().iter().position(|emoji| emoji.id == id)
    }

    // Mutations

    pub fn add(&mut self, emoji: Emoji) {
        debug!(id = %emoji.id, "adding emoji");
        self.emojis.push(emoji);
        self.persist();
    }

    /// Remove the emoji with `id`. Unknown ids are ignored.
    pub fn remove_by_id(&mut self, id: Uuid) {
        if let Some(index) = self.position(id) {
            debug!(%id, "removing emoji");
            self.emojis.remove(index);
            self.persist();
        }
    }

    /// Remove by positions in the view produced by `filter`. Positions are
    /// resolved to ids against a snapshot of that view before anything is
    /// removed; positions past its end are ignored.
    pub fn remove_at(&mut self, filtered_indices: &[usize], filter: &EmojiFilter) {
        let ids: HashSet<Uuid> = {
            let view = self.filtered_view(filter);
            filtered_indices
                .iter()
                .filter_map(|&index| view.get(index).map(|emoji| emoji.id))
                .collect()
        };
        if ids.is_empty() {
            return;
        }

        debug!(count = ids.len(), "removing emojis from filtered view");
        self.emojis.retain(|emoji| !ids.contains(&emoji.id));
        self.persist();
    }

    /// Reorder the full collection. Refused while a filter is active because
    /// visible positions would not line up with the stored order. Returns
    /// whether the move was applied.
    pub fn move_items(&mut self, from_indices: &[usize], to_index: usize) -> bool {
        if self.filter.is_active() {
            debug!("ignoring reorder while a filter is active");
            return false;
        }

        if !move_offsets(&mut self.emojis, from_indices, to_index) {
            return false;
        }
        self.persist();
        true
    }

    pub fn toggle_favorite(&mut self, id: Uuid) {
        if let Some(index) = self.position(id) {
            let emoji = &mut self.emojis[index];
            emoji.is_favorite = !emoji.is_favorite;
            debug!(%id, favorite = emoji.is_favorite, "toggled favorite");
            self.persist();
        }
    }

    /// Replace the description of `id` with the trimmed `text`. Blank text is
    /// rejected without touching the list; unknown ids are ignored.
    pub fn update_description(&mut self, id: Uuid, text: &str) -> Result<(), ValidationError> {
        let description = validate_description(text)?;
        if let Some(index) = self.position(id) {
            self.emojis[index].description = description;
            debug!(%id, "updated description");
            self.persist();
        }
        Ok(())
    }

    /// Append a non-favorite copy of `id` with a fresh id and timestamp.
    /// Returns the new id, or `None` when the source does not exist.
    pub fn duplicate(&mut self, id: Uuid) -> Option<Uuid> {
        let source = self.get(id)?;
        let copy = Emoji::new(
            source.emoji.clone(),
            format!("{}{COPY_MARKER}", source.description),
            source.category,
            false,
            Utc::now(),
        );
        let new_id = copy.id;
        debug!(source = %id, copy = %new_id, "duplicating emoji");
        self.emojis.push(copy);
        self.persist();
        Some(new_id)
    }

    /// Throw away the current list and reinstall the sample data.
    pub fn reset_to_sample(&mut self) {
        info!("resetting emojis to sample data");
        self.emojis = sample_emojis();
        self.persist();
    }

    fn persist(&mut self) {
        match save_emojis(&mut self.store, &self.emojis) {
            Ok(()) => self.last_save_error = None,
            Err(err) => {
                warn!(error = %err, count = self.emojis.len(), "failed to save emojis");
                self.last_save_error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, EMOJIS_KEY};

    fn emoji(symbol: &str, description: &str, category: Category) -> Emoji {
        Emoji::create(symbol, description, category)
    }

    /// A(X) B(Y) C(X) D(Y) E(X) with X = Food and Y = Nature.
    fn five_emojis() -> Vec<Emoji> {
        vec![
            emoji("🍎", "A", Category::Food),
            emoji("🌲", "B", Category::Nature),
            emoji("🍇", "C", Category::Food),
            emoji("🌵", "D", Category::Nature),
            emoji("🍋", "E", Category::Food),
        ]
    }

    fn view_model_with(emojis: Vec<Emoji>) -> EmojiViewModel<MemoryStore> {
        let mut store = MemoryStore::new();
        save_emojis(&mut store, &emojis).unwrap();
        EmojiViewModel::load(store)
    }

    fn descriptions<S: KeyValueStore>(view_model: &EmojiViewModel<S>) -> Vec<&str> {
        view_model
            .emojis()
            .iter()
            .map(|emoji| emoji.description.as_str())
            .collect()
    }

    fn stored<S: KeyValueStore>(view_model: &EmojiViewModel<S>) -> Vec<Emoji> {
        load_emojis(view_model.store()).unwrap().unwrap()
    }

    #[test]
    fn empty_store_bootstraps_sample_data() {
        let view_model = EmojiViewModel::load(MemoryStore::new());
        let samples = sample_emojis();

        assert_eq!(view_model.len(), 10);
        let symbols: Vec<&str> = view_model.emojis().iter().map(|e| e.emoji.as_str()).collect();
        let expected: Vec<&str> = samples.iter().map(|e| e.emoji.as_str()).collect();
        assert_eq!(symbols, expected);

        let persisted = stored(&view_model);
        assert_eq!(persisted.len(), 10);
        assert_eq!(persisted, view_model.emojis());
    }

    #[test]
    fn malformed_store_is_treated_as_first_run() {
        let view_model = EmojiViewModel::load(MemoryStore::with_entry(EMOJIS_KEY, "not json"));
        assert_eq!(view_model.len(), 10);
        assert_eq!(stored(&view_model).len(), 10);
    }

    #[test]
    fn unreadable_store_keeps_its_data() {
        let mut store = MemoryStore::new();
        save_emojis(&mut store, &five_emojis()).unwrap();
        store.fail_reads = true;

        let mut view_model = EmojiViewModel::load(store);
        assert_eq!(view_model.len(), 10);
        assert!(view_model.last_save_error().is_some());

        view_model.store_mut().fail_reads = false;
        let kept: Vec<String> = stored(&view_model)
            .into_iter()
            .map(|emoji| emoji.description)
            .collect();
        assert_eq!(kept, ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn saved_collection_is_loaded_as_is() {
        let emojis = five_emojis();
        let view_model = view_model_with(emojis.clone());
        assert_eq!(view_model.emojis(), emojis.as_slice());
    }

    #[test]
    fn filter_by_category_keeps_order() {
        let view_model = view_model_with(five_emojis());
        let view = view_model.filtered_view(&EmojiFilter::with_category(Category::Food));
        let names: Vec<&str> = view.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, ["A", "C", "E"]);
        assert!(view.iter().all(|e| e.category == Category::Food));
    }

    #[test]
    fn search_matches_description_symbol_and_category_ignoring_case() {
        let view_model = view_model_with(vec![
            emoji("😀", "Grinning face", Category::Smileys),
            emoji("🍕", "Pizza slice", Category::Food),
            emoji("🌳", "Tree", Category::Nature),
        ]);

        let by_description = view_model.filtered_view(&EmojiFilter::with_search("PIZZA"));
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].emoji, "🍕");

        let by_symbol = view_model.filtered_view(&EmojiFilter::with_search("🌳"));
        assert_eq!(by_symbol.len(), 1);
        assert_eq!(by_symbol[0].description, "Tree");

        let by_category = view_model.filtered_view(&EmojiFilter::with_search("smiley"));
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].emoji, "😀");

        let none = view_model.filtered_view(&EmojiFilter::with_search("zebra"));
        assert!(none.is_empty());
    }

    #[test]
    fn category_and_search_compose() {
        let view_model = view_model_with(sample_emojis());
        let filter = EmojiFilter::new("o", Some(Category::Nature));
        let view = view_model.filtered_view(&filter);

        assert!(!view.is_empty());
        for emoji in view {
            assert_eq!(emoji.category, Category::Nature);
            assert!(filter.matches(emoji));
        }
    }

    #[test]
    fn empty_filter_returns_everything() {
        let view_model = view_model_with(five_emojis());
        assert_eq!(view_model.filtered().len(), 5);
        assert!(!view_model.filter().is_active());
    }

    #[test]
    fn add_appends_and_persists() {
        let mut view_model = view_model_with(five_emojis());
        let new = emoji("🎉", "Party", Category::Symbols);
        let new_id = new.id;
        view_model.add(new);

        assert_eq!(view_model.emojis().last().map(|e| e.id), Some(new_id));
        assert_eq!(stored(&view_model).len(), 6);
    }

    #[test]
    fn remove_by_id_is_idempotent() {
        let mut view_model = view_model_with(five_emojis());
        let target = view_model.emojis()[2].id;

        view_model.remove_by_id(target);
        let after_once: Vec<Emoji> = view_model.emojis().to_vec();
        view_model.remove_by_id(target);

        assert_eq!(view_model.emojis(), after_once.as_slice());
        assert_eq!(descriptions(&view_model), ["A", "B", "D", "E"]);
        assert_eq!(stored(&view_model), after_once);
    }

    #[test]
    fn remove_at_resolves_filtered_positions() {
        let mut view_model = view_model_with(five_emojis());
        let filter = EmojiFilter::with_category(Category::Nature);

        view_model.remove_at(&[1], &filter);

        assert_eq!(descriptions(&view_model), ["A", "B", "C", "E"]);
        let persisted: Vec<String> = stored(&view_model)
            .into_iter()
            .map(|e| e.description)
            .collect();
        assert_eq!(persisted, ["A", "B", "C", "E"]);
    }

    #[test]
    fn remove_at_handles_several_and_out_of_range_positions() {
        let mut view_model = view_model_with(five_emojis());
        let filter = EmojiFilter::with_category(Category::Food);

        view_model.remove_at(&[2, 0, 9], &filter);
        assert_eq!(descriptions(&view_model), ["B", "C", "D"]);

        view_model.remove_at(&[7], &filter);
        assert_eq!(descriptions(&view_model), ["B", "C", "D"]);
    }

    #[test]
    fn move_is_refused_while_filtered() {
        let mut view_model = view_model_with(five_emojis());
        view_model.set_category(Some(Category::Nature));

        assert!(!view_model.move_items(&[0], 2));
        assert_eq!(descriptions(&view_model), ["A", "B", "C", "D", "E"]);

        view_model.set_category(None);
        view_model.set_search_text("a");
        assert!(!view_model.move_items(&[0], 2));
        assert_eq!(descriptions(&view_model), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn move_follows_list_offset_semantics() {
        let mut view_model = view_model_with(five_emojis());

        assert!(view_model.move_items(&[0], 2));
        assert_eq!(descriptions(&view_model), ["B", "A", "C", "D", "E"]);

        assert!(view_model.move_items(&[4], 0));
        assert_eq!(descriptions(&view_model), ["E", "B", "A", "C", "D"]);

        assert!(view_model.move_items(&[0, 2], 5));
        assert_eq!(descriptions(&view_model), ["B", "C", "D", "E", "A"]);

        assert!(view_model.move_items(&[3, 1], 1));
        assert_eq!(descriptions(&view_model), ["B", "C", "E", "D", "A"]);

        let persisted: Vec<String> = stored(&view_model)
            .into_iter()
            .map(|e| e.description)
            .collect();
        assert_eq!(persisted, ["B", "C", "E", "D", "A"]);
    }

    #[test]
    fn move_ignores_out_of_range_sources_and_clamps_destination() {
        let mut view_model = view_model_with(five_emojis());
        assert!(!view_model.move_items(&[10], 0));
        assert!(!view_model.move_items(&[], 0));

        assert!(view_model.move_items(&[0], 99));
        assert_eq!(descriptions(&view_model), ["B", "C", "D", "E", "A"]);
    }

    #[test]
    fn toggle_favorite_twice_restores_value() {
        let mut view_model = view_model_with(five_emojis());
        let id = view_model.emojis()[1].id;

        view_model.toggle_favorite(id);
        assert!(view_model.get(id).unwrap().is_favorite);
        assert!(stored(&view_model)[1].is_favorite);

        view_model.toggle_favorite(id);
        assert!(!view_model.get(id).unwrap().is_favorite);
        assert!(!stored(&view_model)[1].is_favorite);

        view_model.toggle_favorite(Uuid::new_v4());
        assert_eq!(view_model.len(), 5);
    }

    #[test]
    fn update_description_trims_and_rejects_blank_text() {
        let mut view_model = view_model_with(five_emojis());
        let id = view_model.emojis()[0].id;

        view_model.update_description(id, "  Apple  ").unwrap();
        assert_eq!(view_model.get(id).unwrap().description, "Apple");
        assert_eq!(stored(&view_model)[0].description, "Apple");

        assert_eq!(
            view_model.update_description(id, "   "),
            Err(ValidationError::EmptyDescription)
        );
        assert_eq!(view_model.get(id).unwrap().description, "Apple");

        view_model.update_description(Uuid::new_v4(), "Ghost").unwrap();
        assert_eq!(descriptions(&view_model), ["Apple", "B", "C", "D", "E"]);
    }

    #[test]
    fn duplicate_appends_a_fresh_copy() {
        let mut source = emoji("🍕", "Pizza", Category::Food);
        source.is_favorite = true;
        let source_id = source.id;
        let mut view_model = view_model_with(vec![emoji("😀", "Smile", Category::Smileys), source]);

        let copy_id = view_model.duplicate(source_id).unwrap();
        assert_ne!(copy_id, source_id);

        let copy = view_model.emojis().last().unwrap();
        assert_eq!(copy.id, copy_id);
        assert_eq!(copy.emoji, "🍕");
        assert_eq!(copy.description, "Pizza (Copy)");
        assert_eq!(copy.category, Category::Food);
        assert!(!copy.is_favorite);
        assert_eq!(view_model.len(), 3);
        assert_eq!(stored(&view_model).len(), 3);

        assert_eq!(view_model.duplicate(Uuid::new_v4()), None);
        assert_eq!(view_model.len(), 3);
    }

    #[test]
    fn reset_restores_sample_data() {
        let mut view_model = view_model_with(five_emojis());
        view_model.reset_to_sample();
        assert_eq!(view_model.len(), 10);
        assert_eq!(stored(&view_model).len(), 10);
    }

    #[test]
    fn failed_writes_are_reported_but_not_fatal() {
        let mut view_model = view_model_with(five_emojis());
        view_model.store_mut().fail_writes = true;

        let id = view_model.emojis()[0].id;
        view_model.remove_by_id(id);
        assert_eq!(view_model.len(), 4);
        assert!(view_model.last_save_error().is_some());
        assert_eq!(stored(&view_model).len(), 5);

        view_model.store_mut().fail_writes = false;
        view_model.toggle_favorite(view_model.emojis()[0].id);
        assert!(view_model.last_save_error().is_none());
        assert_eq!(stored(&view_model).len(), 4);
    }

    #[test]
    fn clear_filters_resets_state() {
        let mut view_model = view_model_with(five_emojis());
        view_model.set_search_text("b");
        view_model.set_category(Some(Category::Nature));
        assert_eq!(view_model.filtered().len(), 1);
        assert_eq!(view_model.filtered_index_of(view_model.emojis()[1].id), Some(0));

        view_model.clear_filters();
        assert!(!view_model.filter().is_active());
        assert_eq!(view_model.filtered().len(), 5);
    }
}
