use emoji_shelf::config::AppPaths;
use emoji_shelf::db::{load_emojis, EMOJIS_KEY};
use emoji_shelf::{
    sample_emojis, Category, Emoji, EmojiFilter, EmojiViewModel, KeyValueStore, SqliteStore,
};

fn open(paths: &AppPaths) -> EmojiViewModel<SqliteStore> {
    EmojiViewModel::load(SqliteStore::open_default(paths).unwrap())
}

#[test]
fn first_launch_seeds_and_persists_the_samples() {
    let dir = tempfile::tempdir().unwrap();
    let paths = AppPaths::under(dir.path().join("shelf"));

    let view_model = open(&paths);
    let symbols: Vec<String> = view_model.emojis().iter().map(|e| e.emoji.clone()).collect();
    let expected: Vec<String> = sample_emojis().into_iter().map(|e| e.emoji).collect();
    assert_eq!(symbols, expected);

    let stored = load_emojis(view_model.store()).unwrap().unwrap();
    assert_eq!(stored, view_model.emojis());
}

#[test]
fn edits_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let paths = AppPaths::under(dir.path().join("shelf"));

    let (pizza_id, copy_id) = {
        let mut view_model = open(&paths);
        let pizza_id = view_model
            .emojis()
            .iter()
            .find(|e| e.emoji == "🍕")
            .map(|e| e.id)
            .unwrap();

        view_model.update_description(pizza_id, "Pizza").unwrap();
        let copy_id = view_model.duplicate(pizza_id).unwrap();
        view_model.toggle_favorite(pizza_id);
        assert!(view_model.move_items(&[0], 3));
        (pizza_id, copy_id)
    };

    let reopened = open(&paths);
    assert_eq!(reopened.len(), 11);

    let pizza = reopened.get(pizza_id).unwrap();
    assert_eq!(pizza.description, "Pizza");
    assert!(pizza.is_favorite);

    let copy = reopened.emojis().last().unwrap();
    assert_eq!(copy.id, copy_id);
    assert_eq!(copy.description, "Pizza (Copy)");
    assert_eq!(copy.category, Category::Food);
    assert!(!copy.is_favorite);

    assert_eq!(reopened.emojis()[2].emoji, "😀");
}

#[test]
fn filtered_delete_against_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let paths = AppPaths::under(dir.path().join("shelf"));

    {
        let mut view_model = open(&paths);
        let ids: Vec<_> = view_model.emojis().iter().map(|e| e.id).collect();
        for id in ids {
            view_model.remove_by_id(id);
        }
        for (symbol, name, category) in [
            ("🍎", "A", Category::Food),
            ("🌲", "B", Category::Nature),
            ("🍇", "C", Category::Food),
            ("🌵", "D", Category::Nature),
            ("🍋", "E", Category::Food),
        ] {
            view_model.add(Emoji::create(symbol, name, category));
        }

        view_model.remove_at(&[1], &EmojiFilter::with_category(Category::Nature));
    }

    let reopened = open(&paths);
    let names: Vec<&str> = reopened
        .emojis()
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(names, ["A", "B", "C", "E"]);
}

#[test]
fn corrupt_payload_falls_back_to_samples() {
    let dir = tempfile::tempdir().unwrap();
    let paths = AppPaths::under(dir.path().join("shelf"));

    {
        let mut store = SqliteStore::open_default(&paths).unwrap();
        store.write(EMOJIS_KEY, "[{\"broken\": true}]").unwrap();
    }

    let view_model = open(&paths);
    assert_eq!(view_model.len(), 10);
    assert_eq!(load_emojis(view_model.store()).unwrap().unwrap().len(), 10);
}
