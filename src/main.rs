//! Binary entry point: resolve paths, start logging, open the store, hydrate
//! the view model and hand control to the terminal UI.
use emoji_shelf::config::AppPaths;
use emoji_shelf::{logging, run_app, App, EmojiViewModel, SqliteStore};
use tracing::info;

/// Returning a `Result` bubbles fatal startup problems (no home directory, an
/// unopenable database) to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let paths = AppPaths::resolve()?;
    logging::init(&paths)?;

    let store = SqliteStore::open_default(&paths)?;
    let view_model = EmojiViewModel::load(store);
    info!(count = view_model.len(), db = %paths.db_file.display(), "emoji shelf started");

    let mut app = App::new(view_model);
    run_app(&mut app)
}
