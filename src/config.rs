use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".emoji-shelf";
/// SQLite file name stored inside the application data directory.
pub const DB_FILE_NAME: &str = "emoji-shelf.sqlite";
/// Log file written by the tracing subscriber while the TUI owns the terminal.
pub const LOG_FILE_NAME: &str = "emoji-shelf.log";

/// Resolved on-disk locations for everything the app writes.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub db_file: PathBuf,
    pub log_file: PathBuf,
}

impl AppPaths {
    /// Locate the data directory inside the user's home.
    pub fn resolve() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::under(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Lay out the files beneath an explicit directory.
    pub fn under(data_dir: PathBuf) -> Self {
        Self {
            db_file: data_dir.join(DB_FILE_NAME),
            log_file: data_dir.join(LOG_FILE_NAME),
            data_dir,
        }
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).context("failed to create data directory")
    }
}
