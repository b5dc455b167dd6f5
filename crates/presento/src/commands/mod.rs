pub mod completion;
pub mod config;
pub mod deck;
pub mod export;
pub mod import;

use std::path::PathBuf;

use crate::config::Config;
use crate::session::Session;
use crate::storage::FileStore;

/// Pick the storage directory: `--data-dir`, then `storage.data_dir`, then the
/// platform data directory.
pub fn data_dir(flag: Option<PathBuf>, config: &Config) -> anyhow::Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = config.data_dir() {
        return Ok(dir.to_path_buf());
    }
    FileStore::default_dir().ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

pub fn open_session(flag: Option<PathBuf>) -> anyhow::Result<Session<FileStore>> {
    let config = Config::load_or_default();
    let dir = data_dir(flag, &config)?;
    log::debug!("Using deck storage at {}", dir.display());
    Ok(Session::open(FileStore::new(dir))?)
}
