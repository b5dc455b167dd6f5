//! Durable key-value storage for the deck.
//!
//! Two independent keys hold the deck: the slide list as JSON and the
//! presentation name as a plain string. A third key remembers the last route.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::deck::slide::{SlideRecord, slides_from_records};
use crate::deck::{DEFAULT_NAME, Deck, Route};

pub const SLIDES_KEY: &str = "presento-slides";
pub const NAME_KEY: &str = "presento-presentation-name";
pub const ROUTE_KEY: &str = "presento-route";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {key}: {source}")]
    Io { key: String, source: io::Error },

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("failed to encode {key}: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

/// Get/set/remove string values by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the whole value. Readers never observe a partial write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("presento"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

fn io_error(key: &str) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(io_error(key))?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_error(key))?;
        tmp.write_all(value.as_bytes()).map_err(io_error(key))?;
        tmp.persist(&path).map_err(|e| io_error(key)(e.error))?;
        log::trace!("Wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key)(e)),
        }
    }
}

/// Load and deserialize a JSON value. Undecodable values are reported as
/// `Ok(None)` after a warning, so a corrupt key never blocks startup.
pub fn load_json<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::warn!("Ignoring unreadable {key}: {e}");
            Ok(None)
        }
    }
}

pub fn save_json<S: KeyValueStore + ?Sized, T: Serialize + ?Sized>(
    store: &mut S,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Restore the deck, seeding the sample deck when nothing usable is stored.
pub fn load_deck<S: KeyValueStore + ?Sized>(store: &S) -> Result<Deck, StorageError> {
    let name = store
        .get(NAME_KEY)?
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let records: Option<Vec<SlideRecord>> = load_json(store, SLIDES_KEY)?;
    let slides = records.map(slides_from_records).unwrap_or_default();
    match Deck::new(name.clone(), slides) {
        Some(deck) => Ok(deck),
        None => {
            log::debug!("No stored slides, starting from the sample deck");
            let initial = Deck::initial();
            Ok(Deck::new(name, initial.slides().to_vec()).unwrap_or(initial))
        }
    }
}

/// Rewrite both deck keys.
pub fn save_deck<S: KeyValueStore + ?Sized>(
    store: &mut S,
    deck: &Deck,
) -> Result<(), StorageError> {
    save_json(store, SLIDES_KEY, deck.slides())?;
    store.set(NAME_KEY, deck.name())
}

pub fn load_route<S: KeyValueStore + ?Sized>(store: &S) -> Result<Route, StorageError> {
    Ok(store
        .get(ROUTE_KEY)?
        .map(|raw| Route::parse(&raw))
        .unwrap_or(Route::Home))
}

pub fn save_route<S: KeyValueStore + ?Sized>(
    store: &mut S,
    route: &Route,
) -> Result<(), StorageError> {
    store.set(ROUTE_KEY, &route.to_string())
}
