//! Persistent local store
//!
//! A string key/value seam with two backends: a directory holding one
//! JSON file per key, and an in-memory map for tests. [`LocalStore`] adds
//! typed accessors for every key the application persists.

use crate::error::{Result, VocabError};
use crate::models::{PendingOperation, WordEntry};
use crate::quiz::QuizStats;
use crate::settings::{Settings, Theme};
use crate::wotd::WotdPick;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

pub const QUEUE_KEY: &str = "pendingOps";
pub const WORDS_KEY: &str = "userWords";
pub const FAVORITES_KEY: &str = "favoriteWords";
pub const SETTINGS_KEY: &str = "appSettings";
pub const QUIZ_STATS_KEY: &str = "quizStats";
pub const WOTD_KEY: &str = "wotdPick";
pub const THEME_KEY: &str = "theme";
pub const ADMIN_KEY: &str = "adminMode";
/// Copy of a queue file that was not a JSON array when it was overwritten
pub const QUEUE_BACKUP_KEY: &str = "pendingOps-unreadable";

/// Raw key/value storage
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Directory of `<key>.json` files
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(VocabError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // atomic replace
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Default, Clone)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| VocabError::Storage("memory storage poisoned".into()))
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// A stored array before its elements are decoded
enum RawList {
    Missing,
    Items(Vec<Value>),
    /// Present but not a JSON array
    Corrupt(String),
}

fn is_operation(value: &Value) -> bool {
    serde_json::from_value::<PendingOperation>(value.clone()).is_ok()
}

/// Typed access to every persisted key
#[derive(Clone)]
pub struct LocalStore {
    storage: Arc<dyn Storage>,
}

impl LocalStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    pub fn open_dir(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(FileStorage::open(path)?))
    }

    /// Read a JSON value. Missing or unreadable values yield `None`.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring malformed {} ({} bytes): {}", key, raw.len(), e);
                None
            }
        }
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let content = serde_json::to_string(value)?;
        debug!("store: {} <- {} bytes", key, content.len());
        self.storage.set(key, &content)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.storage.remove(key)
    }

    fn read_array(&self, key: &str) -> RawList {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RawList::Missing,
            Err(e) => {
                warn!("Could not read {}: {}", key, e);
                return RawList::Missing;
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => RawList::Items(items),
            Ok(_) => {
                warn!("Ignoring malformed {}: not a list", key);
                RawList::Corrupt(raw)
            }
            Err(e) => {
                warn!("Ignoring malformed {} ({} bytes): {}", key, raw.len(), e);
                RawList::Corrupt(raw)
            }
        }
    }

    /// Decode a list element by element, skipping the ones that do not parse
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let RawList::Items(items) = self.read_array(key) else {
            return Vec::new();
        };
        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring malformed {}[{}]: {}", key, index, e);
                    None
                }
            })
            .collect()
    }

    pub fn load_words(&self) -> Vec<WordEntry> {
        self.read_list(WORDS_KEY)
    }

    pub fn save_words(&self, words: &[WordEntry]) -> Result<()> {
        self.write_json(WORDS_KEY, words)
    }

    pub fn load_queue(&self) -> Vec<PendingOperation> {
        self.read_list(QUEUE_KEY)
    }

    /// Queued entries that no longer decode as an operation
    pub fn unreadable_queue_entries(&self) -> usize {
        match self.read_array(QUEUE_KEY) {
            RawList::Items(items) => items.iter().filter(|item| !is_operation(item)).count(),
            RawList::Missing | RawList::Corrupt(_) => 0,
        }
    }

    /// Replace the decodable part of the queue.
    ///
    /// Entries that do not decode are written back verbatim ahead of `queue`,
    /// and a queue file that is not a list is copied to [`QUEUE_BACKUP_KEY`]
    /// before it is replaced.
    pub fn save_queue(&self, queue: &[PendingOperation]) -> Result<()> {
        let mut values: Vec<Value> = match self.read_array(QUEUE_KEY) {
            RawList::Missing => Vec::new(),
            RawList::Items(items) => items.into_iter().filter(|item| !is_operation(item)).collect(),
            RawList::Corrupt(raw) => {
                warn!("Saving unreadable {} as {}", QUEUE_KEY, QUEUE_BACKUP_KEY);
                self.storage.set(QUEUE_BACKUP_KEY, &raw)?;
                Vec::new()
            }
        };
        if !values.is_empty() {
            debug!("store: keeping {} unreadable queued entries", values.len());
        }
        for op in queue {
            values.push(serde_json::to_value(op)?);
        }
        self.write_json(QUEUE_KEY, &values)
    }

    /// Drop the whole queue, unreadable entries included
    pub fn clear_queue(&self) -> Result<()> {
        self.remove(QUEUE_KEY)
    }

    pub fn load_favorites(&self) -> Vec<WordEntry> {
        self.read_list(FAVORITES_KEY)
    }

    pub fn save_favorites(&self, favorites: &[WordEntry]) -> Result<()> {
        self.write_json(FAVORITES_KEY, favorites)
    }

    pub fn load_settings(&self) -> Settings {
        self.read_json(SETTINGS_KEY).unwrap_or_default()
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write_json(SETTINGS_KEY, settings)
    }

    pub fn load_quiz_stats(&self) -> QuizStats {
        self.read_json(QUIZ_STATS_KEY).unwrap_or_default()
    }

    pub fn save_quiz_stats(&self, stats: &QuizStats) -> Result<()> {
        self.write_json(QUIZ_STATS_KEY, stats)
    }

    pub fn load_wotd(&self) -> Option<WotdPick> {
        self.read_json::<Option<WotdPick>>(WOTD_KEY).flatten()
    }

    pub fn save_wotd(&self, pick: Option<&WotdPick>) -> Result<()> {
        match pick {
            Some(pick) => self.write_json(WOTD_KEY, pick),
            None => self.write_json(WOTD_KEY, &serde_json::Value::Null),
        }
    }

    pub fn load_theme(&self) -> Option<Theme> {
        self.read_json(THEME_KEY)
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.write_json(THEME_KEY, &theme)
    }

    pub fn is_admin(&self) -> bool {
        self.read_json::<bool>(ADMIN_KEY).unwrap_or(false)
    }

    pub fn set_admin(&self, enabled: bool) -> Result<()> {
        if enabled {
            self.write_json(ADMIN_KEY, &true)
        } else {
            self.remove(ADMIN_KEY)
        }
    }
}
