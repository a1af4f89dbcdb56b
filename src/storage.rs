// File: ./src/storage.rs
use crate::error::{StorageError, StorageResult};
use crate::model::{TodoId, TodoItem};
use directories::ProjectDirs;
use fs2::FileExt;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key the list is stored under.
pub const STORAGE_KEY: &str = "todos";

/// Where the list lives between runs.
///
/// `load` never fails: a missing or unreadable value is an empty list.
/// `save` reports failures, but callers treat it as best-effort.
pub trait Persistence {
    fn load(&self) -> Vec<TodoItem>;
    fn save(&self, items: &[TodoItem]) -> StorageResult<()>;
}

impl<P: Persistence + ?Sized> Persistence for &P {
    fn load(&self) -> Vec<TodoItem> {
        (**self).load()
    }

    fn save(&self, items: &[TodoItem]) -> StorageResult<()> {
        (**self).save(items)
    }
}

/// Parses a stored value, dropping records that break the list invariants
/// (blank content, repeated ids). Corrupt JSON yields an empty list.
pub fn decode(raw: &str) -> Vec<TodoItem> {
    let items: Vec<TodoItem> = match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("Ignoring corrupt stored list: {}", e);
            return vec![];
        }
    };

    let mut seen: HashSet<TodoId> = HashSet::new();
    items
        .into_iter()
        .filter_map(|mut item| {
            let content = item.content.trim();
            if content.is_empty() {
                warn!("Dropping stored item {} with blank content", item.id);
                return None;
            }
            if !seen.insert(item.id) {
                warn!("Dropping stored item with duplicate id {}", item.id);
                return None;
            }
            item.content = content.to_string();
            Some(item)
        })
        .collect()
}

pub fn encode(items: &[TodoItem]) -> StorageResult<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// File-backed storage: one JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
    key: String,
}

impl LocalStorage {
    pub fn new<P: Into<PathBuf>>(dir: P, key: &str) -> Self {
        Self {
            dir: dir.into(),
            key: key.to_string(),
        }
    }

    /// Storage rooted at the platform data directory.
    pub fn in_default_dir(key: &str) -> StorageResult<Self> {
        let dir = Self::default_dir().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(dir, key))
    }

    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("org", "dragdo", "dragdo").map(|proj| proj.data_dir().to_path_buf())
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> StorageResult<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Runs `f` while holding an exclusive advisory lock next to `path`.
    pub fn with_lock<T, F>(path: &Path, f: F) -> StorageResult<T>
    where
        F: FnOnce() -> StorageResult<T>,
    {
        let lock_path = path.with_extension("lock");
        let lock_err = |source| StorageError::Lock {
            path: lock_path.display().to_string(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;
        let result = f();
        let _ = FileExt::unlock(&file);
        result
    }
}

impl Persistence for LocalStorage {
    fn load(&self) -> Vec<TodoItem> {
        let path = self.path();
        if !path.exists() {
            debug!("No stored list at {}", path.display());
            return vec![];
        }
        match fs::read_to_string(&path) {
            Ok(raw) => decode(&raw),
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                vec![]
            }
        }
    }

    fn save(&self, items: &[TodoItem]) -> StorageResult<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let path = self.path();
        let json = encode(items)?;
        Self::with_lock(&path, || Self::atomic_write(&path, &json))?;
        debug!("Saved {} items to {}", items.len(), path.display());
        Ok(())
    }
}

/// In-process key-value storage. `set_failing(true)` makes every write fail,
/// the way a full or disabled browser store would.
#[derive(Debug)]
pub struct MemoryStorage {
    key: String,
    values: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(STORAGE_KEY)
    }
}

impl MemoryStorage {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            values: RefCell::new(HashMap::new()),
            failing: Cell::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Raw stored value under this storage's key.
    pub fn raw(&self) -> Option<String> {
        self.values.borrow().get(&self.key).cloned()
    }

    pub fn set_raw(&self, value: &str) {
        self.values
            .borrow_mut()
            .insert(self.key.clone(), value.to_string());
    }
}

impl Persistence for MemoryStorage {
    fn load(&self) -> Vec<TodoItem> {
        match self.raw() {
            Some(raw) => decode(&raw),
            None => vec![],
        }
    }

    fn save(&self, items: &[TodoItem]) -> StorageResult<()> {
        if self.failing.get() {
            return Err(StorageError::WriteRejected(self.key.clone()));
        }
        let json = encode(items)?;
        self.set_raw(&json);
        Ok(())
    }
}
