// src/progress/store.rs

//! Persistence of the completed set between sessions.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::fs::FileSystem;
use crate::progress::set::CompletedSet;

/// Where the completed set is hydrated from and saved to.
pub trait CompletionStore: Send + Sync + Debug {
    /// Load the persisted set. A store with nothing saved yet returns an
    /// empty set.
    fn load(&self) -> Result<CompletedSet>;

    /// Replace the persisted set with `set`.
    fn save(&self, set: &CompletedSet) -> Result<()>;
}

impl<T: CompletionStore + ?Sized> CompletionStore for Box<T> {
    fn load(&self) -> Result<CompletedSet> {
        (**self).load()
    }

    fn save(&self, set: &CompletedSet) -> Result<()> {
        (**self).save(set)
    }
}

/// Stores the set as a JSON array of ids in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CompletionStore for FileStore {
    fn load(&self) -> Result<CompletedSet> {
        if !self.fs.exists(&self.path) {
            debug!(path = ?self.path, "no saved progress; starting with an empty set");
            return Ok(CompletedSet::new());
        }

        let contents = self.fs.read_to_string(&self.path)?;
        let set: CompletedSet = serde_json::from_str(&contents)
            .with_context(|| format!("parsing completed set in {:?}", self.path))?;
        info!(path = ?self.path, count = set.len(), "hydrated completed set");
        Ok(set)
    }

    fn save(&self, set: &CompletedSet) -> Result<()> {
        let json = serde_json::to_vec_pretty(set).context("serializing completed set")?;
        self.fs.write(&self.path, &json)?;
        debug!(path = ?self.path, count = set.len(), "saved completed set");
        Ok(())
    }
}

/// Keeps the set in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Arc<Mutex<CompletedSet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_set(set: CompletedSet) -> Self {
        Self {
            saved: Arc::new(Mutex::new(set)),
        }
    }

    /// Snapshot of the last saved set; empty if the lock is poisoned.
    pub fn snapshot(&self) -> CompletedSet {
        self.load().unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CompletedSet>> {
        self.saved
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

impl CompletionStore for MemoryStore {
    fn load(&self) -> Result<CompletedSet> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, set: &CompletedSet) -> Result<()> {
        *self.lock()? = set.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn file_store_round_trips_through_mock_fs() {
        let fs = MockFileSystem::new();
        let store = FileStore::new(Arc::new(fs.clone()), "progress/completed.json");

        assert!(store.load().unwrap().is_empty());

        let set: CompletedSet = ["BSCI201", "BSCI101"].into_iter().collect();
        store.save(&set).unwrap();

        let raw = fs.contents("progress/completed.json").unwrap();
        assert!(raw.find("BSCI101").unwrap() < raw.find("BSCI201").unwrap());
        assert_eq!(store.load().unwrap(), set);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let fs = MockFileSystem::new();
        fs.add_file("completed.json", "{ not json");
        let store = FileStore::new(Arc::new(fs), "completed.json");

        let err = store.load().unwrap_err();
        assert!(format!("{err:#}").contains("parsing completed set"));
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let store = MemoryStore::new();
        let set: CompletedSet = ["A"].into_iter().collect();
        store.save(&set).unwrap();
        assert_eq!(store.load().unwrap(), set);
    }

    #[test]
    fn poisoned_memory_store_fails_both_ways() {
        let store = MemoryStore::new();
        let saved = Arc::clone(&store.saved);
        let _ = std::thread::spawn(move || {
            let _guard = saved.lock().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("poisoned"));
        assert!(store.save(&CompletedSet::new()).is_err());
    }
}
