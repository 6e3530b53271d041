use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::LettricsConfig;
use crate::error::{LettricsError, Result};
use crate::types::ToolKind;

use super::{HistoryItem, HistoryLog, HistoryStore, DEFAULT_CAPACITY};

const FILE_VERSION: u32 = 1;

/// History persisted as a single JSON document.
///
/// Every operation re-reads the file so separate processes (the server and
/// the CLI) see each other's writes. Writes go to a sibling temp file which
/// is then renamed over the original.
#[derive(Debug)]
pub struct FileHistoryStore {
    path: PathBuf,
    capacity: usize,
    guard: Mutex<()>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    #[serde(flatten)]
    log: HistoryLog,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity: capacity.max(1),
            guard: Mutex::new(()),
        }
    }

    pub fn from_config(config: &LettricsConfig) -> Self {
        Self::with_capacity(config.history_path(), config.history_capacity())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HistoryLog {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return HistoryLog::default(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "history file unreadable, starting empty");
                return HistoryLog::default();
            }
        };
        match serde_json::from_str::<HistoryFile>(&raw) {
            Ok(file) => file.log,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "history file corrupt, starting empty");
                HistoryLog::default()
            }
        }
    }

    fn save(&self, log: HistoryLog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }
        let file = HistoryFile {
            version: FILE_VERSION,
            log,
        };
        let serialized = serde_json::to_string_pretty(&file)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, serialized).map_err(|e| self.write_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.write_error(e))?;
        debug!(path = %self.path.display(), items = file.log.items.len(), "history saved");
        Ok(())
    }

    fn write_error(&self, err: std::io::Error) -> LettricsError {
        LettricsError::History(format!("cannot write {}: {err}", self.path.display()))
    }

    fn locked<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| LettricsError::History("history lock poisoned".into()))?;
        f(self)
    }
}

impl HistoryStore for FileHistoryStore {
    fn append(&self, item: HistoryItem) -> Result<HistoryItem> {
        self.locked(|store| {
            let mut log = store.load();
            let stored = log.append(item, store.capacity)?;
            store.save(log)?;
            Ok(stored)
        })
    }

    fn remove(&self, id: u64) -> Result<bool> {
        self.locked(|store| {
            let mut log = store.load();
            if !log.remove(id) {
                return Ok(false);
            }
            store.save(log)?;
            Ok(true)
        })
    }

    fn list(&self, tool: Option<ToolKind>) -> Result<Vec<HistoryItem>> {
        self.locked(|store| Ok(store.load().list(tool)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileHistoryStore) {
        let dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(dir.path().join("nested").join("history.json"));
        (dir, store)
    }

    #[test]
    fn items_survive_a_new_store() {
        let (_dir, store) = temp_store();
        let stored = store
            .append(HistoryItem::new(ToolKind::Poem, "autumn", "leaves"))
            .unwrap();

        let reopened = FileHistoryStore::new(store.path());
        let items = reopened.list(None).unwrap();
        assert_eq!(items, vec![stored]);
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        assert!(store.list(None).unwrap().is_empty());
        store
            .append(HistoryItem::new(ToolKind::Essay, "Climate", "text"))
            .unwrap();
        assert_eq!(store.list(None).unwrap().len(), 1);
    }

    #[test]
    fn high_water_mark_is_persisted() {
        let (_dir, store) = temp_store();
        let first = store
            .append(HistoryItem::new(ToolKind::Story, "a", "b"))
            .unwrap();
        assert!(store.remove(first.id).unwrap());

        let again = store
            .append(HistoryItem {
                id: first.id,
                ..HistoryItem::new(ToolKind::Story, "a", "b")
            })
            .unwrap();
        assert_eq!(again.id, first.id + 1);
    }

    #[test]
    fn file_is_versioned_json() {
        let (_dir, store) = temp_store();
        store
            .append(HistoryItem::new(ToolKind::Thesis, "Tides", "text"))
            .unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["items"][0]["type"], "thesis");
    }
}
