use std::sync::Mutex;

use crate::error::{LettricsError, Result};
use crate::types::ToolKind;

use super::{HistoryItem, HistoryLog, HistoryStore, DEFAULT_CAPACITY};

/// Process-local history, lost on exit.
#[derive(Debug)]
pub struct MemoryHistoryStore {
    log: Mutex<HistoryLog>,
    capacity: usize,
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl MemoryHistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            log: Mutex::new(HistoryLog::default()),
            capacity: capacity.max(1),
        }
    }

    fn with_log<T>(&self, f: impl FnOnce(&mut HistoryLog) -> T) -> Result<T> {
        let mut log = self
            .log
            .lock()
            .map_err(|_| LettricsError::History("history lock poisoned".into()))?;
        Ok(f(&mut log))
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&self, item: HistoryItem) -> Result<HistoryItem> {
        self.with_log(|log| log.append(item, self.capacity))?
    }

    fn remove(&self, id: u64) -> Result<bool> {
        self.with_log(|log| log.remove(id))
    }

    fn list(&self, tool: Option<ToolKind>) -> Result<Vec<HistoryItem>> {
        self.with_log(|log| log.list(tool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_evicts_oldest() {
        let store = MemoryHistoryStore::new(3);
        for n in 1..=4 {
            store
                .append(HistoryItem {
                    id: n,
                    ..HistoryItem::new(ToolKind::Story, format!("t{n}"), "body")
                })
                .unwrap();
        }
        let ids: Vec<u64> = store.list(None).unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let store = MemoryHistoryStore::default();
        store
            .append(HistoryItem::new(ToolKind::Email, "Budget", "body"))
            .unwrap();
        assert!(!store.remove(1).unwrap());
        assert_eq!(store.list(None).unwrap().len(), 1);
    }
}
