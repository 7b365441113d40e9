//! Thread-safe handle around a [`TodoStore`]
//!
//! One exclusive lock guards every operation.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, TodoError};
use crate::store::{AddOutcome, DeleteOutcome, Priority, TaskEntry, TodoStore};

/// Cloneable, shared todo store
#[derive(Debug, Clone, Default)]
pub struct SharedTodoStore {
    inner: Arc<Mutex<TodoStore>>,
}

impl SharedTodoStore {
    pub fn new(store: TodoStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, TodoStore>> {
        self.inner
            .lock()
            .map_err(|e| TodoError::LockPoisoned(e.to_string()))
    }

    pub fn add(&self, name: impl Into<String>, priority: Priority) -> Result<AddOutcome> {
        self.lock()?.add(name, priority)
    }

    pub fn delete(&self, name: &str) -> Result<DeleteOutcome> {
        Ok(self.lock()?.delete(name))
    }

    pub fn list(&self) -> Result<Vec<TaskEntry>> {
        Ok(self.lock()?.list())
    }

    pub fn missing_priorities(&self) -> Result<Vec<Priority>> {
        self.lock()?.missing_priorities()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }
}

impl From<TodoStore> for SharedTodoStore {
    fn from(store: TodoStore) -> Self {
        Self::new(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let store = SharedTodoStore::default();
        let other = store.clone();

        store.add("shower", 5).unwrap();
        assert_eq!(other.list().unwrap(), vec![TaskEntry::new("shower", 5)]);

        assert_eq!(other.delete("shower").unwrap(), DeleteOutcome::Removed { priority: 5 });
        assert!(store.is_empty().unwrap());
        assert_eq!(store.missing_priorities(), Err(TodoError::EmptyStore));
    }

    #[test]
    fn test_concurrent_adds() {
        let store = SharedTodoStore::default();

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = store.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let priority = worker * 100 + i;
                        store.add(format!("task-{}", priority), priority).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), 200);
        let listed = store.list().unwrap();
        assert!(listed.windows(2).all(|w| w[0].priority < w[1].priority));
        // 8 workers leave 7 gaps of 75 between their blocks
        assert_eq!(store.missing_priorities().unwrap().len(), 7 * 75);
    }
}
