//! Todo store - name to priority mapping
//!
//! Responsibilities:
//! - Add and delete named tasks
//! - List tasks in priority order
//! - Report unused priorities between the lowest and highest in use

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::config::{DuplicatePolicy, TodoConfig};
use crate::error::{Result, TodoError};

/// Task priority. Lower values are listed first.
pub type Priority = i64;

/// A stored task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskEntry {
    pub name: String,
    pub priority: Priority,
}

impl TaskEntry {
    pub fn new(name: impl Into<String>, priority: Priority) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }
}

/// Result of [`TodoStore::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The name was new
    Inserted,
    /// The name existed; its priority was overwritten
    Replaced { previous: Priority },
}

/// Result of [`TodoStore::delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed { priority: Priority },
    /// Nothing stored under that name; the store is unchanged
    NotFound,
}

/// In-memory todo list
///
/// Each name maps to exactly one priority. The store is not synchronized;
/// use [`SharedTodoStore`](crate::SharedTodoStore) to share it between threads.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    items: HashMap<String, Priority>,
    policy: DuplicatePolicy,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            items: HashMap::new(),
            policy,
        }
    }

    pub fn from_config(config: &TodoConfig) -> Self {
        Self::with_policy(config.duplicate_policy)
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Add a task, or handle an existing name according to the duplicate policy.
    ///
    /// Under [`DuplicatePolicy::Overwrite`] a re-added name keeps the new
    /// priority and the old one is returned in [`AddOutcome::Replaced`].
    /// Under [`DuplicatePolicy::Reject`] the store is left unchanged and
    /// [`TodoError::DuplicateName`] is returned.
    pub fn add(&mut self, name: impl Into<String>, priority: Priority) -> Result<AddOutcome> {
        let name = name.into();

        if let Some(&previous) = self.items.get(&name) {
            if self.policy == DuplicatePolicy::Reject {
                warn!(name = %name, priority, existing = previous, "Rejected duplicate item");
                return Err(TodoError::DuplicateName(name));
            }
            warn!(name = %name, previous, priority, "Item already added, overwriting priority");
            self.items.insert(name, priority);
            return Ok(AddOutcome::Replaced { previous });
        }

        debug!(name = %name, priority, "Item added");
        self.items.insert(name, priority);
        Ok(AddOutcome::Inserted)
    }

    /// Remove a task. Unknown names leave the store untouched.
    pub fn delete(&mut self, name: &str) -> DeleteOutcome {
        match self.items.remove(name) {
            Some(priority) => {
                debug!(name, priority, "Item deleted");
                DeleteOutcome::Removed { priority }
            }
            None => {
                warn!(name, "Item not in list");
                DeleteOutcome::NotFound
            }
        }
    }

    /// All tasks, ascending by priority, then by name.
    pub fn list(&self) -> Vec<TaskEntry> {
        let mut entries: Vec<TaskEntry> = self
            .items
            .iter()
            .map(|(name, &priority)| TaskEntry::new(name.clone(), priority))
            .collect();
        entries.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
        entries
    }

    /// Every integer in `[min, max]` of the stored priorities that no task uses,
    /// in ascending order.
    ///
    /// Fails with [`TodoError::EmptyStore`] when there are no tasks, since the
    /// range is undefined.
    pub fn missing_priorities(&self) -> Result<Vec<Priority>> {
        let used: HashSet<Priority> = self.items.values().copied().collect();
        let (Some(&min), Some(&max)) = (used.iter().min(), used.iter().max()) else {
            return Err(TodoError::EmptyStore);
        };

        Ok((min..=max).filter(|p| !used.contains(p)).collect())
    }

    pub fn get(&self, name: &str) -> Option<Priority> {
        self.items.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
