//! Error types for the todo store

use thiserror::Error;

/// Errors surfaced by [`TodoStore`](crate::TodoStore) and its companions.
///
/// Duplicate adds under the overwrite policy and deletes of unknown names
/// are not errors; they are reported through the operation outcome instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Cannot compute missing priorities: the todo list is empty")]
    EmptyStore,

    #[error("Items must be unique, {0} is already added")]
    DuplicateName(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),
}

pub type Result<T> = std::result::Result<T, TodoError>;
