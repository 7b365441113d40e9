//! Todo Core - in-memory prioritized todo list
//!
//! Contains:
//! - TodoStore: name -> priority mapping with list and gap reporting
//! - SharedTodoStore: mutex-guarded handle for multi-threaded hosts
//! - TodoConfig: YAML configuration
//! - TodoError: error taxonomy

mod config;
mod error;
mod shared;
mod store;

pub use config::*;
pub use error::*;
pub use shared::*;
pub use store::*;
