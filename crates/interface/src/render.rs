//! Render - console presentation of store results
//!
//! The core returns plain values; this module is the only place that
//! knows the text layouts.

use clap::ValueEnum;
use serde_json::json;

use todo_core::{AddOutcome, DeleteOutcome, Priority, TaskEntry};

/// Header printed before a pretty listing
pub const LIST_HEADER: &str = "Here is your TODO list:";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Minimal,
}

/// Formats operation results for one output format
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Message for an add, if the format reports one.
    ///
    /// Text formats stay silent on plain inserts and warn on overwrites.
    pub fn add(&self, name: &str, priority: Priority, outcome: &AddOutcome) -> Option<String> {
        match (self.format, outcome) {
            (OutputFormat::Json, AddOutcome::Inserted) => {
                Some(json!({ "added": name, "priority": priority }).to_string())
            }
            (OutputFormat::Json, AddOutcome::Replaced { previous }) => Some(
                json!({ "added": name, "priority": priority, "previous": previous }).to_string(),
            ),
            (_, AddOutcome::Inserted) => None,
            (_, AddOutcome::Replaced { .. }) => {
                Some(format!("Items must be unique, {} is already added", name))
            }
        }
    }

    pub fn delete(&self, name: &str, outcome: &DeleteOutcome) -> Option<String> {
        match (self.format, outcome) {
            (OutputFormat::Json, DeleteOutcome::Removed { priority }) => {
                Some(json!({ "deleted": name, "priority": priority }).to_string())
            }
            (OutputFormat::Json, DeleteOutcome::NotFound) => {
                Some(json!({ "deleted": name, "found": false }).to_string())
            }
            (_, DeleteOutcome::Removed { .. }) => None,
            (_, DeleteOutcome::NotFound) => Some(format!("{} not in list", name)),
        }
    }

    pub fn list(&self, entries: &[TaskEntry]) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_string()),
            OutputFormat::Pretty => std::iter::once(LIST_HEADER.to_string())
                .chain(entries.iter().map(entry_line))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Minimal => entries.iter().map(entry_line).collect::<Vec<_>>().join("\n"),
        }
    }

    pub fn missing(&self, missing: &[Priority]) -> String {
        match self.format {
            OutputFormat::Json => json!({ "missing": missing }).to_string(),
            OutputFormat::Pretty => format!("Missing priorities are {}", join_priorities(missing)),
            OutputFormat::Minimal => join_priorities(missing),
        }
    }

    pub fn error(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Json => json!({ "error": message }).to_string(),
            _ => format!("Error: {}", message),
        }
    }
}

fn entry_line(entry: &TaskEntry) -> String {
    format!("{}: {}", entry.priority, entry.name)
}

fn join_priorities(priorities: &[Priority]) -> String {
    priorities
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
