//! Todo Interface - console layer
//!
//! Responsibilities:
//! - CLI entry (clap)
//! - Line-oriented REPL / script sessions
//! - Rendering store results as text or JSON

pub mod cli;
pub mod render;
pub mod repl;


pub use cli::{run_cli, CliConfig, CliError};
pub use render::{OutputFormat, Renderer};
pub use repl::{parse_command, run_session, Command, ReplError, SessionOptions, SessionSummary};
