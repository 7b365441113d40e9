//! CLI - Command Line Interface
//!
//! Available Commands:
//! - todo repl            - Start an interactive session
//! - todo demo            - Run the morning-routine walkthrough
//! - todo run "a; b; c"   - Run `;`-separated commands in a fresh list
//!
//! Nothing is persisted: every invocation starts from an empty list.

use clap::{Args, Parser, Subcommand};
use std::io::{self, Cursor};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use todo_core::{TodoConfig, TodoError, TodoStore};

use crate::render::{OutputFormat, Renderer};
use crate::repl::{run_session, SessionOptions, SessionSummary};

/// CLI Errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] TodoError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0} command(s) failed")]
    CommandsFailed(usize),
}

/// CLI Configuration
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Verbose output
    pub verbose: bool,

    /// Output format
    pub output_format: OutputFormat,

    /// Loaded file configuration
    pub todo: TodoConfig,
}

/// Scripted scenario run by `todo demo`
pub const DEMO_SCRIPT: &[&str] = &[
    "add 1 brush teeth",
    "add 5 shower",
    "add 10 put on deodorant",
    "list",
    "missing",
    "delete put on deodorant",
    "delete I do not exist",
    "list",
    "missing",
];

/// Todo CLI
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about = "In-memory prioritized todo list", long_about = None)]
pub(crate) struct Cli {
    /// Verbose output (logs to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Start interactive session
    Repl,

    /// Run the built-in walkthrough
    Demo,

    /// Run commands separated by ';'
    Run(RunArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    /// Commands, e.g. "add 1 brush teeth; list"
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub script: Vec<String>,
}

/// Parse CLI arguments and execute commands
pub fn run_cli() -> Result<(), CliError> {
    execute(Cli::parse())
}

pub(crate) fn execute(cli: Cli) -> Result<(), CliError> {
    if cli.verbose {
        tracing_subscriber::fmt().with_writer(io::stderr).init();
    }

    let todo = match &cli.config {
        Some(path) => TodoConfig::load(path)?,
        None => TodoConfig::default(),
    };

    let config = CliConfig {
        verbose: cli.verbose,
        output_format: cli.output.unwrap_or_default(),
        todo,
    };

    match cli.command {
        Commands::Repl => cmd_repl(&config),
        Commands::Demo => cmd_demo(&config),
        Commands::Run(args) => cmd_run(args, &config),
    }
}

fn cmd_repl(config: &CliConfig) -> Result<(), CliError> {
    info!("Starting REPL...");

    let options = SessionOptions {
        prompt: Some(config.todo.repl.prompt.clone()),
        banner: config.todo.repl.show_banner,
        renderer: Renderer::new(config.output_format),
    };
    let mut store = TodoStore::from_config(&config.todo);
    run_session(io::stdin().lock(), io::stdout().lock(), &mut store, &options)?;

    Ok(())
}

fn cmd_demo(config: &CliConfig) -> Result<(), CliError> {
    info!("Running demo");
    let summary = run_script(&DEMO_SCRIPT.join("\n"), config)?;
    check_summary(summary)
}

fn cmd_run(args: RunArgs, config: &CliConfig) -> Result<(), CliError> {
    let script = split_script(&args.script.join(" "));
    info!(commands = script.len(), "Running script");
    let summary = run_script(&script.join("\n"), config)?;
    check_summary(summary)
}

fn run_script(script: &str, config: &CliConfig) -> Result<SessionSummary, CliError> {
    let options = SessionOptions {
        prompt: None,
        banner: false,
        renderer: Renderer::new(config.output_format),
    };
    let mut store = TodoStore::from_config(&config.todo);
    Ok(run_session(Cursor::new(script), io::stdout().lock(), &mut store, &options)?)
}

fn check_summary(summary: SessionSummary) -> Result<(), CliError> {
    if summary.errors > 0 {
        return Err(CliError::CommandsFailed(summary.errors));
    }
    Ok(())
}

/// Split a one-line script on `;` and newlines, dropping empty commands.
pub(crate) fn split_script(script: &str) -> Vec<String> {
    script
        .split(|c: char| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
