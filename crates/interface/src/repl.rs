//! REPL - line-oriented command session
//!
//! Responsibilities:
//! - Parse one command per line
//! - Dispatch to the store
//! - Render results through [`Renderer`]
//!
//! Works over any `BufRead`/`Write` pair so scripts and tests drive it the
//! same way the interactive terminal does.

use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

use todo_core::{Priority, TodoStore};

use crate::render::Renderer;

/// Command parse errors. Reported to the user; the session keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplError {
    #[error("Unknown command: {0} (type 'help' for commands)")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { priority: Priority, name: String },
    Delete { name: String },
    List,
    Missing,
    Help,
    Exit,
}

const ADD_USAGE: &str = "add <priority> <name>";
const DELETE_USAGE: &str = "delete <name>";

const HELP: &str = "\
Available commands:
  add <priority> <name>  Add a task (lower priority is listed first)
  delete <name>          Delete a task (alias: rm)
  list                   List tasks by priority (alias: ls)
  missing                Show unused priorities between the lowest and highest
  help                   Show this help
  exit                   Leave the session (alias: quit)";

/// Parse a single input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ReplError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_lowercase().as_str() {
        "add" => {
            let (priority, name) = rest
                .split_once(char::is_whitespace)
                .map(|(p, n)| (p, n.trim()))
                .ok_or(ReplError::MissingArgument(ADD_USAGE))?;
            if name.is_empty() {
                return Err(ReplError::MissingArgument(ADD_USAGE));
            }
            let priority = priority
                .parse::<Priority>()
                .map_err(|_| ReplError::InvalidPriority(priority.to_string()))?;
            Command::Add {
                priority,
                name: name.to_string(),
            }
        }
        "delete" | "rm" => {
            if rest.is_empty() {
                return Err(ReplError::MissingArgument(DELETE_USAGE));
            }
            Command::Delete {
                name: rest.to_string(),
            }
        }
        "list" | "ls" => Command::List,
        "missing" => Command::Missing,
        "help" => Command::Help,
        "exit" | "quit" => Command::Exit,
        other => return Err(ReplError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

/// Session presentation options
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Prompt written before each line; `None` for scripted input
    pub prompt: Option<String>,

    /// Print the welcome banner first
    pub banner: bool,

    pub renderer: Renderer,
}

/// Counts reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub errors: usize,
}

/// Whether the session should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Run commands from `input` against `store` until EOF or `exit`.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    store: &mut TodoStore,
    options: &SessionOptions,
) -> io::Result<SessionSummary> {
    info!(interactive = options.prompt.is_some(), "Session started");

    if options.banner {
        writeln!(out, "Todo list - type 'help' for commands, 'exit' to quit")?;
    }

    let mut summary = SessionSummary::default();
    let mut lines = input.lines();

    loop {
        if let Some(prompt) = &options.prompt {
            write!(out, "{}", prompt)?;
            out.flush()?;
        }

        let Some(line) = lines.next().transpose()? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                summary.errors += 1;
                writeln!(out, "{}", options.renderer.error(&e.to_string()))?;
                continue;
            }
        };

        summary.commands += 1;
        debug!(?command, "Executing command");

        let (flow, ok) = execute(command, store, &options.renderer, &mut out)?;
        if !ok {
            summary.errors += 1;
        }
        if flow == Flow::Exit {
            break;
        }
    }

    out.flush()?;
    info!(commands = summary.commands, errors = summary.errors, "Session exited");
    Ok(summary)
}

/// Returns the next flow step and whether the command succeeded.
fn execute<W: Write>(
    command: Command,
    store: &mut TodoStore,
    renderer: &Renderer,
    out: &mut W,
) -> io::Result<(Flow, bool)> {
    match command {
        Command::Add { priority, name } => match store.add(name.as_str(), priority) {
            Ok(outcome) => {
                if let Some(message) = renderer.add(&name, priority, &outcome) {
                    writeln!(out, "{}", message)?;
                }
            }
            Err(e) => {
                writeln!(out, "{}", renderer.error(&e.to_string()))?;
                return Ok((Flow::Continue, false));
            }
        },
        Command::Delete { name } => {
            let outcome = store.delete(&name);
            if let Some(message) = renderer.delete(&name, &outcome) {
                writeln!(out, "{}", message)?;
            }
        }
        Command::List => {
            let listing = renderer.list(&store.list());
            if !listing.is_empty() {
                writeln!(out, "{}", listing)?;
            }
        }
        Command::Missing => match store.missing_priorities() {
            Ok(missing) => writeln!(out, "{}", renderer.missing(&missing))?,
            Err(e) => {
                writeln!(out, "{}", renderer.error(&e.to_string()))?;
                return Ok((Flow::Continue, false));
            }
        },
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Exit => return Ok((Flow::Exit, true)),
    }

    Ok((Flow::Continue, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;
    use std::io::Cursor;
    use todo_core::DuplicatePolicy;

    fn run_script(script: &str, store: &mut TodoStore, format: OutputFormat) -> (String, SessionSummary) {
        let mut out = Vec::new();
        let options = SessionOptions {
            renderer: Renderer::new(format),
            ..Default::default()
        };
        let summary = run_session(Cursor::new(script), &mut out, store, &options).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_parse_add_with_spaces_in_name() {
        assert_eq!(
            parse_command("add 10 put on deodorant").unwrap(),
            Some(Command::Add {
                priority: 10,
                name: "put on deodorant".to_string()
            })
        );
        assert_eq!(
            parse_command("  ADD   -3   stretch ").unwrap(),
            Some(Command::Add {
                priority: -3,
                name: "stretch".to_string()
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_command("add"), Err(ReplError::MissingArgument(ADD_USAGE)));
        assert_eq!(parse_command("add 5"), Err(ReplError::MissingArgument(ADD_USAGE)));
        assert_eq!(
            parse_command("add high shower"),
            Err(ReplError::InvalidPriority("high".to_string()))
        );
        assert_eq!(parse_command("rm"), Err(ReplError::MissingArgument(DELETE_USAGE)));
        assert_eq!(
            parse_command("pop"),
            Err(ReplError::UnknownCommand("pop".to_string()))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("ls"), Ok(Some(Command::List)));
        assert_eq!(parse_command("missing"), Ok(Some(Command::Missing)));
        assert_eq!(parse_command("quit"), Ok(Some(Command::Exit)));
        assert_eq!(
            parse_command("delete I do not exist"),
            Ok(Some(Command::Delete {
                name: "I do not exist".to_string()
            }))
        );
    }

    #[test]
    fn test_session_scenario_output() {
        let script = "\
add 1 brush teeth
add 5 shower
add 10 put on deodorant
list
missing
delete put on deodorant
delete I do not exist
list
missing
";
        let mut store = TodoStore::new();
        let (output, summary) = run_script(script, &mut store, OutputFormat::Pretty);

        assert_eq!(
            output,
            "\
Here is your TODO list:
1: brush teeth
5: shower
10: put on deodorant
Missing priorities are 2 3 4 6 7 8 9
I do not exist not in list
Here is your TODO list:
1: brush teeth
5: shower
Missing priorities are 2 3 4
"
        );
        assert_eq!(summary, SessionSummary { commands: 9, errors: 0 });
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_session_recovers_from_errors() {
        let mut store = TodoStore::new();
        let (output, summary) = run_script("missing\nfly away\nadd 2 walk dog\nlist\n", &mut store, OutputFormat::Pretty);

        assert_eq!(
            output,
            "\
Error: Cannot compute missing priorities: the todo list is empty
Error: Unknown command: fly (type 'help' for commands)
Here is your TODO list:
2: walk dog
"
        );
        assert_eq!(summary, SessionSummary { commands: 3, errors: 2 });
    }

    #[test]
    fn test_session_duplicate_warning() {
        let mut store = TodoStore::new();
        let (output, _) = run_script("add 5 shower\nadd 2 shower\nls\n", &mut store, OutputFormat::Pretty);

        assert_eq!(
            output,
            "Items must be unique, shower is already added\nHere is your TODO list:\n2: shower\n"
        );
    }

    #[test]
    fn test_session_duplicate_rejected() {
        let mut store = TodoStore::with_policy(DuplicatePolicy::Reject);
        let (output, summary) = run_script("add 5 shower\nadd 2 shower\n", &mut store, OutputFormat::Minimal);

        assert_eq!(output, "Error: Items must be unique, shower is already added\n");
        assert_eq!(summary.errors, 1);
        assert_eq!(store.get("shower"), Some(5));
    }

    #[test]
    fn test_session_stops_at_exit() {
        let mut store = TodoStore::new();
        let (output, summary) = run_script("add 1 a\nexit\nadd 2 b\n", &mut store, OutputFormat::Pretty);

        assert!(output.is_empty());
        assert_eq!(summary.commands, 2);
        assert!(!store.contains("b"));
    }

    #[test]
    fn test_session_prompt_and_banner() {
        let mut store = TodoStore::new();
        let mut out = Vec::new();
        let options = SessionOptions {
            prompt: Some("todo> ".to_string()),
            banner: true,
            renderer: Renderer::default(),
        };
        run_session(Cursor::new("ls\n"), &mut out, &mut store, &options).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("Todo list - type 'help'"));
        assert!(output.contains("todo> Here is your TODO list:\n"));
        assert!(output.ends_with("todo> "));
    }

    #[test]
    fn test_session_json_output() {
        let mut store = TodoStore::new();
        let (output, _) = run_script("add 3 read\nmissing\n", &mut store, OutputFormat::Json);

        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0]["added"], "read");
        assert_eq!(lines[1]["missing"], serde_json::json!([]));
    }
}
