//! Todo CLI Entry Point
//!
//! This binary provides the command-line interface for the todo list.

use std::process;

fn main() {
    if let Err(e) = todo_interface::run_cli() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
