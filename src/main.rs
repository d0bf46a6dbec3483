//! Bookshelf CLI entry point
//!
//! Parsing, dispatch, and logging all live in the `cli` module; this file
//! only reports the error and sets the exit code.

use bookshelf::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
