//! # CLI Behavior
//!
//! This is **one possible UI client** for userdir, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution (`userdir`)
//!
//! Running `userdir` with no arguments starts the interactive shell. The directory
//! only lives in memory, so the shell is where added and deleted users stay visible
//! for as long as the process runs.
//!
//! ## One-Shot Commands
//!
//! `list`, `view` and `add` each load the directory, do one thing and exit. A failed
//! load renders the "Error loading users" view and exits with status 1. `view` of an
//! unknown id is not a failure: it renders the not-found message and exits 0.
//!
//! `config` only reads and writes the config file; it never builds the HTTP source.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup, logging and per-command handlers
//! - `render`: Output formatting (cards, details, messages)
//! - `setup`: Argument parsing via clap
//! - `shell`: The interactive session

mod commands;
mod render;
mod setup;
mod shell;

pub use commands::run;
