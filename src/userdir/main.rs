//! # Userdir CLI
//!
//! The binary is intentionally thin: the terminal client lives in `cli/`, and this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/userdir/cli/)                               │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + one-shot handlers (commands.rs)         │
//! │  - Interactive session (shell.rs)                           │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (src/userdir/api.rs)                             │
//! │  - Runs the one-time load                                   │
//! │  - Dispatches to command modules                            │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer owns argument
//! parsing, context initialization, logging setup, rendering and exit codes.
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests next to each module, driven by the in-memory source.
//! - **Rendering and the shell**: unit tests feed canned users and scripted input and
//!   compare the produced text.
//! - **Binary**: `tests/` runs the compiled binary against a local HTTP endpoint.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
