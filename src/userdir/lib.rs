//! # Userdir Architecture
//!
//! Userdir is a **UI-agnostic user directory library**. The terminal client shipped in
//! the same package is one consumer of it; nothing below the CLI knows about a terminal.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders cards, runs the shell session  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store and the user source                       │
//! │  - Runs the one-time load, dispatches to commands           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, view.rs, form.rs)            │
//! │  - Listing, detail lookup, add/update/delete                │
//! │  - Operates on Rust types, returns `CmdResult`              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Layer (store.rs, loader.rs, source/)                 │
//! │  - `DirectoryStore`: reducer over a closed `Command` enum   │
//! │  - `UserSource`: HttpUserSource (production),               │
//! │    InMemorySource (testing)                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Flow
//!
//! The store starts empty. [`api::DirectoryApi::initialize`] runs the loader exactly
//! once: it marks the store as loading, reads the source, and either replaces the user
//! list or records a fixed, user-facing error message. After that, every read goes
//! through [`view::derive_view`], which filters and sorts without touching the store,
//! and every write is a [`store::Command`] folded in by [`store::reduce`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. The only outbound I/O is the single read performed by a [`source::UserSource`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: State, commands and the reducer
//! - [`source`]: Where the user list comes from
//! - [`loader`]: The one-shot fetch-and-populate routine
//! - [`view`]: Search and sort derivation
//! - [`form`]: Add-user form validation and normalization
//! - [`model`]: Core data types (`User`, `Address`, `Company`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod loader;
pub mod model;
pub mod source;
pub mod store;
pub mod view;
