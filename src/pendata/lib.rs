//! # Pendata Architecture
//!
//! Pendata is a **UI-agnostic student-record library**. The interactive
//! menu is a thin client; everything it does goes through the API facade.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Menu Layer (main.rs, args.rs, prompt.rs)                   │
//! │  - Reads menu choices and record fields from the terminal   │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Session facade: store + last-loaded path + config        │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per operation, pure business logic          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store.rs, codec/, model.rs)                          │
//! │  - In-memory ordered collection with unique-NISN lookup     │
//! │  - Flat-text serialization formats                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular arguments, returns
//! `Result<CmdResult>`, never writes to stdout/stderr, and never calls
//! `std::process::exit`. File reads and writes happen only in the load
//! and save commands, against paths the caller chose.
//!
//! ## Module Overview
//!
//! - [`api`]: the session facade and entry point for all operations
//! - [`commands`]: business logic for each menu operation
//! - [`store`]: the authoritative in-memory record collection
//! - [`codec`]: flat-text file formats (positional and key-tagged)
//! - [`model`]: core data types (`Student`, `Nisn`, `Date`, `Contact`)
//! - [`config`]: configuration management
//! - [`logging`]: file logging bootstrap
//! - [`error`]: error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
