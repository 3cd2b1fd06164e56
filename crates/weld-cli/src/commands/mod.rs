//! Subcommand handlers. Each module exposes one `execute` function.

pub mod completions;
pub mod config;
pub mod create;
pub mod list;
