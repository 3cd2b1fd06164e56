//! Ports: the traits the application layer calls out through.
//!
//! Weld has a single driven port, [`Filesystem`]. Plugin sources, template
//! overrides and the generated project are all reached through it, which is
//! what lets a dry run and the in-memory adapter share code with real runs.

pub mod output;

pub use output::Filesystem;

#[cfg(test)]
pub use output::MockFilesystem;
