//! Infrastructure adapters for weld.
//!
//! This crate implements the ports defined in `weld_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;

pub use filesystem::{LocalFilesystem, MemoryFilesystem};
