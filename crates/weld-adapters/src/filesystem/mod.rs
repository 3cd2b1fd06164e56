//! [`Filesystem`](weld_core::application::ports::Filesystem) implementations.
//!
//! `LocalFilesystem` backs the binary; `MemoryFilesystem` backs tests that
//! should not touch disk.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
