//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `weld-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::WeldResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `weld_adapters::LocalFilesystem` (production)
/// - `weld_adapters::MemoryFilesystem` (testing)
///
/// Plugin sources and the generated project live on the same filesystem,
/// so reads and writes both go through this one port.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> WeldResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> WeldResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> WeldResult<()>;

    /// Copy one file byte-for-byte, replacing the destination if present.
    /// The destination's parent must exist.
    fn copy_file(&self, from: &Path, to: &Path) -> WeldResult<()>;

    /// Immediate children of a directory, as full paths sorted by name.
    fn read_dir(&self, path: &Path) -> WeldResult<Vec<PathBuf>>;

    /// Recursively copy the contents of `from` into `to`, creating `to` and
    /// any missing subdirectories. Returns the number of files copied.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> WeldResult<usize> {
        self.create_dir_all(to)?;
        let mut copied = 0;
        for entry in self.read_dir(from)? {
            let Some(name) = entry.file_name() else {
                continue;
            };
            let target = to.join(name);
            if self.is_dir(&entry) {
                copied += self.copy_dir_all(&entry, &target)?;
            } else {
                self.copy_file(&entry, &target)?;
                copied += 1;
            }
        }
        Ok(copied)
    }
}
