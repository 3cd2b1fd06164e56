//! Resolved copy instructions for one plugin.

use std::{
    fmt,
    path::{Path, PathBuf},
};

/// What a [`CopyInstruction`] does once executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    /// Copy a single file, replacing any existing destination.
    File,
    /// Recursively copy a directory's contents into the destination.
    Directory,
    /// Create an empty directory; the declared source does not exist.
    EnsureDirectory,
}

/// A resolved `(source, destination, kind)` triple.
///
/// Both paths are absolute (anchored on the plugin directory and the
/// project directory respectively) once produced by the materializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyInstruction {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: CopyKind,
}

impl CopyInstruction {
    pub fn file(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            kind: CopyKind::File,
        }
    }

    pub fn directory(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            kind: CopyKind::Directory,
        }
    }

    pub fn ensure_directory(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            kind: CopyKind::EnsureDirectory,
        }
    }

    /// Destination relative to `root`, for display.
    pub fn destination_under<'a>(&'a self, root: &Path) -> &'a Path {
        self.destination
            .strip_prefix(root)
            .unwrap_or(&self.destination)
    }
}

impl fmt::Display for CopyInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CopyKind::File => write!(
                f,
                "file {} -> {}",
                self.source.display(),
                self.destination.display()
            ),
            CopyKind::Directory => write!(
                f,
                "dir  {} -> {}",
                self.source.display(),
                self.destination.display()
            ),
            CopyKind::EnsureDirectory => write!(f, "mkdir {}", self.destination.display()),
        }
    }
}
