//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;
use weld_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{WeldError, WeldResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> WeldResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_to_string(&self, path: &Path) -> WeldResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> WeldResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> WeldResult<()> {
        trace!(from = %from.display(), to = %to.display(), "copy file");
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn read_dir(&self, path: &Path) -> WeldResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        let mut paths = entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_io_error(path, e, "read directory entry"))?;
        paths.sort();
        Ok(paths)
    }

    /// Walks the source tree once instead of recursing through the port.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> WeldResult<usize> {
        self.create_dir_all(to)?;
        let mut copied = 0;

        for entry in WalkDir::new(from).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(from, e))?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|_| ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: format!("entry is outside {}", from.display()),
                })?;
            let target = to.join(relative);

            if entry.file_type().is_dir() {
                self.create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    self.create_dir_all(parent)?;
                }
                self.copy_file(entry.path(), &target)?;
                copied += 1;
            }
        }

        Ok(copied)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> WeldError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn walk_error(root: &Path, e: walkdir::Error) -> WeldError {
    let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    ApplicationError::FilesystemError {
        path,
        reason: format!("Failed to walk directory: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_dir_is_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["zeta.ts", "alpha.ts", "mid"] {
            std::fs::write(tmp.path().join(name), "").unwrap();
        }
        let names: Vec<_> = LocalFilesystem
            .read_dir(tmp.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["alpha.ts", "mid", "zeta.ts"]);
    }

    #[test]
    fn copy_dir_all_preserves_nesting() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(src.join("nested/deep")).unwrap();
        std::fs::create_dir_all(src.join("empty")).unwrap();
        std::fs::write(src.join("top.txt"), "top").unwrap();
        std::fs::write(src.join("nested/deep/leaf.txt"), "leaf").unwrap();

        let dst = tmp.path().join("dst");
        let copied = LocalFilesystem.copy_dir_all(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            std::fs::read_to_string(dst.join("nested/deep/leaf.txt")).unwrap(),
            "leaf"
        );
        assert!(dst.join("empty").is_dir());
    }

    #[test]
    fn io_failures_carry_the_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.json");
        let err = LocalFilesystem.read_to_string(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
