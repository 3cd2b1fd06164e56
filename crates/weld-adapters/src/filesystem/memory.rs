//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::warn;
use weld_core::{
    application::{ApplicationError, ports::Filesystem},
    error::WeldResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can hand one clone to a
/// `ScaffoldService` and inspect the result through another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn insert_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) => parent.as_os_str().is_empty() || self.directories.contains(parent),
            None => true,
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) -> &Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.insert_dir_all(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Seed an empty directory (testing helper).
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.insert_dir_all(path.as_ref());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Files under `root`, sorted.
    pub fn files_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        self.list_files()
            .into_iter()
            .filter(|p| p.starts_with(root))
            .collect()
    }

    fn read(&self) -> WeldResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    fn write(&self) -> WeldResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    /// Boolean queries cannot carry an error, so a poisoned lock answers
    /// `false` and is reported as a warning; the next fallible call on the
    /// same path returns [`ApplicationError::LockPoisoned`].
    fn query(&self, path: &Path, f: impl FnOnce(&MemoryFilesystemInner) -> bool) -> bool {
        match self.read() {
            Ok(inner) => f(&inner),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "memory filesystem query failed");
                false
            }
        }
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.query(path, |inner| {
            inner.files.contains_key(path) || inner.directories.contains(path)
        })
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.query(path, |inner| inner.directories.contains(path))
    }

    fn create_dir_all(&self, path: &Path) -> WeldResult<()> {
        self.write()?.insert_dir_all(path);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> WeldResult<String> {
        self.read()?.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "File does not exist".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> WeldResult<()> {
        let mut inner = self.write()?;

        if !inner.parent_exists(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into());
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> WeldResult<()> {
        let mut inner = self.write()?;

        let Some(content) = inner.files.get(from).cloned() else {
            return Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "Source file does not exist".into(),
            }
            .into());
        };
        if !inner.parent_exists(to) {
            return Err(ApplicationError::FilesystemError {
                path: to.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into());
        }

        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> WeldResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Not a directory".into(),
            }
            .into());
        }

        let is_child = |p: &&PathBuf| p.parent() == Some(path);
        let mut children: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(is_child)
            .chain(inner.files.keys().filter(is_child))
            .cloned()
            .collect();
        children.sort();
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_creates_parents() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/store/logger/default/lib/logger.ts", "export {}");
        assert!(fs.is_dir(Path::new("/store/logger/default/lib")));
        assert!(fs.is_dir(Path::new("/store")));
    }

    #[test]
    fn read_dir_lists_direct_children_only() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/b.txt", "")
            .add_file("/p/a/nested.txt", "")
            .add_dir("/p/c");

        let children = fs.read_dir(Path::new("/p")).unwrap();
        assert_eq!(
            children,
            vec![
                PathBuf::from("/p/a"),
                PathBuf::from("/p/b.txt"),
                PathBuf::from("/p/c")
            ]
        );
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/nope/file.txt"), "x").is_err());
    }

    #[test]
    fn default_copy_dir_all_recurses() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/src/one.txt", "1")
            .add_file("/src/deep/two.txt", "2");

        let copied = fs.copy_dir_all(Path::new("/src"), Path::new("/dst")).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(fs.read_file("/dst/deep/two.txt").as_deref(), Some("2"));
    }

    #[test]
    fn poisoned_lock_fails_every_query_the_same_way() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/store/a.txt", "a");

        let poisoner = fs.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(!fs.exists(Path::new("/store/a.txt")));
        assert!(!fs.is_dir(Path::new("/store")));
        let err = fs.read_to_string(Path::new("/store/a.txt")).unwrap_err();
        assert!(matches!(
            err,
            weld_core::error::WeldError::Application(ApplicationError::LockPoisoned)
        ));
        assert!(fs.read_dir(Path::new("/store")).is_err());
    }
}
