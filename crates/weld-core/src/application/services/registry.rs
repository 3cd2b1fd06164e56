//! Plugin Registry Accessor - locate plugin directories and load configs.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{CONFIG_FILE, LIB_DIR, MANIFEST_FRAGMENT_FILE, PluginConfig, PluginId},
    error::WeldResult,
};

/// Deepest directory level `list` descends to when looking for plugins.
const MAX_LIST_DEPTH: usize = 3;

/// A plugin whose directory exists.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPlugin {
    pub id: PluginId,
    pub dir: PathBuf,
    /// `None` for legacy plugins and for plugins whose config was unreadable.
    pub config: Option<PluginConfig>,
    /// Why an existing `config.json` was ignored.
    pub config_problem: Option<String>,
}

impl LoadedPlugin {
    /// `true` when the plugin has no usable `config.json`.
    pub fn is_legacy(&self) -> bool {
        self.config.is_none()
    }
}

/// Result of looking a plugin up.
#[derive(Debug, Clone, PartialEq)]
pub enum PluginLookup {
    Found(LoadedPlugin),
    NotFound { searched: PathBuf },
}

/// Read-only view of the plugins root.
pub struct PluginRegistry<'a> {
    filesystem: &'a dyn Filesystem,
    root: &'a Path,
}

impl<'a> PluginRegistry<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, root: &'a Path) -> Self {
        Self { filesystem, root }
    }

    /// Directory the plugin would live in.
    pub fn plugin_dir(&self, id: &PluginId) -> PathBuf {
        id.relative_path().under(self.root)
    }

    /// Locate `id` and load its config, if any.
    ///
    /// Never fails: a missing directory is [`PluginLookup::NotFound`] and a
    /// malformed config is logged and treated as absent.
    #[instrument(skip_all, fields(plugin = %id))]
    pub fn lookup(&self, id: &PluginId) -> PluginLookup {
        let dir = self.plugin_dir(id);
        if !self.filesystem.is_dir(&dir) {
            debug!(dir = %dir.display(), "plugin directory not found");
            return PluginLookup::NotFound { searched: dir };
        }

        let (config, config_problem) = match self.load_config(&dir) {
            Ok(config) => (config, None),
            Err(reason) => {
                warn!(plugin = %id, %reason, "ignoring malformed plugin config");
                (None, Some(reason))
            }
        };

        debug!(legacy = config.is_none(), "plugin located");
        PluginLookup::Found(LoadedPlugin {
            id: id.clone(),
            dir,
            config,
            config_problem,
        })
    }

    /// Read `config.json` from a plugin directory.
    ///
    /// `Ok(None)` when the file does not exist; `Err` carries the reason an
    /// existing file could not be used.
    fn load_config(&self, dir: &Path) -> Result<Option<PluginConfig>, String> {
        let path = dir.join(CONFIG_FILE);
        if !self.filesystem.exists(&path) || self.filesystem.is_dir(&path) {
            return Ok(None);
        }

        let raw = self
            .filesystem
            .read_to_string(&path)
            .map_err(|e| e.to_string())?;
        PluginConfig::from_json(&raw)
            .map(Some)
            .map_err(|e| e.to_string())
    }

    /// Every plugin available under the root, sorted.
    ///
    /// Plugins are `category/variant` directories. A variant directory whose
    /// children are all marked plugin directories (`github/workflows/default`
    /// with its own `config.json`) is descended into, up to three levels
    /// deep.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn list(&self) -> WeldResult<Vec<PluginId>> {
        if !self.filesystem.is_dir(self.root) {
            return Err(ApplicationError::StoreNotFound {
                path: self.root.to_path_buf(),
            }
            .into());
        }

        let mut found = Vec::new();
        for category in self.subdirectories(self.root)? {
            for variant in self.subdirectories(&category)? {
                self.collect(variant, 2, &mut found)?;
            }
        }

        let mut ids: Vec<PluginId> = found
            .iter()
            .filter_map(|dir| dir.strip_prefix(self.root).ok())
            .filter_map(|rel| {
                let raw = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                PluginId::new(raw).ok()
            })
            .collect();
        ids.sort();
        ids.dedup();
        debug!(count = ids.len(), "listed plugins");
        Ok(ids)
    }

    fn collect(&self, dir: PathBuf, depth: usize, found: &mut Vec<PathBuf>) -> WeldResult<()> {
        if depth >= MAX_LIST_DEPTH || !self.is_grouping(&dir)? {
            found.push(dir);
            return Ok(());
        }
        for nested in self.subdirectories(&dir)? {
            self.collect(nested, depth + 1, found)?;
        }
        Ok(())
    }

    /// A directory groups plugins when it carries no plugin content itself
    /// (no files, no markers, no dot-directories) and every child carries a
    /// plugin marker. A plugin whose only entries are plain content folders
    /// (`performance/default/components`) is therefore not descended into.
    fn is_grouping(&self, dir: &Path) -> WeldResult<bool> {
        let entries = self.filesystem.read_dir(dir)?;
        if entries.is_empty() || self.has_marker(dir) {
            return Ok(false);
        }
        Ok(entries.iter().all(|entry| {
            let visible = entry
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !n.starts_with('.'));
            visible && self.filesystem.is_dir(entry) && self.has_marker(entry)
        }))
    }

    /// `config.json`, `lib/` or a `package.json` fragment.
    fn has_marker(&self, dir: &Path) -> bool {
        self.filesystem.exists(&dir.join(CONFIG_FILE))
            || self.filesystem.is_dir(&dir.join(LIB_DIR))
            || self.filesystem.exists(&dir.join(MANIFEST_FRAGMENT_FILE))
    }

    fn subdirectories(&self, dir: &Path) -> WeldResult<Vec<PathBuf>> {
        Ok(self
            .filesystem
            .read_dir(dir)?
            .into_iter()
            .filter(|p| self.filesystem.is_dir(p))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;

    #[test]
    fn missing_directory_is_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir()
            .withf(|p| p.to_path_buf() == PathBuf::from("/store/logger/default"))
            .return_const(false);

        let registry = PluginRegistry::new(&fs, Path::new("/store"));
        let id = PluginId::new("logger/default").unwrap();
        assert_eq!(
            registry.lookup(&id),
            PluginLookup::NotFound {
                searched: PathBuf::from("/store/logger/default")
            }
        );
    }

    #[test]
    fn malformed_config_is_treated_as_absent() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir()
            .returning(|p| p.to_path_buf() == PathBuf::from("/store/task/default"));
        fs.expect_exists().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok("{ broken".to_string()));

        let registry = PluginRegistry::new(&fs, Path::new("/store"));
        let id = PluginId::new("task/default").unwrap();
        match registry.lookup(&id) {
            PluginLookup::Found(plugin) => {
                assert!(plugin.is_legacy());
                assert!(plugin.config_problem.is_some());
            }
            other => panic!("unexpected lookup: {other:?}"),
        }
    }

    #[test]
    fn list_requires_existing_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        let registry = PluginRegistry::new(&fs, Path::new("/nowhere"));
        assert!(registry.list().is_err());
    }
}
