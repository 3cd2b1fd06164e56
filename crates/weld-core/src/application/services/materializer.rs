//! File Materializer - decide and perform each plugin's file copies.
//!
//! Placement strategy, per plugin:
//!
//! 1. `paths` entries: recursive directory copies; a missing source becomes
//!    an empty placeholder directory.
//! 2. `files` entries: single file or directory copies; a missing source is
//!    a warning.
//! 3. Neither declared: `lib/*` goes flat into the project's `lib/`, every
//!    other top-level entry (except `lib`, `config.json`, `package.json`)
//!    is copied into the project root.
//!
//! Planning only reads; execution writes. A dry run stops after planning.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ports::Filesystem,
        report::{PluginPlan, ScaffoldWarning},
        services::registry::LoadedPlugin,
    },
    domain::{
        CopyInstruction, CopyKind, LIB_DIR, PluginConfig, PluginId, RESERVED_ENTRIES,
        RelativePath,
    },
    error::WeldResult,
};

pub struct FileMaterializer<'a> {
    filesystem: &'a dyn Filesystem,
    project_dir: &'a Path,
}

impl<'a> FileMaterializer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, project_dir: &'a Path) -> Self {
        Self {
            filesystem,
            project_dir,
        }
    }

    /// Resolve the copy instructions for one plugin without writing.
    #[instrument(skip_all, fields(plugin = %plugin.id))]
    pub fn plan(
        &self,
        plugin: &LoadedPlugin,
        warnings: &mut Vec<ScaffoldWarning>,
    ) -> WeldResult<PluginPlan> {
        let instructions = match &plugin.config {
            Some(config) if config.declares_placement() => {
                self.plan_declared(plugin, config, warnings)
            }
            _ => self.plan_fallback(plugin)?,
        };

        debug!(instructions = instructions.len(), "planned plugin files");
        Ok(PluginPlan {
            plugin: plugin.id.clone(),
            instructions,
        })
    }

    /// Perform a plan. Returns the number of files written.
    pub fn execute(&self, plan: &PluginPlan) -> WeldResult<usize> {
        let mut copied = 0;
        for instruction in &plan.instructions {
            copied += self.apply(instruction)?;
        }
        debug!(plugin = %plan.plugin, copied, "materialized plugin");
        Ok(copied)
    }

    fn apply(&self, instruction: &CopyInstruction) -> WeldResult<usize> {
        match instruction.kind {
            CopyKind::File => {
                if let Some(parent) = instruction.destination.parent() {
                    self.filesystem.create_dir_all(parent)?;
                }
                self.filesystem
                    .copy_file(&instruction.source, &instruction.destination)?;
                Ok(1)
            }
            CopyKind::Directory => self
                .filesystem
                .copy_dir_all(&instruction.source, &instruction.destination),
            CopyKind::EnsureDirectory => {
                self.filesystem.create_dir_all(&instruction.destination)?;
                Ok(0)
            }
        }
    }

    // ── declared placement ────────────────────────────────────────────────

    fn plan_declared(
        &self,
        plugin: &LoadedPlugin,
        config: &PluginConfig,
        warnings: &mut Vec<ScaffoldWarning>,
    ) -> Vec<CopyInstruction> {
        let mut out = Vec::new();

        for mapping in &config.paths {
            let Some((from, to)) = self.resolve_pair(plugin, &mapping.from, &mapping.to, warnings)
            else {
                continue;
            };
            let source = from.under(&plugin.dir);
            let destination = to.under(self.project_dir);

            if self.filesystem.is_dir(&source) {
                out.push(CopyInstruction::directory(source, destination));
            } else if self.filesystem.exists(&source) {
                let destination = self.file_destination(&source, &to, destination);
                out.push(CopyInstruction::file(source, destination));
            } else {
                debug!(from = %from, to = %to, "path source missing, creating placeholder");
                out.push(CopyInstruction::ensure_directory(source, destination));
            }
        }

        for entry in &config.files {
            let Some((src, dest)) =
                self.resolve_pair(plugin, entry.source(), entry.destination(), warnings)
            else {
                continue;
            };
            let source = src.under(&plugin.dir);
            let destination = dest.under(self.project_dir);

            if self.filesystem.is_dir(&source) {
                out.push(CopyInstruction::directory(source, destination));
            } else if self.filesystem.exists(&source) {
                let destination = self.file_destination(&source, &dest, destination);
                out.push(CopyInstruction::file(source, destination));
            } else {
                warn!(plugin = %plugin.id, source = %source.display(), "declared file is missing");
                warnings.push(ScaffoldWarning::MissingSource {
                    plugin: plugin.id.clone(),
                    path: source,
                });
            }
        }

        out
    }

    /// Validate a `(source, destination)` pair from a config.
    fn resolve_pair(
        &self,
        plugin: &LoadedPlugin,
        source: &str,
        destination: &str,
        warnings: &mut Vec<ScaffoldWarning>,
    ) -> Option<(RelativePath, RelativePath)> {
        let checked = RelativePath::try_new(source)
            .map_err(|e| (source, e))
            .and_then(|s| {
                RelativePath::try_new(destination)
                    .map(|d| (s, d))
                    .map_err(|e| (destination, e))
            });

        match checked {
            Ok(pair) => Some(pair),
            Err((path, err)) => {
                warn!(plugin = %plugin.id, path, error = %err, "skipping unsafe path");
                warnings.push(unsafe_path(&plugin.id, path, err.to_string()));
                None
            }
        }
    }

    /// A file copied onto the project root keeps its own name.
    fn file_destination(&self, source: &Path, dest: &RelativePath, resolved: PathBuf) -> PathBuf {
        match (dest.is_root(), source.file_name()) {
            (true, Some(name)) => self.project_dir.join(name),
            _ => resolved,
        }
    }

    // ── fallback placement ────────────────────────────────────────────────

    fn plan_fallback(&self, plugin: &LoadedPlugin) -> WeldResult<Vec<CopyInstruction>> {
        let mut out = Vec::new();

        let lib = plugin.dir.join(LIB_DIR);
        if self.filesystem.is_dir(&lib) {
            let project_lib = self.project_dir.join(LIB_DIR);
            for entry in self.filesystem.read_dir(&lib)? {
                let Some(name) = entry.file_name() else {
                    continue;
                };
                let destination = project_lib.join(name);
                out.push(self.instruction_for(entry, destination));
            }
        }

        for entry in self.filesystem.read_dir(&plugin.dir)? {
            let Some(name) = entry.file_name() else {
                continue;
            };
            if RESERVED_ENTRIES.iter().any(|reserved| name == *reserved) {
                continue;
            }
            let destination = self.project_dir.join(name);
            out.push(self.instruction_for(entry, destination));
        }

        Ok(out)
    }

    fn instruction_for(&self, source: PathBuf, destination: PathBuf) -> CopyInstruction {
        if self.filesystem.is_dir(&source) {
            CopyInstruction::directory(source, destination)
        } else {
            CopyInstruction::file(source, destination)
        }
    }
}

fn unsafe_path(plugin: &PluginId, path: &str, reason: String) -> ScaffoldWarning {
    ScaffoldWarning::UnsafePath {
        plugin: plugin.clone(),
        path: path.to_string(),
        reason,
    }
}
