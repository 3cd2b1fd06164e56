//! What a scaffold run produced, including every recoverable problem.

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::domain::{ApiStyle, CopyInstruction, PluginId, ProjectManifest};

/// A recoverable, per-plugin (or per-template) problem.
///
/// Warnings are logged as they happen and collected on the report; none of
/// them changes the exit status of a run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScaffoldWarning {
    #[error("plugin '{plugin}' not found at {}", .searched.display())]
    PluginNotFound { plugin: PluginId, searched: PathBuf },

    #[error("plugin '{plugin}' has an unreadable config, using fallback placement: {reason}")]
    MalformedConfig { plugin: PluginId, reason: String },

    #[error("plugin '{plugin}' declares a missing source: {}", .path.display())]
    MissingSource { plugin: PluginId, path: PathBuf },

    #[error("plugin '{plugin}' declares an unsafe path '{path}': {reason}")]
    UnsafePath {
        plugin: PluginId,
        path: String,
        reason: String,
    },

    #[error("template '{template}' lists an invalid plugin: {reason}")]
    InvalidOverrideEntry { template: String, reason: String },

    #[error("template '{template}' has an unreadable {document}, ignoring it: {reason}")]
    MalformedTemplateFile {
        template: String,
        document: &'static str,
        reason: String,
    },
}

/// Where the final plugin list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Explicit plugins plus built-in and selector expansions.
    Defaults,
    /// A per-template `config.json` replaced the whole list.
    Override { path: PathBuf },
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => f.write_str("defaults"),
            Self::Override { path } => write!(f, "override ({})", path.display()),
        }
    }
}

/// The copy instructions produced for one plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPlan {
    pub plugin: PluginId,
    pub instructions: Vec<CopyInstruction>,
}

/// Outcome of one `scaffold` call.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub project_name: String,
    pub project_dir: PathBuf,
    pub template: Option<String>,
    pub api: Option<ApiStyle>,
    pub resolution: ResolutionSource,
    /// Final resolved list, in processing order (duplicates kept).
    pub plugins: Vec<PluginId>,
    /// Plugins whose directory was found and processed.
    pub applied: Vec<PluginId>,
    /// Plugins whose directory was missing.
    pub skipped: Vec<PluginId>,
    pub plans: Vec<PluginPlan>,
    pub manifest: ProjectManifest,
    pub files_copied: usize,
    pub warnings: Vec<ScaffoldWarning>,
    pub dry_run: bool,
}

impl ScaffoldReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
