//! Templates (named plugin presets) and the API-style selector.
//!
//! A template expands to a default, ordered plugin list. The list lives in
//! [`BUILTIN_TEMPLATES`] but can be replaced wholesale by a per-template
//! `config.json` on disk (see [`TemplateOverride`]).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{DomainError, PluginId};

/// Per-template override file, `<templates_dir>/<name>/config.json`.
pub const TEMPLATE_CONFIG_FILE: &str = "config.json";

/// Optional per-template seed manifest, `<templates_dir>/<name>/package.json`.
pub const TEMPLATE_MANIFEST_FILE: &str = "package.json";

// ── ApiStyle ──────────────────────────────────────────────────────────────────

/// Auxiliary selector that gates API-client plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStyle {
    Rest,
    Graphql,
}

impl ApiStyle {
    pub const ALL: [ApiStyle; 2] = [ApiStyle::Rest, ApiStyle::Graphql];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Graphql => "graphql",
        }
    }

    /// Plugins appended to the resolved list when this style is selected.
    pub fn conditional_plugins(self) -> &'static [&'static str] {
        match self {
            Self::Rest => &[],
            Self::Graphql => &["graphql/apollo"],
        }
    }
}

impl FromStr for ApiStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(Self::Rest),
            "graphql" => Ok(Self::Graphql),
            _ => Err(DomainError::InvalidApiStyle { value: s.into() }),
        }
    }
}

impl fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Built-in templates ────────────────────────────────────────────────────────

/// A template whose default expansion ships with the tool.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub plugins: &'static [&'static str],
}

pub static BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[BuiltinTemplate {
    name: "enterprise-monorepo",
    description: "Full enterprise setup with all plugins",
    plugins: &[
        "turbo/default",
        "devcontainer/default",
        "apps/empty",
        "packages/empty",
        "conventional-commits/default",
        "vscode/default",
        "github/workflows/default",
        "github/issue-template/default",
        "gitignore/default",
        "releaserc/default",
        "license/default",
        "makefile/default",
        "renovate/default",
        "package/full-monorepo",
        "security/default",
        "testing/enhanced",
        "monitoring/default",
        "performance/default",
        "documentation/default",
        "infrastructure/default",
        "logging-enhanced/default",
    ],
}];

/// Find a built-in template by exact name.
pub fn find_builtin(name: &str) -> Option<&'static BuiltinTemplate> {
    BUILTIN_TEMPLATES.iter().find(|t| t.name == name)
}

// ── Override file ─────────────────────────────────────────────────────────────

/// Deserialised per-template `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TemplateOverride {
    /// When present, replaces the whole resolved plugin list.
    #[serde(default)]
    pub plugins: Option<Vec<String>>,
}

impl TemplateOverride {
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::MalformedDocument {
            document: "template config",
            reason: e.to_string(),
        })
    }

    /// Validated plugin ids, in file order.
    ///
    /// Entries that are not valid identifiers are returned separately so the
    /// caller can report them; they never abort resolution.
    pub fn plugin_ids(&self) -> Option<(Vec<PluginId>, Vec<DomainError>)> {
        let raw = self.plugins.as_ref()?;
        let mut ids = Vec::with_capacity(raw.len());
        let mut rejected = Vec::new();
        for entry in raw {
            match PluginId::new(entry) {
                Ok(id) => ids.push(id),
                Err(e) => rejected.push(e),
            }
        }
        Some((ids, rejected))
    }
}
