//! Plugins: identifiers and their declarative `config.json` descriptor.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{DomainError, RelativePath};

/// Conventional name of a plugin's declarative descriptor.
pub const CONFIG_FILE: &str = "config.json";

/// Conventional name of a plugin's manifest fragment.
pub const MANIFEST_FRAGMENT_FILE: &str = "package.json";

/// Conventional library subdirectory copied flatly into the project's `lib/`.
pub const LIB_DIR: &str = "lib";

/// Top-level plugin entries the fallback placement never copies to the
/// project root.
pub const RESERVED_ENTRIES: [&str; 3] = [LIB_DIR, CONFIG_FILE, MANIFEST_FRAGMENT_FILE];

// ── PluginId ──────────────────────────────────────────────────────────────────

/// Opaque identifier naming a plugin, usually `category/variant`.
///
/// Invariant: non-empty, relative, no `..` segments. Uniqueness inside a
/// plugin list is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PluginId(String);

impl PluginId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = raw.as_ref().trim();
        let invalid = |reason: &str| DomainError::InvalidPluginId {
            id: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("identifier is empty"));
        }
        if raw.contains('\\') {
            return Err(invalid("use '/' to separate segments"));
        }
        let path = RelativePath::try_new(raw).map_err(|_| invalid("must be a relative path"))?;
        if path.is_root() {
            return Err(invalid("identifier names no directory"));
        }

        // Normalise "./logger//default/" to "logger/default".
        let normalized = raw
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect::<Vec<_>>()
            .join("/");
        Ok(Self(normalized))
    }

    /// Parse a comma-separated list, skipping empty segments.
    ///
    /// `"logger/default, task/default,"` yields two ids.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, DomainError> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::new)
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading segment, e.g. `logger` for `logger/default`.
    pub fn category(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }

    /// Location of the plugin relative to the plugins root.
    pub fn relative_path(&self) -> RelativePath {
        // Validated at construction.
        RelativePath::try_new(&self.0).unwrap_or_default()
    }
}

impl FromStr for PluginId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PluginId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── PluginConfig ──────────────────────────────────────────────────────────────

/// Deserialised `config.json` of one plugin.
///
/// Every field is optional. Unknown keys are ignored so plugins can carry
/// metadata for other tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    /// Directory copies, applied in order.
    #[serde(default)]
    pub paths: Vec<PathMapping>,
    /// File (or directory) copies, applied in order.
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl PluginConfig {
    /// Parse a descriptor from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::MalformedDocument {
            document: "plugin config",
            reason: e.to_string(),
        })
    }

    /// `true` when the config says where its files go.
    ///
    /// Empty lists count as undeclared, so such plugins use fallback
    /// placement like legacy ones.
    pub fn declares_placement(&self) -> bool {
        !self.paths.is_empty() || !self.files.is_empty()
    }
}

/// `{ "from": ..., "to": ... }` directory-copy instruction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathMapping {
    /// Relative to the plugin root.
    pub from: String,
    /// Relative to the project root.
    pub to: String,
}

/// One entry of a `files` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FileEntry {
    /// Bare path used for both source and destination.
    Same(String),
    /// Explicit pair; `dest` defaults to `src` when omitted.
    Mapped { src: String, dest: Option<String> },
}

impl FileEntry {
    pub fn source(&self) -> &str {
        match self {
            Self::Same(path) => path,
            Self::Mapped { src, .. } => src,
        }
    }

    pub fn destination(&self) -> &str {
        match self {
            Self::Same(path) => path,
            Self::Mapped { src, dest } => dest.as_deref().unwrap_or(src),
        }
    }
}
