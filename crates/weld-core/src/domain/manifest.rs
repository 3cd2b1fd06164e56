//! The generated project's `package.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DomainError, LegacyShim, PluginConfig};

/// File name the manifest is written to inside the project.
pub const MANIFEST_FILE: &str = "package.json";

fn default_version() -> String {
    "1.0.0".into()
}

/// Accumulator for the merged package manifest.
///
/// Created once per invocation (from [`ProjectManifest::skeleton`] or a
/// template seed), mutated in plugin order, then serialised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: BTreeMap<String, String>,
    /// Any other top-level keys a template seed carries, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectManifest {
    /// Plain default manifest used when no template seed exists.
    pub fn skeleton() -> Self {
        let scripts = [
            ("dev", "echo \"Development server starting...\""),
            ("build", "echo \"Building project...\""),
            ("start", "echo \"Starting project...\""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            name: String::new(),
            version: default_version(),
            module_type: Some("module".into()),
            scripts,
            dependencies: BTreeMap::new(),
            dev_dependencies: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    /// Parse a template's own `package.json` as the starting manifest.
    pub fn from_seed_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::MalformedDocument {
            document: "template manifest",
            reason: e.to_string(),
        })
    }

    /// Overwrite keys with a plugin config's contributions (last writer wins).
    pub fn absorb_config(&mut self, config: &PluginConfig) {
        overwrite(&mut self.dependencies, &config.dependencies);
        overwrite(&mut self.dev_dependencies, &config.dev_dependencies);
        overwrite(&mut self.scripts, &config.scripts);
    }

    /// Overwrite keys with a legacy shim's hardcoded entries.
    pub fn absorb_shim(&mut self, shim: &LegacyShim) {
        for (name, version) in shim.dependencies {
            self.dependencies
                .insert((*name).to_string(), (*version).to_string());
        }
        for (name, command) in shim.scripts {
            self.scripts
                .insert((*name).to_string(), (*command).to_string());
        }
    }

    /// Pretty JSON with two-space indentation and a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, DomainError> {
        let mut out = serde_json::to_string_pretty(self).map_err(|e| {
            DomainError::MalformedDocument {
                document: "project manifest",
                reason: e.to_string(),
            }
        })?;
        out.push('\n');
        Ok(out)
    }
}

impl Default for ProjectManifest {
    fn default() -> Self {
        Self::skeleton()
    }
}

fn overwrite(target: &mut BTreeMap<String, String>, source: &BTreeMap<String, String>) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(deps: &[(&str, &str)], scripts: &[(&str, &str)]) -> PluginConfig {
        PluginConfig {
            dependencies: deps
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            scripts: scripts
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..PluginConfig::default()
        }
    }

    #[test]
    fn skeleton_has_module_type_and_default_scripts() {
        let m = ProjectManifest::skeleton();
        assert_eq!(m.version, "1.0.0");
        assert_eq!(m.module_type.as_deref(), Some("module"));
        assert!(m.scripts.contains_key("dev"));
        assert!(m.scripts.contains_key("build"));
        assert!(m.scripts.contains_key("start"));
        assert!(m.dependencies.is_empty());
    }

    #[test]
    fn later_config_overwrites_earlier_key() {
        let mut m = ProjectManifest::skeleton();
        m.absorb_config(&config(&[("react", "^17.0.0")], &[]));
        m.absorb_config(&config(&[("react", "^18.2.0")], &[]));
        assert_eq!(m.dependencies["react"], "^18.2.0");
    }

    #[test]
    fn config_can_replace_skeleton_script() {
        let mut m = ProjectManifest::skeleton();
        m.absorb_config(&config(&[], &[("dev", "next dev")]));
        assert_eq!(m.scripts["dev"], "next dev");
    }

    #[test]
    fn empty_dependency_sections_are_not_serialised() {
        let json = ProjectManifest::skeleton().to_pretty_json().unwrap();
        assert!(!json.contains("dependencies"));
        assert!(!json.contains("devDependencies"));
        assert!(json.contains("\"type\": \"module\""));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn seed_manifest_keeps_unknown_keys() {
        let seed = r#"{
            "name": "template-name",
            "private": true,
            "workspaces": ["apps/*", "packages/*"],
            "devDependencies": { "turbo": "^2.0.0" }
        }"#;
        let m = ProjectManifest::from_seed_json(seed).unwrap();
        assert_eq!(m.version, "1.0.0");
        assert_eq!(m.module_type, None);
        assert_eq!(m.dev_dependencies["turbo"], "^2.0.0");

        let out: Value = serde_json::from_str(&m.to_pretty_json().unwrap()).unwrap();
        assert_eq!(out["private"], Value::Bool(true));
        assert_eq!(out["workspaces"][0], "apps/*");
        assert!(out.get("type").is_none());
    }

    #[test]
    fn malformed_seed_is_rejected() {
        assert!(ProjectManifest::from_seed_json("[1, 2]").is_err());
    }
}
