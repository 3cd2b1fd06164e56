//! Manifest Merger - fold plugin contributions into one `package.json`.

use tracing::trace;

use crate::domain::{PluginConfig, PluginId, ProjectManifest, shim_for};

/// Owns the manifest accumulator for one invocation.
///
/// Plugins must be folded in resolved-list order: every section is a
/// shallow key-wise overwrite, so order decides precedence.
#[derive(Debug, Clone)]
pub struct ManifestMerger {
    manifest: ProjectManifest,
}

impl ManifestMerger {
    pub fn new(seed: ProjectManifest) -> Self {
        Self { manifest: seed }
    }

    /// Apply one plugin: its config contributions first, then any legacy
    /// shim entries for the same identifier.
    pub fn fold(&mut self, plugin: &PluginId, config: Option<&PluginConfig>) {
        if let Some(config) = config {
            trace!(
                plugin = %plugin,
                dependencies = config.dependencies.len(),
                dev_dependencies = config.dev_dependencies.len(),
                scripts = config.scripts.len(),
                "merging config contributions"
            );
            self.manifest.absorb_config(config);
        }

        if let Some(shim) = shim_for(plugin) {
            trace!(plugin = %plugin, "applying legacy shim");
            self.manifest.absorb_shim(shim);
        }
    }

    /// Stamp the project name (overriding any template-provided one) and
    /// hand the manifest over.
    pub fn finish(mut self, project_name: &str) -> ProjectManifest {
        self.manifest.name = project_name.to_string();
        self.manifest
    }
}

impl Default for ManifestMerger {
    fn default() -> Self {
        Self::new(ProjectManifest::skeleton())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn id(raw: &str) -> PluginId {
        PluginId::new(raw).unwrap()
    }

    fn deps(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn keys_are_the_union_of_contributions() {
        let a = PluginConfig {
            dependencies: deps(&[("react", "^18")]),
            dev_dependencies: deps(&[("vitest", "^1")]),
            ..Default::default()
        };
        let b = PluginConfig {
            dependencies: deps(&[("next", "^14")]),
            scripts: deps(&[("lint", "next lint")]),
            ..Default::default()
        };

        let mut merger = ManifestMerger::default();
        merger.fold(&id("ui/default"), Some(&a));
        merger.fold(&id("next/default"), Some(&b));
        let m = merger.finish("demo");

        assert_eq!(
            m.dependencies.keys().collect::<Vec<_>>(),
            ["next", "react"]
        );
        assert_eq!(m.dev_dependencies.keys().collect::<Vec<_>>(), ["vitest"]);
        assert!(m.scripts.contains_key("lint"));
    }

    #[test]
    fn last_writer_wins_regardless_of_earlier_value() {
        for earlier in ["^1.0.0", "^9.9.9", "latest"] {
            let mut merger = ManifestMerger::default();
            merger.fold(
                &id("a/x"),
                Some(&PluginConfig {
                    dependencies: deps(&[("zod", earlier)]),
                    ..Default::default()
                }),
            );
            merger.fold(
                &id("b/y"),
                Some(&PluginConfig {
                    dependencies: deps(&[("zod", "^3.22.0")]),
                    ..Default::default()
                }),
            );
            assert_eq!(merger.finish("x").dependencies["zod"], "^3.22.0");
        }
    }

    #[test]
    fn shim_applies_after_config_for_same_plugin() {
        let config = PluginConfig {
            scripts: deps(&[("log:example", "node custom.js")]),
            ..Default::default()
        };
        let mut merger = ManifestMerger::default();
        merger.fold(&id("logger/default"), Some(&config));
        let m = merger.finish("demo");
        assert_eq!(m.scripts["log:example"], "tsx lib/logger-example.ts");
        assert_eq!(m.dependencies["@kalabamssalu/logger"], "^1.0.0");
    }

    #[test]
    fn shim_applies_without_config() {
        let mut merger = ManifestMerger::default();
        merger.fold(&id("task/default"), None);
        assert!(merger.finish("x").scripts.contains_key("task:example"));
    }

    #[test]
    fn later_config_overrides_earlier_shim() {
        let mut merger = ManifestMerger::default();
        merger.fold(&id("logger/default"), None);
        merger.fold(
            &id("logger/pinned"),
            Some(&PluginConfig {
                dependencies: deps(&[("@kalabamssalu/logger", "2.0.0")]),
                ..Default::default()
            }),
        );
        assert_eq!(
            merger.finish("x").dependencies["@kalabamssalu/logger"],
            "2.0.0"
        );
    }

    #[test]
    fn finish_overwrites_seed_name() {
        let mut seed = ProjectManifest::skeleton();
        seed.name = "from-template".into();
        let m = ManifestMerger::new(seed).finish("my-app");
        assert_eq!(m.name, "my-app");
    }

    #[test]
    fn duplicate_plugins_fold_idempotently() {
        let mut once = ManifestMerger::default();
        once.fold(&id("logging-enhanced/default"), None);
        let mut twice = ManifestMerger::default();
        twice.fold(&id("logging-enhanced/default"), None);
        twice.fold(&id("logging-enhanced/default"), None);
        assert_eq!(once.finish("x"), twice.finish("x"));
    }
}
