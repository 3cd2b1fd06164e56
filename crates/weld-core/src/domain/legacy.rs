//! Hardcoded manifest entries for plugins that predate `config.json`.
//!
//! A migration shim: each row is applied after the plugin's own config
//! contributions, so a config cannot currently switch these entries off.
//! New plugins declare their dependencies in `config.json` instead of
//! growing this table.

use super::PluginId;

/// Hardcoded dependency and script entries keyed by plugin identifier.
#[derive(Debug, Clone, Copy)]
pub struct LegacyShim {
    /// Identifier the shim keys on.
    pub plugin: &'static str,
    /// `(package, version)` pairs merged into `dependencies`.
    pub dependencies: &'static [(&'static str, &'static str)],
    /// `(name, command)` pairs merged into `scripts`.
    pub scripts: &'static [(&'static str, &'static str)],
}

const LOGGER: (&str, &str) = ("@kalabamssalu/logger", "^1.0.0");
const TASK: (&str, &str) = ("@kalabamssalu/task", "^1.0.0");

pub static LEGACY_SHIMS: &[LegacyShim] = &[
    LegacyShim {
        plugin: "logger/default",
        dependencies: &[LOGGER],
        scripts: &[("log:example", "tsx lib/logger-example.ts")],
    },
    LegacyShim {
        plugin: "task/default",
        dependencies: &[TASK],
        scripts: &[("task:example", "tsx lib/task-example.ts")],
    },
    LegacyShim {
        plugin: "logging-enhanced/default",
        dependencies: &[LOGGER, TASK],
        scripts: &[
            ("logging:demo", "tsx lib/logging-demo.ts"),
            ("logging:init", "tsx lib/enhanced-logging.ts"),
        ],
    },
    LegacyShim {
        plugin: "graphql/apollo",
        dependencies: &[("@apollo/client", "^3.8.0"), ("graphql", "^16.8.0")],
        scripts: &[("graphql:setup", "tsx lib/graphql-setup.ts")],
    },
];

/// Look up the shim row for `id`, if any.
pub fn shim_for(id: &PluginId) -> Option<&'static LegacyShim> {
    LEGACY_SHIMS.iter().find(|shim| shim.plugin == id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_shim_adds_example_script() {
        let shim = shim_for(&PluginId::new("logger/default").unwrap()).unwrap();
        assert!(shim.scripts.iter().any(|(name, _)| *name == "log:example"));
        assert_eq!(shim.dependencies, &[LOGGER]);
    }

    #[test]
    fn graphql_shim_brings_apollo() {
        let shim = shim_for(&PluginId::new("graphql/apollo").unwrap()).unwrap();
        assert!(shim.dependencies.iter().any(|(name, _)| *name == "@apollo/client"));
    }

    #[test]
    fn unknown_plugins_have_no_shim() {
        assert!(shim_for(&PluginId::new("turbo/default").unwrap()).is_none());
    }

    #[test]
    fn shim_ids_are_unique() {
        for (i, a) in LEGACY_SHIMS.iter().enumerate() {
            for b in &LEGACY_SHIMS[i + 1..] {
                assert_ne!(a.plugin, b.plugin);
            }
        }
    }
}
