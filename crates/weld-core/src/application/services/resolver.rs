//! Template Resolver - expand a template name into the final plugin list.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::Filesystem,
        report::{ResolutionSource, ScaffoldWarning},
    },
    domain::{
        ApiStyle, BUILTIN_TEMPLATES, PluginId, ProjectManifest, TEMPLATE_CONFIG_FILE,
        TEMPLATE_MANIFEST_FILE, TemplateOverride, find_builtin,
    },
    error::WeldResult,
};

/// The ordered plugin list plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub plugins: Vec<PluginId>,
    pub source: ResolutionSource,
    pub warnings: Vec<ScaffoldWarning>,
}

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub name: String,
    pub description: Option<String>,
    pub builtin: bool,
    /// A `config.json` with a `plugins` list exists on disk.
    pub has_override: bool,
    /// A seed `package.json` exists on disk.
    pub has_manifest: bool,
    /// Size of the effective default plugin list, when known.
    pub plugin_count: Option<usize>,
}

pub struct TemplateResolver<'a> {
    filesystem: &'a dyn Filesystem,
    templates_dir: &'a Path,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, templates_dir: &'a Path) -> Self {
        Self {
            filesystem,
            templates_dir,
        }
    }

    /// Produce the final ordered plugin list.
    ///
    /// 1. explicit plugins,
    /// 2. the built-in expansion of a recognised template,
    /// 3. selector-conditional plugins,
    /// 4. unless `<templates_dir>/<template>/config.json` has a `plugins`
    ///    list, which replaces everything above.
    ///
    /// Cannot fail: unknown templates and unreadable override files only
    /// degrade the result.
    #[instrument(skip_all, fields(template = template.unwrap_or("none"), api = ?api))]
    pub fn resolve(
        &self,
        explicit: &[PluginId],
        template: Option<&str>,
        api: Option<ApiStyle>,
    ) -> Resolution {
        let mut plugins = explicit.to_vec();
        let mut warnings = Vec::new();

        if let Some(name) = template {
            match find_builtin(name) {
                Some(builtin) => {
                    plugins.extend(builtin.plugins.iter().filter_map(|p| PluginId::new(p).ok()));
                    debug!(added = builtin.plugins.len(), "expanded built-in template");
                }
                None => debug!("template has no built-in expansion"),
            }
        }

        if let Some(style) = api {
            plugins.extend(
                style
                    .conditional_plugins()
                    .iter()
                    .filter_map(|p| PluginId::new(p).ok()),
            );
        }

        let mut source = ResolutionSource::Defaults;
        if let Some(name) = template {
            if let Some((path, replacement)) = self.load_override(name, &mut warnings) {
                info!(
                    path = %path.display(),
                    replaced = plugins.len(),
                    count = replacement.len(),
                    "template config overrides plugin list"
                );
                plugins = replacement;
                source = ResolutionSource::Override { path };
            }
        }

        Resolution {
            plugins,
            source,
            warnings,
        }
    }

    /// The manifest to start merging from: the template's own `package.json`
    /// when it has one, else the plain skeleton.
    pub fn seed_manifest(&self, template: Option<&str>) -> (ProjectManifest, Option<ScaffoldWarning>) {
        let Some((name, dir)) = template.and_then(|n| self.template_dir(n).map(|d| (n, d))) else {
            return (ProjectManifest::skeleton(), None);
        };

        let path = dir.join(TEMPLATE_MANIFEST_FILE);
        if !self.filesystem.exists(&path) {
            return (ProjectManifest::skeleton(), None);
        }

        let parsed = self
            .filesystem
            .read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|raw| ProjectManifest::from_seed_json(&raw).map_err(|e| e.to_string()));

        match parsed {
            Ok(manifest) => {
                debug!(path = %path.display(), "seeded manifest from template");
                (manifest, None)
            }
            Err(reason) => {
                warn!(template = name, %reason, "ignoring unreadable template manifest");
                (
                    ProjectManifest::skeleton(),
                    Some(ScaffoldWarning::MalformedTemplateFile {
                        template: name.to_string(),
                        document: "package.json",
                        reason,
                    }),
                )
            }
        }
    }

    /// Built-in templates plus every directory under the templates root.
    pub fn list(&self) -> WeldResult<Vec<TemplateInfo>> {
        let mut infos: Vec<TemplateInfo> = BUILTIN_TEMPLATES
            .iter()
            .map(|t| TemplateInfo {
                name: t.name.to_string(),
                description: Some(t.description.to_string()),
                builtin: true,
                has_override: false,
                has_manifest: false,
                plugin_count: Some(t.plugins.len()),
            })
            .collect();

        if self.filesystem.is_dir(self.templates_dir) {
            for dir in self.filesystem.read_dir(self.templates_dir)? {
                if !self.filesystem.is_dir(&dir) {
                    continue;
                }
                let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                let mut ignored = Vec::new();
                let override_count = self
                    .load_override(name, &mut ignored)
                    .map(|(_, plugins)| plugins.len());
                let has_manifest = self.filesystem.exists(&dir.join(TEMPLATE_MANIFEST_FILE));

                match infos.iter_mut().find(|i| i.name == name) {
                    Some(info) => {
                        info.has_override = override_count.is_some();
                        info.has_manifest = has_manifest;
                        info.plugin_count = override_count.or(info.plugin_count);
                    }
                    None => infos.push(TemplateInfo {
                        name: name.to_string(),
                        description: None,
                        builtin: false,
                        has_override: override_count.is_some(),
                        has_manifest,
                        plugin_count: override_count,
                    }),
                }
            }
        }

        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    /// Read the override list for `name`, if its config exists and has one.
    fn load_override(
        &self,
        name: &str,
        warnings: &mut Vec<ScaffoldWarning>,
    ) -> Option<(PathBuf, Vec<PluginId>)> {
        let path = self.template_dir(name)?.join(TEMPLATE_CONFIG_FILE);
        if !self.filesystem.exists(&path) {
            return None;
        }

        let parsed = self
            .filesystem
            .read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|raw| TemplateOverride::from_json(&raw).map_err(|e| e.to_string()));

        let config = match parsed {
            Ok(config) => config,
            Err(reason) => {
                warn!(template = name, %reason, "ignoring unreadable template config");
                warnings.push(ScaffoldWarning::MalformedTemplateFile {
                    template: name.to_string(),
                    document: "config.json",
                    reason,
                });
                return None;
            }
        };

        let (ids, rejected) = config.plugin_ids()?;
        for err in rejected {
            warn!(template = name, error = %err, "skipping invalid plugin in template config");
            warnings.push(ScaffoldWarning::InvalidOverrideEntry {
                template: name.to_string(),
                reason: err.to_string(),
            });
        }
        Some((path, ids))
    }

    /// Directory for a template, if `name` is a single plain path segment.
    fn template_dir(&self, name: &str) -> Option<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.templates_dir.join(name)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;

    fn ids(raw: &[&str]) -> Vec<PluginId> {
        raw.iter().map(|r| PluginId::new(r).unwrap()).collect()
    }

    fn no_overrides() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs
    }

    #[test]
    fn explicit_only_without_template() {
        let fs = no_overrides();
        let resolver = TemplateResolver::new(&fs, Path::new("/templates"));
        let r = resolver.resolve(&ids(&["logger/default"]), None, None);
        assert_eq!(r.plugins, ids(&["logger/default"]));
        assert_eq!(r.source, ResolutionSource::Defaults);
    }

    #[test]
    fn builtin_expansion_follows_explicit_plugins() {
        let fs = no_overrides();
        let resolver = TemplateResolver::new(&fs, Path::new("/templates"));
        let r = resolver.resolve(&ids(&["task/default"]), Some("enterprise-monorepo"), None);
        assert_eq!(r.plugins[0].as_str(), "task/default");
        assert_eq!(r.plugins[1].as_str(), "turbo/default");
        assert_eq!(r.plugins.len(), 22);
    }

    #[test]
    fn graphql_selector_appends_apollo_last() {
        let fs = no_overrides();
        let resolver = TemplateResolver::new(&fs, Path::new("/templates"));
        let gql = resolver.resolve(&[], Some("enterprise-monorepo"), Some(ApiStyle::Graphql));
        let rest = resolver.resolve(&[], Some("enterprise-monorepo"), Some(ApiStyle::Rest));
        assert_eq!(gql.plugins.last().map(PluginId::as_str), Some("graphql/apollo"));
        assert!(!rest.plugins.iter().any(|p| p.as_str() == "graphql/apollo"));
    }

    #[test]
    fn unknown_template_contributes_nothing() {
        let fs = no_overrides();
        let resolver = TemplateResolver::new(&fs, Path::new("/templates"));
        let r = resolver.resolve(&ids(&["a/b"]), Some("does-not-exist"), None);
        assert_eq!(r.plugins, ids(&["a/b"]));
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn override_replaces_everything() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p.ends_with("enterprise-monorepo/config.json"));
        fs.expect_read_to_string()
            .returning(|_| Ok(r#"{ "plugins": ["turbo/default", "apps/empty"] }"#.into()));

        let resolver = TemplateResolver::new(&fs, Path::new("/templates"));
        let r = resolver.resolve(
            &ids(&["logger/default"]),
            Some("enterprise-monorepo"),
            Some(ApiStyle::Graphql),
        );
        assert_eq!(r.plugins, ids(&["turbo/default", "apps/empty"]));
        assert!(matches!(r.source, ResolutionSource::Override { .. }));
    }

    #[test]
    fn malformed_override_is_ignored_with_warning() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok("{ nope".into()));

        let resolver = TemplateResolver::new(&fs, Path::new("/templates"));
        let r = resolver.resolve(&ids(&["logger/default"]), Some("custom"), None);
        assert_eq!(r.plugins, ids(&["logger/default"]));
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn template_names_with_separators_are_never_looked_up() {
        // No expectations: any filesystem call would panic.
        let fs = MockFilesystem::new();
        let resolver = TemplateResolver::new(&fs, Path::new("/templates"));
        let r = resolver.resolve(&[], Some("../escape"), None);
        assert!(r.plugins.is_empty());
    }

    #[test]
    fn seed_falls_back_to_skeleton() {
        let fs = no_overrides();
        let resolver = TemplateResolver::new(&fs, Path::new("/templates"));
        let (manifest, warning) = resolver.seed_manifest(Some("enterprise-monorepo"));
        assert_eq!(manifest, ProjectManifest::skeleton());
        assert!(warning.is_none());
    }
}
