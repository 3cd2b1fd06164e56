//! Scaffold Service - main application orchestrator.
//!
//! One call walks a fixed sequence of stages:
//!
//! 1. **Validating** - project name, API selector, plugin ids, destination
//! 2. **Expanding** - resolve the final plugin list and the seed manifest
//! 3. **Materializing** - per plugin: merge manifest entries, copy files
//! 4. **Done** - write `package.json`
//!
//! Any fatal error jumps to **Aborted**. Nothing touches the filesystem
//! before Materializing, and there is no rollback after it starts.

use std::{fmt, path::PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        report::{ScaffoldReport, ScaffoldWarning},
        services::{
            materializer::FileMaterializer,
            merger::ManifestMerger,
            registry::{PluginLookup, PluginRegistry},
            resolver::{TemplateInfo, TemplateResolver},
        },
    },
    domain::{ApiStyle, DomainValidator, MANIFEST_FILE, PluginId},
    error::WeldResult,
};

/// Where plugins and template overrides live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    pub plugins_dir: PathBuf,
    pub templates_dir: PathBuf,
}

impl StoreLayout {
    pub fn new(plugins_dir: impl Into<PathBuf>, templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            templates_dir: templates_dir.into(),
        }
    }
}

/// Raw user input for one scaffold run.
///
/// Values stay unparsed so that every rejection happens in the Validating
/// stage, before anything is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub project_name: String,
    /// Parent directory; the project is created at `output_dir/project_name`.
    pub output_dir: PathBuf,
    /// Comma-separated plugin lists, as given on the command line.
    pub plugins: Vec<String>,
    pub template: Option<String>,
    pub api: Option<String>,
    pub dry_run: bool,
}

impl ScaffoldRequest {
    pub fn new(project_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_name: project_name.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_plugins<I, S>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugins.extend(plugins.into_iter().map(Into::into));
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_api(mut self, api: impl Into<String>) -> Self {
        self.api = Some(api.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Orchestrator lifecycle, used to tag log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldStage {
    Validating,
    Expanding,
    Materializing,
    Done,
    Aborted,
}

impl fmt::Display for ScaffoldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validating => "validating",
            Self::Expanding => "expanding",
            Self::Materializing => "materializing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

/// Validated form of a [`ScaffoldRequest`].
struct ValidatedRequest<'r> {
    name: &'r str,
    project_dir: PathBuf,
    explicit: Vec<PluginId>,
    template: Option<&'r str>,
    api: Option<ApiStyle>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    layout: StoreLayout,
}

impl ScaffoldService {
    pub fn new(filesystem: Box<dyn Filesystem>, layout: StoreLayout) -> Self {
        Self { filesystem, layout }
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Compose a project from plugins.
    ///
    /// Fatal preconditions fail before any mutation; per-plugin problems
    /// end up in [`ScaffoldReport::warnings`].
    #[instrument(
        skip_all,
        fields(
            project = %request.project_name,
            output = %request.output_dir.display(),
            dry_run = request.dry_run
        )
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> WeldResult<ScaffoldReport> {
        let result = self.run(request);
        if let Err(e) = &result {
            warn!(stage = %ScaffoldStage::Aborted, error = %e, "scaffold aborted");
        }
        result
    }

    fn run(&self, request: &ScaffoldRequest) -> WeldResult<ScaffoldReport> {
        info!(stage = %ScaffoldStage::Validating);
        let validated = self.validate(request)?;

        info!(stage = %ScaffoldStage::Expanding);
        let resolver = TemplateResolver::new(self.filesystem.as_ref(), &self.layout.templates_dir);
        let resolution = resolver.resolve(&validated.explicit, validated.template, validated.api);
        let (seed, seed_warning) = resolver.seed_manifest(validated.template);

        let mut warnings = resolution.warnings;
        warnings.extend(seed_warning);
        info!(
            plugins = resolution.plugins.len(),
            source = %resolution.source,
            "plugin list resolved"
        );

        info!(stage = %ScaffoldStage::Materializing);
        if !request.dry_run {
            self.filesystem.create_dir_all(&validated.project_dir)?;
        }

        let registry = PluginRegistry::new(self.filesystem.as_ref(), &self.layout.plugins_dir);
        let materializer = FileMaterializer::new(self.filesystem.as_ref(), &validated.project_dir);
        let mut merger = ManifestMerger::new(seed);
        let mut applied = Vec::new();
        let mut skipped = Vec::new();
        let mut plans = Vec::new();
        let mut files_copied = 0;

        for id in &resolution.plugins {
            let plugin = match registry.lookup(id) {
                PluginLookup::Found(plugin) => plugin,
                PluginLookup::NotFound { searched } => {
                    warn!(plugin = %id, path = %searched.display(), "plugin not found, skipping");
                    warnings.push(ScaffoldWarning::PluginNotFound {
                        plugin: id.clone(),
                        searched,
                    });
                    merger.fold(id, None);
                    skipped.push(id.clone());
                    continue;
                }
            };

            if let Some(reason) = &plugin.config_problem {
                warnings.push(ScaffoldWarning::MalformedConfig {
                    plugin: id.clone(),
                    reason: reason.clone(),
                });
            }

            merger.fold(id, plugin.config.as_ref());
            let plan = materializer.plan(&plugin, &mut warnings)?;
            if !request.dry_run {
                files_copied += materializer.execute(&plan)?;
            }
            debug!(plugin = %id, legacy = plugin.is_legacy(), "plugin processed");
            plans.push(plan);
            applied.push(id.clone());
        }

        let manifest = merger.finish(validated.name);
        if !request.dry_run {
            let path = validated.project_dir.join(MANIFEST_FILE);
            self.filesystem
                .write_file(&path, &manifest.to_pretty_json()?)?;
        }

        info!(
            stage = %ScaffoldStage::Done,
            applied = applied.len(),
            skipped = skipped.len(),
            files_copied,
            warnings = warnings.len(),
            "scaffold completed"
        );

        Ok(ScaffoldReport {
            project_name: validated.name.to_string(),
            project_dir: validated.project_dir,
            template: validated.template.map(str::to_string),
            api: validated.api,
            resolution: resolution.source,
            plugins: resolution.plugins,
            applied,
            skipped,
            plans,
            manifest,
            files_copied,
            warnings,
            dry_run: request.dry_run,
        })
    }

    fn validate<'r>(&self, request: &'r ScaffoldRequest) -> WeldResult<ValidatedRequest<'r>> {
        let name = request.project_name.as_str();
        DomainValidator::validate_project_name(name)?;

        let api = request
            .api
            .as_deref()
            .map(str::parse::<ApiStyle>)
            .transpose()?;

        let mut explicit = Vec::new();
        for raw in &request.plugins {
            explicit.extend(PluginId::parse_list(raw)?);
        }

        let template = request
            .template
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let project_dir = request.output_dir.join(name);
        if self.filesystem.exists(&project_dir) {
            return Err(ApplicationError::ProjectExists { path: project_dir }.into());
        }

        debug!(
            explicit = explicit.len(),
            template = template.unwrap_or("none"),
            api = api.map_or("none", ApiStyle::as_str),
            "request validated"
        );
        Ok(ValidatedRequest {
            name,
            project_dir,
            explicit,
            template,
            api,
        })
    }

    /// Every plugin under the plugins root.
    pub fn list_plugins(&self) -> WeldResult<Vec<PluginId>> {
        PluginRegistry::new(self.filesystem.as_ref(), &self.layout.plugins_dir).list()
    }

    /// Built-in templates merged with the directories under the templates root.
    pub fn list_templates(&self) -> WeldResult<Vec<TemplateInfo>> {
        TemplateResolver::new(self.filesystem.as_ref(), &self.layout.templates_dir).list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::DomainError;
    use crate::error::WeldError;

    fn service(fs: MockFilesystem) -> ScaffoldService {
        ScaffoldService::new(Box::new(fs), StoreLayout::new("/store", "/templates"))
    }

    #[test]
    fn existing_destination_aborts_without_mutation() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p| p.to_path_buf() == PathBuf::from("/out/my-app"))
            .return_const(true);
        // No create/write/copy expectations: any mutation would panic.

        let err = service(fs)
            .scaffold(&ScaffoldRequest::new("my-app", "/out").with_plugins(["logger/default"]))
            .unwrap_err();
        assert!(matches!(
            err,
            WeldError::Application(ApplicationError::ProjectExists { .. })
        ));
        assert!(err.is_precondition());
    }

    #[test]
    fn invalid_api_is_rejected_before_touching_disk() {
        let fs = MockFilesystem::new();
        let err = service(fs)
            .scaffold(&ScaffoldRequest::new("my-app", "/out").with_api("soap"))
            .unwrap_err();
        assert!(matches!(
            err,
            WeldError::Domain(DomainError::InvalidApiStyle { .. })
        ));
    }

    #[test]
    fn invalid_project_name_is_rejected() {
        for name in ["", ".hidden", "a/b"] {
            let err = service(MockFilesystem::new())
                .scaffold(&ScaffoldRequest::new(name, "/out"))
                .unwrap_err();
            assert!(err.is_precondition(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn dry_run_never_writes() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_is_dir().return_const(false);
        // Only reads are expected.

        let report = service(fs)
            .scaffold(
                &ScaffoldRequest::new("my-app", "/out")
                    .with_plugins(["logger/default"])
                    .dry_run(true),
            )
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.files_copied, 0);
        assert_eq!(report.manifest.name, "my-app");
        assert!(report.manifest.scripts.contains_key("log:example"));
    }

    #[test]
    fn missing_plugin_is_a_warning_and_manifest_is_still_written() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_is_dir().return_const(false);
        fs.expect_create_dir_all()
            .withf(|p| p.to_path_buf() == PathBuf::from("/out/my-app"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, content| {
                p.to_path_buf() == PathBuf::from("/out/my-app/package.json")
                    && content.ends_with('\n')
                    && content.contains("\"name\": \"my-app\"")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let report = service(fs)
            .scaffold(&ScaffoldRequest::new("my-app", "/out").with_plugins(["ghost/plugin"]))
            .unwrap();

        assert!(report.applied.is_empty());
        assert!(matches!(
            report.warnings.as_slice(),
            [ScaffoldWarning::PluginNotFound { .. }]
        ));
    }

    #[test]
    fn stage_names_are_lowercase() {
        assert_eq!(ScaffoldStage::Materializing.to_string(), "materializing");
        assert_eq!(ScaffoldStage::Aborted.to_string(), "aborted");
    }
}
