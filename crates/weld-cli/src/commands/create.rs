//! Implementation of the `weld create` command.
//!
//! Responsibility: turn CLI arguments into a `ScaffoldRequest`, run the
//! core scaffold service, and display the report. No business logic lives
//! here.

use serde_json::json;
use tracing::{info, instrument};

use weld_adapters::LocalFilesystem;
use weld_core::{
    application::{ScaffoldReport, ScaffoldRequest, ScaffoldService},
    domain::CopyKind,
};

use crate::{
    cli::CreateArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `weld create` command.
///
/// 1. Merge flags with configuration (store dirs, default API style)
/// 2. Echo store / template / plugin choices
/// 3. Scaffold (or plan, with `--dry-run`) via `ScaffoldService`
/// 4. Print the summary, warnings and next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: CreateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let layout = config.store_layout(&args.store_dirs);
    let store = args.store.clone().unwrap_or_else(|| config.store.name.clone());
    let request = build_request(&args, &config);

    if !output.is_json() {
        output.header(&format!("Creating '{}'", request.project_name))?;
        output.field("store", &store)?;
        output.field("template", request.template.as_deref().unwrap_or("none"))?;
        output.field("api", request.api.as_deref().unwrap_or("none"))?;
        let plugins = if request.plugins.is_empty() {
            "none".to_string()
        } else {
            request.plugins.join(",")
        };
        output.field("plugins", &plugins)?;
        output.print("")?;
    }

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()), layout);
    let report = service.scaffold(&request)?;
    info!(
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        warnings = report.warnings.len(),
        "create finished"
    );

    if output.is_json() {
        output.json(&report_json(&report, &store))?;
        return Ok(());
    }

    if report.dry_run {
        show_plan(&report, &output)?;
    } else {
        show_summary(&report, &output)?;
    }
    Ok(())
}

/// Merge CLI flags with configured defaults.
fn build_request(args: &CreateArgs, config: &AppConfig) -> ScaffoldRequest {
    ScaffoldRequest {
        project_name: args.name.clone(),
        output_dir: args.output.clone(),
        plugins: args.plugins.clone(),
        template: args.template.clone(),
        api: args.api.clone().or_else(|| config.defaults.api.clone()),
        dry_run: args.dry_run,
    }
}

fn show_summary(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    output.success(&format!(
        "Project '{}' created at {}",
        report.project_name,
        report.project_dir.display()
    ))?;
    output.field("resolved", &report.plugins.len().to_string())?;
    output.field("applied", &report.applied.len().to_string())?;
    output.field("skipped", &report.skipped.len().to_string())?;
    output.field("files", &report.files_copied.to_string())?;
    output.field("source", &report.resolution.to_string())?;

    show_warnings(report, output)?;

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", report.project_name))?;
    output.print("  npm install")?;
    output.print("  npm run dev")?;
    Ok(())
}

fn show_plan(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    output.info(&format!(
        "Dry run: would create '{}' at {}",
        report.project_name,
        report.project_dir.display()
    ))?;

    for plan in &report.plans {
        output.print(&format!("{}:", plan.plugin))?;
        if plan.instructions.is_empty() {
            output.item("(no files)")?;
        }
        for instruction in &plan.instructions {
            let dest = instruction.destination_under(&report.project_dir).display();
            let line = match instruction.kind {
                CopyKind::File => dest.to_string(),
                CopyKind::Directory => format!("{dest}/"),
                CopyKind::EnsureDirectory => format!("{dest}/ (empty)"),
            };
            output.item(&line)?;
        }
    }
    for plugin in &report.skipped {
        output.print(&format!("{plugin}: not found, skipped"))?;
    }

    show_warnings(report, output)?;

    output.print("")?;
    output.print("package.json:")?;
    let manifest = report
        .manifest
        .to_pretty_json()
        .map_err(weld_core::error::WeldError::from)?;
    output.print(manifest.trim_end())?;
    Ok(())
}

fn show_warnings(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    if !report.has_warnings() {
        return Ok(());
    }
    output.print("")?;
    output.warning(&format!("{} warning(s):", report.warnings.len()))?;
    for warning in &report.warnings {
        output.item(&warning.to_string())?;
    }
    Ok(())
}

fn report_json(report: &ScaffoldReport, store: &str) -> serde_json::Value {
    json!({
        "project": report.project_name,
        "path": report.project_dir,
        "store": store,
        "template": report.template,
        "api": report.api,
        "dryRun": report.dry_run,
        "resolution": report.resolution.to_string(),
        "plugins": report.plugins,
        "applied": report.applied,
        "skipped": report.skipped,
        "filesCopied": report.files_copied,
        "warnings": report.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "manifest": report.manifest,
    })
}
