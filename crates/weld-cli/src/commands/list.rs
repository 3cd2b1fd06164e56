//! Implementation of the `weld list` command.

use serde_json::json;
use tracing::debug;

use weld_adapters::LocalFilesystem;
use weld_core::application::{ScaffoldService, TemplateInfo};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let layout = config.store_layout(&args.store_dirs);
    debug!(plugins_dir = %layout.plugins_dir.display(), "listing store");

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()), layout);
    let plugins = service.list_plugins()?;
    let templates = service.list_templates()?;

    // `--output-format json` implies JSON here too.
    if args.format == ListFormat::Json || output.is_json() {
        output.json(&json!({
            "plugins": plugins,
            "templates": templates.iter().map(template_json).collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    output.header(&format!(
        "Plugins ({}) in {}:",
        plugins.len(),
        service.layout().plugins_dir.display()
    ))?;
    if plugins.is_empty() {
        output.item("(none)")?;
    }
    let mut category = "";
    for plugin in &plugins {
        if plugin.category() != category {
            category = plugin.category();
            output.print(&format!("  {category}"))?;
        }
        output.print(&format!("    {plugin}"))?;
    }

    output.print("")?;
    output.header("Templates:")?;
    for template in &templates {
        output.print(&format!("  {}", describe(template)))?;
    }

    Ok(())
}

fn describe(template: &TemplateInfo) -> String {
    let mut line = template.name.clone();
    if let Some(count) = template.plugin_count {
        line.push_str(&format!(" ({count} plugins)"));
    }
    let mut tags = Vec::new();
    if template.builtin {
        tags.push("built-in");
    }
    if template.has_override {
        tags.push("override");
    }
    if template.has_manifest {
        tags.push("package.json");
    }
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    if let Some(description) = &template.description {
        line.push_str(&format!(" - {description}"));
    }
    line
}

fn template_json(template: &TemplateInfo) -> serde_json::Value {
    json!({
        "name": template.name,
        "description": template.description,
        "builtin": template.builtin,
        "override": template.has_override,
        "manifest": template.has_manifest,
        "pluginCount": template.plugin_count,
    })
}
