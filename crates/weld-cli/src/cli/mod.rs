//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "weld",
    bin_name = "weld",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Compose new projects out of reusable plugins",
    long_about = "Weld builds a project directory by layering plugin folders on top \
                  of each other and merging their package.json contributions.",
    after_help = "EXAMPLES:\n\
        \x20 weld create my-app --plugins logger/default,task/default\n\
        \x20 weld create my-mono --template enterprise-monorepo --api graphql\n\
        \x20 weld list --format json\n\
        \x20 weld completions bash > /usr/share/bash-completion/completions/weld",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from plugins and/or a template.
    #[command(
        visible_alias = "new",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 weld create my-app --plugins logger/default\n\
            \x20 weld create my-app --plugins logger/default --plugins task/default\n\
            \x20 weld create my-mono --template enterprise-monorepo --api rest\n\
            \x20 weld create my-mono --template enterprise-monorepo --dry-run"
    )]
    Create(CreateArgs),

    /// List available plugins and templates.
    #[command(
        visible_alias = "ls",
        about = "List available plugins and templates",
        after_help = "EXAMPLES:\n\
            \x20 weld list\n\
            \x20 weld list --format json\n\
            \x20 weld list --plugins-dir ./my-plugins"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 weld completions bash > ~/.local/share/bash-completion/completions/weld\n\
            \x20 weld completions zsh  > ~/.zfunc/_weld\n\
            \x20 weld completions fish > ~/.config/fish/completions/weld.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 weld config show\n\
            \x20 weld config path"
    )]
    Config(ConfigCommands),
}

// ── store location (shared) ───────────────────────────────────────────────────

/// Overrides for where plugins and templates are read from.
#[derive(Debug, Args, Default)]
pub struct StoreArgs {
    /// Plugins root directory.
    #[arg(
        long = "plugins-dir",
        value_name = "DIR",
        help = "Plugins root (default: from config, then ./plugins)"
    )]
    pub plugins_dir: Option<PathBuf>,

    /// Template overrides root directory.
    #[arg(
        long = "templates-dir",
        value_name = "DIR",
        help = "Templates root (default: from config, then ./templates)"
    )]
    pub templates_dir: Option<PathBuf>,
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `weld create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Name of the project directory to create.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Plugins to apply, in order.
    #[arg(
        short = 'p',
        long = "plugins",
        value_name = "LIST",
        action = clap::ArgAction::Append,
        help = "Comma-separated plugin ids (repeatable)"
    )]
    pub plugins: Vec<String>,

    /// Template to expand.
    #[arg(
        short = 't',
        long = "template",
        value_name = "NAME",
        help = "Template name (e.g. enterprise-monorepo)"
    )]
    pub template: Option<String>,

    /// API style selector.
    ///
    /// Validated by the scaffolder so an invalid value fails like any other
    /// precondition.
    #[arg(
        long = "api",
        value_name = "STYLE",
        help = "API style: rest or graphql"
    )]
    pub api: Option<String>,

    /// Store identifier, echoed in the summary only.
    #[arg(long = "store", value_name = "ID", help = "Store package identifier")]
    pub store: Option<String>,

    #[command(flatten)]
    pub store_dirs: StoreArgs,

    /// Parent directory for the new project.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Parent directory for the project"
    )]
    pub output: PathBuf,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `weld list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub store_dirs: StoreArgs,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// JSON object.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `weld completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `weld config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
