//! Flags shared by every weld subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum, builder::FalseyValueParser};

/// Flattened into [`super::Cli`]; every field is `global = true` so the
/// flags may appear before or after the subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` shows stage transitions, `-vv` per-plugin decisions,
    /// `-vvv` individual file copies.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "More log output on stderr (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal. JSON documents are still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors"
    )]
    pub quiet: bool,

    /// Honours the `NO_COLOR` convention: any value other than an empty or
    /// falsey one (`0`, `false`, `no`, `off`) turns color off.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Never emit ANSI colors"
    )]
    pub no_color: bool,

    /// Replaces the platform default config location. A file given here
    /// must exist.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "WELD_CONFIG",
        value_name = "FILE",
        help = "Read settings from this TOML file"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Auto,
        help = "How results are printed on stdout"
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// `-v` or more: error reports include the cause chain.
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }
}

/// Rendering of stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise.
    #[default]
    Auto,
    /// Colored, aligned summaries.
    Human,
    /// Same text, no ANSI codes.
    Plain,
    /// One JSON document on stdout; logs switch to JSON lines on stderr.
    Json,
}
