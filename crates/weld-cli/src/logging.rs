//! Tracing subscriber setup for the `weld` binary.
//!
//! The library crates only emit events; this is the one place a subscriber
//! is installed. Everything goes to stderr so stdout stays reserved for
//! results.
//!
//! `RUST_LOG` replaces the flag-derived filter entirely when set.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events are shown by default. Dependencies stay silent.
const WELD_TARGETS: [&str; 3] = ["weld_cli", "weld_core", "weld_adapters"];

/// Install the global subscriber. Errors if one is already installed.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level_for(args))));

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if args.output_format == OutputFormat::Json {
        registry
            .with(base.json().flatten_event(true).with_ansi(false))
            .try_init()
    } else {
        let ansi = !args.no_color && std::io::stderr().is_terminal();
        registry.with(base.compact().with_ansi(ansi)).try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    WELD_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `--quiet` beats any number of `-v`.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
