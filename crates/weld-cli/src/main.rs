//! # weld
//!
//! Compose a new project directory out of plugin directories and a merged
//! `package.json`.
//!
//! `main` loads `.env`, parses arguments, installs the tracing subscriber,
//! loads [`AppConfig`] and hands everything to a command handler. Every
//! failure funnels through [`report_failure`].
//!
//! ## Exit codes
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! |  0   | Success (warnings included), `--help`, `--version` |
//! |  1   | Filesystem or other internal failure           |
//! |  2   | Bad arguments, invalid name/API, project exists |
//! |  3   | Plugin store not found                         |
//! |  4   | Unreadable configuration                       |

use std::{io::IsTerminal as _, process::ExitCode};

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

/// Exit status for arguments clap itself rejects.
const USAGE_EXIT: u8 = 2;

fn main() -> ExitCode {
    // Optional; values already in the environment win.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return clap_exit(&e),
    };

    if let Err(e) = logging::init_logging(&cli.global) {
        eprintln!("weld: {e:#}");
        return ExitCode::FAILURE;
    }

    let verbose = cli.global.is_verbose();
    let color = !cli.global.no_color && std::io::stderr().is_terminal();
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => return report_failure(CliError::from(e), verbose, color),
    };
    let color = color && !config.output.no_color;
    let output = OutputManager::new(&cli.global, &config);

    match dispatch(cli.command, config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(e, verbose, color),
    }
}

/// `--help` and `--version` are printed to stdout and succeed; real parse
/// errors go to stderr.
fn clap_exit(err: &clap::Error) -> ExitCode {
    let _ = err.print();
    if err.use_stderr() {
        ExitCode::from(USAGE_EXIT)
    } else {
        ExitCode::SUCCESS
    }
}

#[instrument(skip_all)]
fn dispatch(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    debug!(?command, "dispatching");
    match command {
        Commands::Create(args) => commands::create::execute(args, config, output),
        Commands::List(args) => commands::list::execute(args, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Log the failure, render it on stderr and pick the exit code.
///
/// `color` is false when stderr is not a terminal or color was turned off
/// by flag, `NO_COLOR` or the config file.
fn report_failure(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();

    let rendered = if color {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{rendered}");

    ExitCode::from(err.exit_code())
}
