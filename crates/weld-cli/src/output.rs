//! Everything weld prints on stdout.
//!
//! Logs never come through here; they go to stderr via `tracing`. The
//! manager decides once, at construction, whether colors are used and
//! whether chatter is suppressed.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Line kinds that carry a leading marker.
#[derive(Debug, Clone, Copy)]
enum Marker {
    Success,
    Warning,
    Info,
}

impl Marker {
    fn glyph(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    fn palette(self) -> Style {
        match self {
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Info => Style::new().blue(),
        }
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };
        let color = format == OutputFormat::Human && !args.no_color && !config.output.no_color;

        Self {
            format,
            quiet: args.quiet,
            color,
            term: Term::stdout(),
        }
    }

    /// Unstyled line.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(msg.to_owned())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Marker::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Marker::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Marker::Info, msg)
    }

    /// Section title.
    pub fn header(&self, text: &str) -> io::Result<()> {
        let rendered = if self.color {
            text.style(Style::new().cyan().bold()).to_string()
        } else {
            text.to_owned()
        };
        self.line(rendered)
    }

    /// Right-aligned `label: value` pair, as used in summaries.
    pub fn field(&self, label: &str, value: &str) -> io::Result<()> {
        let label = format!("{label:>10}:");
        let label = if self.color {
            label.dimmed().to_string()
        } else {
            label
        };
        self.line(format!("{label} {value}"))
    }

    /// `  - text`
    pub fn item(&self, text: &str) -> io::Result<()> {
        self.line(format!("  - {text}"))
    }

    /// A command's result document. Not affected by `--quiet`.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&rendered)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn marked(&self, marker: Marker, msg: &str) -> io::Result<()> {
        let rendered = if self.color {
            format!(
                "{} {}",
                marker.glyph().style(marker.palette().bold()),
                msg.style(marker.palette())
            )
        } else {
            format!("{} {msg}", marker.glyph())
        };
        self.line(rendered)
    }

    fn line(&self, rendered: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(format: OutputFormat, no_color: bool, config: &AppConfig) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, config)
    }

    #[test]
    fn quiet_lines_are_dropped_without_error() {
        let out = manager(OutputFormat::Plain, true, &AppConfig::default());
        assert!(out.print("hello").is_ok());
        assert!(out.field("project", "my-app").is_ok());
        assert!(out.warning("careful").is_ok());
    }

    #[test]
    fn only_human_format_is_colored() {
        let config = AppConfig::default();
        assert!(manager(OutputFormat::Human, false, &config).color);
        assert!(!manager(OutputFormat::Human, true, &config).color);
        assert!(!manager(OutputFormat::Plain, false, &config).color);
        assert!(!manager(OutputFormat::Json, false, &config).color);
    }

    #[test]
    fn config_file_can_turn_color_off() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!manager(OutputFormat::Human, false, &config).color);
    }

    #[test]
    fn explicit_format_is_kept() {
        let out = manager(OutputFormat::Json, false, &AppConfig::default());
        assert!(out.is_json());
        assert_eq!(out.format, OutputFormat::Json);
    }
}
