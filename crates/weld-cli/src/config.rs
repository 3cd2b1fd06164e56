//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the resolved
//! [`StoreLayout`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `WELD_STORE__PLUGINS_DIR`, `WELD_DEFAULTS__API`, ...
//! 3. Config file: `--config FILE`, else the platform config dir's `config.toml`
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::debug;
use weld_core::application::StoreLayout;

use crate::cli::StoreArgs;

const ENV_PREFIX: &str = "WELD";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where plugins and templates live.
    pub store: StoreConfig,
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub plugins_dir: PathBuf,
    pub templates_dir: PathBuf,
    /// Store package identifier shown in the `create` summary.
    pub name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            plugins_dir: PathBuf::from("plugins"),
            templates_dir: PathBuf::from("templates"),
            name: "@next-boilerplate/store".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// API style used when `--api` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from file and environment on top of the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "loading configuration");

        config::Config::builder()
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(config::Config::try_deserialize)
            .with_context(|| format!("invalid configuration ({})", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.weld.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "weld", "weld")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".weld.toml"))
    }

    /// Store directories with per-command flags applied.
    pub fn store_layout(&self, overrides: &StoreArgs) -> StoreLayout {
        StoreLayout::new(
            pick(overrides.plugins_dir.as_deref(), &self.store.plugins_dir),
            pick(overrides.templates_dir.as_deref(), &self.store.templates_dir),
        )
    }

    /// Effective configuration rendered as TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to render configuration")
    }
}

fn pick(flag: Option<&Path>, configured: &Path) -> PathBuf {
    flag.unwrap_or(configured).to_path_buf()
}
