use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};

/// Config file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "xorn.toml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// `tracing` filter directive, e.g. `"warn"` or `"xorn_store=debug"`.
    pub log_filter: String,
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".into(),
            format: OutputFormat::Text,
            color: true,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or from `xorn.toml` if it exists, or fall back to
    /// defaults. An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::read(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Command-line flags take precedence over file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.no_color {
            self.color = false;
        }
        self
    }
}
