//! Server configuration
//!
//! Values are layered, lowest precedence first: built-in defaults, an
//! optional YAML file, then command-line flags. `--listen` falls back to the
//! `LISTEN` environment variable when the flag is absent. The result is
//! immutable for the life of the process.

use anyhow::{bail, Context};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";
pub const LISTEN_ENV: &str = "LISTEN";

/// Command-line flags
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "relay-http", about = "Minimal HTTP/1.1 server with static file support")]
pub struct Cli {
    /// Directory that /files/ requests read from and write to
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = LISTEN_ENV)]
    pub listen: Option<String>,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub directory: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Builds the configuration from the optional config file and `cli`.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Ok(base.with_overrides(cli))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Applies every flag (or `LISTEN` fallback) that was given.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(addr) = &cli.listen {
            self.listen_addr = addr.clone();
        }
        if let Some(dir) = &cli.directory {
            self.directory = Some(dir.clone());
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        self
    }

    /// Checks that a configured directory exists and is a directory.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.log_level()?;

        if let Some(dir) = &self.directory {
            let meta = std::fs::metadata(dir)
                .with_context(|| format!("directory {} is not accessible", dir.display()))?;
            if !meta.is_dir() {
                bail!("{} is not a directory", dir.display());
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> anyhow::Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown log level {:?}", self.log_level))
    }
}
