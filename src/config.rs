use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";

/// Server configuration, fixed at startup and passed to the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: String,
    /// Served directory; `None` makes every file endpoint answer 404.
    pub directory: Option<PathBuf>,
}

/// Optional keys accepted in a YAML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub listen_addr: Option<String>,
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(name = "tinyhttp", about = "Minimal HTTP/1.1 file and echo server")]
pub struct Args {
    /// Directory served by /files/{name}
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    pub listen: Option<String>,

    /// YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Defaults overridden by the `LISTEN` and `DIRECTORY` environment variables.
    pub fn load() -> Self {
        let listen_addr =
            std::env::var("LISTEN")
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let directory = std::env::var_os("DIRECTORY")
            .filter(|d| !d.is_empty())
            .map(PathBuf::from);
        Self { listen_addr, directory }
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_file(parse_file(yaml)?);
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_file(read_file(path)?);
        Ok(cfg)
    }

    /// Flags win over the config file, which wins over the environment.
    pub fn resolve(args: Args) -> anyhow::Result<Self> {
        let mut cfg = Self::load();

        if let Some(path) = &args.config {
            cfg.apply_file(read_file(path)?);
        }
        if let Some(listen) = args.listen {
            cfg.listen_addr = listen;
        }
        if let Some(dir) = args.directory {
            cfg.directory = Some(dir);
        }

        Ok(cfg)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(listen) = file.listen_addr {
            self.listen_addr = listen;
        }
        if let Some(dir) = file.directory {
            self.directory = Some(dir);
        }
    }
}

fn read_file(path: &Path) -> anyhow::Result<ConfigFile> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_file(&yaml)
}

fn parse_file(yaml: &str) -> anyhow::Result<ConfigFile> {
    // An empty document deserializes as unit, not as a map.
    if yaml.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(yaml).context("Invalid config file")
}
