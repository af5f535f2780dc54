//! Configuration file and `config` subcommand
//!
//! Lookup order for every setting: command-line flag, environment
//! (`USERSVC_BIND`, `DATABASE_URL`), `~/.usersvc/config.toml`, built-in default.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use usersvc_server::db::DEFAULT_MAX_CONNECTIONS;
use usersvc_server::ServerConfig;

/// Default database location, relative to the working directory
pub const DEFAULT_DATABASE_URL: &str = "sqlite://user_service.db";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersvcConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for ServerSection {
    fn default() -> Self {
        let server = ServerConfig::default();
        Self {
            bind: server.bind_addr,
            cors_permissive: server.cors_permissive,
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl UsersvcConfig {
    /// Default config file path: ~/.usersvc/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".usersvc/config.toml")
    }

    /// Load config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))
    }

    /// Write config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(path, toml_str)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with default values
    Init(InitArgs),
    /// Print the effective configuration as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, path: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args, path),
        ConfigCommands::Show => run_show(path),
        ConfigCommands::Path => run_path(path),
    }
}

fn run_init(args: InitArgs, path: &Path) -> Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!(
            "Config already exists at {}\n\nUse --force to overwrite",
            path.display()
        );
    }

    UsersvcConfig::default().save_to(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn run_show(path: &Path) -> Result<()> {
    let config = UsersvcConfig::load_from(path)?;
    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    println!("{}", toml_str);
    Ok(())
}

fn run_path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    Ok(())
}
