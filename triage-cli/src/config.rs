use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use triage_client::{DEFAULT_API_BASE, DEFAULT_STRATEGY};

use crate::output::OutputFormat;
use crate::state::{ensure_triage_home, triage_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    /// Base path the analyze/suggest/health endpoints hang off.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSection {
    /// Strategy label sent with analyze requests (default | fastest | deadline).
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_strategy() -> String {
    DEFAULT_STRATEGY.to_string()
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            format: OutputFormat::Text,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(triage_home()?.join("config.toml"))
}

/// Effective config. Reading never creates ~/.triage; without HOME there is no
/// file to read, so the defaults apply.
pub fn load_config() -> Result<Config> {
    load_config_at(config_path().ok().as_deref())
}

pub fn load_config_at(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config_from(p),
        None => {
            tracing::debug!("HOME is not set; using default config");
            Ok(Config::default())
        }
    }
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_triage_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config(cfg: &Config) -> Result<()> {
    print!("{}", toml::to_string_pretty(cfg).context("serialize config")?);
    Ok(())
}
