use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_tally_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub clock: ClockSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Input files; relative paths resolve under `~/.tally`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSection {
    pub catalog: String,
    pub goals: String,
    pub log: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSection {
    /// IANA timezone used to derive "today" when `--today` is not given.
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default filter when neither `--log-level` nor `RUST_LOG` is set.
    pub level: String,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            catalog: "activities.json".to_string(),
            goals: "goals.json".to_string(),
            log: "log.csv".to_string(),
        }
    }
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
