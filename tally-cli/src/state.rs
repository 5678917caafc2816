use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn tally_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tally"))
}

pub fn ensure_tally_home() -> Result<PathBuf> {
    let dir = tally_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Relative data paths in the config live under `~/.tally`.
pub fn resolve_data_path(home: &Path, configured: &str) -> PathBuf {
    let p = PathBuf::from(configured);
    if p.is_absolute() { p } else { home.join(p) }
}
