//! Goal definitions loader (JSON array of goal records).
//!
//! Unknown window or tracking kinds are rejected here, and every goal is
//! validated, so the engine only ever sees well-formed records from files.

use anyhow::{Context, Result};
use std::path::Path;
use tally_core::Goal;

pub fn parse_goals_json(text: &str) -> Result<Vec<Goal>> {
    let goals: Vec<Goal> = serde_json::from_str(text).context("parse goals")?;
    for goal in &goals {
        goal.validate()?;
    }
    Ok(goals)
}

pub fn load_goals(path: impl AsRef<Path>) -> Result<Vec<Goal>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_goals_json(&text).with_context(|| format!("parsing {}", path.display()))
}
