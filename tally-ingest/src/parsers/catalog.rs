//! Activity catalog loader (JSON array of activity type descriptors).

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tally_core::{ActivityCatalog, ActivityType};

pub fn parse_catalog_json(text: &str) -> Result<ActivityCatalog> {
    let types: Vec<ActivityType> =
        serde_json::from_str(text).context("parse activity types")?;

    let mut seen = HashSet::new();
    for t in &types {
        if !seen.insert(t.id.as_str()) {
            bail!("duplicate activity type id: {}", t.id);
        }
    }

    Ok(types.into_iter().collect())
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<ActivityCatalog> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_catalog_json(&text).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": "water", "name": "Water", "valueShape": {"kind": "continuousRange", "min": 0, "input": "increment"}},
        {"id": "mood", "name": "Mood", "valueShape": {"kind": "discreteOptions", "options": [
            {"label": "Bad", "value": 0}, {"label": "Good", "value": 2}
        ]}, "polarity": "neutral"},
        {"id": "drinks", "name": "Drinks", "valueShape": {"kind": "fixedAmount", "amount": 1}, "polarity": "negative"}
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get("mood").unwrap().is_discrete());
        assert!(catalog.get("water").unwrap().value_shape.is_increment());
    }

    #[test]
    fn test_rejects_duplicates_and_unknown_shapes() {
        let dup = r#"[
            {"id": "meds", "name": "A", "valueShape": {"kind": "binaryToggle"}},
            {"id": "meds", "name": "B", "valueShape": {"kind": "binaryToggle"}}
        ]"#;
        let err = parse_catalog_json(dup).unwrap_err();
        assert!(err.to_string().contains("duplicate"));

        let unknown = r#"[{"id": "x", "name": "X", "valueShape": {"kind": "colourWheel"}}]"#;
        assert!(parse_catalog_json(unknown).is_err());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.json");
        std::fs::write(&path, CATALOG).unwrap();
        assert_eq!(load_catalog(&path).unwrap().len(), 3);
        assert!(load_catalog(dir.path().join("missing.json")).is_err());
    }
}
