//! tally-ingest: loaders for the activity catalog, goal definitions, and
//! activity log exports the engine evaluates.

pub mod parsers;
pub mod types;

pub use parsers::activity_log_csv::{load_activity_log, parse_activity_log_csv};
pub use parsers::catalog::{load_catalog, parse_catalog_json};
pub use parsers::goals::{load_goals, parse_goals_json};
pub use types::{LogRow, Snapshot};

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

/// Load all three inputs into one read-only snapshot.
pub fn load_snapshot(
    catalog_path: impl AsRef<Path>,
    goals_path: impl AsRef<Path>,
    log_path: impl AsRef<Path>,
) -> Result<Snapshot> {
    let snapshot = Snapshot {
        catalog: load_catalog(catalog_path)?,
        goals: load_goals(goals_path)?,
        log: load_activity_log(log_path)?,
    };

    for goal in snapshot.orphaned_goals() {
        warn!(
            goal_id = %goal.id,
            activity_type_id = %goal.activity_type_id,
            "goal references an activity type that is not in the catalog"
        );
    }

    info!(
        activity_types = snapshot.catalog.len(),
        goals = snapshot.goals.len(),
        logged_days = snapshot.log.day_count(),
        "loaded snapshot"
    );

    Ok(snapshot)
}
