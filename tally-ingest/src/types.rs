use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_core::{ActivityCatalog, ActivityLog, Goal};

/// One row of an activity log export: `date,activity_type_id,value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRow {
    pub date: NaiveDate,
    pub activity_type_id: String,
    pub value: f64,
}

/// Everything the engine reads, loaded once and handed over read-only.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub catalog: ActivityCatalog,
    pub goals: Vec<Goal>,
    pub log: ActivityLog,
}

impl Snapshot {
    /// Goals whose activity type is missing from the catalog.
    pub fn orphaned_goals(&self) -> impl Iterator<Item = &Goal> {
        self.goals
            .iter()
            .filter(|g| self.catalog.get(&g.activity_type_id).is_none())
    }
}
