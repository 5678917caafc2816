//! Activity log CSV export parser.
//!
//! Expected header:
//!   date,activity_type_id,value
//!   2026-03-02,water,3

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;
use tally_core::ActivityLog;
use tracing::warn;

use crate::types::LogRow;

/// Parse log rows from any reader. Bad rows, including NaN or infinite
/// values, are errors (with their line number); a repeated (date, activity) pair keeps the last value.
pub fn parse_activity_log_csv<R: Read>(reader: R) -> Result<ActivityLog> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut log = ActivityLog::new();
    for (i, result) in rdr.deserialize::<LogRow>().enumerate() {
        // +2: header line, 1-based lines
        let line = i + 2;
        let row = result.with_context(|| format!("log row at line {line}"))?;
        if !row.value.is_finite() {
            bail!("log row at line {line}: value {} is not a finite number", row.value);
        }
        if log.value_on(row.date, &row.activity_type_id).is_some() {
            warn!(
                date = %row.date,
                activity_type_id = %row.activity_type_id,
                "duplicate log entry; keeping the later value"
            );
        }
        log.insert(row.date, row.activity_type_id, row.value);
    }

    Ok(log)
}

pub fn load_activity_log(path: impl AsRef<Path>) -> Result<ActivityLog> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_activity_log_csv(file).with_context(|| format!("parsing {}", path.display()))
}
