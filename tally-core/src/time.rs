//! Time utilities: turning a wall-clock instant into the reference date the
//! engine is evaluated for. The engine never calls these itself.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Calendar day of `now` in an IANA timezone like "America/Chicago".
pub fn local_date(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Parse an ISO calendar day ("2026-03-04").
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid date '{s}': {e}"))
}
