//! Goal definitions: which activity, what threshold, over which window, and
//! how the window's entries are aggregated.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date window a goal is evaluated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateWindowKind {
    Daily,
    Weekly,
    Monthly,
    ByDate,
    DateRange,
}

impl DateWindowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateWindowKind::Daily => "daily",
            DateWindowKind::Weekly => "weekly",
            DateWindowKind::Monthly => "monthly",
            DateWindowKind::ByDate => "byDate",
            DateWindowKind::DateRange => "dateRange",
        }
    }
}

impl FromStr for DateWindowKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim() {
            "daily" => DateWindowKind::Daily,
            "weekly" => DateWindowKind::Weekly,
            "monthly" => DateWindowKind::Monthly,
            "byDate" => DateWindowKind::ByDate,
            "dateRange" => DateWindowKind::DateRange,
            other => bail!("unknown date window kind: {other}"),
        })
    }
}

impl fmt::Display for DateWindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation policy for a goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackingKind {
    Average,
    #[default]
    Sum,
    /// Every logged day must match the target.
    Absolute,
    /// Number of occurrences; only meaningful for fixed-amount activities.
    Count,
}

impl TrackingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingKind::Average => "average",
            TrackingKind::Sum => "sum",
            TrackingKind::Absolute => "absolute",
            TrackingKind::Count => "count",
        }
    }
}

impl FromStr for TrackingKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim() {
            "average" => TrackingKind::Average,
            "sum" => TrackingKind::Sum,
            "absolute" => TrackingKind::Absolute,
            "count" => TrackingKind::Count,
            other => bail!("unknown tracking kind: {other}"),
        })
    }
}

impl fmt::Display for TrackingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user goal against one activity.
///
/// The window-specific dates are optional on the record itself: a goal whose
/// required dates are missing still evaluates (to a zeroed result), and
/// [`Goal::validate`] is the place to reject it at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub activity_type_id: String,
    pub target_value: f64,
    #[serde(rename = "dateWindowKind")]
    pub window: DateWindowKind,
    #[serde(rename = "trackingKind")]
    pub tracking: TrackingKind,
    pub created_at: NaiveDate,
    /// Required for `byDate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    /// Required for `dateRange`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Goal {
    pub fn new(
        id: impl Into<String>,
        activity_type_id: impl Into<String>,
        target_value: f64,
        window: DateWindowKind,
        tracking: TrackingKind,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            activity_type_id: activity_type_id.into(),
            target_value,
            window,
            tracking,
            created_at,
            target_date: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }

    pub fn with_range(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }

    /// Creation-time checks. The engine assumes these hold but never calls this.
    pub fn validate(&self) -> Result<()> {
        if self.target_value.is_nan() || self.target_value < 0.0 {
            bail!(
                "goal {}: target value must be >= 0 (got {})",
                self.id,
                self.target_value
            );
        }

        match self.window {
            DateWindowKind::ByDate if self.target_date.is_none() => {
                bail!("goal {}: byDate window requires targetDate", self.id)
            }
            DateWindowKind::DateRange => match (self.start_date, self.end_date) {
                (Some(start), Some(end)) if start > end => bail!(
                    "goal {}: dateRange startDate {start} is after endDate {end}",
                    self.id
                ),
                (Some(_), Some(_)) => {}
                _ => bail!(
                    "goal {}: dateRange window requires startDate and endDate",
                    self.id
                ),
            },
            _ => {}
        }

        Ok(())
    }
}
