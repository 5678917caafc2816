//! Window aggregation: raw statistics over the logged values of one activity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::activity::Polarity;
use crate::goal::Goal;
use crate::log::ActivityLog;
use crate::period::Window;

/// Tolerance for exact-match comparisons on logged values.
pub const VALUE_EPSILON: f64 = 1e-9;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= VALUE_EPSILON
}

/// Raw statistics for one goal's activity inside a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    pub sum: f64,
    pub count: u32,
    pub average: f64,
    pub days_met_target: u32,
    /// Never true for an empty window.
    pub all_days_met: bool,
}

/// Does a single day's value satisfy the goal's target?
///
/// Discrete values are categorical codes, so they only ever match exactly.
/// Continuous values are thresholds whose direction follows the polarity.
pub fn day_matches(value: f64, target: f64, is_discrete: bool, polarity: Polarity) -> bool {
    if is_discrete {
        return approx_eq(value, target);
    }
    match polarity {
        Polarity::Negative => value <= target,
        Polarity::Neutral => approx_eq(value, target),
        Polarity::Positive => value >= target,
    }
}

/// Scan `window` in `log` for the goal's activity.
pub fn aggregate_window(
    window: Window,
    log: &ActivityLog,
    goal: &Goal,
    is_discrete: bool,
    polarity: Polarity,
) -> WindowStats {
    aggregate_values(
        log.values_between(window, &goal.activity_type_id),
        goal.target_value,
        is_discrete,
        polarity,
    )
}

fn aggregate_values(
    values: impl IntoIterator<Item = (NaiveDate, f64)>,
    target: f64,
    is_discrete: bool,
    polarity: Polarity,
) -> WindowStats {
    let mut stats = WindowStats::default();

    for (_, value) in values {
        stats.sum += value;
        stats.count += 1;
        if day_matches(value, target, is_discrete, polarity) {
            stats.days_met_target += 1;
        }
    }

    stats.average = if stats.count > 0 {
        stats.sum / f64::from(stats.count)
    } else {
        0.0
    };
    stats.all_days_met = stats.count > 0 && stats.days_met_target == stats.count;
    stats
}
