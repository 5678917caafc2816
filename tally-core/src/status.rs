//! Status classification: met / missed first, then pace for open goals.
//!
//! Status is a pure function of the current data. Nothing is remembered
//! between queries; a goal is re-classified from scratch on every read.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::activity::Polarity;
use crate::aggregate::approx_eq;
use crate::goal::TrackingKind;

/// Cumulative goals: ahead above 110% of the pro-rated requirement.
pub const PACE_AHEAD_RATIO: f64 = 1.10;
/// Cumulative goals: behind below 85% of the pro-rated requirement.
pub const PACE_BEHIND_RATIO: f64 = 0.85;
/// Budget goals (negative polarity): ahead below 90% of the pro-rated budget.
pub const BUDGET_AHEAD_RATIO: f64 = 0.90;
/// Budget goals (negative polarity): behind above 110% of the pro-rated budget.
pub const BUDGET_BEHIND_RATIO: f64 = 1.10;
/// Average goals are compared flat against the target within a 5% band.
pub const AVERAGE_AHEAD_RATIO: f64 = 1.05;
pub const AVERAGE_BEHIND_RATIO: f64 = 0.95;
/// Discrete ratio goals are met when more than half the logged days matched.
pub const MAJORITY_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalStatus {
    Met,
    Missed,
    Ahead,
    OnPace,
    Behind,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Met => "met",
            GoalStatus::Missed => "missed",
            GoalStatus::Ahead => "ahead",
            GoalStatus::OnPace => "onPace",
            GoalStatus::Behind => "behind",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True on the read where a goal first becomes met. An external job uses this
/// to write achievement records; the engine itself stores nothing.
pub fn newly_met(previous: Option<GoalStatus>, current: GoalStatus) -> bool {
    current == GoalStatus::Met && previous != Some(GoalStatus::Met)
}

/// Everything the classifier looks at, already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusInputs {
    pub effective_value: f64,
    pub target: f64,
    pub polarity: Polarity,
    /// Aggregation after tracking overrides.
    pub tracking: TrackingKind,
    pub is_discrete: bool,
    pub all_days_met: bool,
    pub days_met_target: u32,
    pub day_count: u32,
    /// How far through the natural period `today` is, `[0, 1]`.
    pub elapsed_fraction: f64,
    /// Whole days of the natural period counted toward pace.
    pub elapsed_days: i64,
    /// `today` is past the window's natural end.
    pub window_expired: bool,
    /// Daily goals are judged on the day itself.
    pub same_day: bool,
}

pub fn classify(inputs: &StatusInputs) -> GoalStatus {
    let (met, failed) = settle(inputs);
    if met {
        GoalStatus::Met
    } else if failed {
        GoalStatus::Missed
    } else {
        pace(inputs)
    }
}

/// Returns `(met, failed)`; both false means the goal is still open.
fn settle(i: &StatusInputs) -> (bool, bool) {
    let value = i.effective_value;
    let logged = i.day_count > 0;

    let (met, failed) = if i.tracking == TrackingKind::Count {
        (value >= i.target, false)
    } else if i.is_discrete && (i.tracking == TrackingKind::Absolute || i.same_day) {
        (i.all_days_met && logged, !i.all_days_met && logged)
    } else if i.is_discrete && i.tracking == TrackingKind::Average {
        (value > MAJORITY_RATIO && logged, false)
    } else {
        match i.polarity {
            // A budget can still be blown until the window closes, so it is
            // never met early; going over is final.
            Polarity::Negative if i.window_expired || i.same_day => {
                (value <= i.target, value > i.target)
            }
            Polarity::Negative => (false, value > i.target),
            Polarity::Positive => (value >= i.target, false),
            Polarity::Neutral => (approx_eq(value, i.target), false),
        }
    };

    (met, failed || (i.window_expired && !met))
}

fn pace(i: &StatusInputs) -> GoalStatus {
    match i.tracking {
        TrackingKind::Sum | TrackingKind::Count => {
            prorated_pace(i.effective_value, i.target * i.elapsed_fraction, i.polarity)
        }
        // Discrete ratios have no partial-credit pace rule.
        TrackingKind::Average if i.is_discrete => GoalStatus::OnPace,
        TrackingKind::Average => flat_pace(i.effective_value, i.target, i.polarity),
        TrackingKind::Absolute => {
            if i64::from(i.days_met_target) < i.elapsed_days {
                GoalStatus::Behind
            } else {
                GoalStatus::OnPace
            }
        }
    }
}

/// Cumulative pace against the share of the target due by now.
fn prorated_pace(value: f64, required_by_now: f64, polarity: Polarity) -> GoalStatus {
    match polarity {
        Polarity::Positive if value > required_by_now * PACE_AHEAD_RATIO => GoalStatus::Ahead,
        Polarity::Positive if value < required_by_now * PACE_BEHIND_RATIO => GoalStatus::Behind,
        Polarity::Negative if value < required_by_now * BUDGET_AHEAD_RATIO => GoalStatus::Ahead,
        Polarity::Negative if value > required_by_now * BUDGET_BEHIND_RATIO => GoalStatus::Behind,
        // TODO: neutral goals have no pace rule; decide whether distance from
        // the pro-rated target should mark them ahead or behind.
        _ => GoalStatus::OnPace,
    }
}

/// Averages are not cumulative, so they are compared with the target as is.
fn flat_pace(value: f64, target: f64, polarity: Polarity) -> GoalStatus {
    match polarity {
        Polarity::Positive if value > target * AVERAGE_AHEAD_RATIO => GoalStatus::Ahead,
        Polarity::Positive if value < target * AVERAGE_BEHIND_RATIO => GoalStatus::Behind,
        Polarity::Negative if value < target * AVERAGE_BEHIND_RATIO => GoalStatus::Ahead,
        Polarity::Negative if value > target * AVERAGE_AHEAD_RATIO => GoalStatus::Behind,
        _ => GoalStatus::OnPace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(value: f64, target: f64, polarity: Polarity, tracking: TrackingKind) -> StatusInputs {
        StatusInputs {
            effective_value: value,
            target,
            polarity,
            tracking,
            is_discrete: false,
            all_days_met: false,
            days_met_target: 0,
            day_count: 3,
            elapsed_fraction: 0.5,
            elapsed_days: 3,
            window_expired: false,
            same_day: false,
        }
    }

    #[test]
    fn test_positive_met_as_soon_as_reached() {
        let i = open(10.0, 10.0, Polarity::Positive, TrackingKind::Sum);
        assert_eq!(classify(&i), GoalStatus::Met);
    }

    #[test]
    fn test_sum_pace_bands() {
        // required by now = 5
        assert_eq!(classify(&open(5.6, 10.0, Polarity::Positive, TrackingKind::Sum)), GoalStatus::Ahead);
        assert_eq!(classify(&open(5.5, 10.0, Polarity::Positive, TrackingKind::Sum)), GoalStatus::OnPace);
        assert_eq!(classify(&open(4.25, 10.0, Polarity::Positive, TrackingKind::Sum)), GoalStatus::OnPace);
        assert_eq!(classify(&open(4.2, 10.0, Polarity::Positive, TrackingKind::Sum)), GoalStatus::Behind);
    }

    #[test]
    fn test_budget_pace_bands() {
        // pro-rated budget = 5
        assert_eq!(classify(&open(4.4, 10.0, Polarity::Negative, TrackingKind::Sum)), GoalStatus::Ahead);
        assert_eq!(classify(&open(5.0, 10.0, Polarity::Negative, TrackingKind::Sum)), GoalStatus::OnPace);
        assert_eq!(classify(&open(5.6, 10.0, Polarity::Negative, TrackingKind::Sum)), GoalStatus::Behind);
    }

    #[test]
    fn test_negative_never_met_before_expiry() {
        let under = open(0.0, 10.0, Polarity::Negative, TrackingKind::Sum);
        assert_ne!(classify(&under), GoalStatus::Met);

        let over = open(11.0, 10.0, Polarity::Negative, TrackingKind::Sum);
        assert_eq!(classify(&over), GoalStatus::Missed);

        let closed = StatusInputs { window_expired: true, ..under };
        assert_eq!(classify(&closed), GoalStatus::Met);
    }

    #[test]
    fn test_negative_daily_settles_same_day() {
        let i = StatusInputs {
            same_day: true,
            ..open(1.0, 2.0, Polarity::Negative, TrackingKind::Sum)
        };
        assert_eq!(classify(&i), GoalStatus::Met);
    }

    #[test]
    fn test_average_pace_is_flat() {
        let mut i = open(7.4, 7.0, Polarity::Positive, TrackingKind::Average);
        i.elapsed_fraction = 0.1;
        // met: average already at target
        assert_eq!(classify(&i), GoalStatus::Met);
        i.effective_value = 6.7;
        assert_eq!(classify(&i), GoalStatus::OnPace);
        i.effective_value = 6.6;
        assert_eq!(classify(&i), GoalStatus::Behind);

        let budget = open(6.0, 7.0, Polarity::Negative, TrackingKind::Average);
        assert_eq!(classify(&budget), GoalStatus::Ahead);
    }

    #[test]
    fn test_discrete_absolute() {
        let mut i = open(10.0, 1.0, Polarity::Positive, TrackingKind::Absolute);
        i.is_discrete = true;
        i.days_met_target = 10;
        i.day_count = 10;
        i.all_days_met = true;
        assert_eq!(classify(&i), GoalStatus::Met);

        i.days_met_target = 9;
        i.effective_value = 9.0;
        i.all_days_met = false;
        assert_eq!(classify(&i), GoalStatus::Missed);

        let empty = StatusInputs { day_count: 0, days_met_target: 0, effective_value: 0.0, ..i };
        assert_eq!(classify(&empty), GoalStatus::Behind);
        let fresh = StatusInputs { elapsed_days: 0, ..empty };
        assert_eq!(classify(&fresh), GoalStatus::OnPace);
    }

    #[test]
    fn test_discrete_majority() {
        let mut i = open(0.6, 2.0, Polarity::Positive, TrackingKind::Average);
        i.is_discrete = true;
        assert_eq!(classify(&i), GoalStatus::Met);
        i.effective_value = 0.5;
        assert_eq!(classify(&i), GoalStatus::OnPace);
        i.window_expired = true;
        assert_eq!(classify(&i), GoalStatus::Missed);
    }

    #[test]
    fn test_count_uses_occurrences() {
        let mut i = open(3.0, 3.0, Polarity::Positive, TrackingKind::Count);
        assert_eq!(classify(&i), GoalStatus::Met);
        i.effective_value = 1.0;
        // required by now = 1.5
        assert_eq!(classify(&i), GoalStatus::Behind);
        i.window_expired = true;
        assert_eq!(classify(&i), GoalStatus::Missed);
    }

    #[test]
    fn test_neutral_stays_on_pace() {
        let i = open(1.0, 10.0, Polarity::Neutral, TrackingKind::Sum);
        assert_eq!(classify(&i), GoalStatus::OnPace);
        let exact = open(10.0, 10.0, Polarity::Neutral, TrackingKind::Sum);
        assert_eq!(classify(&exact), GoalStatus::Met);
    }

    #[test]
    fn test_expired_catch_all() {
        let i = StatusInputs {
            window_expired: true,
            ..open(150.0, 300.0, Polarity::Positive, TrackingKind::Sum)
        };
        assert_eq!(classify(&i), GoalStatus::Missed);
    }

    #[test]
    fn test_newly_met() {
        assert!(newly_met(None, GoalStatus::Met));
        assert!(newly_met(Some(GoalStatus::Ahead), GoalStatus::Met));
        assert!(!newly_met(Some(GoalStatus::Met), GoalStatus::Met));
        assert!(!newly_met(None, GoalStatus::Behind));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&GoalStatus::OnPace).unwrap(), "\"onPace\"");
        assert_eq!(GoalStatus::Missed.to_string(), "missed");
    }
}
