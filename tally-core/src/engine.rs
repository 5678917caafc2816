//! Goal progress evaluation: the three entry points presentation code calls,
//! plus a bundled assessment over a set of goals.
//!
//! Everything here is a deterministic function of its arguments. The caller
//! supplies a consistent log snapshot and the reference date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::{ActivityCatalog, ActivityType};
use crate::aggregate::aggregate_window;
use crate::goal::{DateWindowKind, Goal, TrackingKind};
use crate::log::ActivityLog;
use crate::period::{self, resolve_window};
use crate::select::{result_from_stats, select_daily_value, EffectiveValueResult};
use crate::status::{classify, GoalStatus, StatusInputs};
use crate::tracking::effective_tracking;

/// Compute a goal's effective value as of `today`.
///
/// A missing descriptor or an unresolvable window is "data not ready", not an
/// error: the result is zeroed.
pub fn evaluate(
    goal: &Goal,
    activity_type: Option<&ActivityType>,
    log: &ActivityLog,
    today: NaiveDate,
) -> EffectiveValueResult {
    let Some(activity) = activity_type else {
        debug!(
            goal_id = %goal.id,
            activity_type_id = %goal.activity_type_id,
            "activity type not loaded; zeroed result"
        );
        return EffectiveValueResult::zeroed();
    };

    let tracking = effective_tracking(goal.tracking, &activity.value_shape);

    let Some(window) = resolve_window(goal, today) else {
        debug!(
            goal_id = %goal.id,
            window = %goal.window,
            "window not applicable; zeroed result"
        );
        return EffectiveValueResult {
            tracking,
            ..EffectiveValueResult::zeroed()
        };
    };

    let is_discrete = activity.is_discrete();

    if goal.window == DateWindowKind::Daily {
        return select_daily_value(
            log.value_on(today, &goal.activity_type_id),
            goal.target_value,
            tracking,
            is_discrete,
            activity.polarity,
            window,
        );
    }

    let stats = aggregate_window(window, log, goal, is_discrete, activity.polarity);
    result_from_stats(&stats, tracking, &activity.value_shape, window)
}

/// Classify an evaluated goal as met, missed, ahead, on pace, or behind.
pub fn classify_status(
    goal: &Goal,
    activity_type: &ActivityType,
    result: &EffectiveValueResult,
    today: NaiveDate,
) -> GoalStatus {
    // Re-derived rather than read from `result` so a zeroed result still
    // classifies under the activity's real policy.
    let tracking = effective_tracking(goal.tracking, &activity_type.value_shape);

    classify(&StatusInputs {
        effective_value: result.effective_value,
        target: goal.target_value,
        polarity: activity_type.polarity,
        tracking,
        is_discrete: activity_type.is_discrete(),
        all_days_met: result.all_days_met,
        days_met_target: result.days_met_target,
        day_count: result.day_count,
        elapsed_fraction: period::elapsed_fraction(goal, today),
        elapsed_days: period::elapsed_days(goal, today),
        window_expired: period::window_expired(goal, today),
        same_day: goal.window == DateWindowKind::Daily,
    })
}

/// Days until the goal's next evaluation boundary.
pub fn days_remaining(goal: &Goal, today: NaiveDate) -> Option<i64> {
    period::days_remaining(goal, today)
}

/// Fill level `[0, 1]` for a progress bar. For budget goals this is the share
/// of the budget used; for discrete day-matching goals the share of logged
/// days that matched.
pub fn progress_fraction(goal: &Goal, activity_type: &ActivityType, result: &EffectiveValueResult) -> f64 {
    let day_matching = activity_type.is_discrete()
        && matches!(result.tracking, TrackingKind::Average | TrackingKind::Absolute);
    if day_matching {
        return result.match_ratio();
    }
    if goal.target_value > 0.0 {
        (result.effective_value / goal.target_value).clamp(0.0, 1.0)
    } else if result.effective_value >= goal.target_value {
        1.0
    } else {
        0.0
    }
}

/// One goal's evaluation, status, and remaining days, as shown on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalAssessment {
    pub goal_id: String,
    pub result: EffectiveValueResult,
    /// `None` when the activity type is not loaded or the window is not
    /// applicable.
    pub status: Option<GoalStatus>,
    pub days_remaining: Option<i64>,
    pub progress: f64,
}

pub fn assess(
    goal: &Goal,
    catalog: &ActivityCatalog,
    log: &ActivityLog,
    today: NaiveDate,
) -> GoalAssessment {
    let activity = catalog.get(&goal.activity_type_id);
    let result = evaluate(goal, activity, log, today);

    let (status, progress) = match activity {
        Some(activity) if result.window.is_some() => (
            Some(classify_status(goal, activity, &result, today)),
            progress_fraction(goal, activity, &result),
        ),
        _ => (None, 0.0),
    };

    GoalAssessment {
        goal_id: goal.id.clone(),
        result,
        status,
        days_remaining: days_remaining(goal, today),
        progress,
    }
}

pub fn assess_all(
    goals: &[Goal],
    catalog: &ActivityCatalog,
    log: &ActivityLog,
    today: NaiveDate,
) -> Vec<GoalAssessment> {
    goals
        .iter()
        .map(|goal| assess(goal, catalog, log, today))
        .collect()
}

/// Status counts across a set of goals; the aggregate check-ins read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub met: usize,
    pub missed: usize,
    pub ahead: usize,
    pub on_pace: usize,
    pub behind: usize,
    /// Goals that could not be classified yet.
    pub pending: usize,
}

impl StatusSummary {
    pub fn from_assessments(assessments: &[GoalAssessment]) -> Self {
        let mut summary = Self::default();
        for a in assessments {
            match a.status {
                Some(GoalStatus::Met) => summary.met += 1,
                Some(GoalStatus::Missed) => summary.missed += 1,
                Some(GoalStatus::Ahead) => summary.ahead += 1,
                Some(GoalStatus::OnPace) => summary.on_pace += 1,
                Some(GoalStatus::Behind) => summary.behind += 1,
                None => summary.pending += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.met + self.missed + self.ahead + self.on_pace + self.behind + self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{InputStyle, Polarity, ValueShape};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn water() -> ActivityType {
        ActivityType::new(
            "water",
            "Water",
            ValueShape::ContinuousRange {
                min: 0.0,
                max: None,
                step: 1.0,
                input: InputStyle::Increment,
            },
        )
    }

    fn sleep() -> ActivityType {
        ActivityType::new(
            "sleep",
            "Sleep hours",
            ValueShape::ContinuousRange {
                min: 0.0,
                max: Some(12.0),
                step: 0.5,
                input: InputStyle::Slider,
            },
        )
    }

    #[test]
    fn test_missing_descriptor_is_zeroed() {
        let goal = Goal::new("g", "water", 8.0, DateWindowKind::Weekly, TrackingKind::Sum, d(1));
        let log = ActivityLog::new().with_entry(d(2), "water", 3.0);
        let result = evaluate(&goal, None, &log, d(4));
        assert_eq!(result, EffectiveValueResult::zeroed());
    }

    #[test]
    fn test_not_applicable_window_is_zeroed() {
        let goal = Goal::new("g", "water", 8.0, DateWindowKind::ByDate, TrackingKind::Sum, d(1));
        let log = ActivityLog::new().with_entry(d(2), "water", 3.0);
        let result = evaluate(&goal, Some(&water()), &log, d(4));
        assert_eq!(result.effective_value, 0.0);
        assert_eq!(result.day_count, 0);
        assert_eq!(result.window, None);
        assert_eq!(days_remaining(&goal, d(4)), None);
    }

    #[test]
    fn test_increment_average_goal_tracks_sum() {
        let goal = Goal::new("g", "water", 20.0, DateWindowKind::Weekly, TrackingKind::Average, d(1));
        let log = ActivityLog::new()
            .with_entry(d(2), "water", 3.0)
            .with_entry(d(3), "water", 5.0);
        let result = evaluate(&goal, Some(&water()), &log, d(4));
        assert_eq!(result.tracking, TrackingKind::Sum);
        assert_eq!(result.effective_value, 8.0);
    }

    #[test]
    fn test_slider_average_goal() {
        let goal = Goal::new("g", "sleep", 7.0, DateWindowKind::Weekly, TrackingKind::Average, d(1));
        let log = ActivityLog::new()
            .with_entry(d(2), "sleep", 6.0)
            .with_entry(d(3), "sleep", 8.5);
        let result = evaluate(&goal, Some(&sleep()), &log, d(4));
        assert_eq!(result.effective_value, 7.25);
        assert_eq!(classify_status(&goal, &sleep(), &result, d(4)), GoalStatus::Met);
    }

    #[test]
    fn test_progress_fraction() {
        let goal = Goal::new("g", "water", 8.0, DateWindowKind::Weekly, TrackingKind::Sum, d(1));
        let log = ActivityLog::new().with_entry(d(2), "water", 6.0);
        let result = evaluate(&goal, Some(&water()), &log, d(4));
        assert_eq!(progress_fraction(&goal, &water(), &result), 0.75);

        let over = ActivityLog::new().with_entry(d(2), "water", 12.0);
        let result = evaluate(&goal, Some(&water()), &over, d(4));
        assert_eq!(progress_fraction(&goal, &water(), &result), 1.0);
    }

    #[test]
    fn test_assess_all_and_summary() {
        let catalog: ActivityCatalog = [water(), sleep().with_polarity(Polarity::Positive)]
            .into_iter()
            .collect();
        let goals = vec![
            Goal::new("hydrate", "water", 8.0, DateWindowKind::Weekly, TrackingKind::Sum, d(1)),
            Goal::new("rest", "sleep", 7.0, DateWindowKind::Weekly, TrackingKind::Average, d(1)),
            Goal::new("ghost", "meditation", 10.0, DateWindowKind::Weekly, TrackingKind::Sum, d(1)),
        ];
        let log = ActivityLog::new()
            .with_entry(d(2), "water", 9.0)
            .with_entry(d(2), "sleep", 5.0);

        let assessments = assess_all(&goals, &catalog, &log, d(4));
        assert_eq!(assessments.len(), 3);
        assert_eq!(assessments[0].status, Some(GoalStatus::Met));
        assert_eq!(assessments[1].status, Some(GoalStatus::Behind));
        assert_eq!(assessments[2].status, None);
        assert_eq!(assessments[2].days_remaining, Some(4));

        let summary = StatusSummary::from_assessments(&assessments);
        assert_eq!(summary.met, 1);
        assert_eq!(summary.behind, 1);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.total(), 3);
    }
}
