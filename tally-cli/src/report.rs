//! Plain-text rendering of goal assessments.

use tally_core::{ActivityCatalog, Goal, GoalAssessment, StatusSummary};

pub fn format_assessment(goal: &Goal, catalog: &ActivityCatalog, a: &GoalAssessment) -> String {
    let status = a.status.map_or("pending", |s| s.as_str());
    let activity_type = catalog.get(&goal.activity_type_id);
    let activity = activity_type.map_or(goal.activity_type_id.as_str(), |t| t.name.as_str());
    // Categorical targets read better as their option label.
    let target = activity_type
        .and_then(|t| t.value_shape.label_for(goal.target_value))
        .map_or_else(|| format!("{:.2}", goal.target_value), str::to_string);
    let remaining = a
        .days_remaining
        .map_or_else(|| "-".to_string(), |d| format!("{d}d"));

    format!(
        "[{status:<7}] {id} ({activity}, {window}/{tracking}) | {value:.2} / {target} | days met {met}/{count} | remaining {remaining} | {pct:.0}%",
        id = goal.id,
        window = goal.window,
        tracking = a.result.tracking,
        value = a.result.effective_value,
        met = a.result.days_met_target,
        count = a.result.day_count,
        pct = a.progress * 100.0,
    )
}

pub fn format_summary(summary: &StatusSummary) -> String {
    format!(
        "{} goals: {} met, {} ahead, {} on pace, {} behind, {} missed, {} pending",
        summary.total(),
        summary.met,
        summary.ahead,
        summary.on_pace,
        summary.behind,
        summary.missed,
        summary.pending
    )
}
