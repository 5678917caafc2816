//! Effective value selection: the one number a goal's target is compared with.

use serde::{Deserialize, Serialize};

use crate::activity::{Polarity, ValueShape};
use crate::aggregate::{day_matches, WindowStats};
use crate::goal::TrackingKind;
use crate::period::Window;

/// Engine output for one goal. Ephemeral: recomputed on every query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveValueResult {
    /// Comparable number or ratio.
    pub effective_value: f64,
    /// True only if every logged day in the window matched; false when nothing
    /// was logged.
    pub all_days_met: bool,
    pub days_met_target: u32,
    pub day_count: u32,
    pub sum: f64,
    pub average: f64,
    /// Aggregation after tracking overrides.
    pub tracking: TrackingKind,
    /// `None` when the window could not be resolved.
    pub window: Option<Window>,
}

impl EffectiveValueResult {
    /// The "data not ready" result: nothing logged, nothing met.
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Share of logged days that matched, 0 when nothing was logged.
    pub fn match_ratio(&self) -> f64 {
        if self.day_count > 0 {
            f64::from(self.days_met_target) / f64::from(self.day_count)
        } else {
            0.0
        }
    }
}

/// Pick the comparable value out of the window statistics.
pub fn select_effective_value(stats: &WindowStats, kind: TrackingKind, shape: &ValueShape) -> f64 {
    if kind == TrackingKind::Sum {
        return stats.sum;
    }

    if shape.is_discrete() {
        if kind == TrackingKind::Absolute {
            return f64::from(stats.days_met_target);
        }
        // Ratio of matching days, not an average of category codes.
        return if stats.count > 0 {
            f64::from(stats.days_met_target) / f64::from(stats.count)
        } else {
            0.0
        };
    }

    match shape {
        ValueShape::ContinuousRange { .. } => stats.average,
        // Fixed-amount entries: how many times it was logged.
        _ => f64::from(stats.count),
    }
}

pub fn result_from_stats(
    stats: &WindowStats,
    kind: TrackingKind,
    shape: &ValueShape,
    window: Window,
) -> EffectiveValueResult {
    EffectiveValueResult {
        effective_value: select_effective_value(stats, kind, shape),
        all_days_met: stats.all_days_met,
        days_met_target: stats.days_met_target,
        day_count: stats.count,
        sum: stats.sum,
        average: stats.average,
        tracking: kind,
        window: Some(window),
    }
}

/// Daily goals do not aggregate: the day's raw value is the effective value
/// (0 when nothing was logged) and the per-day match decides the rest.
/// A daily `Count` goal reports the occurrence (0 or 1) instead.
pub fn select_daily_value(
    value: Option<f64>,
    target: f64,
    kind: TrackingKind,
    is_discrete: bool,
    polarity: Polarity,
    day: Window,
) -> EffectiveValueResult {
    let matched = value.is_some_and(|v| day_matches(v, target, is_discrete, polarity));
    let day_count = u32::from(value.is_some());
    let raw = value.unwrap_or(0.0);

    EffectiveValueResult {
        effective_value: if kind == TrackingKind::Count {
            f64::from(day_count)
        } else {
            raw
        },
        all_days_met: matched,
        days_met_target: u32::from(matched),
        day_count,
        sum: raw,
        average: raw,
        tracking: kind,
        window: Some(day),
    }
}
