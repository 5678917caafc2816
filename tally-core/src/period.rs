//! Period resolution: which dates a goal is aggregated over, how far through
//! its natural period the reference date is, and how many days remain.
//!
//! Every function takes the reference date explicitly; nothing here reads the
//! wall clock.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::goal::{DateWindowKind, Goal};

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// True when `start > end`, e.g. a date range that has not begun yet.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of calendar days covered (0 for an empty window).
    pub fn len_days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }
}

/// Monday of the ISO week containing `day`.
pub fn week_start(day: NaiveDate) -> Option<NaiveDate> {
    day.checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_monday())))
}

/// Sunday of the ISO week containing `day`.
pub fn week_end(day: NaiveDate) -> Option<NaiveDate> {
    week_start(day)?.checked_add_days(Days::new(6))
}

pub fn month_start(day: NaiveDate) -> Option<NaiveDate> {
    day.with_day(1)
}

pub fn month_end(day: NaiveDate) -> Option<NaiveDate> {
    month_start(day)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Evaluation window `[start, end]` for `goal` as of `today`.
///
/// `None` means "not applicable": a `byDate` goal without a target date or a
/// `dateRange` goal without both bounds.
pub fn resolve_window(goal: &Goal, today: NaiveDate) -> Option<Window> {
    match goal.window {
        DateWindowKind::Daily => Some(Window::single(today)),
        DateWindowKind::Weekly => Some(Window::new(week_start(today)?, today)),
        DateWindowKind::Monthly => Some(Window::new(month_start(today)?, today)),
        DateWindowKind::ByDate => {
            let target = goal.target_date?;
            Some(Window::new(goal.created_at, today.min(target)))
        }
        DateWindowKind::DateRange => {
            let (start, end) = (goal.start_date?, goal.end_date?);
            Some(Window::new(start, today.min(end)))
        }
    }
}

/// The full period the goal's target applies to, independent of how much of
/// it has passed: a whole week, a whole month, creation through target date.
pub fn natural_period(goal: &Goal, today: NaiveDate) -> Option<Window> {
    match goal.window {
        DateWindowKind::Daily => Some(Window::single(today)),
        DateWindowKind::Weekly => Some(Window::new(week_start(today)?, week_end(today)?)),
        DateWindowKind::Monthly => Some(Window::new(month_start(today)?, month_end(today)?)),
        DateWindowKind::ByDate => Some(Window::new(goal.created_at, goal.target_date?)),
        DateWindowKind::DateRange => Some(Window::new(goal.start_date?, goal.end_date?)),
    }
}

/// `today` is past the window's natural end. Rolling windows (daily, weekly,
/// monthly) always contain `today` and so never expire.
pub fn window_expired(goal: &Goal, today: NaiveDate) -> bool {
    natural_period(goal, today).is_some_and(|period| today > period.end)
}

/// The part of the natural period that counts toward pace: from the day after
/// the goal was created (or the period start, whichever is later) through the
/// period end. Empty when the goal was created on the period's last day.
pub fn countable_period(goal: &Goal, today: NaiveDate) -> Option<Window> {
    let period = natural_period(goal, today)?;
    let after_creation = goal.created_at.succ_opt()?;
    Some(Window::new(period.start.max(after_creation), period.end))
}

/// Days of the countable period up to and including `today`. A goal has zero
/// elapsed time on the day it is created.
pub fn elapsed_days(goal: &Goal, today: NaiveDate) -> i64 {
    let Some(countable) = countable_period(goal, today) else {
        return 0;
    };
    let elapsed = (today.min(countable.end) - countable.start).num_days() + 1;
    elapsed.clamp(0, countable.len_days())
}

/// Fraction `[0, 1]` of the countable period elapsed as of `today`; reaches
/// 1.0 on the period's last day.
pub fn elapsed_fraction(goal: &Goal, today: NaiveDate) -> f64 {
    let countable_len = countable_period(goal, today).map_or(0, |p| p.len_days());
    if countable_len <= 0 {
        return 0.0;
    }
    (elapsed_days(goal, today) as f64 / countable_len as f64).clamp(0.0, 1.0)
}

/// Days until the goal's next evaluation boundary, never negative.
///
/// `None` only when the goal lacks the dates its window kind requires.
pub fn days_remaining(goal: &Goal, today: NaiveDate) -> Option<i64> {
    let boundary = match goal.window {
        DateWindowKind::Daily => return Some(0),
        DateWindowKind::Weekly => week_end(today)?,
        DateWindowKind::Monthly => month_end(today)?,
        DateWindowKind::ByDate => goal.target_date?,
        DateWindowKind::DateRange => goal.end_date?,
    };
    Some((boundary - today).num_days().max(0))
}
