//! Activity log snapshot: date -> (activity id -> value).
//!
//! The log is owned and mutated by the persistence layer; the engine only ever
//! reads a snapshot handed to it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::period::Window;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    days: BTreeMap<NaiveDate, HashMap<String, f64>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value. A second entry for the same activity on the same day
    /// replaces the first.
    pub fn insert(&mut self, date: NaiveDate, activity_type_id: impl Into<String>, value: f64) {
        self.days
            .entry(date)
            .or_default()
            .insert(activity_type_id.into(), value);
    }

    pub fn with_entry(mut self, date: NaiveDate, activity_type_id: &str, value: f64) -> Self {
        self.insert(date, activity_type_id, value);
        self
    }

    pub fn value_on(&self, date: NaiveDate, activity_type_id: &str) -> Option<f64> {
        self.days.get(&date)?.get(activity_type_id).copied()
    }

    /// Logged values for one activity inside `window`, in date order.
    /// An inverted window yields nothing.
    pub fn values_between<'a>(
        &'a self,
        window: Window,
        activity_type_id: &'a str,
    ) -> impl Iterator<Item = (NaiveDate, f64)> + 'a {
        let range = if window.is_empty() {
            None
        } else {
            Some(self.days.range(window.start..=window.end))
        };
        range
            .into_iter()
            .flatten()
            .filter_map(move |(date, values)| values.get(activity_type_id).map(|v| (*date, *v)))
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
