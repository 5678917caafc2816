//! tally-core: habit activity model and the goal progress evaluation engine

pub mod activity;
pub mod aggregate;
pub mod engine;
pub mod goal;
pub mod log;
pub mod period;
pub mod select;
pub mod status;
pub mod time;
pub mod tracking;

pub use activity::{ActivityCatalog, ActivityType, DiscreteOption, InputStyle, Polarity, ValueShape};
pub use aggregate::{aggregate_window, day_matches, WindowStats};
pub use engine::{
    assess, assess_all, classify_status, days_remaining, evaluate, progress_fraction,
    GoalAssessment, StatusSummary,
};
pub use goal::{DateWindowKind, Goal, TrackingKind};
pub use log::ActivityLog;
pub use period::{resolve_window, Window};
pub use select::EffectiveValueResult;
pub use status::{newly_met, GoalStatus};
pub use tracking::effective_tracking;
