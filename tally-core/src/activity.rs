//! Activity type descriptors: what a trackable quantity looks like and which
//! direction counts as progress.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether higher, lower, or exact values are desirable for an activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    #[default]
    Positive,
    Negative,
    Neutral,
}

/// How a continuous range is entered in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputStyle {
    /// Bounded slider; each day is a reading.
    #[default]
    Slider,
    /// Unbounded counter; each tap adds to the day's total.
    Increment,
}

/// One labelled choice of a discrete activity (e.g. mood "Good" = 2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteOption {
    pub label: String,
    pub value: f64,
}

/// Shape of the values an activity accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValueShape {
    ContinuousRange {
        min: f64,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default = "default_step")]
        step: f64,
        #[serde(default)]
        input: InputStyle,
    },
    DiscreteOptions {
        options: Vec<DiscreteOption>,
    },
    BinaryToggle,
    FixedAmount {
        amount: f64,
    },
}

fn default_step() -> f64 {
    1.0
}

impl ValueShape {
    /// Discrete values are categorical codes, not magnitudes.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            ValueShape::DiscreteOptions { .. } | ValueShape::BinaryToggle
        )
    }

    /// Unbounded additive counter (a continuous range entered by increments).
    pub fn is_increment(&self) -> bool {
        matches!(
            self,
            ValueShape::ContinuousRange {
                input: InputStyle::Increment,
                ..
            }
        )
    }

    pub fn is_fixed_amount(&self) -> bool {
        matches!(self, ValueShape::FixedAmount { .. })
    }

    /// Label for a logged value, when the shape has one.
    pub fn label_for(&self, value: f64) -> Option<&str> {
        match self {
            ValueShape::DiscreteOptions { options } => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.label.as_str()),
            ValueShape::BinaryToggle if value == 1.0 => Some("yes"),
            ValueShape::BinaryToggle if value == 0.0 => Some("no"),
            _ => None,
        }
    }
}

/// A user-defined trackable activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityType {
    pub id: String,
    pub name: String,
    pub value_shape: ValueShape,
    #[serde(default)]
    pub polarity: Polarity,
}

impl ActivityType {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value_shape: ValueShape) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value_shape,
            polarity: Polarity::Positive,
        }
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn is_discrete(&self) -> bool {
        self.value_shape.is_discrete()
    }
}

/// Read-only `id -> descriptor` lookup, loaded elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ActivityCatalog {
    types: HashMap<String, ActivityType>,
}

impl ActivityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, activity: ActivityType) {
        self.types.insert(activity.id.clone(), activity);
    }

    pub fn get(&self, id: &str) -> Option<&ActivityType> {
        self.types.get(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<ActivityType> for ActivityCatalog {
    fn from_iter<I: IntoIterator<Item = ActivityType>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for activity in iter {
            catalog.insert(activity);
        }
        catalog
    }
}
