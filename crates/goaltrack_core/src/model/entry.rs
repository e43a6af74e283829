//! Entry domain model.
//!
//! # Responsibility
//! - Define one dated observation against a goal.
//! - Model the `number | boolean` value union as a Rust sum type.
//!
//! # Invariants
//! - `date` is a calendar day (`yyyy-MM-dd`), `timestamp` an RFC 3339 instant.
//! - Boolean values belong to adherence goals, numbers to the other three.
//!   The engine treats a mismatch as a precondition violation, not an error.
//! - Several entries may share one goal and date.

use super::goal::{GoalId, GoalType};
use super::new_record_id;
use super::validation::{require_finite, require_id, ModelValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type EntryId = String;

/// Recorded value; JSON `true`/`false` or a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    Flag(bool),
    Number(f64),
}

impl EntryValue {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(value),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Flag(_) => None,
        }
    }

    /// Strict completion check: only a literal `true` counts.
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Flag(true))
    }

    /// Loose truthiness used for calendar cell coloring.
    pub fn is_truthy(self) -> bool {
        match self {
            Self::Flag(value) => value,
            Self::Number(value) => value != 0.0 && !value.is_nan(),
        }
    }

    /// Whether this value has the shape expected by `kind`.
    pub fn fits(self, kind: GoalType) -> bool {
        match kind {
            GoalType::Adherence => matches!(self, Self::Flag(_)),
            GoalType::Numeric | GoalType::Frequency | GoalType::Duration => {
                matches!(self, Self::Number(_))
            }
        }
    }
}

impl Display for EntryValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for EntryValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<f64> for EntryValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default = "new_record_id")]
    pub id: EntryId,
    pub goal_id: GoalId,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub value: EntryValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Entry {
    pub fn new(
        goal_id: impl Into<GoalId>,
        date: NaiveDate,
        timestamp: DateTime<Utc>,
        value: impl Into<EntryValue>,
    ) -> Self {
        Self {
            id: new_record_id(),
            goal_id: goal_id.into(),
            date,
            timestamp,
            value: value.into(),
            note: None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_id("entry", &self.id)?;
        require_id("entry goal", &self.goal_id)?;
        if let EntryValue::Number(value) = self.value {
            require_finite("entry value", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_deserializes_bool_and_number() {
        let flag: EntryValue = serde_json::from_value(json!(true)).unwrap();
        let number: EntryValue = serde_json::from_value(json!(72.5)).unwrap();
        assert_eq!(flag, EntryValue::Flag(true));
        assert_eq!(number, EntryValue::Number(72.5));
    }

    #[test]
    fn integer_values_render_without_fraction() {
        assert_eq!(EntryValue::Number(180.0).to_string(), "180");
        assert_eq!(EntryValue::Number(72.5).to_string(), "72.5");
    }

    #[test]
    fn only_literal_true_is_completed() {
        assert!(EntryValue::Flag(true).is_completed());
        assert!(!EntryValue::Flag(false).is_completed());
        assert!(!EntryValue::Number(1.0).is_completed());
        assert!(EntryValue::Number(1.0).is_truthy());
    }
}
