//! Structural validation errors shared by all model records.

use super::goal::GoalType;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation error raised before a record is persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Record id is empty or whitespace.
    BlankId { record: &'static str },
    /// A required text field is empty or whitespace.
    BlankField {
        record: &'static str,
        field: &'static str,
    },
    /// A numeric field holds NaN or infinity.
    NonFiniteNumber { field: &'static str },
    /// Goal `type` disagrees with the `type` tag of its config.
    GoalTypeMismatch { declared: GoalType, config: GoalType },
    /// Frequency goals need at least one occurrence per timeframe.
    ZeroTargetCount,
    /// Duration targets cannot be negative.
    NegativeTargetDuration(f64),
    /// Tag color is not a `#rrggbb` hex string.
    InvalidColor(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId { record } => write!(f, "{record} id must not be blank"),
            Self::BlankField { record, field } => {
                write!(f, "{record} {field} must not be blank")
            }
            Self::NonFiniteNumber { field } => write!(f, "{field} must be a finite number"),
            Self::GoalTypeMismatch { declared, config } => write!(
                f,
                "goal type `{declared}` does not match config type `{config}`"
            ),
            Self::ZeroTargetCount => write!(f, "frequency targetCount must be at least 1"),
            Self::NegativeTargetDuration(value) => {
                write!(f, "duration targetDuration must be >= 0, got {value}")
            }
            Self::InvalidColor(value) => {
                write!(f, "tag color `{value}` must be a #rrggbb hex value")
            }
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_id(record: &'static str, id: &str) -> Result<(), ModelValidationError> {
    if id.trim().is_empty() {
        return Err(ModelValidationError::BlankId { record });
    }
    Ok(())
}

pub(crate) fn require_text(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankField { record, field });
    }
    Ok(())
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), ModelValidationError> {
    if !value.is_finite() {
        return Err(ModelValidationError::NonFiniteNumber { field });
    }
    Ok(())
}
