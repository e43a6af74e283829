//! Goal domain model.
//!
//! # Responsibility
//! - Define the goal record and its four configuration variants.
//! - Reject goals whose declared `type` disagrees with their config payload.
//!
//! # Invariants
//! - `Goal::kind == Goal::config.goal_type()` for every deserialized goal.
//! - Milestones belong to exactly one goal and keep insertion order.
//! - Config is a closed sum type keyed by `type`, never a free-form map.

use super::new_record_id;
use super::validation::{require_finite, require_id, require_text, ModelValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable goal identifier (client timestamp or UUID string).
pub type GoalId = String;

/// Closed set of tracked goal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    /// Measured quantity moving toward a target (weight, savings).
    Numeric,
    /// Boolean done / not-done per day.
    Adherence,
    /// Count of occurrences per timeframe.
    Frequency,
    /// Time spent per timeframe.
    Duration,
}

impl GoalType {
    /// Wire name, as stored in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Adherence => "adherence",
            Self::Frequency => "frequency",
            Self::Duration => "duration",
        }
    }

    /// Capitalized label for list views.
    pub fn label(self) -> &'static str {
        match self {
            Self::Numeric => "Numeric",
            Self::Adherence => "Adherence",
            Self::Frequency => "Frequency",
            Self::Duration => "Duration",
        }
    }
}

impl Display for GoalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way a numeric goal should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyTimeframe {
    Daily,
    Weekly,
    Monthly,
}

impl FrequencyTimeframe {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl Display for FrequencyTimeframe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationTimeframe {
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Minutes,
    Hours,
}

impl DurationUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
        }
    }
}

impl Display for DurationUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Config for [`GoalType::Numeric`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericConfig {
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_value: Option<f64>,
    pub direction: Direction,
    /// Change per week, e.g. `-2.0` for losing two units a week.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_rate: Option<f64>,
}

impl NumericConfig {
    /// Weekly rate used for projections. A zero rate projects nothing.
    pub fn projection_rate(&self) -> Option<f64> {
        self.target_rate.filter(|rate| *rate != 0.0)
    }

    /// Target as a chart reference value. A zero target draws no line and
    /// does not widen the axis.
    pub fn reference_target(&self) -> Option<f64> {
        self.target.filter(|target| *target != 0.0)
    }
}

/// Config for [`GoalType::Adherence`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_days_per_week: Option<u32>,
}

/// Config for [`GoalType::Frequency`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyConfig {
    pub target_count: u32,
    pub timeframe: FrequencyTimeframe,
}

/// Config for [`GoalType::Duration`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationConfig {
    pub unit: DurationUnit,
    pub target_duration: f64,
    pub timeframe: DurationTimeframe,
}

/// Per-type goal configuration, internally tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GoalConfig {
    Numeric(NumericConfig),
    Adherence(AdherenceConfig),
    Frequency(FrequencyConfig),
    Duration(DurationConfig),
}

impl GoalConfig {
    pub fn goal_type(&self) -> GoalType {
        match self {
            Self::Numeric(_) => GoalType::Numeric,
            Self::Adherence(_) => GoalType::Adherence,
            Self::Frequency(_) => GoalType::Frequency,
            Self::Duration(_) => GoalType::Duration,
        }
    }

    /// Unit appended to status lines; adherence and frequency have none.
    pub fn unit_label(&self) -> Option<&str> {
        match self {
            Self::Numeric(config) => Some(config.unit.as_str()),
            Self::Duration(config) => Some(config.unit.as_str()),
            Self::Adherence(_) | Self::Frequency(_) => None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        match self {
            Self::Numeric(config) => {
                for (field, value) in [
                    ("target", config.target),
                    ("startValue", config.start_value),
                    ("targetRate", config.target_rate),
                ] {
                    if let Some(value) = value {
                        require_finite(field, value)?;
                    }
                }
                Ok(())
            }
            Self::Adherence(_) => Ok(()),
            Self::Frequency(config) => {
                if config.target_count == 0 {
                    return Err(ModelValidationError::ZeroTargetCount);
                }
                Ok(())
            }
            Self::Duration(config) => {
                require_finite("targetDuration", config.target_duration)?;
                if config.target_duration < 0.0 {
                    return Err(ModelValidationError::NegativeTargetDuration(
                        config.target_duration,
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Labeled reference value drawn on a numeric goal's chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(default = "new_record_id")]
    pub id: String,
    pub value: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved_date: Option<String>,
}

impl Milestone {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            value,
            label: label.into(),
            achieved: None,
            achieved_date: None,
        }
    }

    pub fn is_achieved(&self) -> bool {
        self.achieved.unwrap_or(false)
    }
}

/// Tracked objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "GoalWire")]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Serialized as `type` to match the stored schema.
    #[serde(rename = "type")]
    pub kind: GoalType,
    pub created_at: DateTime<Utc>,
    pub config: GoalConfig,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// Unchecked wire shape; converted through `TryFrom` so a type/config
/// mismatch fails deserialization instead of reaching the engine.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalWire {
    #[serde(default = "new_record_id")]
    id: GoalId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type")]
    kind: GoalType,
    created_at: DateTime<Utc>,
    config: GoalConfig,
    #[serde(default)]
    milestones: Vec<Milestone>,
}

impl TryFrom<GoalWire> for Goal {
    type Error = ModelValidationError;

    fn try_from(wire: GoalWire) -> Result<Self, Self::Error> {
        let config_type = wire.config.goal_type();
        if wire.kind != config_type {
            return Err(ModelValidationError::GoalTypeMismatch {
                declared: wire.kind,
                config: config_type,
            });
        }
        Ok(Self {
            id: wire.id,
            name: wire.name,
            description: wire.description,
            kind: wire.kind,
            created_at: wire.created_at,
            config: wire.config,
            milestones: wire.milestones,
        })
    }
}

impl Goal {
    /// Creates a goal with a generated id; `kind` follows the config variant.
    pub fn new(name: impl Into<String>, config: GoalConfig, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            description: None,
            kind: config.goal_type(),
            created_at,
            config,
            milestones: Vec::new(),
        }
    }

    /// Checks structural invariants before persistence.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_id("goal", &self.id)?;
        require_text("goal", "name", &self.name)?;
        let config_type = self.config.goal_type();
        if self.kind != config_type {
            return Err(ModelValidationError::GoalTypeMismatch {
                declared: self.kind,
                config: config_type,
            });
        }
        self.config.validate()?;
        for milestone in &self.milestones {
            require_id("milestone", &milestone.id)?;
            require_finite("milestone value", milestone.value)?;
        }
        Ok(())
    }

    pub fn numeric_config(&self) -> Option<&NumericConfig> {
        match &self.config {
            GoalConfig::Numeric(config) => Some(config),
            _ => None,
        }
    }
}
