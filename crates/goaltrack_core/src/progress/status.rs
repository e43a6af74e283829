//! Current-state summary shown for a goal.

use crate::model::{Entry, EntryValue, FrequencyTimeframe};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// What a goal card shows as its current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GoalStatus {
    /// The goal has no entries at all.
    NoEntries,
    /// Latest entry by timestamp (numeric and duration goals).
    Latest { value: EntryValue, unit: String },
    /// Whether today's entry is marked done (adherence goals).
    Adherence {
        #[serde(rename = "doneToday")]
        done_today: bool,
    },
    /// All-time entry count next to the configured timeframe (frequency goals).
    Count {
        count: usize,
        timeframe: FrequencyTimeframe,
    },
}

impl Display for GoalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEntries => f.write_str("No entries yet"),
            Self::Latest { value, unit } => write!(f, "{value} {unit}"),
            Self::Adherence { done_today: true } => f.write_str("Done today"),
            Self::Adherence { done_today: false } => f.write_str("Not done today"),
            Self::Count { count, timeframe } => write!(f, "{count} times ({timeframe})"),
        }
    }
}

/// Entry with the greatest timestamp. Ties keep the earliest-listed entry.
pub fn latest_entry(entries: &[Entry]) -> Option<&Entry> {
    entries.iter().reduce(|best, candidate| {
        if candidate.timestamp > best.timestamp {
            candidate
        } else {
            best
        }
    })
}

/// First entry dated `day`, in list order.
pub fn entry_on(entries: &[Entry], day: NaiveDate) -> Option<&Entry> {
    entries.iter().find(|entry| entry.date == day)
}
