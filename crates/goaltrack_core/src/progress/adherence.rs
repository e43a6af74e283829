//! Adherence computations: streak, completion rate and the month calendar.
//!
//! # Invariants
//! - Only a literal `true` value counts as completed for streak and rate.
//! - Calendar cell status uses the first entry found for that day.
//! - Completion rate divides an all-time numerator by the displayed month's
//!   length. The two scopes differ on purpose and must stay that way until
//!   product confirms otherwise.

use super::dates::{days_after, days_before, format_day};
use crate::model::{Entry, EntryId};
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Consecutive completed days ending today.
///
/// Completed dates are walked newest first. A date equal to the expected day
/// extends the streak, a later date (duplicate or future) is skipped, and an
/// earlier one is a gap that ends the walk.
pub fn streak(entries: &[Entry], today: NaiveDate) -> u32 {
    let mut completed: Vec<NaiveDate> = entries
        .iter()
        .filter(|entry| entry.value.is_completed())
        .map(|entry| entry.date)
        .collect();
    completed.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 0u32;
    for date in completed {
        let Some(expected) = days_before(today, u64::from(streak)) else {
            break;
        };
        match date.cmp(&expected) {
            Ordering::Equal => streak += 1,
            Ordering::Greater => continue,
            Ordering::Less => break,
        }
    }
    streak
}

/// `round(completed / days_in_month * 100)`.
pub fn completion_rate(entries: &[Entry], month: CalendarMonth) -> u32 {
    let total_days = month.day_count();
    if total_days == 0 {
        return 0;
    }
    let completed = entries
        .iter()
        .filter(|entry| entry.value.is_completed())
        .count();
    let rate = (completed as f64 / f64::from(total_days) * 100.0).round();
    rate as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceStats {
    pub streak: u32,
    pub completion_rate: u32,
}

pub fn adherence_stats(entries: &[Entry], month: CalendarMonth, today: NaiveDate) -> AdherenceStats {
    AdherenceStats {
        streak: streak(entries, today),
        completion_rate: completion_rate(entries, month),
    }
}

/// Month shown by the adherence calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// Returns `None` when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(day: NaiveDate) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn day_count(self) -> u32 {
        let first = self.first_day();
        let next_first = self.next().first_day();
        u32::try_from(next_first.signed_duration_since(first).num_days()).unwrap_or(0)
    }

    /// Long heading, e.g. `October 2026`.
    pub fn title(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.day_count()).filter_map(move |offset| days_after(first, u64::from(offset)))
    }
}

impl Display for CalendarMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for CalendarMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for CalendarMonth {
    type Err = String;

    /// Parses `YYYY-MM`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid month `{value}`; expected YYYY-MM");
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DayStatus {
    Completed,
    Skipped,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    #[serde(serialize_with = "serialize_day")]
    pub date: NaiveDate,
    pub status: DayStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<EntryId>,
    pub is_today: bool,
    /// Future days are shown but cannot be clicked.
    pub disabled: bool,
}

/// One slot of a Sunday-first, seven-column month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalendarCell {
    Blank,
    Day(DayCell),
}

/// Builds the calendar grid for `month`: leading blanks up to the weekday of
/// the 1st, then one cell per day.
pub fn calendar_grid(entries: &[Entry], month: CalendarMonth, today: NaiveDate) -> Vec<CalendarCell> {
    let leading = month.first_day().weekday().num_days_from_sunday() as usize;
    let mut cells = Vec::with_capacity(leading + month.day_count() as usize);
    cells.extend(std::iter::repeat(CalendarCell::Blank).take(leading));

    for day in month.days() {
        let entry = entries.iter().find(|entry| entry.date == day);
        let status = match entry {
            None => DayStatus::None,
            Some(entry) if entry.value.is_truthy() => DayStatus::Completed,
            Some(_) => DayStatus::Skipped,
        };
        cells.push(CalendarCell::Day(DayCell {
            date: day,
            status,
            entry_id: entry.map(|entry| entry.id.clone()),
            is_today: day == today,
            disabled: day > today,
        }));
    }
    cells
}

fn serialize_day<S: Serializer>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_day(*day))
}
