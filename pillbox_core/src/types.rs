//! Core domain types for the Pillbox system.
//!
//! This module defines the fundamental types used throughout the system:
//! - The creation record that seeds an inventory
//! - Raw (externally supplied) and normalized events
//! - Running state carried through the fold
//! - Ledger entries

use crate::calendar::CalendarDay;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// Creation Record
// ============================================================================

/// The seed of an inventory: the first day, the starting dose and the
/// pills on hand.
///
/// It must be the chronologically earliest event of a history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Created {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date: NaiveDateTime,
    pub amount: i64,
    pub per_day: i64,
}

impl Created {
    pub fn day(&self) -> CalendarDay {
        CalendarDay::of(self.date)
    }
}

// ============================================================================
// Event Types
// ============================================================================

/// An event supplied by the caller.
///
/// End-of-day markers are synthesized during normalization and have no
/// variant here, so they can never arrive as input.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawEvent {
    /// Pills added to the inventory
    Restock {
        #[serde(deserialize_with = "timestamp::deserialize")]
        date: NaiveDateTime,
        amount: i64,
    },
    /// New daily dose, effective from the moment it is applied
    DoseChanged {
        #[serde(deserialize_with = "timestamp::deserialize")]
        date: NaiveDateTime,
        per_day: i64,
    },
}

impl RawEvent {
    pub fn date(&self) -> NaiveDateTime {
        match self {
            RawEvent::Restock { date, .. } | RawEvent::DoseChanged { date, .. } => *date,
        }
    }

    pub fn day(&self) -> CalendarDay {
        CalendarDay::of(self.date())
    }
}

/// An event of the normalized sequence
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Restock {
        #[serde(deserialize_with = "timestamp::deserialize")]
        date: NaiveDateTime,
        amount: i64,
    },
    DoseChanged {
        #[serde(deserialize_with = "timestamp::deserialize")]
        date: NaiveDateTime,
        per_day: i64,
    },
    /// Closes a calendar day; the consumed amount comes from the running
    /// dose, not from the event.
    #[serde(rename = "day_end")]
    EndOfDay {
        #[serde(deserialize_with = "timestamp::deserialize")]
        date: NaiveDateTime,
    },
}

impl Event {
    /// The synthesized marker closing `day`
    pub fn end_of_day(day: CalendarDay) -> Self {
        Event::EndOfDay {
            date: day.end_of_day(),
        }
    }

    pub fn date(&self) -> NaiveDateTime {
        match self {
            Event::Restock { date, .. }
            | Event::DoseChanged { date, .. }
            | Event::EndOfDay { date } => *date,
        }
    }

    pub fn day(&self) -> CalendarDay {
        CalendarDay::of(self.date())
    }

    pub fn is_end_of_day(&self) -> bool {
        matches!(self, Event::EndOfDay { .. })
    }
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        match raw {
            RawEvent::Restock { date, amount } => Event::Restock { date, amount },
            RawEvent::DoseChanged { date, per_day } => Event::DoseChanged { date, per_day },
        }
    }
}

impl From<&RawEvent> for Event {
    fn from(raw: &RawEvent) -> Self {
        Event::from(raw.clone())
    }
}

// ============================================================================
// State and Ledger Types
// ============================================================================

/// State carried through one fold.
///
/// Each fold owns its own value; `today` is replaced, never mutated in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunningState {
    pub today: CalendarDay,
    pub dose_per_day: i64,
    pub pills_left: i64,
    /// Days closed so far; the next ledger entry's index
    pub days_closed: u32,
}

impl From<&Created> for RunningState {
    fn from(created: &Created) -> Self {
        Self {
            today: created.day(),
            dose_per_day: created.per_day,
            pills_left: created.amount,
            days_closed: 0,
        }
    }
}

/// One ledger entry: pills remaining at the close of a day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Day {
    /// Zero-based offset from the creation day
    pub index: u32,
    pub date: NaiveDate,
    /// May be negative once the inventory has run out
    pub amount: i64,
}

// ============================================================================
// Timestamp parsing
// ============================================================================

/// Accepts either a full local timestamp (`2024-01-15T10:30:00`) or a bare
/// date (`2024-01-15`, read as midnight).
pub(crate) mod timestamp {
    use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {s}")))
    }

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        s.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| s.parse::<NaiveDate>().ok().map(|d| d.and_time(NaiveTime::MIN)))
            // Day numbers are only ordered from year 1
            .filter(|ts| ts.year() >= 1)
    }
}
